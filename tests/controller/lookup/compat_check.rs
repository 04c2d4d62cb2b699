//! Tests for the check_compat endpoint.
//!
//! This module verifies the public compatibility check, including parameter
//! validation, the 404 for unknown parts, silent exclusion of unknown device
//! slugs, and the incompatible answer when nothing usable remains.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use fitment::{
    model::catalog::{CompatCheckDto, CreateGroupDto, DeviceDto},
    server::{
        controller::{
            admin::group::create_group,
            lookup::{autocomplete_devices, check_compat, AutocompleteQuery, CompatQuery},
        },
        model::app::AppState,
    },
};

use super::*;
use crate::controller::admin::admin_headers;

fn query(part: &str, devices: &str) -> CompatQuery {
    CompatQuery {
        part: Some(part.to_string()),
        devices: Some(devices.to_string()),
    }
}

/// Tests that missing parameters are rejected.
///
/// Expected: Err with 400 BAD_REQUEST response
#[tokio::test]
async fn bad_request_for_missing_parameters() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_device("Realme", "C2", &[])
        .with_group("Frame", &["realme-c2"])
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let empty = CompatQuery {
        part: None,
        devices: Some("realme-c2".to_string()),
    };

    let result = check_compat(State(state.clone()), Query(empty)).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let blank = CompatQuery {
        part: Some("frame".to_string()),
        devices: Some(" , ".to_string()),
    };

    let result = check_compat(State(state), Query(blank)).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Tests that an unknown part slug is rejected.
///
/// Expected: Err with 404 NOT_FOUND response
#[tokio::test]
async fn not_found_for_unknown_part() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_device("Realme", "C2", &[])
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let result = check_compat(State(state), Query(query("frame", "realme-c2"))).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Tests that devices sharing a group under the part check compatible.
///
/// Expected: 200 OK reporting compatible with the shared group
#[tokio::test]
async fn compatible_devices_share_group() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_device("Realme", "C2", &[])
        .with_device("Oppo", "A1k", &[])
        .with_group("Frame", &["realme-c2", "oppo-a1k"])
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let result = check_compat(State(state), Query(query("frame", "realme-c2,oppo-a1k"))).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let report: CompatCheckDto = body_json(resp).await;
    assert!(report.compatible);
    assert_eq!(report.shared_groups.len(), 1);
    assert_eq!(report.shared_groups[0].members.len(), 2);

    Ok(())
}

/// Tests that devices in different groups check incompatible.
///
/// Expected: 200 OK reporting incompatible with no shared groups
#[tokio::test]
async fn incompatible_devices_in_different_groups() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_device("Realme", "C2", &[])
        .with_device("Realme", "C30", &[])
        .with_group("Frame", &["realme-c2"])
        .with_group("Frame", &["realme-c30"])
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let result = check_compat(State(state), Query(query("frame", "realme-c2,realme-c30"))).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let report: CompatCheckDto = body_json(resp).await;
    assert!(!report.compatible);
    assert!(report.shared_groups.is_empty());

    Ok(())
}

/// Tests that unknown device slugs are silently excluded.
///
/// Expected: 200 OK judged on the known devices only
#[tokio::test]
async fn unknown_slugs_silently_excluded() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_device("Realme", "C2", &[])
        .with_device("Oppo", "A1k", &[])
        .with_group("Frame", &["realme-c2", "oppo-a1k"])
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let result = check_compat(
        State(state),
        Query(query("frame", "realme-c2,oppo-a1k,not-a-device")),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let report: CompatCheckDto = body_json(resp).await;
    assert!(report.compatible);

    Ok(())
}

/// Tests that a group curated over the admin surface drives autocomplete
/// and both compatibility answers.
///
/// Expected: 201 CREATED for the group, the misspelled query resolving to
/// the member, compatible for the pair, incompatible with an outsider
#[tokio::test]
async fn curated_group_answers_lookups() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_part("Frame")
        .with_device("Realme", "C2", &[])
        .with_device("Oppo", "A1k", &[])
        .with_device("Realme", "C30", &[])
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let created = create_group(
        State(state.clone()),
        admin_headers(),
        axum::Json(CreateGroupDto {
            part: "frame".to_string(),
            members: vec!["realme-c2".to_string(), "oppo-a1k".to_string()],
            note: None,
            source: None,
            tags: Vec::new(),
            confidence: None,
        }),
    )
    .await
    .map_err(|error| TestError::Fixture(error.to_string()))?
    .into_response();
    assert_eq!(created.status(), StatusCode::CREATED);

    let resp = autocomplete_devices(
        State(state.clone()),
        Query(AutocompleteQuery {
            q: Some("realmi c2".to_string()),
        }),
    )
    .await
    .into_response();
    let devices: Vec<DeviceDto> = body_json(resp).await;
    assert_eq!(devices[0].slug, "realme-c2");

    let result = check_compat(
        State(state.clone()),
        Query(query("frame", "realme-c2,oppo-a1k")),
    )
    .await;
    let report: CompatCheckDto = body_json(result.unwrap().into_response()).await;
    assert!(report.compatible);
    assert_eq!(report.shared_groups.len(), 1);

    let result = check_compat(State(state), Query(query("frame", "realme-c2,realme-c30"))).await;
    let report: CompatCheckDto = body_json(result.unwrap().into_response()).await;
    assert!(!report.compatible);

    Ok(())
}

/// Tests that an all-unknown device list reports incompatible.
///
/// Expected: 200 OK reporting incompatible
#[tokio::test]
async fn incompatible_when_no_devices_resolve() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_device("Realme", "C2", &[])
        .with_group("Frame", &["realme-c2"])
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let result = check_compat(State(state), Query(query("frame", "ghost-1,ghost-2"))).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let report: CompatCheckDto = body_json(resp).await;
    assert!(!report.compatible);
    assert!(report.shared_groups.is_empty());

    Ok(())
}
