//! Tests for the device admin endpoints.
//!
//! This module verifies on-the-fly brand creation, alias merging on repeated
//! creation, slug re-derivation on update, the alias endpoint, the delete
//! restriction for group members, and the brand-narrowed listing.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use fitment::{
    model::catalog::{AddAliasDto, CreateDeviceDto, DeviceDto, DeviceListDto, UpdateDeviceDto},
    server::{
        controller::admin::device::{
            add_device_alias, create_device, delete_device, list_devices, update_device,
            DevicePageQuery,
        },
        model::app::AppState,
    },
};

use super::*;

fn device_query(q: Option<&str>, brand: Option<&str>) -> DevicePageQuery {
    DevicePageQuery {
        page: None,
        per_page: None,
        q: q.map(str::to_string),
        brand: brand.map(str::to_string),
    }
}

/// Tests that creating a device creates its brand on the fly.
///
/// Expected: 201 CREATED with the brand attached
#[tokio::test]
async fn create_builds_brand_on_the_fly() -> Result<(), TestError> {
    let test = TestBuilder::new().with_catalog_tables().build().await?;
    let state: AppState = test.to_app_state();

    let result = create_device(
        State(state),
        admin_headers(),
        axum::Json(CreateDeviceDto {
            brand: "Realme".to_string(),
            name: "C2".to_string(),
            aliases: vec!["RMX1941".to_string()],
        }),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let device: DeviceDto = body_json(resp).await;
    assert_eq!(device.slug, "realme-c2");
    assert_eq!(device.normalized, "realme c2");
    assert_eq!(device.brand.slug, "realme");
    assert_eq!(device.aliases, vec!["RMX1941".to_string()]);

    Ok(())
}

/// Tests that recreating a device merges new aliases into the stored set.
///
/// Expected: 200 OK with both alias spellings
#[tokio::test]
async fn create_merges_aliases_for_existing_device() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_device("Realme", "C2", &["RMX1941"])
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let result = create_device(
        State(state),
        admin_headers(),
        axum::Json(CreateDeviceDto {
            brand: "Realme".to_string(),
            name: "C2".to_string(),
            aliases: vec!["Realme C2 2019".to_string()],
        }),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let device: DeviceDto = body_json(resp).await;
    assert_eq!(device.aliases.len(), 2);
    assert!(device.aliases.iter().any(|alias| alias == "RMX1941"));
    assert!(device.aliases.iter().any(|alias| alias == "Realme C2 2019"));

    Ok(())
}

/// Tests that renaming a device re-derives slug and normal form.
///
/// Expected: 200 OK with the new slug
#[tokio::test]
async fn update_rederives_slug() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_device("Realme", "C2", &[])
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let listing = list_devices(
        State(state.clone()),
        admin_headers(),
        Query(device_query(None, None)),
    )
    .await
    .map_err(|error| TestError::Fixture(error.to_string()))?
    .into_response();
    let devices: DeviceListDto = body_json(listing).await;
    let device = &devices.items[0];

    let result = update_device(
        State(state),
        admin_headers(),
        Path(device.id),
        axum::Json(UpdateDeviceDto {
            brand: None,
            name: Some("C2 Pro".to_string()),
            aliases: None,
        }),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let updated: DeviceDto = body_json(resp).await;
    assert_eq!(updated.slug, "realme-c2-pro");
    assert_eq!(updated.normalized, "realme c2 pro");

    Ok(())
}

/// Tests the alias endpoint records a new spelling.
///
/// Expected: 200 OK with the alias visible on the device
#[tokio::test]
async fn alias_endpoint_records_spelling() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_device("Realme", "C2", &[])
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let result = add_device_alias(
        State(state),
        admin_headers(),
        Path("realme-c2".to_string()),
        axum::Json(AddAliasDto {
            alias: "RMX1941".to_string(),
        }),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let device: DeviceDto = body_json(resp).await;
    assert_eq!(device.aliases, vec!["RMX1941".to_string()]);

    Ok(())
}

/// Tests that deletion is blocked while the device belongs to groups.
///
/// Expected: 409 CONFLICT, then 204 NO_CONTENT once unreferenced
#[tokio::test]
async fn delete_restricted_for_group_members() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_device("Realme", "C2", &[])
        .with_device("Oppo", "A1k", &[])
        .with_group("Frame", &["realme-c2"])
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let listing = list_devices(
        State(state.clone()),
        admin_headers(),
        Query(device_query(None, None)),
    )
    .await
    .map_err(|error| TestError::Fixture(error.to_string()))?
    .into_response();
    let devices: DeviceListDto = body_json(listing).await;

    let member = devices
        .items
        .iter()
        .find(|device| device.slug == "realme-c2")
        .ok_or_else(|| TestError::Fixture("missing device fixture".to_string()))?;
    let free = devices
        .items
        .iter()
        .find(|device| device.slug == "oppo-a1k")
        .ok_or_else(|| TestError::Fixture("missing device fixture".to_string()))?;

    let result = delete_device(State(state.clone()), admin_headers(), Path(member.id)).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let result = delete_device(State(state), admin_headers(), Path(free.id)).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    Ok(())
}

/// Tests the brand filter, including the unknown-brand empty page.
///
/// Expected: 200 OK narrowed to the brand, then 200 OK with an empty page
#[tokio::test]
async fn list_narrows_by_brand() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_device("Realme", "C2", &[])
        .with_device("Realme", "C30", &[])
        .with_device("Oppo", "A1k", &[])
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let result = list_devices(
        State(state.clone()),
        admin_headers(),
        Query(device_query(None, Some("realme"))),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let devices: DeviceListDto = body_json(resp).await;
    assert_eq!(devices.total, 2);
    assert!(devices.items.iter().all(|device| device.brand.slug == "realme"));

    let result = list_devices(
        State(state),
        admin_headers(),
        Query(device_query(None, Some("nokia"))),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let devices: DeviceListDto = body_json(resp).await;
    assert_eq!(devices.total, 0);
    assert!(devices.items.is_empty());

    Ok(())
}

/// Tests that the text filter matches the normal form of mixed-case input.
///
/// Expected: 200 OK with only the matching device
#[tokio::test]
async fn list_filters_by_normalized_text() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_device("Realme", "C2", &[])
        .with_device("Oppo", "A1k", &[])
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let result = list_devices(
        State(state),
        admin_headers(),
        Query(device_query(Some("  Oppo A1K "), None)),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let devices: DeviceListDto = body_json(resp).await;
    assert_eq!(devices.total, 1);
    assert_eq!(devices.items[0].slug, "oppo-a1k");

    Ok(())
}
