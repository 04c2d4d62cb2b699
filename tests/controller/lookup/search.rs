//! Tests for the search_catalog endpoint.
//!
//! This module verifies the combined device-and-group search, including the
//! blank query shortcut, part narrowing, and the silent empty result for an
//! unknown part slug.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use fitment::{
    model::catalog::SearchResultsDto,
    server::{
        controller::lookup::{search_catalog, SearchQuery},
        model::app::AppState,
    },
};

use super::*;

/// Tests that a blank query yields empty results.
///
/// Expected: 200 OK with no devices and no groups
#[tokio::test]
async fn empty_results_for_blank_query() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_device("Realme", "C2", &[])
        .with_group("Frame", &["realme-c2"])
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let query = SearchQuery {
        q: None,
        part: None,
    };

    let resp = search_catalog(State(state), Query(query))
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::OK);

    let results: SearchResultsDto = body_json(resp).await;
    assert!(results.devices.is_empty());
    assert!(results.groups.is_empty());

    Ok(())
}

/// Tests that groups containing any resolved device are returned.
///
/// Expected: 200 OK with the device and every group it appears in
#[tokio::test]
async fn returns_devices_and_their_groups() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_device("Realme", "C2", &[])
        .with_device("Oppo", "A1k", &[])
        .with_group("Frame", &["realme-c2", "oppo-a1k"])
        .with_group("Screen", &["realme-c2"])
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let query = SearchQuery {
        q: Some("realme c2".to_string()),
        part: None,
    };

    let resp = search_catalog(State(state), Query(query))
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::OK);

    let results: SearchResultsDto = body_json(resp).await;
    assert!(!results.devices.is_empty());
    assert_eq!(results.devices[0].slug, "realme-c2");
    assert_eq!(results.groups.len(), 2);

    Ok(())
}

/// Tests that a part slug narrows the groups to that part.
///
/// Expected: 200 OK with only the narrowed part's groups
#[tokio::test]
async fn part_filter_narrows_groups() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_device("Realme", "C2", &[])
        .with_group("Frame", &["realme-c2"])
        .with_group("Screen", &["realme-c2"])
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let query = SearchQuery {
        q: Some("realme c2".to_string()),
        part: Some("screen".to_string()),
    };

    let resp = search_catalog(State(state), Query(query))
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::OK);

    let results: SearchResultsDto = body_json(resp).await;
    assert_eq!(results.groups.len(), 1);
    assert_eq!(results.groups[0].part.slug, "screen");

    Ok(())
}

/// Tests that an unknown part slug silently yields no groups.
///
/// Expected: 200 OK with resolved devices but an empty group list
#[tokio::test]
async fn unknown_part_yields_no_groups() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_device("Realme", "C2", &[])
        .with_group("Frame", &["realme-c2"])
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let query = SearchQuery {
        q: Some("realme c2".to_string()),
        part: Some("does-not-exist".to_string()),
    };

    let resp = search_catalog(State(state), Query(query))
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::OK);

    let results: SearchResultsDto = body_json(resp).await;
    assert!(!results.devices.is_empty());
    assert!(results.groups.is_empty());

    Ok(())
}
