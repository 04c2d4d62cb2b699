//! Tests for the get_parts endpoint.

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use fitment::{
    model::catalog::PartCategoryDto,
    server::{controller::lookup::get_parts, model::app::AppState},
};

use super::*;

/// Tests that all part categories come back ordered by name.
///
/// Expected: 200 OK with every stored part category
#[tokio::test]
async fn lists_all_parts_ordered() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_part("Screen")
        .with_part("Battery")
        .with_part("Frame")
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let result = get_parts(State(state)).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let parts: Vec<PartCategoryDto> = body_json(resp).await;
    let names: Vec<&str> = parts.iter().map(|part| part.name.as_str()).collect();
    assert_eq!(names, vec!["Battery", "Frame", "Screen"]);

    Ok(())
}

/// Tests that an empty catalog yields an empty list.
///
/// Expected: 200 OK with no part categories
#[tokio::test]
async fn empty_list_for_empty_catalog() -> Result<(), TestError> {
    let test = TestBuilder::new().with_catalog_tables().build().await?;
    let state: AppState = test.to_app_state();

    let result = get_parts(State(state)).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let parts: Vec<PartCategoryDto> = body_json(resp).await;
    assert!(parts.is_empty());

    Ok(())
}
