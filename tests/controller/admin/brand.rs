//! Tests for the brand admin endpoints.
//!
//! This module verifies the token gate, the get-or-create behavior of brand
//! creation, rename conflicts, the delete restriction while devices remain,
//! and the paged listing.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use fitment::{
    model::catalog::{BrandDto, BrandListDto, CreateBrandDto, UpdateBrandDto},
    server::{
        controller::admin::{
            brand::{create_brand, delete_brand, list_brands, update_brand},
            PageQuery,
        },
        model::app::AppState,
    },
};

use super::*;

fn page_query(q: Option<&str>) -> PageQuery {
    PageQuery {
        page: None,
        per_page: None,
        q: q.map(str::to_string),
    }
}

/// Tests that a missing Authorization header is rejected.
///
/// Expected: Err with 401 UNAUTHORIZED response
#[tokio::test]
async fn unauthorized_without_token() -> Result<(), TestError> {
    let test = TestBuilder::new().with_catalog_tables().build().await?;
    let state: AppState = test.to_app_state();

    let result = create_brand(
        State(state),
        HeaderMap::new(),
        axum::Json(CreateBrandDto {
            name: "Realme".to_string(),
        }),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Tests that a wrong bearer token is rejected.
///
/// Expected: Err with 403 FORBIDDEN response
#[tokio::test]
async fn forbidden_with_wrong_token() -> Result<(), TestError> {
    let test = TestBuilder::new().with_catalog_tables().build().await?;
    let state: AppState = test.to_app_state();

    let result = create_brand(
        State(state),
        wrong_headers(),
        axum::Json(CreateBrandDto {
            name: "Realme".to_string(),
        }),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}

/// Tests that creating the same brand twice returns the first record.
///
/// Expected: 201 CREATED then 200 OK with the same id
#[tokio::test]
async fn create_is_idempotent() -> Result<(), TestError> {
    let test = TestBuilder::new().with_catalog_tables().build().await?;
    let state: AppState = test.to_app_state();

    let result = create_brand(
        State(state.clone()),
        admin_headers(),
        axum::Json(CreateBrandDto {
            name: "Realme".to_string(),
        }),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: BrandDto = body_json(resp).await;
    assert_eq!(created.slug, "realme");

    let result = create_brand(
        State(state),
        admin_headers(),
        axum::Json(CreateBrandDto {
            name: " REALME ".to_string(),
        }),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let existing: BrandDto = body_json(resp).await;
    assert_eq!(existing.id, created.id);

    Ok(())
}

/// Tests that renaming onto a taken name conflicts.
///
/// Expected: 200 OK for the rename, 409 CONFLICT for the collision
#[tokio::test]
async fn update_renames_and_detects_conflicts() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_brand("Realme")
        .with_brand("Oppo")
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let listing = list_brands(State(state.clone()), admin_headers(), Query(page_query(None)))
        .await
        .map_err(|error| TestError::Fixture(error.to_string()))?
        .into_response();
    let brands: BrandListDto = body_json(listing).await;
    let oppo = brands
        .items
        .iter()
        .find(|brand| brand.slug == "oppo")
        .ok_or_else(|| TestError::Fixture("missing brand fixture".to_string()))?
        .clone();

    let result = update_brand(
        State(state.clone()),
        admin_headers(),
        Path(oppo.id),
        axum::Json(UpdateBrandDto {
            name: "Oppo Mobile".to_string(),
        }),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let renamed: BrandDto = body_json(resp).await;
    assert_eq!(renamed.slug, "oppo-mobile");

    let result = update_brand(
        State(state),
        admin_headers(),
        Path(oppo.id),
        axum::Json(UpdateBrandDto {
            name: "Realme".to_string(),
        }),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    Ok(())
}

/// Tests that deletion is blocked while devices reference the brand.
///
/// Expected: 409 CONFLICT, then 204 NO_CONTENT for an unreferenced brand
#[tokio::test]
async fn delete_restricted_while_devices_remain() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_device("Realme", "C2", &[])
        .with_brand("Oppo")
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let listing = list_brands(State(state.clone()), admin_headers(), Query(page_query(None)))
        .await
        .map_err(|error| TestError::Fixture(error.to_string()))?
        .into_response();
    let brands: BrandListDto = body_json(listing).await;

    let realme = brands
        .items
        .iter()
        .find(|brand| brand.slug == "realme")
        .ok_or_else(|| TestError::Fixture("missing brand fixture".to_string()))?;
    let oppo = brands
        .items
        .iter()
        .find(|brand| brand.slug == "oppo")
        .ok_or_else(|| TestError::Fixture("missing brand fixture".to_string()))?;

    let result = delete_brand(State(state.clone()), admin_headers(), Path(realme.id)).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let result = delete_brand(State(state), admin_headers(), Path(oppo.id)).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    Ok(())
}

/// Tests that the listing filters and reports totals.
///
/// Expected: 200 OK with only the matching brand
#[tokio::test]
async fn list_filters_by_text() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_brand("Realme")
        .with_brand("Oppo")
        .with_brand("Samsung")
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let result = list_brands(State(state), admin_headers(), Query(page_query(Some("sam")))).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let brands: BrandListDto = body_json(resp).await;
    assert_eq!(brands.total, 1);
    assert_eq!(brands.items.len(), 1);
    assert_eq!(brands.items[0].slug, "samsung");

    Ok(())
}
