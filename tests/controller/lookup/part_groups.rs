//! Tests for the get_part_groups endpoint.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use fitment::{
    model::catalog::PartGroupsDto,
    server::{controller::lookup::get_part_groups, model::app::AppState},
};

use super::*;

/// Tests that an unknown part slug is rejected.
///
/// Expected: Err with 404 NOT_FOUND response
#[tokio::test]
async fn not_found_for_unknown_part() -> Result<(), TestError> {
    let test = TestBuilder::new().with_catalog_tables().build().await?;
    let state: AppState = test.to_app_state();

    let result = get_part_groups(State(state), Path("frame".to_string())).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Tests that the part page carries its groups with hydrated members.
///
/// Expected: 200 OK with the part and its group members
#[tokio::test]
async fn returns_part_with_groups() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_device("Realme", "C2", &[])
        .with_device("Oppo", "A1k", &[])
        .with_device("Realme", "C30", &[])
        .with_group("Frame", &["realme-c2", "oppo-a1k"])
        .with_group("Frame", &["realme-c30"])
        .with_group("Screen", &["realme-c2"])
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let result = get_part_groups(State(state), Path("frame".to_string())).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let page: PartGroupsDto = body_json(resp).await;
    assert_eq!(page.part.slug, "frame");
    assert_eq!(page.groups.len(), 2);

    let first_members: Vec<&str> = page.groups[0]
        .members
        .iter()
        .map(|member| member.slug.as_str())
        .collect();
    assert_eq!(first_members, vec!["realme-c2", "oppo-a1k"]);

    Ok(())
}
