//! Tests for the compatibility group admin endpoints.
//!
//! This module verifies that member sets identify groups regardless of
//! ordering, unknown members are rejected, metadata survives revisits,
//! member-set deletion works, and the listing filters across joined fields.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use fitment::{
    model::catalog::{
        CreateGroupDto, DeleteGroupByMembersDto, GroupDto, GroupListDto, UpdateGroupDto,
    },
    server::{
        controller::admin::group::{
            create_group, delete_group, delete_group_by_members, list_groups, update_group,
            GroupPageQuery,
        },
        model::app::AppState,
    },
};

use super::*;

fn create_dto(part: &str, members: &[&str]) -> CreateGroupDto {
    CreateGroupDto {
        part: part.to_string(),
        members: members.iter().map(|member| (*member).to_string()).collect(),
        note: None,
        source: None,
        tags: Vec::new(),
        confidence: None,
    }
}

fn group_query(q: Option<&str>, part: Option<&str>) -> GroupPageQuery {
    GroupPageQuery {
        page: None,
        per_page: None,
        q: q.map(str::to_string),
        part: part.map(str::to_string),
    }
}

/// Tests that member order does not create a second group.
///
/// Expected: 201 CREATED then 200 OK with the same id
#[tokio::test]
async fn member_order_does_not_duplicate() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_device("Realme", "C2", &[])
        .with_device("Oppo", "A1k", &[])
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let result = create_group(
        State(state.clone()),
        admin_headers(),
        axum::Json(create_dto("Frame", &["realme-c2", "oppo-a1k"])),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: GroupDto = body_json(resp).await;

    let result = create_group(
        State(state),
        admin_headers(),
        axum::Json(create_dto("Frame", &["oppo-a1k", "realme-c2", "oppo-a1k"])),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let existing: GroupDto = body_json(resp).await;
    assert_eq!(existing.id, created.id);

    Ok(())
}

/// Tests that unknown member slugs are rejected.
///
/// Expected: Err with 400 BAD_REQUEST response
#[tokio::test]
async fn unknown_members_rejected() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_device("Realme", "C2", &[])
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let result = create_group(
        State(state),
        admin_headers(),
        axum::Json(create_dto("Frame", &["realme-c2", "ghost-device"])),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Tests that revisiting a member set updates metadata in place.
///
/// Expected: 200 OK with the refreshed note on the same group
#[tokio::test]
async fn revisit_updates_metadata() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_device("Realme", "C2", &[])
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let first = CreateGroupDto {
        note: Some("shared frame".to_string()),
        tags: vec!["frame".to_string(), "verified".to_string()],
        confidence: Some(0.9),
        ..create_dto("Frame", &["realme-c2"])
    };

    let resp = create_group(State(state.clone()), admin_headers(), axum::Json(first))
        .await
        .map_err(|error| TestError::Fixture(error.to_string()))?
        .into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: GroupDto = body_json(resp).await;
    assert_eq!(created.tags, vec!["frame".to_string(), "verified".to_string()]);
    assert_eq!(created.confidence, 0.9);

    let revisit = CreateGroupDto {
        note: Some("same frame, re-checked".to_string()),
        ..create_dto("Frame", &["realme-c2"])
    };

    let result = create_group(State(state), admin_headers(), axum::Json(revisit)).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let revisited: GroupDto = body_json(resp).await;
    assert_eq!(revisited.id, created.id);
    assert_eq!(revisited.note.as_deref(), Some("same frame, re-checked"));

    Ok(())
}

/// Tests that rewriting members onto an existing set conflicts.
///
/// Expected: 200 OK for a fresh set, 409 CONFLICT for a covered one
#[tokio::test]
async fn update_members_detects_conflicts() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_device("Realme", "C2", &[])
        .with_device("Oppo", "A1k", &[])
        .with_group("Frame", &["realme-c2"])
        .with_group("Frame", &["oppo-a1k"])
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let listing = list_groups(
        State(state.clone()),
        admin_headers(),
        Query(group_query(None, None)),
    )
    .await
    .map_err(|error| TestError::Fixture(error.to_string()))?
    .into_response();
    let groups: GroupListDto = body_json(listing).await;
    assert_eq!(groups.total, 2);

    let first = &groups.items[0];
    let second = &groups.items[1];

    let result = update_group(
        State(state.clone()),
        admin_headers(),
        Path(first.id),
        axum::Json(UpdateGroupDto {
            members: Some(vec!["realme-c2".to_string(), "oppo-a1k".to_string()]),
            note: None,
            source: None,
            tags: None,
            confidence: None,
        }),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let rewritten: GroupDto = body_json(resp).await;
    assert_eq!(rewritten.members.len(), 2);

    let result = update_group(
        State(state),
        admin_headers(),
        Path(second.id),
        axum::Json(UpdateGroupDto {
            members: Some(vec!["oppo-a1k".to_string(), "realme-c2".to_string()]),
            note: None,
            source: None,
            tags: None,
            confidence: None,
        }),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    Ok(())
}

/// Tests deletion by id and the 404 for a vanished group.
///
/// Expected: 204 NO_CONTENT, then 404 NOT_FOUND on repeat
#[tokio::test]
async fn delete_by_id() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_device("Realme", "C2", &[])
        .with_group("Frame", &["realme-c2"])
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let listing = list_groups(
        State(state.clone()),
        admin_headers(),
        Query(group_query(None, None)),
    )
    .await
    .map_err(|error| TestError::Fixture(error.to_string()))?
    .into_response();
    let groups: GroupListDto = body_json(listing).await;
    let id = groups.items[0].id;

    let result = delete_group(State(state.clone()), admin_headers(), Path(id)).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let result = delete_group(State(state), admin_headers(), Path(id)).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Tests deletion by part and exact member set.
///
/// Expected: 204 NO_CONTENT for the match, 404 NOT_FOUND for a subset
#[tokio::test]
async fn delete_by_member_set() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_device("Realme", "C2", &[])
        .with_device("Oppo", "A1k", &[])
        .with_group("Frame", &["realme-c2", "oppo-a1k"])
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let result = delete_group_by_members(
        State(state.clone()),
        admin_headers(),
        axum::Json(DeleteGroupByMembersDto {
            part: "frame".to_string(),
            members: vec!["realme-c2".to_string()],
        }),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let result = delete_group_by_members(
        State(state),
        admin_headers(),
        axum::Json(DeleteGroupByMembersDto {
            part: "frame".to_string(),
            members: vec!["oppo-a1k".to_string(), "realme-c2".to_string()],
        }),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    Ok(())
}

/// Tests that the listing filter reaches joined fields.
///
/// Expected: 200 OK with only the group whose member matches
#[tokio::test]
async fn list_filters_across_joined_fields() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_device("Realme", "C2", &[])
        .with_device("Oppo", "A1k", &[])
        .with_group("Frame", &["realme-c2"])
        .with_group("Frame", &["oppo-a1k"])
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let result = list_groups(
        State(state.clone()),
        admin_headers(),
        Query(group_query(Some("oppo"), None)),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let groups: GroupListDto = body_json(resp).await;
    assert_eq!(groups.total, 1);
    assert_eq!(groups.items[0].members[0].slug, "oppo-a1k");

    let result = list_groups(
        State(state),
        admin_headers(),
        Query(group_query(None, Some("screen"))),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let groups: GroupListDto = body_json(resp).await;
    assert_eq!(groups.total, 0);

    Ok(())
}
