//! Tests for the bulk transfer endpoints: workbook import, catalog export
//! and legacy seed ingestion.
//!
//! The deeper import mechanics live next to the service; these tests cover
//! the HTTP surface and the seed-to-lookup round trip.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use fitment::{
    model::{
        catalog::{CompatCheckDto, PartCategoryDto},
        import::{ImportSummaryDto, SeedRequestDto, SeedSummaryDto},
    },
    server::{
        controller::{
            admin::transfer::{export_workbook, import_workbook, seed_catalog, ImportQuery},
            lookup::{check_compat, get_parts, CompatQuery},
        },
        model::app::AppState,
    },
};

use super::*;

const WORKBOOK: &str = concat!(
    "# Brands\n",
    "action,name\n",
    "create,Realme\n",
    "create,Oppo\n",
    "\n",
    "# Parts\n",
    "action,name,description\n",
    "create,Frame,\n",
    "\n",
    "# Devices\n",
    "action,brand,name,aliases\n",
    "create,Realme,C2,RMX1941\n",
    "create,Oppo,A1k,\n",
    "\n",
    "# Groups\n",
    "action,part,members,note,source,tags,confidence\n",
    "create,Frame,\"realme-c2,oppo-a1k\",,,,\n",
);

/// Tests that the import endpoint sits behind the admin gate.
///
/// Expected: Err with 401 UNAUTHORIZED response
#[tokio::test]
async fn import_requires_admin_token() -> Result<(), TestError> {
    let test = TestBuilder::new().with_catalog_tables().build().await?;
    let state: AppState = test.to_app_state();

    let result = import_workbook(
        State(state),
        HeaderMap::new(),
        Query(ImportQuery { dry_run: None }),
        WORKBOOK.to_string(),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Tests that a dry run reports the batch without persisting it.
///
/// Expected: 200 OK with counts, then an empty catalog
#[tokio::test]
async fn dry_run_previews_without_persisting() -> Result<(), TestError> {
    let test = TestBuilder::new().with_catalog_tables().build().await?;
    let state: AppState = test.to_app_state();

    let result = import_workbook(
        State(state.clone()),
        admin_headers(),
        Query(ImportQuery {
            dry_run: Some(true),
        }),
        WORKBOOK.to_string(),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let summary: ImportSummaryDto = body_json(resp).await;
    assert!(summary.dry_run);
    assert_eq!(summary.created, 6);
    assert!(summary.errors.is_empty());

    let resp = get_parts(State(state))
        .await
        .map_err(|error| TestError::Fixture(error.to_string()))?
        .into_response();
    let parts: Vec<PartCategoryDto> = body_json(resp).await;
    assert!(parts.is_empty());

    Ok(())
}

/// Tests that an applied workbook comes back out of the export endpoint.
///
/// Expected: 200 OK on both, export text carrying the imported rows
#[tokio::test]
async fn apply_then_export_round_trips() -> Result<(), TestError> {
    let test = TestBuilder::new().with_catalog_tables().build().await?;
    let state: AppState = test.to_app_state();

    let result = import_workbook(
        State(state.clone()),
        admin_headers(),
        Query(ImportQuery { dry_run: None }),
        WORKBOOK.to_string(),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let summary: ImportSummaryDto = body_json(resp).await;
    assert!(!summary.dry_run);
    assert_eq!(summary.created, 6);

    let result = export_workbook(State(state), admin_headers()).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let text = body_text(resp).await;
    assert!(text.contains("# Devices"));
    assert!(text.contains("RMX1941"));
    assert!(text.contains("realme-c2"));

    Ok(())
}

/// Tests that a dry run is refused when transactions are disabled.
///
/// Expected: Err with 400 BAD_REQUEST response
#[tokio::test]
async fn dry_run_refused_without_transactions() -> Result<(), TestError> {
    let test = TestBuilder::new().with_catalog_tables().build().await?;
    let state: AppState = test.to_app_state_no_transactions();

    let result = import_workbook(
        State(state),
        admin_headers(),
        Query(ImportQuery {
            dry_run: Some(true),
        }),
        WORKBOOK.to_string(),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Tests that seeded legacy lines immediately answer compatibility checks.
///
/// Expected: 200 OK seed summary, then a compatible verdict with provenance
#[tokio::test]
async fn seeded_lines_answer_compat_checks() -> Result<(), TestError> {
    let test = TestBuilder::new().with_catalog_tables().build().await?;
    let state: AppState = test.to_app_state();

    let result = seed_catalog(
        State(state.clone()),
        admin_headers(),
        axum::Json(SeedRequestDto {
            part: "Frame".to_string(),
            lines: vec!["Realme C2 = Oppo A1k".to_string()],
            source: Some("legacy workbook".to_string()),
        }),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let summary: SeedSummaryDto = body_json(resp).await;
    assert_eq!(summary.devices_created, 2);
    assert_eq!(summary.groups_created, 1);
    assert!(summary.errors.is_empty());

    let result = check_compat(
        State(state),
        Query(CompatQuery {
            part: Some("frame".to_string()),
            devices: Some("realme-c2,oppo-a1k".to_string()),
        }),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let verdict: CompatCheckDto = body_json(resp).await;
    assert!(verdict.compatible);
    assert_eq!(verdict.shared_groups.len(), 1);
    assert_eq!(
        verdict.shared_groups[0].source.as_deref(),
        Some("legacy workbook")
    );

    Ok(())
}
