use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{
    model::{
        api::ErrorDto,
        import::{ImportSummaryDto, SeedRequestDto, SeedSummaryDto},
    },
    server::{
        controller::{admin::ADMIN_TAG, util::admin_gate::require_admin},
        error::Error,
        model::app::AppState,
        service::{import::ImportService, seed::SeedService},
    },
};

#[derive(Deserialize, utoipa::IntoParams)]
pub struct ImportQuery {
    /// Validate the workbook without persisting anything
    pub dry_run: Option<bool>,
}

/// Import a catalog workbook
///
/// The body is the plain-text workbook with its `# Brands`, `# Parts`,
/// `# Devices` and `# Groups` sheets. With `dry_run=true` the whole batch
/// runs inside a transaction that is rolled back at the end, which requires
/// the transactional import mode to be enabled.
#[utoipa::path(
    post,
    path = "/api/admin/import",
    tag = ADMIN_TAG,
    params(ImportQuery),
    request_body(content = String, content_type = "text/plain"),
    responses(
        (status = 200, description = "Counts and itemized row errors of the run", body = ImportSummaryDto),
        (status = 400, description = "Unusable workbook, or dry run without transactions", body = ErrorDto),
        (status = 401, description = "Missing admin token", body = ErrorDto),
        (status = 403, description = "Wrong admin token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn import_workbook(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ImportQuery>,
    text: String,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &headers)?;

    let dry_run = query.dry_run.unwrap_or(false);

    let summary = ImportService::new(&state.db, state.transactions)
        .run_workbook(&text, dry_run)
        .await?;

    Ok((StatusCode::OK, axum::Json(summary)))
}

/// Export the whole catalog as a workbook
///
/// The output round-trips through the import endpoint, producing the same
/// catalog in an empty database.
#[utoipa::path(
    get,
    path = "/api/admin/export/all",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "The catalog as a plain-text workbook", body = String, content_type = "text/plain"),
        (status = 401, description = "Missing admin token", body = ErrorDto),
        (status = 403, description = "Wrong admin token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn export_workbook(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &headers)?;

    let workbook = ImportService::new(&state.db, state.transactions)
        .export()
        .await?;

    Ok((StatusCode::OK, workbook))
}

/// Ingest legacy compatibility lines
///
/// Each line lists device labels joined by `=` or `+`; every label is brand
/// inferred, devices are created as needed and one group is ensured per
/// line. Lines that fail are itemized in the summary without aborting the
/// rest.
#[utoipa::path(
    post,
    path = "/api/admin/seed",
    tag = ADMIN_TAG,
    request_body = SeedRequestDto,
    responses(
        (status = 200, description = "Counts and itemized line errors of the run", body = SeedSummaryDto),
        (status = 401, description = "Missing admin token", body = ErrorDto),
        (status = 403, description = "Wrong admin token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn seed_catalog(
    State(state): State<AppState>,
    headers: HeaderMap,
    axum::Json(dto): axum::Json<SeedRequestDto>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &headers)?;

    let summary = SeedService::new(&state.db, &state.known_brands)
        .ingest(&dto.part, &dto.lines, dto.source.as_deref())
        .await?;

    Ok((StatusCode::OK, axum::Json(summary)))
}
