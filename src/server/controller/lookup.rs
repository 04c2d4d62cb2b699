use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{
    model::{
        api::ErrorDto,
        catalog::{CompatCheckDto, DeviceDto, PartCategoryDto, PartGroupsDto, SearchResultsDto},
    },
    server::{
        controller::util::dto::{group_dto, part_dto, resolved_dto},
        data::{device::DeviceRepository, group::GroupRepository, part::PartRepository},
        error::{catalog::CatalogError, Error},
        model::app::AppState,
        service::{compat::CompatService, resolver::ResolverService},
    },
};

pub static LOOKUP_TAG: &str = "catalog";

/// Most groups returned alongside search results
const SEARCH_GROUPS_CAP: usize = 50;

/// Most groups returned on one part category page
const PART_GROUPS_CAP: usize = 200;

#[derive(Deserialize, utoipa::IntoParams)]
pub struct AutocompleteQuery {
    /// Free-form device name to resolve
    pub q: Option<String>,
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct SearchQuery {
    /// Free-form device name to resolve
    pub q: Option<String>,
    /// Part category slug narrowing the group results
    pub part: Option<String>,
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct CompatQuery {
    /// Part category slug
    pub part: Option<String>,
    /// Comma-separated device slugs
    pub devices: Option<String>,
}

/// Resolve a free-form device name to ranked catalog matches
///
/// A blank query or an internal failure resolves to an empty list so the
/// lookup box never breaks the page.
#[utoipa::path(
    get,
    path = "/api/devices/autocomplete",
    tag = LOOKUP_TAG,
    params(AutocompleteQuery),
    responses(
        (status = 200, description = "Ranked device matches, best first", body = Vec<DeviceDto>)
    ),
)]
pub async fn autocomplete_devices(
    State(state): State<AppState>,
    Query(query): Query<AutocompleteQuery>,
) -> impl IntoResponse {
    let q = query.q.unwrap_or_default();

    let matches = match ResolverService::new(&state.db).resolve(&q).await {
        Ok(matches) => matches,
        Err(error) => {
            tracing::error!("Autocomplete failed for {q:?}: {error}");
            Vec::new()
        }
    };

    let devices: Vec<DeviceDto> = matches.iter().map(resolved_dto).collect();

    (StatusCode::OK, axum::Json(devices))
}

/// List every part category, for dropdowns
#[utoipa::path(
    get,
    path = "/api/parts",
    tag = LOOKUP_TAG,
    responses(
        (status = 200, description = "All part categories ordered by name", body = Vec<PartCategoryDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_parts(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let parts = PartRepository::new(&state.db).list_all().await?;

    let parts: Vec<PartCategoryDto> = parts.iter().map(part_dto).collect();

    Ok((StatusCode::OK, axum::Json(parts)))
}

/// Get a part category with the compatibility groups curated under it
#[utoipa::path(
    get,
    path = "/api/parts/{part_slug}/groups",
    tag = LOOKUP_TAG,
    params(
        ("part_slug" = String, Path, description = "Part category slug")
    ),
    responses(
        (status = 200, description = "The part and its groups", body = PartGroupsDto),
        (status = 404, description = "Part not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_part_groups(
    State(state): State<AppState>,
    Path(part_slug): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let part = PartRepository::new(&state.db)
        .get_by_slug(&part_slug)
        .await?
        .ok_or_else(|| CatalogError::NotFound(format!("part '{part_slug}'")))?;

    let mut groups = GroupRepository::new(&state.db).for_part(part.id).await?;
    groups.truncate(PART_GROUPS_CAP);

    let views = CompatService::new(&state.db).hydrate_groups(groups).await?;

    Ok((
        StatusCode::OK,
        axum::Json(PartGroupsDto {
            part: part_dto(&part),
            groups: views.iter().map(group_dto).collect(),
        }),
    ))
}

/// Search devices and the groups containing any of them
///
/// An unknown part slug narrows the groups to nothing rather than erroring,
/// and internal failures degrade to empty results.
#[utoipa::path(
    get,
    path = "/api/search",
    tag = LOOKUP_TAG,
    params(SearchQuery),
    responses(
        (status = 200, description = "Resolved devices plus their groups", body = SearchResultsDto)
    ),
)]
pub async fn search_catalog(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    let q = query.q.unwrap_or_default();
    let part = query
        .part
        .as_deref()
        .map(str::trim)
        .filter(|part| !part.is_empty());

    let results = match run_search(&state, &q, part).await {
        Ok(results) => results,
        Err(error) => {
            tracing::error!("Search failed for {q:?}: {error}");
            SearchResultsDto {
                devices: Vec::new(),
                groups: Vec::new(),
            }
        }
    };

    (StatusCode::OK, axum::Json(results))
}

async fn run_search(
    state: &AppState,
    q: &str,
    part: Option<&str>,
) -> Result<SearchResultsDto, Error> {
    let resolved = ResolverService::new(&state.db).resolve(q).await?;
    let device_ids: Vec<i32> = resolved.iter().map(|matched| matched.device.id).collect();

    let compat = CompatService::new(&state.db);

    let mut views = Vec::new();

    if !device_ids.is_empty() {
        views = match part {
            Some(slug) => match PartRepository::new(&state.db).get_by_slug(slug).await? {
                Some(part) => compat.groups_for_any(&device_ids, Some(part.id)).await?,
                None => Vec::new(),
            },
            None => compat.groups_for_any(&device_ids, None).await?,
        };
    }

    views.truncate(SEARCH_GROUPS_CAP);

    Ok(SearchResultsDto {
        devices: resolved.iter().map(resolved_dto).collect(),
        groups: views.iter().map(group_dto).collect(),
    })
}

/// Check whether a set of devices shares a part
///
/// Unknown device slugs simply fall out of the requested set; when nothing
/// usable remains the answer is incompatible rather than an error.
#[utoipa::path(
    get,
    path = "/api/compat/check",
    tag = LOOKUP_TAG,
    params(CompatQuery),
    responses(
        (status = 200, description = "Whether the devices share a group for the part", body = CompatCheckDto),
        (status = 400, description = "Missing part or devices parameter", body = ErrorDto),
        (status = 404, description = "Part not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn check_compat(
    State(state): State<AppState>,
    Query(query): Query<CompatQuery>,
) -> Result<impl IntoResponse, Error> {
    let part_slug = query.part.as_deref().map(str::trim).unwrap_or_default();
    let slugs: Vec<String> = query
        .devices
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|slug| !slug.is_empty())
        .map(str::to_string)
        .collect();

    if part_slug.is_empty() || slugs.is_empty() {
        return Err(
            CatalogError::Validation("part and devices are required".to_string()).into(),
        );
    }

    let part = PartRepository::new(&state.db)
        .get_by_slug(part_slug)
        .await?
        .ok_or_else(|| CatalogError::NotFound(format!("part '{part_slug}'")))?;

    let devices = DeviceRepository::new(&state.db).get_by_slugs(&slugs).await?;
    let ids: Vec<i32> = devices.iter().map(|device| device.id).collect();

    let report = CompatService::new(&state.db).check(part.id, &ids).await?;

    Ok((
        StatusCode::OK,
        axum::Json(CompatCheckDto {
            compatible: report.compatible,
            shared_groups: report.shared_groups.iter().map(group_dto).collect(),
        }),
    ))
}
