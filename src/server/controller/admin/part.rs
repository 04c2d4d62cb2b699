use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};

use crate::{
    model::{
        api::ErrorDto,
        catalog::{
            CreatePartCategoryDto, PartCategoryDto, PartCategoryListDto, UpdatePartCategoryDto,
        },
    },
    server::{
        controller::{
            admin::{PageQuery, ADMIN_TAG},
            util::{admin_gate::require_admin, dto::part_dto},
        },
        data::part::PartRepository,
        error::{catalog::CatalogError, Error},
        model::app::AppState,
        service::catalog::CatalogService,
    },
};

/// Create a part category, or return the existing one with the same name
#[utoipa::path(
    post,
    path = "/api/admin/parts",
    tag = ADMIN_TAG,
    request_body = CreatePartCategoryDto,
    responses(
        (status = 201, description = "Part category created", body = PartCategoryDto),
        (status = 200, description = "Part category already existed", body = PartCategoryDto),
        (status = 400, description = "Invalid part category name", body = ErrorDto),
        (status = 401, description = "Missing admin token", body = ErrorDto),
        (status = 403, description = "Wrong admin token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_part(
    State(state): State<AppState>,
    headers: HeaderMap,
    axum::Json(dto): axum::Json<CreatePartCategoryDto>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &headers)?;

    let ensured = CatalogService::new(&state.db)
        .ensure_part(&dto.name, dto.description.as_deref())
        .await?;

    let status = if ensured.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, axum::Json(part_dto(&ensured.model))))
}

/// Page through part categories
#[utoipa::path(
    get,
    path = "/api/admin/parts",
    tag = ADMIN_TAG,
    params(PageQuery),
    responses(
        (status = 200, description = "One page of part categories", body = PartCategoryListDto),
        (status = 401, description = "Missing admin token", body = ErrorDto),
        (status = 403, description = "Wrong admin token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_parts(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &headers)?;

    let (page, per_page) = query.bounds();

    let parts = PartRepository::new(&state.db)
        .list(page, per_page, query.filter())
        .await?;

    Ok((
        StatusCode::OK,
        axum::Json(PartCategoryListDto {
            items: parts.items.iter().map(part_dto).collect(),
            total: parts.total,
            page,
            total_pages: parts.pages,
        }),
    ))
}

/// Update a part category's name and/or description
///
/// Omitted fields keep their stored values.
#[utoipa::path(
    put,
    path = "/api/admin/parts/{id}",
    tag = ADMIN_TAG,
    params(
        ("id" = i32, Path, description = "Part category id")
    ),
    request_body = UpdatePartCategoryDto,
    responses(
        (status = 200, description = "Part category updated", body = PartCategoryDto),
        (status = 400, description = "Invalid part category name", body = ErrorDto),
        (status = 401, description = "Missing admin token", body = ErrorDto),
        (status = 403, description = "Wrong admin token", body = ErrorDto),
        (status = 404, description = "Part category not found", body = ErrorDto),
        (status = 409, description = "Another part category already uses the new name", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_part(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    axum::Json(dto): axum::Json<UpdatePartCategoryDto>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &headers)?;

    let stored = PartRepository::new(&state.db)
        .get(id)
        .await?
        .ok_or_else(|| CatalogError::NotFound(format!("part category {id}")))?;

    let name = dto.name.as_deref().unwrap_or(&stored.name);
    let description = match dto.description.as_deref() {
        Some(description) => Some(description),
        None => stored.description.as_deref(),
    };

    let part = CatalogService::new(&state.db)
        .update_part(id, name, description)
        .await?;

    Ok((StatusCode::OK, axum::Json(part_dto(&part))))
}

/// Delete a part category that no compatibility group references anymore
#[utoipa::path(
    delete,
    path = "/api/admin/parts/{id}",
    tag = ADMIN_TAG,
    params(
        ("id" = i32, Path, description = "Part category id")
    ),
    responses(
        (status = 204, description = "Part category deleted"),
        (status = 401, description = "Missing admin token", body = ErrorDto),
        (status = 403, description = "Wrong admin token", body = ErrorDto),
        (status = 404, description = "Part category not found", body = ErrorDto),
        (status = 409, description = "Part category still has groups", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_part(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &headers)?;

    CatalogService::new(&state.db).delete_part(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
