use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};

use crate::{
    model::{
        api::ErrorDto,
        catalog::{BrandDto, BrandListDto, CreateBrandDto, UpdateBrandDto},
    },
    server::{
        controller::{
            admin::{PageQuery, ADMIN_TAG},
            util::{admin_gate::require_admin, dto::brand_dto},
        },
        data::brand::BrandRepository,
        error::Error,
        model::app::AppState,
        service::catalog::CatalogService,
    },
};

/// Create a brand, or return the existing one with the same name
#[utoipa::path(
    post,
    path = "/api/admin/brands",
    tag = ADMIN_TAG,
    request_body = CreateBrandDto,
    responses(
        (status = 201, description = "Brand created", body = BrandDto),
        (status = 200, description = "Brand already existed", body = BrandDto),
        (status = 400, description = "Invalid brand name", body = ErrorDto),
        (status = 401, description = "Missing admin token", body = ErrorDto),
        (status = 403, description = "Wrong admin token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_brand(
    State(state): State<AppState>,
    headers: HeaderMap,
    axum::Json(dto): axum::Json<CreateBrandDto>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &headers)?;

    let ensured = CatalogService::new(&state.db).ensure_brand(&dto.name).await?;

    let status = if ensured.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, axum::Json(brand_dto(&ensured.model))))
}

/// Page through brands
#[utoipa::path(
    get,
    path = "/api/admin/brands",
    tag = ADMIN_TAG,
    params(PageQuery),
    responses(
        (status = 200, description = "One page of brands", body = BrandListDto),
        (status = 401, description = "Missing admin token", body = ErrorDto),
        (status = 403, description = "Wrong admin token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_brands(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &headers)?;

    let (page, per_page) = query.bounds();

    let brands = BrandRepository::new(&state.db)
        .list(page, per_page, query.filter())
        .await?;

    Ok((
        StatusCode::OK,
        axum::Json(BrandListDto {
            items: brands.items.iter().map(brand_dto).collect(),
            total: brands.total,
            page,
            total_pages: brands.pages,
        }),
    ))
}

/// Rename a brand
#[utoipa::path(
    put,
    path = "/api/admin/brands/{id}",
    tag = ADMIN_TAG,
    params(
        ("id" = i32, Path, description = "Brand id")
    ),
    request_body = UpdateBrandDto,
    responses(
        (status = 200, description = "Brand updated", body = BrandDto),
        (status = 400, description = "Invalid brand name", body = ErrorDto),
        (status = 401, description = "Missing admin token", body = ErrorDto),
        (status = 403, description = "Wrong admin token", body = ErrorDto),
        (status = 404, description = "Brand not found", body = ErrorDto),
        (status = 409, description = "Another brand already uses the new name", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_brand(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    axum::Json(dto): axum::Json<UpdateBrandDto>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &headers)?;

    let brand = CatalogService::new(&state.db)
        .update_brand(id, &dto.name)
        .await?;

    Ok((StatusCode::OK, axum::Json(brand_dto(&brand))))
}

/// Delete a brand that no device references anymore
#[utoipa::path(
    delete,
    path = "/api/admin/brands/{id}",
    tag = ADMIN_TAG,
    params(
        ("id" = i32, Path, description = "Brand id")
    ),
    responses(
        (status = 204, description = "Brand deleted"),
        (status = 401, description = "Missing admin token", body = ErrorDto),
        (status = 403, description = "Wrong admin token", body = ErrorDto),
        (status = 404, description = "Brand not found", body = ErrorDto),
        (status = 409, description = "Brand still has devices", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_brand(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &headers)?;

    CatalogService::new(&state.db).delete_brand(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
