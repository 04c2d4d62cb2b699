use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{
    model::{
        api::ErrorDto,
        catalog::{AddAliasDto, CreateDeviceDto, DeviceDto, DeviceListDto, UpdateDeviceDto},
    },
    server::{
        controller::{
            admin::ADMIN_TAG,
            util::{
                admin_gate::require_admin,
                dto::{device_dto, load_device_dto},
            },
        },
        data::{brand::BrandRepository, device::DeviceRepository},
        error::Error,
        model::app::AppState,
        normalize::normalize,
        service::catalog::CatalogService,
    },
};

/// Pagination parameters of the device listing
#[derive(Deserialize, utoipa::IntoParams)]
pub struct DevicePageQuery {
    /// 1-based page number, defaults to 1
    pub page: Option<u64>,
    /// Rows per page, defaults to 50 and is capped at 200
    pub per_page: Option<u64>,
    /// Filter text matched against the normalized device name
    pub q: Option<String>,
    /// Brand slug restricting the listing to one brand
    pub brand: Option<String>,
}

/// Create a device under a brand, or return the existing one
///
/// The brand is created on the fly when unknown, and alias spellings are
/// merged into the stored set when the device already exists.
#[utoipa::path(
    post,
    path = "/api/admin/devices",
    tag = ADMIN_TAG,
    request_body = CreateDeviceDto,
    responses(
        (status = 201, description = "Device created", body = DeviceDto),
        (status = 200, description = "Device already existed", body = DeviceDto),
        (status = 400, description = "Invalid brand or device name", body = ErrorDto),
        (status = 401, description = "Missing admin token", body = ErrorDto),
        (status = 403, description = "Wrong admin token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_device(
    State(state): State<AppState>,
    headers: HeaderMap,
    axum::Json(dto): axum::Json<CreateDeviceDto>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &headers)?;

    let ensured = CatalogService::new(&state.db)
        .ensure_device(&dto.brand, &dto.name, &dto.aliases)
        .await?;

    let status = if ensured.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    let device = load_device_dto(&state.db, &ensured.model).await?;

    Ok((status, axum::Json(device)))
}

/// Page through devices, optionally narrowed to one brand
///
/// An unknown brand slug yields an empty page rather than an error.
#[utoipa::path(
    get,
    path = "/api/admin/devices",
    tag = ADMIN_TAG,
    params(DevicePageQuery),
    responses(
        (status = 200, description = "One page of devices with their brands", body = DeviceListDto),
        (status = 401, description = "Missing admin token", body = ErrorDto),
        (status = 403, description = "Wrong admin token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_devices(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DevicePageQuery>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &headers)?;

    let page = query.page.unwrap_or(1).max(1);
    let per_page = query
        .per_page
        .unwrap_or(super::DEFAULT_PAGE_SIZE)
        .clamp(1, super::MAX_PAGE_SIZE);

    let brand_id = match query.brand.as_deref().map(str::trim) {
        Some(slug) if !slug.is_empty() => {
            match BrandRepository::new(&state.db).get_by_slug(slug).await? {
                Some(brand) => Some(brand.id),
                None => {
                    return Ok((
                        StatusCode::OK,
                        axum::Json(DeviceListDto {
                            items: Vec::new(),
                            total: 0,
                            page,
                            total_pages: 0,
                        }),
                    ));
                }
            }
        }
        _ => None,
    };

    // The stored filter column is the normal form, so the query text is
    // normalized the same way before matching
    let filter = query
        .q
        .as_deref()
        .map(normalize)
        .filter(|q| !q.is_empty());

    let device_repository = DeviceRepository::new(&state.db);

    let devices = device_repository
        .list(page, per_page, filter.as_deref(), brand_id)
        .await?;

    let device_ids: Vec<i32> = devices.items.iter().map(|(device, _)| device.id).collect();
    let aliases = device_repository.aliases_for_devices(&device_ids).await?;

    let mut labels_by_device: HashMap<i32, Vec<String>> = HashMap::new();
    for alias in aliases {
        labels_by_device
            .entry(alias.device_id)
            .or_default()
            .push(alias.label);
    }

    let mut items = Vec::with_capacity(devices.items.len());

    for (device, brand) in &devices.items {
        let brand = brand.as_ref().ok_or_else(|| {
            sea_orm::DbErr::RecordNotFound(format!("brand {} of device {}", device.brand_id, device.id))
        })?;

        let labels = labels_by_device.remove(&device.id).unwrap_or_default();

        items.push(device_dto(device, brand, labels));
    }

    Ok((
        StatusCode::OK,
        axum::Json(DeviceListDto {
            items,
            total: devices.total,
            page,
            total_pages: devices.pages,
        }),
    ))
}

/// Update a device's brand, name and/or alias set
///
/// Omitted fields keep their stored values; a supplied alias list replaces
/// the stored set.
#[utoipa::path(
    put,
    path = "/api/admin/devices/{id}",
    tag = ADMIN_TAG,
    params(
        ("id" = i32, Path, description = "Device id")
    ),
    request_body = UpdateDeviceDto,
    responses(
        (status = 200, description = "Device updated", body = DeviceDto),
        (status = 400, description = "Invalid brand or device name", body = ErrorDto),
        (status = 401, description = "Missing admin token", body = ErrorDto),
        (status = 403, description = "Wrong admin token", body = ErrorDto),
        (status = 404, description = "Device not found", body = ErrorDto),
        (status = 409, description = "Another device already uses the new name", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_device(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    axum::Json(dto): axum::Json<UpdateDeviceDto>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &headers)?;

    let device = CatalogService::new(&state.db)
        .update_device(id, dto.brand.as_deref(), dto.name.as_deref(), dto.aliases.as_deref())
        .await?;

    let device = load_device_dto(&state.db, &device).await?;

    Ok((StatusCode::OK, axum::Json(device)))
}

/// Delete a device that belongs to no compatibility group anymore
#[utoipa::path(
    delete,
    path = "/api/admin/devices/{id}",
    tag = ADMIN_TAG,
    params(
        ("id" = i32, Path, description = "Device id")
    ),
    responses(
        (status = 204, description = "Device deleted"),
        (status = 401, description = "Missing admin token", body = ErrorDto),
        (status = 403, description = "Wrong admin token", body = ErrorDto),
        (status = 404, description = "Device not found", body = ErrorDto),
        (status = 409, description = "Device still belongs to groups", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_device(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &headers)?;

    CatalogService::new(&state.db).delete_device(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Add one alias spelling to a device
#[utoipa::path(
    post,
    path = "/api/admin/device/{slug}/alias",
    tag = ADMIN_TAG,
    params(
        ("slug" = String, Path, description = "Device slug")
    ),
    request_body = AddAliasDto,
    responses(
        (status = 200, description = "Alias recorded", body = DeviceDto),
        (status = 400, description = "Alias contains no letters or digits", body = ErrorDto),
        (status = 401, description = "Missing admin token", body = ErrorDto),
        (status = 403, description = "Wrong admin token", body = ErrorDto),
        (status = 404, description = "Device not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_device_alias(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(slug): Path<String>,
    axum::Json(dto): axum::Json<AddAliasDto>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &headers)?;

    let device = CatalogService::new(&state.db)
        .add_alias(&slug, &dto.alias)
        .await?;

    let device = load_device_dto(&state.db, &device).await?;

    Ok((StatusCode::OK, axum::Json(device)))
}
