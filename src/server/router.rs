//! HTTP routing and OpenAPI documentation configuration.
//!
//! This module defines the application's HTTP routes and generates OpenAPI documentation
//! using utoipa. All API endpoints are registered here with their OpenAPI specifications,
//! and Swagger UI is configured to provide interactive API documentation at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// Constructs an Axum router with the public catalog lookups and the token-protected
/// admin surface registered. Each endpoint is annotated with OpenAPI specifications via
/// utoipa, which are collected into a unified OpenAPI document. The router includes
/// Swagger UI at `/api/docs` for interactive API exploration and testing.
///
/// # Registered Endpoints
/// - `GET /api/devices/autocomplete` - Resolve a free-form device name
/// - `GET /api/parts` - List part categories
/// - `GET /api/parts/{part_slug}/groups` - Groups curated under a part
/// - `GET /api/search` - Devices plus the groups containing any of them
/// - `GET /api/compat/check` - Shared-part check for a set of devices
/// - `POST|GET /api/admin/brands`, `PUT|DELETE /api/admin/brands/{id}` - Brand admin
/// - `POST|GET /api/admin/parts`, `PUT|DELETE /api/admin/parts/{id}` - Part admin
/// - `POST|GET /api/admin/devices`, `PUT|DELETE /api/admin/devices/{id}` - Device admin
/// - `POST /api/admin/device/{slug}/alias` - Add an alias spelling
/// - `POST|GET|DELETE /api/admin/groups`, `PUT|DELETE /api/admin/groups/{id}` - Group admin
/// - `POST /api/admin/import` - Bulk workbook import
/// - `GET /api/admin/export/all` - Full catalog export
/// - `POST /api/admin/seed` - Legacy seed line ingestion
///
/// # OpenAPI Documentation
/// The OpenAPI specification is available at `/api/docs/openapi.json` and includes:
/// - Endpoint paths and HTTP methods
/// - Request/response schemas
/// - Error responses
///
/// # Returns
/// An Axum `Router<AppState>` configured with all routes, ready to be served.
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Fitment", description = "Device parts compatibility API"), tags(
        (name = controller::lookup::LOOKUP_TAG, description = "Public catalog lookup routes"),
        (name = controller::admin::ADMIN_TAG, description = "Token-protected catalog admin routes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::lookup::autocomplete_devices))
        .routes(routes!(controller::lookup::get_parts))
        .routes(routes!(controller::lookup::get_part_groups))
        .routes(routes!(controller::lookup::search_catalog))
        .routes(routes!(controller::lookup::check_compat))
        .routes(routes!(
            controller::admin::brand::create_brand,
            controller::admin::brand::list_brands
        ))
        .routes(routes!(
            controller::admin::brand::update_brand,
            controller::admin::brand::delete_brand
        ))
        .routes(routes!(
            controller::admin::part::create_part,
            controller::admin::part::list_parts
        ))
        .routes(routes!(
            controller::admin::part::update_part,
            controller::admin::part::delete_part
        ))
        .routes(routes!(
            controller::admin::device::create_device,
            controller::admin::device::list_devices
        ))
        .routes(routes!(
            controller::admin::device::update_device,
            controller::admin::device::delete_device
        ))
        .routes(routes!(controller::admin::device::add_device_alias))
        .routes(routes!(
            controller::admin::group::create_group,
            controller::admin::group::list_groups,
            controller::admin::group::delete_group_by_members
        ))
        .routes(routes!(
            controller::admin::group::update_group,
            controller::admin::group::delete_group
        ))
        .routes(routes!(controller::admin::transfer::import_workbook))
        .routes(routes!(controller::admin::transfer::export_workbook))
        .routes(routes!(controller::admin::transfer::seed_catalog))
        .split_for_parts();

    let routes = routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api));

    routes
}
