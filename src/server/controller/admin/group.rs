use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{
    model::{
        api::ErrorDto,
        catalog::{
            CreateGroupDto, DeleteGroupByMembersDto, GroupDto, GroupListDto, UpdateGroupDto,
        },
    },
    server::{
        controller::{
            admin::ADMIN_TAG,
            util::{admin_gate::require_admin, dto::group_dto},
        },
        data::{group::GroupRepository, part::PartRepository},
        error::Error,
        model::app::AppState,
        service::{
            catalog::{CatalogService, GroupMeta},
            compat::CompatService,
        },
    },
};

/// Pagination parameters of the group listing
#[derive(Deserialize, utoipa::IntoParams)]
pub struct GroupPageQuery {
    /// 1-based page number, defaults to 1
    pub page: Option<u64>,
    /// Rows per page, defaults to 50 and is capped at 200
    pub per_page: Option<u64>,
    /// Filter text matched against part names, member devices, notes and sources
    pub q: Option<String>,
    /// Part category slug restricting the listing to one part
    pub part: Option<String>,
}

/// Create a compatibility group, or revisit the existing one
///
/// A group is identified by its part and member set; posting the same set
/// again updates the stored metadata instead of inserting a second group.
#[utoipa::path(
    post,
    path = "/api/admin/groups",
    tag = ADMIN_TAG,
    request_body = CreateGroupDto,
    responses(
        (status = 201, description = "Group created", body = GroupDto),
        (status = 200, description = "Group already covered those members", body = GroupDto),
        (status = 400, description = "Unknown part or member devices", body = ErrorDto),
        (status = 401, description = "Missing admin token", body = ErrorDto),
        (status = 403, description = "Wrong admin token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_group(
    State(state): State<AppState>,
    headers: HeaderMap,
    axum::Json(dto): axum::Json<CreateGroupDto>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &headers)?;

    let meta = GroupMeta {
        note: dto.note,
        source: dto.source,
        tags: Some(dto.tags),
        confidence: dto.confidence,
    };

    let ensured = CatalogService::new(&state.db)
        .create_group(&dto.part, &dto.members, meta)
        .await?;

    let status = if ensured.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    let views = CompatService::new(&state.db)
        .hydrate_groups(vec![ensured.model])
        .await?;
    let group = views
        .first()
        .map(group_dto)
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("freshly written group".to_string()))?;

    Ok((status, axum::Json(group)))
}

/// Page through compatibility groups
///
/// An unknown part slug yields an empty page rather than an error.
#[utoipa::path(
    get,
    path = "/api/admin/groups",
    tag = ADMIN_TAG,
    params(GroupPageQuery),
    responses(
        (status = 200, description = "One page of groups", body = GroupListDto),
        (status = 401, description = "Missing admin token", body = ErrorDto),
        (status = 403, description = "Wrong admin token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_groups(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<GroupPageQuery>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &headers)?;

    let page = query.page.unwrap_or(1).max(1);
    let per_page = query
        .per_page
        .unwrap_or(super::DEFAULT_PAGE_SIZE)
        .clamp(1, super::MAX_PAGE_SIZE);

    let part_id = match query.part.as_deref().map(str::trim) {
        Some(slug) if !slug.is_empty() => {
            match PartRepository::new(&state.db).get_by_slug(slug).await? {
                Some(part) => Some(part.id),
                None => {
                    return Ok((
                        StatusCode::OK,
                        axum::Json(GroupListDto {
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

    let filter = query.q.as_deref().map(str::trim).filter(|q| !q.is_empty());

    let groups = GroupRepository::new(&state.db)
        .list(page, per_page, filter, part_id)
        .await?;

    let views = CompatService::new(&state.db)
        .hydrate_groups(groups.items)
        .await?;

    Ok((
        StatusCode::OK,
        axum::Json(GroupListDto {
            items: views.iter().map(group_dto).collect(),
            total: groups.total,
            page,
            total_pages: groups.pages,
        }),
    ))
}

/// Delete the group covering an exact member set under a part
#[utoipa::path(
    delete,
    path = "/api/admin/groups",
    tag = ADMIN_TAG,
    request_body = DeleteGroupByMembersDto,
    responses(
        (status = 204, description = "Group deleted"),
        (status = 400, description = "Unknown member devices", body = ErrorDto),
        (status = 401, description = "Missing admin token", body = ErrorDto),
        (status = 403, description = "Wrong admin token", body = ErrorDto),
        (status = 404, description = "No group covers those members", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_group_by_members(
    State(state): State<AppState>,
    headers: HeaderMap,
    axum::Json(dto): axum::Json<DeleteGroupByMembersDto>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &headers)?;

    CatalogService::new(&state.db)
        .delete_group_by_members(&dto.part, &dto.members)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Update a group's member set and/or metadata
///
/// Omitted fields keep their stored values; a supplied member list replaces
/// the stored set.
#[utoipa::path(
    put,
    path = "/api/admin/groups/{id}",
    tag = ADMIN_TAG,
    params(
        ("id" = i32, Path, description = "Group id")
    ),
    request_body = UpdateGroupDto,
    responses(
        (status = 200, description = "Group updated", body = GroupDto),
        (status = 400, description = "Unknown member devices", body = ErrorDto),
        (status = 401, description = "Missing admin token", body = ErrorDto),
        (status = 403, description = "Wrong admin token", body = ErrorDto),
        (status = 404, description = "Group not found", body = ErrorDto),
        (status = 409, description = "Another group already covers those members", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_group(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    axum::Json(dto): axum::Json<UpdateGroupDto>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &headers)?;

    let meta = GroupMeta {
        note: dto.note,
        source: dto.source,
        tags: dto.tags,
        confidence: dto.confidence,
    };

    let group = CatalogService::new(&state.db)
        .update_group(id, dto.members.as_deref(), meta)
        .await?;

    let views = CompatService::new(&state.db)
        .hydrate_groups(vec![group])
        .await?;
    let group = views
        .first()
        .map(group_dto)
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("freshly written group".to_string()))?;

    Ok((StatusCode::OK, axum::Json(group)))
}

/// Delete a group by id
#[utoipa::path(
    delete,
    path = "/api/admin/groups/{id}",
    tag = ADMIN_TAG,
    params(
        ("id" = i32, Path, description = "Group id")
    ),
    responses(
        (status = 204, description = "Group deleted"),
        (status = 401, description = "Missing admin token", body = ErrorDto),
        (status = 403, description = "Wrong admin token", body = ErrorDto),
        (status = 404, description = "Group not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_group(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &headers)?;

    CatalogService::new(&state.db).delete_group(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
