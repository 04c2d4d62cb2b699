use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BrandDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PartCategoryDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeviceDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
    /// Normalized "brand name" form used for exact lookups
    pub normalized: String,
    pub brand: BrandDto,
    pub aliases: Vec<String>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct GroupDto {
    pub id: i32,
    pub part: PartCategoryDto,
    pub members: Vec<DeviceDto>,
    pub note: Option<String>,
    pub source: Option<String>,
    pub tags: Vec<String>,
    pub confidence: f64,
}

/// A part category together with every group curated under it
#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PartGroupsDto {
    pub part: PartCategoryDto,
    pub groups: Vec<GroupDto>,
}

/// Result of a compatibility check: whether every requested device appears
/// together in at least one group for the part, and which groups those are
#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CompatCheckDto {
    pub compatible: bool,
    pub shared_groups: Vec<GroupDto>,
}

/// Combined search results: resolved devices plus the groups that contain
/// any of them
#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SearchResultsDto {
    pub devices: Vec<DeviceDto>,
    pub groups: Vec<GroupDto>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BrandListDto {
    pub items: Vec<BrandDto>,
    pub total: u64,
    pub page: u64,
    pub total_pages: u64,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PartCategoryListDto {
    pub items: Vec<PartCategoryDto>,
    pub total: u64,
    pub page: u64,
    pub total_pages: u64,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeviceListDto {
    pub items: Vec<DeviceDto>,
    pub total: u64,
    pub page: u64,
    pub total_pages: u64,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct GroupListDto {
    pub items: Vec<GroupDto>,
    pub total: u64,
    pub page: u64,
    pub total_pages: u64,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateBrandDto {
    pub name: String,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateBrandDto {
    pub name: String,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreatePartCategoryDto {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdatePartCategoryDto {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Payload for creating or upserting a device. The brand may be referenced
/// by slug or by name; an unknown brand name is created on the fly.
#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateDeviceDto {
    pub brand: String,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateDeviceDto {
    pub brand: Option<String>,
    pub name: Option<String>,
    /// When present, replaces the full alias set
    pub aliases: Option<Vec<String>>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AddAliasDto {
    pub alias: String,
}

/// Payload for creating a compatibility group. Members are referenced by
/// device slug.
#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateGroupDto {
    pub part: String,
    pub members: Vec<String>,
    pub note: Option<String>,
    pub source: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub confidence: Option<f64>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateGroupDto {
    /// When present, replaces the full member set
    pub members: Option<Vec<String>>,
    pub note: Option<String>,
    pub source: Option<String>,
    pub tags: Option<Vec<String>>,
    pub confidence: Option<f64>,
}

/// Payload for deleting a group addressed by its part and exact member set
/// rather than by id.
#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeleteGroupByMembersDto {
    pub part: String,
    pub members: Vec<String>,
}
