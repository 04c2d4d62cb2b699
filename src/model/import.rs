use serde::{Deserialize, Serialize};

/// Outcome of a bulk import run. Row failures are collected here rather than
/// aborting the batch; on dry runs the counts describe what would have been
/// applied.
#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ImportSummaryDto {
    pub dry_run: bool,
    pub created: u64,
    pub updated: u64,
    pub deleted: u64,
    pub errors: Vec<ImportRowErrorDto>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ImportRowErrorDto {
    /// Sheet the failing row belongs to (Brands, Parts, Devices or Groups)
    pub sheet: String,
    /// 1-based data row number within the sheet, header excluded
    pub row: u64,
    pub error: String,
}

/// Legacy compatibility lines to ingest, e.g. `"Realme C2 = Oppo A1k"`.
#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SeedRequestDto {
    /// Part category the lines describe, referenced by slug or name
    pub part: String,
    pub lines: Vec<String>,
    /// Provenance recorded on every created group
    pub source: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SeedSummaryDto {
    pub devices_created: u64,
    pub groups_created: u64,
    pub groups_existing: u64,
    pub errors: Vec<SeedLineErrorDto>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SeedLineErrorDto {
    /// 1-based position of the failing line in the request
    pub line: u64,
    pub error: String,
}
