//! Parsed workbook rows for bulk catalog maintenance.
//!
//! This module defines the row forms produced by parsing an admin workbook and consumed
//! by the import service. Each sheet of the workbook becomes one vector of typed rows;
//! every row remembers its position so failures can be reported per row rather than
//! aborting the whole batch.

use std::fmt;

/// What a workbook row asks the import to do with its record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    /// Ensure the record exists, creating it when missing.
    Create,
    /// Rewrite an existing record; the record must already exist.
    Update,
    /// Remove an existing record; the record must already exist.
    Delete,
}

impl RowAction {
    /// Parses the action cell. A blank cell means [`RowAction::Create`] so
    /// hand-written sheets can omit the column; unknown verbs are `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "create" => Some(Self::Create),
            "update" => Some(Self::Update),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }
}

impl fmt::Display for RowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowAction::Create => write!(f, "create"),
            RowAction::Update => write!(f, "update"),
            RowAction::Delete => write!(f, "delete"),
        }
    }
}

/// One row of the `Brands` sheet.
#[derive(Debug, Clone)]
pub struct BrandRow {
    /// 1-based data row number within the sheet, header excluded.
    pub row: usize,
    pub action: RowAction,
    /// Brand name; also the match key for updates and deletes.
    pub name: String,
}

/// One row of the `Parts` sheet.
#[derive(Debug, Clone)]
pub struct PartRow {
    /// 1-based data row number within the sheet, header excluded.
    pub row: usize,
    pub action: RowAction,
    /// Part category name; also the match key for updates and deletes.
    pub name: String,
    pub description: Option<String>,
}

/// One row of the `Devices` sheet.
#[derive(Debug, Clone)]
pub struct DeviceRow {
    /// 1-based data row number within the sheet, header excluded.
    pub row: usize,
    pub action: RowAction,
    /// Brand name the device belongs to.
    pub brand: String,
    /// Model name without the brand.
    pub name: String,
    /// Alias spellings; replaces the stored alias set on update.
    pub aliases: Vec<String>,
}

/// One row of the `Groups` sheet.
#[derive(Debug, Clone)]
pub struct GroupRow {
    /// 1-based data row number within the sheet, header excluded.
    pub row: usize,
    pub action: RowAction,
    /// Part category name the group is scoped to.
    pub part: String,
    /// Member device slugs.
    pub members: Vec<String>,
    pub note: Option<String>,
    pub source: Option<String>,
    pub tags: Vec<String>,
    /// Confidence in the claim; stored as `1.0` when absent.
    pub confidence: Option<f64>,
}

/// A fully parsed workbook, one vector per sheet, in apply order.
#[derive(Debug, Clone, Default)]
pub struct ImportBatch {
    pub brands: Vec<BrandRow>,
    pub parts: Vec<PartRow>,
    pub devices: Vec<DeviceRow>,
    pub groups: Vec<GroupRow>,
}

impl ImportBatch {
    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
            && self.parts.is_empty()
            && self.devices.is_empty()
            && self.groups.is_empty()
    }
}
