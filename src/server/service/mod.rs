//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer that implements business logic, coordinates
//! between repositories and handles complex multi-step operations. Services include
//! fuzzy device resolution, compatibility lookups, catalog administration, bulk
//! import/export with its workbook codec, and legacy seed ingestion.

pub mod catalog;
pub mod compat;
pub mod import;
pub mod resolver;
pub mod seed;
pub mod workbook;
