//! Test fixture modules for database record creation.
//!
//! Fixture helpers insert catalog records (brands, parts, devices, groups)
//! with get-or-existing semantics so tests can arrange preconditions without
//! worrying about duplicate rows.

pub mod catalog;
