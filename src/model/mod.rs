//! Data transfer objects shared across the HTTP API.

pub mod api;
pub mod catalog;
pub mod import;
