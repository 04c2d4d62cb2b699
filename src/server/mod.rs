//! Server application core modules.
//!
//! This module contains all server-side functionality for the fitment service,
//! including HTTP routing, the catalog data layer, device resolution,
//! compatibility checks, admin mutations, and bulk import/export. It provides
//! the complete backend for curating and querying which device models share
//! interchangeable parts.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod normalize;
pub mod router;
pub mod service;
pub mod startup;
