//! Parts compatibility lookup service for phone and tablet repair catalogs.
//!
//! The crate exposes a web API for resolving free-form device names, checking
//! which device models share interchangeable parts, and curating the catalog
//! behind those answers.

pub mod model;
pub mod server;
