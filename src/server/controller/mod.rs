//! HTTP controller endpoints for the fitment web API.
//!
//! This module contains Axum handlers for the public catalog lookups and the
//! token-protected admin surface. Controllers handle HTTP requests, validate
//! inputs, interact with services, and return appropriate HTTP responses.
//! Every endpoint carries a utoipa annotation for the OpenAPI documentation.

pub mod admin;
pub mod lookup;
pub mod util;
