//! Tests for admin controller endpoints.
//!
//! This module contains integration tests for the token-protected catalog
//! admin routes: brand, part category, device and group mutations plus the
//! workbook import/export and seed ingestion endpoints.

mod brand;
mod device;
mod group;
mod transfer;

use axum::http::{header, HeaderMap, HeaderValue};
use fitment_test_utils::prelude::*;

use super::*;

/// Headers carrying the admin bearer token tests are built with.
pub fn admin_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {TEST_ADMIN_TOKEN}")).unwrap(),
    );

    headers
}

/// Headers carrying a bearer token no deployment would accept.
pub fn wrong_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_static("Bearer not-the-admin-token"),
    );

    headers
}
