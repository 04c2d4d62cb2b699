//! Tests for HTTP controller endpoints.
//!
//! This module contains integration tests for the application's HTTP
//! controllers, verifying request handling, response formatting, admin token
//! checks, and error handling for all API endpoints.

mod admin;
mod lookup;

use axum::response::Response;

/// Deserializes a handler response body, panicking on anything unreadable.
pub async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");

    serde_json::from_slice(&bytes).expect("response body was not valid JSON")
}

/// Reads a handler response body as text.
pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");

    String::from_utf8(bytes.to_vec()).expect("response body was not UTF-8")
}
