//! Error types for the fitment server application.
//!
//! This module provides the error handling system with specialized error types
//! for different domains (catalog mutations, the admin gate, bulk imports).
//! All errors implement `IntoResponse` for Axum HTTP responses and use
//! `thiserror` for ergonomic error definitions with automatic `Display` and
//! `Error` trait implementations.

pub mod admin;
pub mod catalog;
pub mod import;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{admin::AdminError, catalog::CatalogError, import::ImportError},
};

/// Main error type for the fitment server application.
///
/// Aggregates the domain-specific error types and external library errors
/// into a single unified error type. It uses `thiserror`'s `#[from]`
/// attribute to enable automatic conversion from underlying error types via
/// the `?` operator. The `IntoResponse` implementation maps errors to
/// appropriate HTTP responses for API consumers.
///
/// # Error Categories
/// - Catalog errors (validation, missing records, uniqueness conflicts)
/// - Admin gate errors (missing or wrong bearer token)
/// - Import errors (dry run without transaction support)
/// - Database errors (query failures, connection issues)
#[derive(Error, Debug)]
pub enum Error {
    /// Catalog error (validation, missing records, conflicts).
    #[error(transparent)]
    CatalogError(#[from] CatalogError),
    /// Admin gate error (missing or wrong bearer token).
    #[error(transparent)]
    AdminError(#[from] AdminError),
    /// Bulk import error (dry run without transaction support).
    #[error(transparent)]
    ImportError(#[from] ImportError),
    /// Database error (query failures, connection issues, constraint
    /// violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
}

/// Converts application errors into HTTP responses.
///
/// Domain errors carry their own response mappings; everything else is
/// treated as an internal server error (500) with logging.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::CatalogError(err) => err.into_response(),
            Self::AdminError(err) => err.into_response(),
            Self::ImportError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal
/// Server Error response.
///
/// This struct logs the error message and returns a generic "Internal server
/// error" message to the client to avoid leaking implementation details. Used
/// as a fallback for errors that don't have specific HTTP response mappings.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
