use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Domain errors for catalog reads and admin mutations.
///
/// Read paths treat absence as an empty result; these errors surface on the
/// write path and on reads that address a specific record.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Input failed validation (missing fields, empty member sets,
    /// unresolvable references).
    #[error("{0}")]
    Validation(String),
    /// A record addressed by id or slug does not exist.
    #[error("{0} not found")]
    NotFound(String),
    /// The mutation would violate a uniqueness or referential-integrity
    /// guarantee.
    #[error("{0}")]
    Conflict(String),
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
        };

        tracing::debug!("{}", self);

        (
            status,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
