use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Errors raised by the admin gate before a handler runs.
///
/// Identity is established outside this service; the gate only checks the
/// bearer token presented with the request.
#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Missing or malformed authorization header")]
    Unauthorized,
    #[error("Admin access required")]
    Forbidden,
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorDto {
                    error: "Unauthorized".to_string(),
                }),
            )
                .into_response(),
            Self::Forbidden => (
                StatusCode::FORBIDDEN,
                Json(ErrorDto {
                    error: "Forbidden".to_string(),
                }),
            )
                .into_response(),
        }
    }
}
