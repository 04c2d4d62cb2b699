use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Errors specific to bulk import runs.
#[derive(Error, Debug)]
pub enum ImportError {
    /// Dry runs are only honest when the whole batch can be rolled back, so
    /// they are refused outright when the transactions capability is off.
    #[error("Dry run requires transaction support, which is disabled for this deployment")]
    TransactionUnavailable,
}

impl IntoResponse for ImportError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::TransactionUnavailable => (
                StatusCode::BAD_REQUEST,
                Json(ErrorDto {
                    error: self.to_string(),
                }),
            )
                .into_response(),
        }
    }
}
