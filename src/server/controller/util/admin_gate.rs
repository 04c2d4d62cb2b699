use axum::http::{header, HeaderMap};

use crate::server::{
    error::{admin::AdminError, Error},
    model::app::AppState,
};

/// Checks the bearer token on an admin request
///
/// # Arguments
/// - `state`: Application state carrying the configured admin token
/// - `headers`: The request headers
///
/// # Returns
/// - `Ok(())`: The caller presented the admin token
/// - `Err(Error::AdminError(AdminError::Unauthorized))`: Header missing or not a bearer token
/// - `Err(Error::AdminError(AdminError::Forbidden))`: Token present but wrong
pub fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<(), Error> {
    let header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AdminError::Unauthorized)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AdminError::Unauthorized)?;

    if token != state.admin_token {
        return Err(AdminError::Forbidden.into());
    }

    Ok(())
}
