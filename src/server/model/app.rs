use sea_orm::DatabaseConnection;

use crate::server::config;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub admin_token: String,
    pub transactions: bool,
    pub known_brands: Vec<String>,
}

/// Builds state from `(db, admin token, transactions flag)` with the default
/// brand list. Used by the test utilities, which cannot depend on this crate.
impl From<(DatabaseConnection, String, bool)> for AppState {
    fn from((db, admin_token, transactions): (DatabaseConnection, String, bool)) -> Self {
        Self {
            db,
            admin_token,
            transactions,
            known_brands: config::default_known_brands(),
        }
    }
}
