//! Startup helpers wiring configuration to live connections.

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::server::{config::Config, error::Error, model::app::AppState};

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Application state from the configuration and an open connection
pub fn build_state(config: &Config, db: DatabaseConnection) -> AppState {
    AppState {
        db,
        admin_token: config.admin_token.clone(),
        transactions: config.transactions,
        known_brands: config.known_brands.clone(),
    }
}
