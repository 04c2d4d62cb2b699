//! Test context structure and utilities.
//!
//! This module provides the `TestContext` returned by `TestBuilder` for test
//! execution. The context wraps an in-memory SQLite database with the catalog
//! schema created from the entity definitions.

use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};

use crate::{constant::TEST_ADMIN_TOKEN, error::TestError};

/// Test context structure returned by `TestBuilder`
///
/// Most users should create this via [`TestBuilder`](crate::TestBuilder) rather
/// than constructing it directly.
///
/// ```ignore
/// let test = TestBuilder::new().with_catalog_tables().build().await?;
///
/// // Access the database
/// let db = &test.db;
///
/// // Access fixture helpers
/// test.catalog().insert_brand("Realme").await?;
/// ```
pub struct TestContext {
    /// Database connection to in-memory SQLite database
    pub db: DatabaseConnection,
}

impl TestContext {
    /// Convert the database connection into any state type that can be
    /// constructed from `(connection, admin token, transactions enabled)`.
    ///
    /// This allows conversion to AppState without creating a circular
    /// dependency between the test-utils crate and the main fitment crate.
    ///
    /// # Example
    ///
    /// ```ignore
    /// // In integration tests
    /// let app_state: AppState = test.to_app_state();
    /// ```
    pub fn to_app_state<T>(&self) -> T
    where
        T: From<(DatabaseConnection, String, bool)>,
    {
        T::from((self.db.clone(), TEST_ADMIN_TOKEN.to_string(), true))
    }

    /// Same as [`Self::to_app_state`] but with the transactions capability
    /// flag turned off, for exercising the degraded import path.
    pub fn to_app_state_no_transactions<T>(&self) -> T
    where
        T: From<(DatabaseConnection, String, bool)>,
    {
        T::from((self.db.clone(), TEST_ADMIN_TOKEN.to_string(), false))
    }
}

impl TestContext {
    /// Create a new test context backed by a fresh in-memory SQLite database.
    pub(crate) async fn new() -> Result<Self, TestError> {
        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestContext { db })
    }

    /// Create database tables from schema statements.
    ///
    /// Executes CREATE TABLE statements for all provided table schemas. Used
    /// internally by TestBuilder during test initialization.
    pub(crate) async fn with_tables(
        &self,
        stmts: Vec<TableCreateStatement>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }
}
