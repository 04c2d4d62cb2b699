//! Declarative test builder for test environment setup.
//!
//! This module provides the `TestBuilder` API for configuring test
//! environments before execution. The builder pattern allows chaining multiple
//! configuration methods together, with all operations queued and executed
//! during the final `build()` call.

use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, TestContext};

/// Builder for declarative test initialization.
///
/// Provides an interface for setting up test environments with database
/// tables and catalog fixtures. Methods can be chained together and finalized
/// with `build()` to create a complete test setup.
pub struct TestBuilder {
    // Tables to create
    tables: Vec<TableCreateStatement>,
    include_catalog_tables: bool,

    // Database fixtures to insert
    brands: Vec<String>,
    parts: Vec<(String, Option<String>)>, // (name, description)
    devices: Vec<(String, String, Vec<String>)>, // (brand name, model name, aliases)
    groups: Vec<(String, Vec<String>)>,   // (part name, member device slugs)
}

impl TestBuilder {
    /// Create a new TestBuilder with no tables or fixtures configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_catalog_tables: false,
            brands: Vec::new(),
            parts: Vec::new(),
            devices: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Add the standard catalog tables to the test database.
    ///
    /// Creates all tables backing the compatibility catalog: Brand,
    /// PartCategory, Device, DeviceAlias, CompatGroup and CompatGroupMember.
    pub fn with_catalog_tables(mut self) -> Self {
        self.include_catalog_tables = true;
        self
    }

    /// Add a custom entity table to the test database.
    ///
    /// Generates a CREATE TABLE statement for the entity, which will be
    /// executed during `build()`. Chain multiple calls to add multiple tables.
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Queue a brand fixture to be inserted during `build()`.
    pub fn with_brand(mut self, name: impl Into<String>) -> Self {
        self.brands.push(name.into());
        self
    }

    /// Queue a part category fixture to be inserted during `build()`.
    pub fn with_part(mut self, name: impl Into<String>) -> Self {
        self.parts.push((name.into(), None));
        self
    }

    /// Queue a device fixture to be inserted during `build()`.
    ///
    /// The brand is created automatically when it doesn't already exist. The
    /// device slug is derived from brand plus model name, so `("Realme",
    /// "C2")` can later be referenced as `realme-c2`.
    pub fn with_device(
        mut self,
        brand: impl Into<String>,
        name: impl Into<String>,
        aliases: &[&str],
    ) -> Self {
        self.devices.push((
            brand.into(),
            name.into(),
            aliases.iter().map(|a| a.to_string()).collect(),
        ));
        self
    }

    /// Queue a compatibility group fixture to be inserted during `build()`.
    ///
    /// Member devices are referenced by slug and must be queued via
    /// [`Self::with_device`] before the group. The part category is created
    /// automatically when missing.
    pub fn with_group(mut self, part: impl Into<String>, member_slugs: &[&str]) -> Self {
        self.groups.push((
            part.into(),
            member_slugs.iter().map(|s| s.to_string()).collect(),
        ));
        self
    }

    /// Build the test setup by creating all configured tables and fixtures.
    ///
    /// Executes all queued operations in the following order:
    /// 1. Creates database tables (catalog tables if requested, then custom)
    /// 2. Inserts fixtures in dependency order (brands, parts, devices,
    ///    groups)
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully configured test environment ready for use
    /// - `Err(TestError::DbErr)` - Table creation or fixture insertion failed
    /// - `Err(TestError::Fixture)` - A group referenced a device slug that
    ///   was never queued
    pub async fn build(self) -> Result<TestContext, TestError> {
        let setup = TestContext::new().await?;

        // 1. Create tables
        let mut all_tables = Vec::new();

        if self.include_catalog_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::Brand),
                schema.create_table_from_entity(entity::prelude::PartCategory),
                schema.create_table_from_entity(entity::prelude::Device),
                schema.create_table_from_entity(entity::prelude::DeviceAlias),
                schema.create_table_from_entity(entity::prelude::CompatGroup),
                schema.create_table_from_entity(entity::prelude::CompatGroupMember),
            ]);
        }

        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        // 2. Insert fixtures in dependency order
        for name in self.brands {
            setup.catalog().insert_brand(&name).await?;
        }

        for (name, description) in self.parts {
            setup
                .catalog()
                .insert_part(&name, description.as_deref())
                .await?;
        }

        for (brand, name, aliases) in self.devices {
            let alias_refs = aliases.iter().map(String::as_str).collect::<Vec<_>>();
            setup
                .catalog()
                .insert_device(&brand, &name, &alias_refs)
                .await?;
        }

        for (part, member_slugs) in self.groups {
            let slug_refs = member_slugs.iter().map(String::as_str).collect::<Vec<_>>();
            setup.catalog().insert_group(&part, &slug_refs).await?;
        }

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
