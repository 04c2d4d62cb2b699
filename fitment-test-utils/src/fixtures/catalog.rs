//! Catalog record insertion utilities.
//!
//! This module provides methods for inserting catalog records into the test
//! database with automatic parent creation. If a parent record is referenced
//! but doesn't exist, it is created automatically to maintain referential
//! integrity: devices create their brand, groups create their part category.

use chrono::Utc;
use sea_orm::{ActiveValue, ColumnTrait, EntityTrait, QueryFilter};

use crate::{
    error::TestError,
    model::{BrandModel, CompatGroupModel, DeviceModel, PartCategoryModel},
    TestContext,
};

impl TestContext {
    pub fn catalog(&self) -> CatalogFixtures<'_> {
        CatalogFixtures { ctx: self }
    }
}

pub struct CatalogFixtures<'a> {
    ctx: &'a TestContext,
}

// Fixture inputs are plain ASCII names, so lowercasing plus whitespace
// collapse mirrors the production normal form exactly.
fn normal(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn slug(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

impl<'a> CatalogFixtures<'a> {
    /// Insert a brand, returning the existing record when one with the same
    /// slug is already present.
    pub async fn insert_brand(&self, name: &str) -> Result<BrandModel, TestError> {
        let brand_slug = slug(name);

        if let Some(existing) = entity::prelude::Brand::find()
            .filter(entity::brand::Column::Slug.eq(&brand_slug))
            .one(&self.ctx.db)
            .await?
        {
            return Ok(existing);
        }

        Ok(entity::prelude::Brand::insert(entity::brand::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            slug: ActiveValue::Set(brand_slug),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        })
        .exec_with_returning(&self.ctx.db)
        .await?)
    }

    /// Insert a part category, returning the existing record when one with
    /// the same slug is already present.
    pub async fn insert_part(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<PartCategoryModel, TestError> {
        let part_slug = slug(name);

        if let Some(existing) = entity::prelude::PartCategory::find()
            .filter(entity::part_category::Column::Slug.eq(&part_slug))
            .one(&self.ctx.db)
            .await?
        {
            return Ok(existing);
        }

        Ok(
            entity::prelude::PartCategory::insert(entity::part_category::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                slug: ActiveValue::Set(part_slug),
                description: ActiveValue::Set(description.map(str::to_string)),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.ctx.db)
            .await?,
        )
    }

    /// Insert a device under a brand, creating the brand when missing.
    ///
    /// The slug and normalized columns are derived from the brand name plus
    /// the model name. Aliases are inserted alongside, skipping any already
    /// present for the device.
    pub async fn insert_device(
        &self,
        brand_name: &str,
        name: &str,
        aliases: &[&str],
    ) -> Result<DeviceModel, TestError> {
        let brand = self.insert_brand(brand_name).await?;

        let full_name = format!("{} {}", brand.name, name);
        let device_slug = slug(&full_name);

        let device = match entity::prelude::Device::find()
            .filter(entity::device::Column::Slug.eq(&device_slug))
            .one(&self.ctx.db)
            .await?
        {
            Some(existing) => existing,
            None => {
                entity::prelude::Device::insert(entity::device::ActiveModel {
                    brand_id: ActiveValue::Set(brand.id),
                    name: ActiveValue::Set(name.to_string()),
                    slug: ActiveValue::Set(device_slug),
                    normalized: ActiveValue::Set(normal(&full_name)),
                    created_at: ActiveValue::Set(Utc::now().naive_utc()),
                    updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                    ..Default::default()
                })
                .exec_with_returning(&self.ctx.db)
                .await?
            }
        };

        for alias in aliases {
            let alias_normal = normal(alias);

            let existing = entity::prelude::DeviceAlias::find()
                .filter(entity::device_alias::Column::DeviceId.eq(device.id))
                .filter(entity::device_alias::Column::Normalized.eq(&alias_normal))
                .one(&self.ctx.db)
                .await?;

            if existing.is_none() {
                entity::prelude::DeviceAlias::insert(entity::device_alias::ActiveModel {
                    device_id: ActiveValue::Set(device.id),
                    label: ActiveValue::Set(alias.to_string()),
                    normalized: ActiveValue::Set(alias_normal),
                    ..Default::default()
                })
                .exec(&self.ctx.db)
                .await?;
            }
        }

        Ok(device)
    }

    /// Insert a compatibility group for a part over already-inserted devices,
    /// referenced by slug. Creates the part category when missing; returns
    /// the existing group when one with the same member set is present.
    pub async fn insert_group(
        &self,
        part_name: &str,
        member_slugs: &[&str],
    ) -> Result<CompatGroupModel, TestError> {
        let part = self.insert_part(part_name, None).await?;

        let mut member_ids = Vec::with_capacity(member_slugs.len());
        for member_slug in member_slugs {
            let device = entity::prelude::Device::find()
                .filter(entity::device::Column::Slug.eq(*member_slug))
                .one(&self.ctx.db)
                .await?
                .ok_or_else(|| {
                    TestError::Fixture(format!("device '{member_slug}' was not inserted"))
                })?;

            member_ids.push(device.id);
        }

        member_ids.sort_unstable();
        member_ids.dedup();

        if member_ids.is_empty() {
            return Err(TestError::Fixture(
                "a compatibility group needs at least one member".to_string(),
            ));
        }

        let members_key = member_ids
            .iter()
            .map(i32::to_string)
            .collect::<Vec<_>>()
            .join("-");

        if let Some(existing) = entity::prelude::CompatGroup::find()
            .filter(entity::compat_group::Column::PartId.eq(part.id))
            .filter(entity::compat_group::Column::MembersKey.eq(&members_key))
            .one(&self.ctx.db)
            .await?
        {
            return Ok(existing);
        }

        let group = entity::prelude::CompatGroup::insert(entity::compat_group::ActiveModel {
            part_id: ActiveValue::Set(part.id),
            members_key: ActiveValue::Set(members_key),
            note: ActiveValue::Set(None),
            source: ActiveValue::Set(None),
            tags: ActiveValue::Set(None),
            confidence: ActiveValue::Set(1.0),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        })
        .exec_with_returning(&self.ctx.db)
        .await?;

        let members = member_ids
            .into_iter()
            .map(|device_id| entity::compat_group_member::ActiveModel {
                group_id: ActiveValue::Set(group.id),
                device_id: ActiveValue::Set(device_id),
            })
            .collect::<Vec<_>>();

        entity::prelude::CompatGroupMember::insert_many(members)
            .exec(&self.ctx.db)
            .await?;

        Ok(group)
    }
}
