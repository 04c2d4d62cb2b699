use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::data::Page;

pub struct DeviceRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DeviceRepository<'a, C> {
    /// Creates a new instance of [`DeviceRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: i32) -> Result<Option<entity::device::Model>, DbErr> {
        entity::prelude::Device::find_by_id(id).one(self.db).await
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<entity::device::Model>, DbErr> {
        entity::prelude::Device::find()
            .filter(entity::device::Column::Slug.eq(slug))
            .one(self.db)
            .await
    }

    pub async fn get_by_ids(&self, ids: &[i32]) -> Result<Vec<entity::device::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Device::find()
            .filter(entity::device::Column::Id.is_in(ids.to_vec()))
            .all(self.db)
            .await
    }

    pub async fn get_by_slugs(&self, slugs: &[String]) -> Result<Vec<entity::device::Model>, DbErr> {
        if slugs.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Device::find()
            .filter(entity::device::Column::Slug.is_in(slugs.to_vec()))
            .all(self.db)
            .await
    }

    /// Devices whose normal form, or one of their alias normal forms, equals
    /// the query exactly. Newest first.
    pub async fn find_exact(
        &self,
        normalized: &str,
        limit: u64,
    ) -> Result<Vec<entity::device::Model>, DbErr> {
        let alias_device_ids: Vec<i32> = entity::prelude::DeviceAlias::find()
            .filter(entity::device_alias::Column::Normalized.eq(normalized))
            .select_only()
            .column(entity::device_alias::Column::DeviceId)
            .distinct()
            .into_tuple()
            .all(self.db)
            .await?;

        let mut condition =
            Condition::any().add(entity::device::Column::Normalized.eq(normalized));

        if !alias_device_ids.is_empty() {
            condition = condition.add(entity::device::Column::Id.is_in(alias_device_ids));
        }

        entity::prelude::Device::find()
            .filter(condition)
            .order_by_desc(entity::device::Column::CreatedAt)
            .order_by_desc(entity::device::Column::Id)
            .limit(limit)
            .all(self.db)
            .await
    }

    /// Devices whose normal form, or one of their alias normal forms, contains
    /// any of the given substrings. A coarse net; the caller ranks the result.
    pub async fn find_candidates(
        &self,
        patterns: &[String],
        cap: u64,
    ) -> Result<Vec<entity::device::Model>, DbErr> {
        if patterns.is_empty() {
            return Ok(Vec::new());
        }

        let mut alias_condition = Condition::any();
        for pattern in patterns {
            alias_condition =
                alias_condition.add(entity::device_alias::Column::Normalized.contains(pattern));
        }

        let alias_device_ids: Vec<i32> = entity::prelude::DeviceAlias::find()
            .filter(alias_condition)
            .select_only()
            .column(entity::device_alias::Column::DeviceId)
            .distinct()
            .into_tuple()
            .all(self.db)
            .await?;

        let mut condition = Condition::any();
        for pattern in patterns {
            condition = condition.add(entity::device::Column::Normalized.contains(pattern));
        }

        if !alias_device_ids.is_empty() {
            condition = condition.add(entity::device::Column::Id.is_in(alias_device_ids));
        }

        entity::prelude::Device::find()
            .filter(condition)
            .order_by_desc(entity::device::Column::CreatedAt)
            .order_by_desc(entity::device::Column::Id)
            .limit(cap)
            .all(self.db)
            .await
    }

    pub async fn create(
        &self,
        brand_id: i32,
        name: &str,
        slug: &str,
        normalized: &str,
    ) -> Result<entity::device::Model, DbErr> {
        let device = entity::device::ActiveModel {
            brand_id: ActiveValue::Set(brand_id),
            name: ActiveValue::Set(name.to_string()),
            slug: ActiveValue::Set(slug.to_string()),
            normalized: ActiveValue::Set(normalized.to_string()),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        device.insert(self.db).await
    }

    pub async fn update(
        &self,
        id: i32,
        brand_id: i32,
        name: &str,
        slug: &str,
        normalized: &str,
    ) -> Result<entity::device::Model, DbErr> {
        let device = entity::device::ActiveModel {
            id: ActiveValue::Set(id),
            brand_id: ActiveValue::Set(brand_id),
            name: ActiveValue::Set(name.to_string()),
            slug: ActiveValue::Set(slug.to_string()),
            normalized: ActiveValue::Set(normalized.to_string()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        device.update(self.db).await
    }

    /// Alias rows first, then the device itself
    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::DeviceAlias::delete_many()
            .filter(entity::device_alias::Column::DeviceId.eq(id))
            .exec(self.db)
            .await?;

        entity::prelude::Device::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Pages through devices with their brand, ordered by normal form.
    /// `filter` matches against the normal form; `page` is 1-based.
    pub async fn list(
        &self,
        page: u64,
        per_page: u64,
        filter: Option<&str>,
        brand_id: Option<i32>,
    ) -> Result<Page<(entity::device::Model, Option<entity::brand::Model>)>, DbErr> {
        let mut query =
            entity::prelude::Device::find().find_also_related(entity::prelude::Brand);

        if let Some(term) = filter {
            query = query.filter(entity::device::Column::Normalized.contains(term));
        }

        if let Some(brand_id) = brand_id {
            query = query.filter(entity::device::Column::BrandId.eq(brand_id));
        }

        let paginator = query
            .order_by_asc(entity::device::Column::Normalized)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let pages = paginator.num_pages().await?;
        let items = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok(Page {
            items,
            total,
            pages,
        })
    }

    /// Every device with its brand, ordered by normal form, for export
    pub async fn all_with_brands(
        &self,
    ) -> Result<Vec<(entity::device::Model, Option<entity::brand::Model>)>, DbErr> {
        entity::prelude::Device::find()
            .find_also_related(entity::prelude::Brand)
            .order_by_asc(entity::device::Column::Normalized)
            .all(self.db)
            .await
    }

    pub async fn aliases_for(
        &self,
        device_id: i32,
    ) -> Result<Vec<entity::device_alias::Model>, DbErr> {
        entity::prelude::DeviceAlias::find()
            .filter(entity::device_alias::Column::DeviceId.eq(device_id))
            .order_by_asc(entity::device_alias::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn aliases_for_devices(
        &self,
        device_ids: &[i32],
    ) -> Result<Vec<entity::device_alias::Model>, DbErr> {
        if device_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::DeviceAlias::find()
            .filter(entity::device_alias::Column::DeviceId.is_in(device_ids.to_vec()))
            .order_by_asc(entity::device_alias::Column::Id)
            .all(self.db)
            .await
    }

    /// Adds an alias spelling, or returns the existing row when the device
    /// already carries that normal form
    pub async fn add_alias(
        &self,
        device_id: i32,
        label: &str,
        normalized: &str,
    ) -> Result<entity::device_alias::Model, DbErr> {
        let existing = entity::prelude::DeviceAlias::find()
            .filter(entity::device_alias::Column::DeviceId.eq(device_id))
            .filter(entity::device_alias::Column::Normalized.eq(normalized))
            .one(self.db)
            .await?;

        if let Some(alias) = existing {
            return Ok(alias);
        }

        let alias = entity::device_alias::ActiveModel {
            device_id: ActiveValue::Set(device_id),
            label: ActiveValue::Set(label.to_string()),
            normalized: ActiveValue::Set(normalized.to_string()),
            ..Default::default()
        };

        alias.insert(self.db).await
    }

    /// Replaces the full alias set for a device. Pairs are (label, normal form).
    pub async fn replace_aliases(
        &self,
        device_id: i32,
        aliases: &[(String, String)],
    ) -> Result<(), DbErr> {
        entity::prelude::DeviceAlias::delete_many()
            .filter(entity::device_alias::Column::DeviceId.eq(device_id))
            .exec(self.db)
            .await?;

        let mut seen: Vec<&str> = Vec::new();
        let mut rows = Vec::new();

        for (label, normalized) in aliases {
            if normalized.is_empty() || seen.contains(&normalized.as_str()) {
                continue;
            }

            seen.push(normalized);
            rows.push(entity::device_alias::ActiveModel {
                device_id: ActiveValue::Set(device_id),
                label: ActiveValue::Set(label.clone()),
                normalized: ActiveValue::Set(normalized.clone()),
                ..Default::default()
            });
        }

        if !rows.is_empty() {
            entity::prelude::DeviceAlias::insert_many(rows)
                .exec(self.db)
                .await?;
        }

        Ok(())
    }

    /// Number of compatibility group memberships held by the device
    pub async fn membership_count(&self, device_id: i32) -> Result<u64, DbErr> {
        entity::prelude::CompatGroupMember::find()
            .filter(entity::compat_group_member::Column::DeviceId.eq(device_id))
            .count(self.db)
            .await
    }
}
