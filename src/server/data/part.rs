use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, DeleteResult,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::data::Page;

pub struct PartRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PartRepository<'a, C> {
    /// Creates a new instance of [`PartRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: i32) -> Result<Option<entity::part_category::Model>, DbErr> {
        entity::prelude::PartCategory::find_by_id(id)
            .one(self.db)
            .await
    }

    pub async fn get_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<entity::part_category::Model>, DbErr> {
        entity::prelude::PartCategory::find()
            .filter(entity::part_category::Column::Slug.eq(slug))
            .one(self.db)
            .await
    }

    pub async fn get_by_name(
        &self,
        name: &str,
    ) -> Result<Option<entity::part_category::Model>, DbErr> {
        entity::prelude::PartCategory::find()
            .filter(entity::part_category::Column::Name.eq(name))
            .one(self.db)
            .await
    }

    pub async fn get_by_ids(
        &self,
        ids: &[i32],
    ) -> Result<Vec<entity::part_category::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::PartCategory::find()
            .filter(entity::part_category::Column::Id.is_in(ids.to_vec()))
            .all(self.db)
            .await
    }

    /// All part categories ordered by name, for dropdowns
    pub async fn list_all(&self) -> Result<Vec<entity::part_category::Model>, DbErr> {
        entity::prelude::PartCategory::find()
            .order_by_asc(entity::part_category::Column::Name)
            .all(self.db)
            .await
    }

    pub async fn create(
        &self,
        name: &str,
        slug: &str,
        description: Option<&str>,
    ) -> Result<entity::part_category::Model, DbErr> {
        let part = entity::part_category::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            slug: ActiveValue::Set(slug.to_string()),
            description: ActiveValue::Set(description.map(str::to_string)),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        part.insert(self.db).await
    }

    /// Rewrites name, slug and description; the caller supplies merged values
    pub async fn update(
        &self,
        id: i32,
        name: &str,
        slug: &str,
        description: Option<&str>,
    ) -> Result<entity::part_category::Model, DbErr> {
        let part = entity::part_category::ActiveModel {
            id: ActiveValue::Set(id),
            name: ActiveValue::Set(name.to_string()),
            slug: ActiveValue::Set(slug.to_string()),
            description: ActiveValue::Set(description.map(str::to_string)),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        part.update(self.db).await
    }

    pub async fn delete(&self, id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::PartCategory::delete_by_id(id)
            .exec(self.db)
            .await
    }

    /// Pages through part categories ordered by name, optionally filtered by
    /// a substring over name or slug. `page` is 1-based.
    pub async fn list(
        &self,
        page: u64,
        per_page: u64,
        filter: Option<&str>,
    ) -> Result<Page<entity::part_category::Model>, DbErr> {
        let mut query = entity::prelude::PartCategory::find();

        if let Some(term) = filter {
            query = query.filter(
                Condition::any()
                    .add(entity::part_category::Column::Name.contains(term))
                    .add(entity::part_category::Column::Slug.contains(term)),
            );
        }

        let paginator = query
            .order_by_asc(entity::part_category::Column::Name)
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

    /// True when at least one compatibility group references the part
    pub async fn has_groups(&self, part_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::CompatGroup::find()
            .filter(entity::compat_group::Column::PartId.eq(part_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }
}
