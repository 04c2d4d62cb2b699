use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, DeleteResult,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::data::Page;

pub struct BrandRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> BrandRepository<'a, C> {
    /// Creates a new instance of [`BrandRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: i32) -> Result<Option<entity::brand::Model>, DbErr> {
        entity::prelude::Brand::find_by_id(id).one(self.db).await
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<entity::brand::Model>, DbErr> {
        entity::prelude::Brand::find()
            .filter(entity::brand::Column::Slug.eq(slug))
            .one(self.db)
            .await
    }

    pub async fn get_by_ids(&self, ids: &[i32]) -> Result<Vec<entity::brand::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Brand::find()
            .filter(entity::brand::Column::Id.is_in(ids.to_vec()))
            .all(self.db)
            .await
    }

    /// Every brand ordered by name, for export
    pub async fn all(&self) -> Result<Vec<entity::brand::Model>, DbErr> {
        entity::prelude::Brand::find()
            .order_by_asc(entity::brand::Column::Name)
            .all(self.db)
            .await
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<entity::brand::Model>, DbErr> {
        entity::prelude::Brand::find()
            .filter(entity::brand::Column::Name.eq(name))
            .one(self.db)
            .await
    }

    /// Creates a new brand
    pub async fn create(&self, name: &str, slug: &str) -> Result<entity::brand::Model, DbErr> {
        let brand = entity::brand::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            slug: ActiveValue::Set(slug.to_string()),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        brand.insert(self.db).await
    }

    /// Renames a brand; the caller supplies the re-derived slug
    pub async fn update(
        &self,
        id: i32,
        name: &str,
        slug: &str,
    ) -> Result<entity::brand::Model, DbErr> {
        let brand = entity::brand::ActiveModel {
            id: ActiveValue::Set(id),
            name: ActiveValue::Set(name.to_string()),
            slug: ActiveValue::Set(slug.to_string()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        brand.update(self.db).await
    }

    /// Deletes a brand
    ///
    /// Returns OK regardless of the brand existing, to confirm the deletion
    /// result check the [`DeleteResult::rows_affected`] field.
    pub async fn delete(&self, id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Brand::delete_by_id(id).exec(self.db).await
    }

    /// Pages through brands ordered by name, optionally filtered by a
    /// substring over name or slug. `page` is 1-based.
    pub async fn list(
        &self,
        page: u64,
        per_page: u64,
        filter: Option<&str>,
    ) -> Result<Page<entity::brand::Model>, DbErr> {
        let mut query = entity::prelude::Brand::find();

        if let Some(term) = filter {
            query = query.filter(
                Condition::any()
                    .add(entity::brand::Column::Name.contains(term))
                    .add(entity::brand::Column::Slug.contains(term)),
            );
        }

        let paginator = query
            .order_by_asc(entity::brand::Column::Name)
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

    /// True when at least one device references the brand
    pub async fn has_devices(&self, brand_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Device::find()
            .filter(entity::device::Column::BrandId.eq(brand_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }
}
