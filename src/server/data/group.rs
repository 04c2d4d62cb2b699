use chrono::Utc;
use migration::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    ExprTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};

use crate::server::data::Page;

pub struct GroupRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GroupRepository<'a, C> {
    /// Creates a new instance of [`GroupRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: i32) -> Result<Option<entity::compat_group::Model>, DbErr> {
        entity::prelude::CompatGroup::find_by_id(id).one(self.db).await
    }

    pub async fn get_by_ids(
        &self,
        ids: &[i32],
    ) -> Result<Vec<entity::compat_group::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::CompatGroup::find()
            .filter(entity::compat_group::Column::Id.is_in(ids.to_vec()))
            .order_by_asc(entity::compat_group::Column::Id)
            .all(self.db)
            .await
    }

    /// The group holding exactly this member set for the part, if present
    pub async fn get_by_part_and_key(
        &self,
        part_id: i32,
        members_key: &str,
    ) -> Result<Option<entity::compat_group::Model>, DbErr> {
        entity::prelude::CompatGroup::find()
            .filter(entity::compat_group::Column::PartId.eq(part_id))
            .filter(entity::compat_group::Column::MembersKey.eq(members_key))
            .one(self.db)
            .await
    }

    /// Inserts a group and its member rows. `member_ids` must already be
    /// distinct and match `members_key`.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        part_id: i32,
        members_key: &str,
        member_ids: &[i32],
        note: Option<&str>,
        source: Option<&str>,
        tags: Option<&str>,
        confidence: f64,
    ) -> Result<entity::compat_group::Model, DbErr> {
        let group = entity::compat_group::ActiveModel {
            part_id: ActiveValue::Set(part_id),
            members_key: ActiveValue::Set(members_key.to_string()),
            note: ActiveValue::Set(note.map(str::to_string)),
            source: ActiveValue::Set(source.map(str::to_string)),
            tags: ActiveValue::Set(tags.map(str::to_string)),
            confidence: ActiveValue::Set(confidence),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        let group = group.insert(self.db).await?;

        let members: Vec<entity::compat_group_member::ActiveModel> = member_ids
            .iter()
            .map(|device_id| entity::compat_group_member::ActiveModel {
                group_id: ActiveValue::Set(group.id),
                device_id: ActiveValue::Set(*device_id),
            })
            .collect();

        if !members.is_empty() {
            entity::prelude::CompatGroupMember::insert_many(members)
                .exec(self.db)
                .await?;
        }

        Ok(group)
    }

    pub async fn update_metadata(
        &self,
        id: i32,
        note: Option<&str>,
        source: Option<&str>,
        tags: Option<&str>,
        confidence: f64,
    ) -> Result<entity::compat_group::Model, DbErr> {
        let group = entity::compat_group::ActiveModel {
            id: ActiveValue::Set(id),
            note: ActiveValue::Set(note.map(str::to_string)),
            source: ActiveValue::Set(source.map(str::to_string)),
            tags: ActiveValue::Set(tags.map(str::to_string)),
            confidence: ActiveValue::Set(confidence),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        group.update(self.db).await
    }

    /// Swaps the member set of a group. `member_ids` must already be distinct
    /// and match `members_key`.
    pub async fn replace_members(
        &self,
        group_id: i32,
        members_key: &str,
        member_ids: &[i32],
    ) -> Result<(), DbErr> {
        entity::prelude::CompatGroupMember::delete_many()
            .filter(entity::compat_group_member::Column::GroupId.eq(group_id))
            .exec(self.db)
            .await?;

        let members: Vec<entity::compat_group_member::ActiveModel> = member_ids
            .iter()
            .map(|device_id| entity::compat_group_member::ActiveModel {
                group_id: ActiveValue::Set(group_id),
                device_id: ActiveValue::Set(*device_id),
            })
            .collect();

        if !members.is_empty() {
            entity::prelude::CompatGroupMember::insert_many(members)
                .exec(self.db)
                .await?;
        }

        let group = entity::compat_group::ActiveModel {
            id: ActiveValue::Set(group_id),
            members_key: ActiveValue::Set(members_key.to_string()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        group.update(self.db).await?;

        Ok(())
    }

    /// Members first, then the group row itself
    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::CompatGroupMember::delete_many()
            .filter(entity::compat_group_member::Column::GroupId.eq(id))
            .exec(self.db)
            .await?;

        entity::prelude::CompatGroup::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Groups the device belongs to, oldest first, optionally narrowed to one
    /// part category
    pub async fn groups_for_device(
        &self,
        device_id: i32,
        part_id: Option<i32>,
    ) -> Result<Vec<entity::compat_group::Model>, DbErr> {
        let mut query = entity::prelude::CompatGroup::find()
            .join(
                JoinType::InnerJoin,
                entity::compat_group::Relation::CompatGroupMember.def(),
            )
            .filter(entity::compat_group_member::Column::DeviceId.eq(device_id));

        if let Some(part_id) = part_id {
            query = query.filter(entity::compat_group::Column::PartId.eq(part_id));
        }

        query
            .order_by_asc(entity::compat_group::Column::Id)
            .all(self.db)
            .await
    }

    /// Groups containing any of the given devices, optionally narrowed to one
    /// part category. Distinct even when several queried devices share a group.
    pub async fn groups_for_any_devices(
        &self,
        device_ids: &[i32],
        part_id: Option<i32>,
    ) -> Result<Vec<entity::compat_group::Model>, DbErr> {
        if device_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = entity::prelude::CompatGroup::find()
            .join(
                JoinType::InnerJoin,
                entity::compat_group::Relation::CompatGroupMember.def(),
            )
            .filter(entity::compat_group_member::Column::DeviceId.is_in(device_ids.to_vec()))
            .distinct();

        if let Some(part_id) = part_id {
            query = query.filter(entity::compat_group::Column::PartId.eq(part_id));
        }

        query
            .order_by_asc(entity::compat_group::Column::Id)
            .all(self.db)
            .await
    }

    /// Ids of groups for the part whose member set contains every one of the
    /// given devices. `device_ids` must already be distinct.
    pub async fn find_superset(
        &self,
        part_id: i32,
        device_ids: &[i32],
    ) -> Result<Vec<i32>, DbErr> {
        if device_ids.is_empty() {
            return Ok(Vec::new());
        }

        let wanted = device_ids.len() as i64;

        entity::prelude::CompatGroupMember::find()
            .join(
                JoinType::InnerJoin,
                entity::compat_group_member::Relation::CompatGroup.def(),
            )
            .filter(entity::compat_group::Column::PartId.eq(part_id))
            .filter(entity::compat_group_member::Column::DeviceId.is_in(device_ids.to_vec()))
            .select_only()
            .column(entity::compat_group_member::Column::GroupId)
            .group_by(entity::compat_group_member::Column::GroupId)
            .having(
                Expr::col((
                    entity::compat_group_member::Entity,
                    entity::compat_group_member::Column::DeviceId,
                ))
                .count()
                .eq(wanted),
            )
            .order_by_asc(entity::compat_group_member::Column::GroupId)
            .into_tuple()
            .all(self.db)
            .await
    }

    pub async fn members_for_groups(
        &self,
        group_ids: &[i32],
    ) -> Result<Vec<entity::compat_group_member::Model>, DbErr> {
        if group_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::CompatGroupMember::find()
            .filter(entity::compat_group_member::Column::GroupId.is_in(group_ids.to_vec()))
            .order_by_asc(entity::compat_group_member::Column::GroupId)
            .order_by_asc(entity::compat_group_member::Column::DeviceId)
            .all(self.db)
            .await
    }

    /// Every group for the part, oldest first
    pub async fn for_part(
        &self,
        part_id: i32,
    ) -> Result<Vec<entity::compat_group::Model>, DbErr> {
        entity::prelude::CompatGroup::find()
            .filter(entity::compat_group::Column::PartId.eq(part_id))
            .order_by_asc(entity::compat_group::Column::Id)
            .all(self.db)
            .await
    }

    // Pages through groups ordered by part then id; `page` is 1-based
    //
    // The filter searches across the part's name and slug, member device
    // names and slugs, and the group's own note and source.
    pub async fn list(
        &self,
        page: u64,
        per_page: u64,
        filter: Option<&str>,
        part_id: Option<i32>,
    ) -> Result<Page<entity::compat_group::Model>, DbErr> {
        let mut query = entity::prelude::CompatGroup::find();

        if let Some(filter) = filter {
            query = query
                .join(
                    JoinType::InnerJoin,
                    entity::compat_group::Relation::PartCategory.def(),
                )
                .join(
                    JoinType::InnerJoin,
                    entity::compat_group::Relation::CompatGroupMember.def(),
                )
                .join(
                    JoinType::InnerJoin,
                    entity::compat_group_member::Relation::Device.def(),
                )
                .filter(
                    Condition::any()
                        .add(entity::part_category::Column::Name.contains(filter))
                        .add(entity::part_category::Column::Slug.contains(filter))
                        .add(entity::device::Column::Name.contains(filter))
                        .add(entity::device::Column::Slug.contains(filter))
                        .add(entity::compat_group::Column::Note.contains(filter))
                        .add(entity::compat_group::Column::Source.contains(filter)),
                )
                .distinct();
        }

        if let Some(part_id) = part_id {
            query = query.filter(entity::compat_group::Column::PartId.eq(part_id));
        }

        let paginator = query
            .order_by_asc(entity::compat_group::Column::PartId)
            .order_by_asc(entity::compat_group::Column::Id)
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

    /// Every group in part then id order, for export
    pub async fn all(&self) -> Result<Vec<entity::compat_group::Model>, DbErr> {
        entity::prelude::CompatGroup::find()
            .order_by_asc(entity::compat_group::Column::PartId)
            .order_by_asc(entity::compat_group::Column::Id)
            .all(self.db)
            .await
    }
}
