//! Device model belonging to a brand

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "device")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub brand_id: i32,

    /// Model name without the brand prefix ("C2", "A1k")
    pub name: String,

    /// URL-friendly identifier derived from brand name + model name
    #[sea_orm(unique)]
    pub slug: String,

    /// Normalized "brand name" form used for exact lookups; re-derived
    /// whenever the name or owning brand changes
    pub normalized: String,

    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::brand::Entity",
        from = "Column::BrandId",
        to = "super::brand::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Brand,
    #[sea_orm(has_many = "super::device_alias::Entity")]
    DeviceAlias,
    #[sea_orm(has_many = "super::compat_group_member::Entity")]
    CompatGroupMember,
}

impl Related<super::brand::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Brand.def()
    }
}

impl Related<super::device_alias::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DeviceAlias.def()
    }
}

impl Related<super::compat_group_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CompatGroupMember.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
