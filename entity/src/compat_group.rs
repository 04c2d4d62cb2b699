//! Compatibility group: a set of devices sharing one interchangeable part
//!
//! Groups are undirected. Two groups are the same group exactly when they
//! share a part and an identical member set, which `members_key` (the sorted
//! member device ids joined with `-`) makes enforceable with a unique index.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "compat_group")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub part_id: i32,

    /// Canonical encoding of the member set, unique together with part_id
    pub members_key: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub note: Option<String>,

    /// Provenance of the grouping (e.g. a seed batch identifier)
    pub source: Option<String>,

    /// Comma-joined labels; split into a list at the API boundary
    pub tags: Option<String>,

    /// Curator confidence in the grouping, 1.0 unless stated otherwise
    pub confidence: f64,

    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::part_category::Entity",
        from = "Column::PartId",
        to = "super::part_category::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    PartCategory,
    #[sea_orm(has_many = "super::compat_group_member::Entity")]
    CompatGroupMember,
}

impl Related<super::part_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PartCategory.def()
    }
}

impl Related<super::compat_group_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CompatGroupMember.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
