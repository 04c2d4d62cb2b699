//! Part category (frame, screen, battery, ...)

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "part_category")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub name: String,

    #[sea_orm(unique)]
    pub slug: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::compat_group::Entity")]
    CompatGroup,
}

impl Related<super::compat_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CompatGroup.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
