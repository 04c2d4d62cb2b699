//! Alternate names for a device ("RMX1941", "Realme C2 2020")
//!
//! The label keeps its original casing for display; dedup and matching go
//! through the normalized column.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "device_alias")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub device_id: i32,

    pub label: String,

    pub normalized: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::device::Entity",
        from = "Column::DeviceId",
        to = "super::device::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Device,
}

impl Related<super::device::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Device.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
