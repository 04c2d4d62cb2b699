use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260823_000003_device::Device;

static IDX_DEVICE_ALIAS_NORMALIZED: &str = "idx-device_alias-normalized";
static IDX_DEVICE_ALIAS_DEVICE_ID_NORMALIZED: &str = "idx-device_alias-device_id-normalized";
static FK_DEVICE_ALIAS_DEVICE_ID: &str = "fk-device_alias-device_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DeviceAlias::Table)
                    .if_not_exists()
                    .col(pk_auto(DeviceAlias::Id))
                    .col(integer(DeviceAlias::DeviceId))
                    .col(string(DeviceAlias::Label))
                    .col(string(DeviceAlias::Normalized))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_DEVICE_ALIAS_NORMALIZED)
                    .table(DeviceAlias::Table)
                    .col(DeviceAlias::Normalized)
                    .to_owned(),
            )
            .await?;

        // One alias spelling per device, compared case-insensitively
        manager
            .create_index(
                Index::create()
                    .name(IDX_DEVICE_ALIAS_DEVICE_ID_NORMALIZED)
                    .table(DeviceAlias::Table)
                    .col(DeviceAlias::DeviceId)
                    .col(DeviceAlias::Normalized)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_DEVICE_ALIAS_DEVICE_ID)
                    .from_tbl(DeviceAlias::Table)
                    .from_col(DeviceAlias::DeviceId)
                    .to_tbl(Device::Table)
                    .to_col(Device::Id)
                    .on_update(ForeignKeyAction::Cascade)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_DEVICE_ALIAS_DEVICE_ID)
                    .table(DeviceAlias::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_DEVICE_ALIAS_DEVICE_ID_NORMALIZED)
                    .table(DeviceAlias::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_DEVICE_ALIAS_NORMALIZED)
                    .table(DeviceAlias::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(DeviceAlias::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum DeviceAlias {
    Table,
    Id,
    DeviceId,
    Label,
    Normalized,
}
