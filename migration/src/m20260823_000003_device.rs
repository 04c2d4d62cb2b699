use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260823_000001_brand::Brand;

static IDX_DEVICE_BRAND_ID: &str = "idx-device-brand_id";
static IDX_DEVICE_NORMALIZED: &str = "idx-device-normalized";
static FK_DEVICE_BRAND_ID: &str = "fk-device-brand_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Device::Table)
                    .if_not_exists()
                    .col(pk_auto(Device::Id))
                    .col(integer(Device::BrandId))
                    .col(string(Device::Name))
                    .col(string_uniq(Device::Slug))
                    .col(string(Device::Normalized))
                    .col(timestamp(Device::CreatedAt))
                    .col(timestamp(Device::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_DEVICE_BRAND_ID)
                    .table(Device::Table)
                    .col(Device::BrandId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_DEVICE_NORMALIZED)
                    .table(Device::Table)
                    .col(Device::Normalized)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_DEVICE_BRAND_ID)
                    .from_tbl(Device::Table)
                    .from_col(Device::BrandId)
                    .to_tbl(Brand::Table)
                    .to_col(Brand::Id)
                    .on_update(ForeignKeyAction::Cascade)
                    .on_delete(ForeignKeyAction::Restrict)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_DEVICE_BRAND_ID)
                    .table(Device::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_DEVICE_NORMALIZED)
                    .table(Device::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_DEVICE_BRAND_ID)
                    .table(Device::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Device::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Device {
    Table,
    Id,
    BrandId,
    Name,
    Slug,
    Normalized,
    CreatedAt,
    UpdatedAt,
}
