use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20260823_000003_device::Device, m20260823_000005_compat_group::CompatGroup};

static IDX_COMPAT_GROUP_MEMBER_DEVICE_ID: &str = "idx-compat_group_member-device_id";
static FK_COMPAT_GROUP_MEMBER_GROUP_ID: &str = "fk-compat_group_member-group_id";
static FK_COMPAT_GROUP_MEMBER_DEVICE_ID: &str = "fk-compat_group_member-device_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CompatGroupMember::Table)
                    .if_not_exists()
                    .col(integer(CompatGroupMember::GroupId))
                    .col(integer(CompatGroupMember::DeviceId))
                    .primary_key(
                        Index::create()
                            .col(CompatGroupMember::GroupId)
                            .col(CompatGroupMember::DeviceId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_COMPAT_GROUP_MEMBER_DEVICE_ID)
                    .table(CompatGroupMember::Table)
                    .col(CompatGroupMember::DeviceId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_COMPAT_GROUP_MEMBER_GROUP_ID)
                    .from_tbl(CompatGroupMember::Table)
                    .from_col(CompatGroupMember::GroupId)
                    .to_tbl(CompatGroup::Table)
                    .to_col(CompatGroup::Id)
                    .on_update(ForeignKeyAction::Cascade)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_COMPAT_GROUP_MEMBER_DEVICE_ID)
                    .from_tbl(CompatGroupMember::Table)
                    .from_col(CompatGroupMember::DeviceId)
                    .to_tbl(Device::Table)
                    .to_col(Device::Id)
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
                    .name(FK_COMPAT_GROUP_MEMBER_DEVICE_ID)
                    .table(CompatGroupMember::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_COMPAT_GROUP_MEMBER_GROUP_ID)
                    .table(CompatGroupMember::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_COMPAT_GROUP_MEMBER_DEVICE_ID)
                    .table(CompatGroupMember::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CompatGroupMember::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum CompatGroupMember {
    Table,
    GroupId,
    DeviceId,
}
