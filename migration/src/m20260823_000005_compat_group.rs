use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260823_000002_part_category::PartCategory;

static IDX_COMPAT_GROUP_PART_ID: &str = "idx-compat_group-part_id";
static IDX_COMPAT_GROUP_PART_ID_MEMBERS_KEY: &str = "idx-compat_group-part_id-members_key";
static FK_COMPAT_GROUP_PART_ID: &str = "fk-compat_group-part_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CompatGroup::Table)
                    .if_not_exists()
                    .col(pk_auto(CompatGroup::Id))
                    .col(integer(CompatGroup::PartId))
                    .col(string(CompatGroup::MembersKey))
                    .col(text_null(CompatGroup::Note))
                    .col(string_null(CompatGroup::Source))
                    .col(string_null(CompatGroup::Tags))
                    .col(double(CompatGroup::Confidence).default(1.0))
                    .col(timestamp(CompatGroup::CreatedAt))
                    .col(timestamp(CompatGroup::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_COMPAT_GROUP_PART_ID)
                    .table(CompatGroup::Table)
                    .col(CompatGroup::PartId)
                    .to_owned(),
            )
            .await?;

        // Backstop against concurrent creation of the same member set for a
        // part; members_key is the sorted member device ids joined with '-'
        manager
            .create_index(
                Index::create()
                    .name(IDX_COMPAT_GROUP_PART_ID_MEMBERS_KEY)
                    .table(CompatGroup::Table)
                    .col(CompatGroup::PartId)
                    .col(CompatGroup::MembersKey)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_COMPAT_GROUP_PART_ID)
                    .from_tbl(CompatGroup::Table)
                    .from_col(CompatGroup::PartId)
                    .to_tbl(PartCategory::Table)
                    .to_col(PartCategory::Id)
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
                    .name(FK_COMPAT_GROUP_PART_ID)
                    .table(CompatGroup::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_COMPAT_GROUP_PART_ID_MEMBERS_KEY)
                    .table(CompatGroup::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_COMPAT_GROUP_PART_ID)
                    .table(CompatGroup::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CompatGroup::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum CompatGroup {
    Table,
    Id,
    PartId,
    MembersKey,
    Note,
    Source,
    Tags,
    Confidence,
    CreatedAt,
    UpdatedAt,
}
