use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PartCategory::Table)
                    .if_not_exists()
                    .col(pk_auto(PartCategory::Id))
                    .col(string_uniq(PartCategory::Name))
                    .col(string_uniq(PartCategory::Slug))
                    .col(text_null(PartCategory::Description))
                    .col(timestamp(PartCategory::CreatedAt))
                    .col(timestamp(PartCategory::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PartCategory::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum PartCategory {
    Table,
    Id,
    Name,
    Slug,
    Description,
    CreatedAt,
    UpdatedAt,
}
