//! Create `statuses` table.
//!
//! Statuses are shared: products, buys and users all reference them.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Statuses::Table)
                    .if_not_exists()
                    .col(pk_auto(Statuses::Id))
                    .col(string_len(Statuses::Name, 50).unique_key().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Statuses::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Statuses { Table, Id, Name }
