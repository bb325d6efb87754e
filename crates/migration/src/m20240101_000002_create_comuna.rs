//! Create `comunas` table with FK to `regions`.
//!
//! Region deletion is restricted; the service refuses it with a count first.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Comunas::Table)
                    .if_not_exists()
                    .col(pk_auto(Comunas::Id))
                    .col(string_len(Comunas::Name, 100).not_null())
                    .col(integer(Comunas::RegionId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comuna_region")
                            .from(Comunas::Table, Comunas::RegionId)
                            .to(Regions::Table, Regions::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Comunas::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Comunas { Table, Id, Name, RegionId }

#[derive(DeriveIden)]
enum Regions { Table, Id }
