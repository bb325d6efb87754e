//! Create `addresses` table with FK to `comunas`.
//!
//! `user_id` points into the users service and has no constraint here.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Addresses::Table)
                    .if_not_exists()
                    .col(pk_auto(Addresses::Id))
                    .col(string_len(Addresses::Street, 150).not_null())
                    .col(string_len(Addresses::Number, 20).not_null())
                    .col(integer(Addresses::ComunaId).not_null())
                    .col(integer(Addresses::UserId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_address_comuna")
                            .from(Addresses::Table, Addresses::ComunaId)
                            .to(Comunas::Table, Comunas::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Addresses::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Addresses { Table, Id, Street, Number, ComunaId, UserId }

#[derive(DeriveIden)]
enum Comunas { Table, Id }
