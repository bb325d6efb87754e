//! Create `users` table with FK to `roles`.
//!
//! `rut` and `email` are unique; `status_id` points into the products service.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string_len(Users::Rut, 12).unique_key().not_null())
                    .col(string_len(Users::Name, 100).not_null())
                    .col(string_len(Users::Lastname, 100).not_null())
                    .col(string_len_null(Users::Phone, 20))
                    .col(string_len(Users::Email, 150).unique_key().not_null())
                    .col(string_len(Users::PasswordHash, 255).not_null())
                    .col(integer(Users::RoleId).not_null())
                    .col(integer(Users::StatusId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_role")
                            .from(Users::Table, Users::RoleId)
                            .to(Roles::Table, Roles::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Users::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Users { Table, Id, Rut, Name, Lastname, Phone, Email, PasswordHash, RoleId, StatusId }

#[derive(DeriveIden)]
enum Roles { Table, Id }
