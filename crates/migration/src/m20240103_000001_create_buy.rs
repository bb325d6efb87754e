//! Create `buys` table.
//!
//! `user_id`, `address_id` and `status_id` live in sibling services and are
//! only checked when the buy is written.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Buys::Table)
                    .if_not_exists()
                    .col(pk_auto(Buys::Id))
                    .col(string_len(Buys::OrderNumber, 50).unique_key().not_null())
                    .col(timestamp_with_time_zone(Buys::Date).not_null())
                    .col(big_integer(Buys::Subtotal).not_null())
                    .col(big_integer(Buys::Iva).not_null())
                    .col(big_integer(Buys::Shipping).not_null())
                    .col(big_integer(Buys::Total).not_null())
                    .col(string_len(Buys::PaymentMethod, 50).not_null())
                    .col(integer(Buys::UserId).not_null())
                    .col(integer(Buys::AddressId).not_null())
                    .col(integer(Buys::StatusId).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Buys::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Buys {
    Table,
    Id,
    OrderNumber,
    Date,
    Subtotal,
    Iva,
    Shipping,
    Total,
    PaymentMethod,
    UserId,
    AddressId,
    StatusId,
}
