//! Create `details` table with FK to `buys`; details go with their buy.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Details::Table)
                    .if_not_exists()
                    .col(pk_auto(Details::Id))
                    .col(integer(Details::BuyId).not_null())
                    .col(integer(Details::ProductId).not_null())
                    .col(integer(Details::Quantity).not_null())
                    .col(big_integer(Details::UnitPrice).not_null())
                    .col(big_integer(Details::Subtotal).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_detail_buy")
                            .from(Details::Table, Details::BuyId)
                            .to(Buys::Table, Buys::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Details::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Details { Table, Id, BuyId, ProductId, Quantity, UnitPrice, Subtotal }

#[derive(DeriveIden)]
enum Buys { Table, Id }
