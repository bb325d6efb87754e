use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_buy_user")
                    .table(Buys::Table)
                    .col(Buys::UserId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_buy_status")
                    .table(Buys::Table)
                    .col(Buys::StatusId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_detail_buy")
                    .table(Details::Table)
                    .col(Details::BuyId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_buy_user").table(Buys::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_buy_status").table(Buys::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_detail_buy").table(Details::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Buys { Table, UserId, StatusId }

#[derive(DeriveIden)]
enum Details { Table, BuyId }
