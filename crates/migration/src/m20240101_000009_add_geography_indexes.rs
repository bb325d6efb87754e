use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Comunas: lookups by region and dependent counts
        manager
            .create_index(
                Index::create()
                    .name("idx_comuna_region")
                    .table(Comunas::Table)
                    .col(Comunas::RegionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_address_comuna")
                    .table(Addresses::Table)
                    .col(Addresses::ComunaId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_address_user")
                    .table(Addresses::Table)
                    .col(Addresses::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_comuna_region").table(Comunas::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_address_comuna").table(Addresses::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_address_user").table(Addresses::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Comunas { Table, RegionId }

#[derive(DeriveIden)]
enum Addresses { Table, ComunaId, UserId }
