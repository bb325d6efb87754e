#![cfg(test)]
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

/// Fresh in-memory SQLite database with one service's migrations applied.
pub async fn memory_db<M: MigratorTrait>() -> Result<DatabaseConnection, anyhow::Error> {
    let db = models::db::connect_in_memory().await?;
    M::up(&db, None).await?;
    Ok(db)
}
