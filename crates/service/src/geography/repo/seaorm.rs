use async_trait::async_trait;
use models::geography::{address, comuna, region};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder,
};

use crate::errors::ServiceError;
use crate::geography::repository::GeographyRepository;

pub struct SeaOrmGeographyRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl GeographyRepository for SeaOrmGeographyRepository {
    async fn list_regions(&self) -> Result<Vec<region::Model>, ServiceError> {
        Ok(region::Entity::find().order_by_asc(region::Column::Id).all(&self.db).await?)
    }

    async fn find_region(&self, id: i32) -> Result<Option<region::Model>, ServiceError> {
        Ok(region::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_region_by_name(&self, name: &str) -> Result<Option<region::Model>, ServiceError> {
        Ok(region::Entity::find().filter(region::Column::Name.eq(name)).one(&self.db).await?)
    }

    async fn count_regions(&self) -> Result<u64, ServiceError> {
        Ok(region::Entity::find().count(&self.db).await?)
    }

    async fn insert_region(&self, row: region::Model) -> Result<region::Model, ServiceError> {
        let mut am = region::ActiveModel::from(row).reset_all();
        am.id = NotSet;
        am.insert(&self.db).await.map_err(|e| ServiceError::from_db(e, region::DUPLICATE))
    }

    async fn update_region(&self, row: region::Model) -> Result<region::Model, ServiceError> {
        region::ActiveModel::from(row)
            .reset_all()
            .update(&self.db)
            .await
            .map_err(|e| ServiceError::from_db(e, region::DUPLICATE))
    }

    async fn delete_region(&self, id: i32) -> Result<bool, ServiceError> {
        let res = region::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn list_comunas(&self) -> Result<Vec<comuna::Model>, ServiceError> {
        Ok(comuna::Entity::find().order_by_asc(comuna::Column::Id).all(&self.db).await?)
    }

    async fn find_comuna(&self, id: i32) -> Result<Option<comuna::Model>, ServiceError> {
        Ok(comuna::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn comunas_by_region(&self, region_id: i32) -> Result<Vec<comuna::Model>, ServiceError> {
        Ok(comuna::Entity::find()
            .filter(comuna::Column::RegionId.eq(region_id))
            .order_by_asc(comuna::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn count_comunas_by_region(&self, region_id: i32) -> Result<u64, ServiceError> {
        Ok(comuna::Entity::find()
            .filter(comuna::Column::RegionId.eq(region_id))
            .count(&self.db)
            .await?)
    }

    async fn insert_comuna(&self, row: comuna::Model) -> Result<comuna::Model, ServiceError> {
        let mut am = comuna::ActiveModel::from(row).reset_all();
        am.id = NotSet;
        Ok(am.insert(&self.db).await?)
    }

    async fn update_comuna(&self, row: comuna::Model) -> Result<comuna::Model, ServiceError> {
        Ok(comuna::ActiveModel::from(row).reset_all().update(&self.db).await?)
    }

    async fn delete_comuna(&self, id: i32) -> Result<bool, ServiceError> {
        let res = comuna::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn list_addresses(&self) -> Result<Vec<address::Model>, ServiceError> {
        Ok(address::Entity::find().order_by_asc(address::Column::Id).all(&self.db).await?)
    }

    async fn find_address(&self, id: i32) -> Result<Option<address::Model>, ServiceError> {
        Ok(address::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn addresses_by_user(&self, user_id: i32) -> Result<Vec<address::Model>, ServiceError> {
        Ok(address::Entity::find()
            .filter(address::Column::UserId.eq(user_id))
            .order_by_asc(address::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn addresses_by_comuna(
        &self,
        comuna_id: i32,
    ) -> Result<Vec<address::Model>, ServiceError> {
        Ok(address::Entity::find()
            .filter(address::Column::ComunaId.eq(comuna_id))
            .order_by_asc(address::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn insert_address(&self, row: address::Model) -> Result<address::Model, ServiceError> {
        let mut am = address::ActiveModel::from(row).reset_all();
        am.id = NotSet;
        Ok(am.insert(&self.db).await?)
    }

    async fn update_address(&self, row: address::Model) -> Result<address::Model, ServiceError> {
        Ok(address::ActiveModel::from(row).reset_all().update(&self.db).await?)
    }

    async fn delete_address(&self, id: i32) -> Result<bool, ServiceError> {
        let res = address::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::memory_db;
    use migration::GeographyMigrator;

    #[tokio::test]
    async fn region_name_is_unique_in_storage() -> Result<(), anyhow::Error> {
        let repo = SeaOrmGeographyRepository { db: memory_db::<GeographyMigrator>().await? };
        let first = repo.insert_region(region::Model { id: 0, name: "Región X".into() }).await?;
        assert!(first.id > 0);

        let dup = repo.insert_region(region::Model { id: 0, name: "Región X".into() }).await;
        assert_eq!(dup, Err(ServiceError::Conflict(region::DUPLICATE.into())));
        assert_eq!(repo.count_regions().await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn comunas_filter_and_restrict_region_delete() -> Result<(), anyhow::Error> {
        let repo = SeaOrmGeographyRepository { db: memory_db::<GeographyMigrator>().await? };
        let r = repo.insert_region(region::Model { id: 0, name: "Biobío".into() }).await?;
        let other = repo.insert_region(region::Model { id: 0, name: "Maule".into() }).await?;
        repo.insert_comuna(comuna::Model {
            id: 0,
            name: "Concepción".into(),
            region_id: r.id,
        })
        .await?;
        repo.insert_comuna(comuna::Model {
            id: 0,
            name: "Talca".into(),
            region_id: other.id,
        })
        .await?;

        let in_biobio = repo.comunas_by_region(r.id).await?;
        assert_eq!(in_biobio.len(), 1);
        assert_eq!(in_biobio[0].name, "Concepción");
        assert_eq!(repo.count_comunas_by_region(r.id).await?, 1);

        // the foreign key refuses even without the service-level guard
        assert!(matches!(repo.delete_region(r.id).await, Err(ServiceError::Blocked(_))));
        Ok(())
    }

    #[tokio::test]
    async fn update_and_delete_address() -> Result<(), anyhow::Error> {
        let repo = SeaOrmGeographyRepository { db: memory_db::<GeographyMigrator>().await? };
        let r = repo.insert_region(region::Model { id: 0, name: "Valparaíso".into() }).await?;
        let c = repo.insert_comuna(comuna::Model {
            id: 0,
            name: "Viña del Mar".into(),
            region_id: r.id,
        })
        .await?;
        let mut a = repo
            .insert_address(address::Model {
                id: 0,
                street: "Av. Libertad".into(),
                number: "100".into(),
                comuna_id: c.id,
                user_id: 7,
            })
            .await?;

        a.number = "200".into();
        let updated = repo.update_address(a.clone()).await?;
        assert_eq!(updated.number, "200");
        assert_eq!(repo.addresses_by_user(7).await?.len(), 1);
        assert!(repo.addresses_by_user(8).await?.is_empty());

        assert!(repo.delete_address(a.id).await?);
        assert!(!repo.delete_address(a.id).await?);
        Ok(())
    }
}
