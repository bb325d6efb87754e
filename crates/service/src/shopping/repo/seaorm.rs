use async_trait::async_trait;
use models::shopping::{buy, detail};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder,
};

use crate::errors::ServiceError;
use crate::shopping::repository::ShoppingRepository;

pub struct SeaOrmShoppingRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl ShoppingRepository for SeaOrmShoppingRepository {
    async fn list_buys(&self) -> Result<Vec<buy::Model>, ServiceError> {
        Ok(buy::Entity::find().order_by_asc(buy::Column::Id).all(&self.db).await?)
    }

    async fn find_buy(&self, id: i32) -> Result<Option<buy::Model>, ServiceError> {
        Ok(buy::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_buy_by_order_number(
        &self,
        order_number: &str,
    ) -> Result<Option<buy::Model>, ServiceError> {
        Ok(buy::Entity::find()
            .filter(buy::Column::OrderNumber.eq(order_number))
            .one(&self.db)
            .await?)
    }

    async fn count_buys(&self) -> Result<u64, ServiceError> {
        Ok(buy::Entity::find().count(&self.db).await?)
    }

    async fn buys_by_user(&self, user_id: i32) -> Result<Vec<buy::Model>, ServiceError> {
        Ok(buy::Entity::find()
            .filter(buy::Column::UserId.eq(user_id))
            .order_by_asc(buy::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn buys_by_status(&self, status_id: i32) -> Result<Vec<buy::Model>, ServiceError> {
        Ok(buy::Entity::find()
            .filter(buy::Column::StatusId.eq(status_id))
            .order_by_asc(buy::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn insert_buy(&self, row: buy::Model) -> Result<buy::Model, ServiceError> {
        let mut am = buy::ActiveModel::from(row).reset_all();
        am.id = NotSet;
        am.insert(&self.db).await.map_err(|e| ServiceError::from_db(e, buy::DUPLICATE))
    }

    async fn update_buy(&self, row: buy::Model) -> Result<buy::Model, ServiceError> {
        buy::ActiveModel::from(row)
            .reset_all()
            .update(&self.db)
            .await
            .map_err(|e| ServiceError::from_db(e, buy::DUPLICATE))
    }

    async fn delete_buy(&self, id: i32) -> Result<bool, ServiceError> {
        let res = buy::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn list_details(&self) -> Result<Vec<detail::Model>, ServiceError> {
        Ok(detail::Entity::find().order_by_asc(detail::Column::Id).all(&self.db).await?)
    }

    async fn find_detail(&self, id: i32) -> Result<Option<detail::Model>, ServiceError> {
        Ok(detail::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn details_by_buy(&self, buy_id: i32) -> Result<Vec<detail::Model>, ServiceError> {
        Ok(detail::Entity::find()
            .filter(detail::Column::BuyId.eq(buy_id))
            .order_by_asc(detail::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn insert_detail(&self, row: detail::Model) -> Result<detail::Model, ServiceError> {
        let mut am = detail::ActiveModel::from(row).reset_all();
        am.id = NotSet;
        Ok(am.insert(&self.db).await?)
    }

    async fn update_detail(&self, row: detail::Model) -> Result<detail::Model, ServiceError> {
        Ok(detail::ActiveModel::from(row).reset_all().update(&self.db).await?)
    }

    async fn delete_detail(&self, id: i32) -> Result<bool, ServiceError> {
        let res = detail::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::memory_db;
    use chrono::{TimeZone, Utc};
    use migration::ShoppingMigrator;

    fn buy(order_number: &str) -> buy::Model {
        buy::Model {
            id: 0,
            order_number: order_number.into(),
            date: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap().into(),
            subtotal: 10_000,
            iva: 1_900,
            shipping: 2_500,
            total: 14_400,
            payment_method: "Débito".into(),
            user_id: 1,
            address_id: 1,
            status_id: 1,
        }
    }

    #[tokio::test]
    async fn deleting_buy_cascades_to_details() -> Result<(), anyhow::Error> {
        let repo = SeaOrmShoppingRepository { db: memory_db::<ShoppingMigrator>().await? };
        let b = repo.insert_buy(buy("ORD-1")).await?;
        for product_id in [1, 2] {
            repo.insert_detail(detail::Model {
                id: 0,
                buy_id: b.id,
                product_id,
                quantity: 1,
                unit_price: 5_000,
                subtotal: 5_000,
            })
            .await?;
        }
        assert_eq!(repo.details_by_buy(b.id).await?.len(), 2);

        assert!(repo.delete_buy(b.id).await?);
        assert!(repo.list_details().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn order_number_is_unique_in_storage() -> Result<(), anyhow::Error> {
        let repo = SeaOrmShoppingRepository { db: memory_db::<ShoppingMigrator>().await? };
        repo.insert_buy(buy("ORD-7")).await?;
        let dup = repo.insert_buy(buy("ORD-7")).await;
        assert_eq!(dup, Err(ServiceError::Conflict(buy::DUPLICATE.into())));
        assert_eq!(repo.count_buys().await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn detail_needs_existing_buy() -> Result<(), anyhow::Error> {
        let repo = SeaOrmShoppingRepository { db: memory_db::<ShoppingMigrator>().await? };
        let orphan = repo
            .insert_detail(detail::Model {
                id: 0,
                buy_id: 99,
                product_id: 1,
                quantity: 1,
                unit_price: 1,
                subtotal: 1,
            })
            .await;
        assert!(matches!(orphan, Err(ServiceError::Blocked(_))));
        Ok(())
    }
}
