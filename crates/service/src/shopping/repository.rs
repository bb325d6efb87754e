use async_trait::async_trait;
use models::shopping::{buy, detail};

use crate::errors::ServiceError;

/// Persistence for the shopping service. Deleting a buy removes its details.
#[async_trait]
pub trait ShoppingRepository: Send + Sync {
    async fn list_buys(&self) -> Result<Vec<buy::Model>, ServiceError>;
    async fn find_buy(&self, id: i32) -> Result<Option<buy::Model>, ServiceError>;
    async fn find_buy_by_order_number(
        &self,
        order_number: &str,
    ) -> Result<Option<buy::Model>, ServiceError>;
    async fn count_buys(&self) -> Result<u64, ServiceError>;
    async fn buys_by_user(&self, user_id: i32) -> Result<Vec<buy::Model>, ServiceError>;
    async fn buys_by_status(&self, status_id: i32) -> Result<Vec<buy::Model>, ServiceError>;
    async fn insert_buy(&self, row: buy::Model) -> Result<buy::Model, ServiceError>;
    async fn update_buy(&self, row: buy::Model) -> Result<buy::Model, ServiceError>;
    async fn delete_buy(&self, id: i32) -> Result<bool, ServiceError>;

    async fn list_details(&self) -> Result<Vec<detail::Model>, ServiceError>;
    async fn find_detail(&self, id: i32) -> Result<Option<detail::Model>, ServiceError>;
    async fn details_by_buy(&self, buy_id: i32) -> Result<Vec<detail::Model>, ServiceError>;
    async fn insert_detail(&self, row: detail::Model) -> Result<detail::Model, ServiceError>;
    async fn update_detail(&self, row: detail::Model) -> Result<detail::Model, ServiceError>;
    async fn delete_detail(&self, id: i32) -> Result<bool, ServiceError>;
}

fn vanished(table: &str, id: i32) -> ServiceError {
    ServiceError::Db(format!("{table} row {id} disappeared during update"))
}

/// In-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use crate::memory::MemTable;

    #[derive(Default)]
    pub struct MockShoppingRepository {
        pub buys: MemTable<buy::Model>,
        pub details: MemTable<detail::Model>,
    }

    #[async_trait]
    impl ShoppingRepository for MockShoppingRepository {
        async fn list_buys(&self) -> Result<Vec<buy::Model>, ServiceError> {
            Ok(self.buys.all())
        }

        async fn find_buy(&self, id: i32) -> Result<Option<buy::Model>, ServiceError> {
            Ok(self.buys.get(id))
        }

        async fn find_buy_by_order_number(
            &self,
            order_number: &str,
        ) -> Result<Option<buy::Model>, ServiceError> {
            Ok(self.buys.find(|b| b.order_number == order_number))
        }

        async fn count_buys(&self) -> Result<u64, ServiceError> {
            Ok(self.buys.len())
        }

        async fn buys_by_user(&self, user_id: i32) -> Result<Vec<buy::Model>, ServiceError> {
            Ok(self.buys.filter(|b| b.user_id == user_id))
        }

        async fn buys_by_status(&self, status_id: i32) -> Result<Vec<buy::Model>, ServiceError> {
            Ok(self.buys.filter(|b| b.status_id == status_id))
        }

        async fn insert_buy(&self, row: buy::Model) -> Result<buy::Model, ServiceError> {
            Ok(self.buys.insert_with(|id| buy::Model { id, ..row }))
        }

        async fn update_buy(&self, row: buy::Model) -> Result<buy::Model, ServiceError> {
            let id = row.id;
            self.buys.replace(id, row).ok_or_else(|| vanished("buys", id))
        }

        async fn delete_buy(&self, id: i32) -> Result<bool, ServiceError> {
            let removed = self.buys.remove(id);
            if removed {
                self.details.retain(|d| d.buy_id != id);
            }
            Ok(removed)
        }

        async fn list_details(&self) -> Result<Vec<detail::Model>, ServiceError> {
            Ok(self.details.all())
        }

        async fn find_detail(&self, id: i32) -> Result<Option<detail::Model>, ServiceError> {
            Ok(self.details.get(id))
        }

        async fn details_by_buy(&self, buy_id: i32) -> Result<Vec<detail::Model>, ServiceError> {
            Ok(self.details.filter(|d| d.buy_id == buy_id))
        }

        async fn insert_detail(&self, row: detail::Model) -> Result<detail::Model, ServiceError> {
            Ok(self.details.insert_with(|id| detail::Model { id, ..row }))
        }

        async fn update_detail(&self, row: detail::Model) -> Result<detail::Model, ServiceError> {
            let id = row.id;
            self.details.replace(id, row).ok_or_else(|| vanished("details", id))
        }

        async fn delete_detail(&self, id: i32) -> Result<bool, ServiceError> {
            Ok(self.details.remove(id))
        }
    }
}
