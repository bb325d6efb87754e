use async_trait::async_trait;
use models::products::{category, product, status};

use crate::errors::ServiceError;

/// Persistence for the products service. Inserts ignore the id of the row passed in.
#[async_trait]
pub trait ProductsRepository: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<category::Model>, ServiceError>;
    async fn find_category(&self, id: i32) -> Result<Option<category::Model>, ServiceError>;
    async fn find_category_by_name(
        &self,
        name: &str,
    ) -> Result<Option<category::Model>, ServiceError>;
    async fn count_categories(&self) -> Result<u64, ServiceError>;
    async fn insert_category(&self, row: category::Model) -> Result<category::Model, ServiceError>;
    async fn update_category(&self, row: category::Model) -> Result<category::Model, ServiceError>;
    async fn delete_category(&self, id: i32) -> Result<bool, ServiceError>;

    async fn list_statuses(&self) -> Result<Vec<status::Model>, ServiceError>;
    async fn find_status(&self, id: i32) -> Result<Option<status::Model>, ServiceError>;
    async fn find_status_by_name(&self, name: &str) -> Result<Option<status::Model>, ServiceError>;
    async fn insert_status(&self, row: status::Model) -> Result<status::Model, ServiceError>;
    async fn update_status(&self, row: status::Model) -> Result<status::Model, ServiceError>;
    async fn delete_status(&self, id: i32) -> Result<bool, ServiceError>;

    async fn list_products(&self) -> Result<Vec<product::Model>, ServiceError>;
    async fn find_product(&self, id: i32) -> Result<Option<product::Model>, ServiceError>;
    async fn products_by_category(
        &self,
        category_id: i32,
    ) -> Result<Vec<product::Model>, ServiceError>;
    async fn count_products_by_category(&self, category_id: i32) -> Result<u64, ServiceError>;
    async fn products_by_status(&self, status_id: i32) -> Result<Vec<product::Model>, ServiceError>;
    /// Case-insensitive match on name or description.
    async fn search_products(&self, query: &str) -> Result<Vec<product::Model>, ServiceError>;
    async fn insert_product(&self, row: product::Model) -> Result<product::Model, ServiceError>;
    async fn update_product(&self, row: product::Model) -> Result<product::Model, ServiceError>;
    async fn delete_product(&self, id: i32) -> Result<bool, ServiceError>;
}

fn vanished(table: &str, id: i32) -> ServiceError {
    ServiceError::Db(format!("{table} row {id} disappeared during update"))
}

/// In-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use crate::memory::MemTable;

    #[derive(Default)]
    pub struct MockProductsRepository {
        pub categories: MemTable<category::Model>,
        pub statuses: MemTable<status::Model>,
        pub products: MemTable<product::Model>,
    }

    #[async_trait]
    impl ProductsRepository for MockProductsRepository {
        async fn list_categories(&self) -> Result<Vec<category::Model>, ServiceError> {
            Ok(self.categories.all())
        }

        async fn find_category(&self, id: i32) -> Result<Option<category::Model>, ServiceError> {
            Ok(self.categories.get(id))
        }

        async fn find_category_by_name(
            &self,
            name: &str,
        ) -> Result<Option<category::Model>, ServiceError> {
            Ok(self.categories.find(|c| c.name == name))
        }

        async fn count_categories(&self) -> Result<u64, ServiceError> {
            Ok(self.categories.len())
        }

        async fn insert_category(
            &self,
            row: category::Model,
        ) -> Result<category::Model, ServiceError> {
            Ok(self.categories.insert_with(|id| category::Model { id, ..row }))
        }

        async fn update_category(
            &self,
            row: category::Model,
        ) -> Result<category::Model, ServiceError> {
            let id = row.id;
            self.categories.replace(id, row).ok_or_else(|| vanished("categories", id))
        }

        async fn delete_category(&self, id: i32) -> Result<bool, ServiceError> {
            Ok(self.categories.remove(id))
        }

        async fn list_statuses(&self) -> Result<Vec<status::Model>, ServiceError> {
            Ok(self.statuses.all())
        }

        async fn find_status(&self, id: i32) -> Result<Option<status::Model>, ServiceError> {
            Ok(self.statuses.get(id))
        }

        async fn find_status_by_name(
            &self,
            name: &str,
        ) -> Result<Option<status::Model>, ServiceError> {
            Ok(self.statuses.find(|s| s.name == name))
        }

        async fn insert_status(&self, row: status::Model) -> Result<status::Model, ServiceError> {
            Ok(self.statuses.insert_with(|id| status::Model { id, ..row }))
        }

        async fn update_status(&self, row: status::Model) -> Result<status::Model, ServiceError> {
            let id = row.id;
            self.statuses.replace(id, row).ok_or_else(|| vanished("statuses", id))
        }

        async fn delete_status(&self, id: i32) -> Result<bool, ServiceError> {
            Ok(self.statuses.remove(id))
        }

        async fn list_products(&self) -> Result<Vec<product::Model>, ServiceError> {
            Ok(self.products.all())
        }

        async fn find_product(&self, id: i32) -> Result<Option<product::Model>, ServiceError> {
            Ok(self.products.get(id))
        }

        async fn products_by_category(
            &self,
            category_id: i32,
        ) -> Result<Vec<product::Model>, ServiceError> {
            Ok(self.products.filter(|p| p.category_id == category_id))
        }

        async fn count_products_by_category(&self, category_id: i32) -> Result<u64, ServiceError> {
            Ok(self.products.count(|p| p.category_id == category_id))
        }

        async fn products_by_status(
            &self,
            status_id: i32,
        ) -> Result<Vec<product::Model>, ServiceError> {
            Ok(self.products.filter(|p| p.status_id == status_id))
        }

        async fn search_products(&self, query: &str) -> Result<Vec<product::Model>, ServiceError> {
            let needle = query.to_lowercase();
            Ok(self.products.filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.description.as_deref().is_some_and(|d| d.to_lowercase().contains(&needle))
            }))
        }

        async fn insert_product(
            &self,
            row: product::Model,
        ) -> Result<product::Model, ServiceError> {
            Ok(self.products.insert_with(|id| product::Model { id, ..row }))
        }

        async fn update_product(
            &self,
            row: product::Model,
        ) -> Result<product::Model, ServiceError> {
            let id = row.id;
            self.products.replace(id, row).ok_or_else(|| vanished("products", id))
        }

        async fn delete_product(&self, id: i32) -> Result<bool, ServiceError> {
            Ok(self.products.remove(id))
        }
    }
}
