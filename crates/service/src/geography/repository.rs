use async_trait::async_trait;
use models::geography::{address, comuna, region};

use crate::errors::ServiceError;

/// Persistence for the geography service. Inserts ignore the id of the row passed in.
#[async_trait]
pub trait GeographyRepository: Send + Sync {
    async fn list_regions(&self) -> Result<Vec<region::Model>, ServiceError>;
    async fn find_region(&self, id: i32) -> Result<Option<region::Model>, ServiceError>;
    async fn find_region_by_name(&self, name: &str) -> Result<Option<region::Model>, ServiceError>;
    async fn count_regions(&self) -> Result<u64, ServiceError>;
    async fn insert_region(&self, row: region::Model) -> Result<region::Model, ServiceError>;
    async fn update_region(&self, row: region::Model) -> Result<region::Model, ServiceError>;
    async fn delete_region(&self, id: i32) -> Result<bool, ServiceError>;

    async fn list_comunas(&self) -> Result<Vec<comuna::Model>, ServiceError>;
    async fn find_comuna(&self, id: i32) -> Result<Option<comuna::Model>, ServiceError>;
    async fn comunas_by_region(&self, region_id: i32) -> Result<Vec<comuna::Model>, ServiceError>;
    async fn count_comunas_by_region(&self, region_id: i32) -> Result<u64, ServiceError>;
    async fn insert_comuna(&self, row: comuna::Model) -> Result<comuna::Model, ServiceError>;
    async fn update_comuna(&self, row: comuna::Model) -> Result<comuna::Model, ServiceError>;
    async fn delete_comuna(&self, id: i32) -> Result<bool, ServiceError>;

    async fn list_addresses(&self) -> Result<Vec<address::Model>, ServiceError>;
    async fn find_address(&self, id: i32) -> Result<Option<address::Model>, ServiceError>;
    async fn addresses_by_user(&self, user_id: i32) -> Result<Vec<address::Model>, ServiceError>;
    async fn addresses_by_comuna(
        &self,
        comuna_id: i32,
    ) -> Result<Vec<address::Model>, ServiceError>;
    async fn insert_address(&self, row: address::Model) -> Result<address::Model, ServiceError>;
    async fn update_address(&self, row: address::Model) -> Result<address::Model, ServiceError>;
    async fn delete_address(&self, id: i32) -> Result<bool, ServiceError>;
}

fn vanished(table: &str, id: i32) -> ServiceError {
    ServiceError::Db(format!("{table} row {id} disappeared during update"))
}

/// In-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use crate::memory::MemTable;

    #[derive(Default)]
    pub struct MockGeographyRepository {
        pub regions: MemTable<region::Model>,
        pub comunas: MemTable<comuna::Model>,
        pub addresses: MemTable<address::Model>,
    }

    #[async_trait]
    impl GeographyRepository for MockGeographyRepository {
        async fn list_regions(&self) -> Result<Vec<region::Model>, ServiceError> {
            Ok(self.regions.all())
        }

        async fn find_region(&self, id: i32) -> Result<Option<region::Model>, ServiceError> {
            Ok(self.regions.get(id))
        }

        async fn find_region_by_name(
            &self,
            name: &str,
        ) -> Result<Option<region::Model>, ServiceError> {
            Ok(self.regions.find(|r| r.name == name))
        }

        async fn count_regions(&self) -> Result<u64, ServiceError> {
            Ok(self.regions.len())
        }

        async fn insert_region(&self, row: region::Model) -> Result<region::Model, ServiceError> {
            Ok(self.regions.insert_with(|id| region::Model { id, ..row }))
        }

        async fn update_region(&self, row: region::Model) -> Result<region::Model, ServiceError> {
            let id = row.id;
            self.regions.replace(id, row).ok_or_else(|| vanished("regions", id))
        }

        async fn delete_region(&self, id: i32) -> Result<bool, ServiceError> {
            Ok(self.regions.remove(id))
        }

        async fn list_comunas(&self) -> Result<Vec<comuna::Model>, ServiceError> {
            Ok(self.comunas.all())
        }

        async fn find_comuna(&self, id: i32) -> Result<Option<comuna::Model>, ServiceError> {
            Ok(self.comunas.get(id))
        }

        async fn comunas_by_region(
            &self,
            region_id: i32,
        ) -> Result<Vec<comuna::Model>, ServiceError> {
            Ok(self.comunas.filter(|c| c.region_id == region_id))
        }

        async fn count_comunas_by_region(&self, region_id: i32) -> Result<u64, ServiceError> {
            Ok(self.comunas.count(|c| c.region_id == region_id))
        }

        async fn insert_comuna(&self, row: comuna::Model) -> Result<comuna::Model, ServiceError> {
            Ok(self.comunas.insert_with(|id| comuna::Model { id, ..row }))
        }

        async fn update_comuna(&self, row: comuna::Model) -> Result<comuna::Model, ServiceError> {
            let id = row.id;
            self.comunas.replace(id, row).ok_or_else(|| vanished("comunas", id))
        }

        async fn delete_comuna(&self, id: i32) -> Result<bool, ServiceError> {
            Ok(self.comunas.remove(id))
        }

        async fn list_addresses(&self) -> Result<Vec<address::Model>, ServiceError> {
            Ok(self.addresses.all())
        }

        async fn find_address(&self, id: i32) -> Result<Option<address::Model>, ServiceError> {
            Ok(self.addresses.get(id))
        }

        async fn addresses_by_user(
            &self,
            user_id: i32,
        ) -> Result<Vec<address::Model>, ServiceError> {
            Ok(self.addresses.filter(|a| a.user_id == user_id))
        }

        async fn addresses_by_comuna(
            &self,
            comuna_id: i32,
        ) -> Result<Vec<address::Model>, ServiceError> {
            Ok(self.addresses.filter(|a| a.comuna_id == comuna_id))
        }

        async fn insert_address(
            &self,
            row: address::Model,
        ) -> Result<address::Model, ServiceError> {
            Ok(self.addresses.insert_with(|id| address::Model { id, ..row }))
        }

        async fn update_address(
            &self,
            row: address::Model,
        ) -> Result<address::Model, ServiceError> {
            let id = row.id;
            self.addresses.replace(id, row).ok_or_else(|| vanished("addresses", id))
        }

        async fn delete_address(&self, id: i32) -> Result<bool, ServiceError> {
            Ok(self.addresses.remove(id))
        }
    }
}
