use async_trait::async_trait;
use models::users::{role, user};

use crate::errors::ServiceError;

/// Persistence for the users service. Inserts ignore the id of the row passed in.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    async fn list_roles(&self) -> Result<Vec<role::Model>, ServiceError>;
    async fn find_role(&self, id: i32) -> Result<Option<role::Model>, ServiceError>;
    async fn find_role_by_name(&self, name: &str) -> Result<Option<role::Model>, ServiceError>;
    async fn count_roles(&self) -> Result<u64, ServiceError>;
    async fn insert_role(&self, row: role::Model) -> Result<role::Model, ServiceError>;
    async fn update_role(&self, row: role::Model) -> Result<role::Model, ServiceError>;
    async fn delete_role(&self, id: i32) -> Result<bool, ServiceError>;

    async fn list_users(&self) -> Result<Vec<user::Model>, ServiceError>;
    async fn find_user(&self, id: i32) -> Result<Option<user::Model>, ServiceError>;
    async fn find_user_by_rut(&self, rut: &str) -> Result<Option<user::Model>, ServiceError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<user::Model>, ServiceError>;
    async fn users_by_role(&self, role_id: i32) -> Result<Vec<user::Model>, ServiceError>;
    async fn users_by_status(&self, status_id: i32) -> Result<Vec<user::Model>, ServiceError>;
    async fn insert_user(&self, row: user::Model) -> Result<user::Model, ServiceError>;
    async fn update_user(&self, row: user::Model) -> Result<user::Model, ServiceError>;
    async fn delete_user(&self, id: i32) -> Result<bool, ServiceError>;
}

fn vanished(table: &str, id: i32) -> ServiceError {
    ServiceError::Db(format!("{table} row {id} disappeared during update"))
}

/// In-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use crate::memory::MemTable;

    #[derive(Default)]
    pub struct MockUsersRepository {
        pub roles: MemTable<role::Model>,
        pub users: MemTable<user::Model>,
    }

    #[async_trait]
    impl UsersRepository for MockUsersRepository {
        async fn list_roles(&self) -> Result<Vec<role::Model>, ServiceError> {
            Ok(self.roles.all())
        }

        async fn find_role(&self, id: i32) -> Result<Option<role::Model>, ServiceError> {
            Ok(self.roles.get(id))
        }

        async fn find_role_by_name(&self, name: &str) -> Result<Option<role::Model>, ServiceError> {
            Ok(self.roles.find(|r| r.name == name))
        }

        async fn count_roles(&self) -> Result<u64, ServiceError> {
            Ok(self.roles.len())
        }

        async fn insert_role(&self, row: role::Model) -> Result<role::Model, ServiceError> {
            Ok(self.roles.insert_with(|id| role::Model { id, ..row }))
        }

        async fn update_role(&self, row: role::Model) -> Result<role::Model, ServiceError> {
            let id = row.id;
            self.roles.replace(id, row).ok_or_else(|| vanished("roles", id))
        }

        async fn delete_role(&self, id: i32) -> Result<bool, ServiceError> {
            Ok(self.roles.remove(id))
        }

        async fn list_users(&self) -> Result<Vec<user::Model>, ServiceError> {
            Ok(self.users.all())
        }

        async fn find_user(&self, id: i32) -> Result<Option<user::Model>, ServiceError> {
            Ok(self.users.get(id))
        }

        async fn find_user_by_rut(&self, rut: &str) -> Result<Option<user::Model>, ServiceError> {
            Ok(self.users.find(|u| u.rut == rut))
        }

        async fn find_user_by_email(
            &self,
            email: &str,
        ) -> Result<Option<user::Model>, ServiceError> {
            Ok(self.users.find(|u| u.email == email))
        }

        async fn users_by_role(&self, role_id: i32) -> Result<Vec<user::Model>, ServiceError> {
            Ok(self.users.filter(|u| u.role_id == role_id))
        }

        async fn users_by_status(&self, status_id: i32) -> Result<Vec<user::Model>, ServiceError> {
            Ok(self.users.filter(|u| u.status_id == status_id))
        }

        async fn insert_user(&self, row: user::Model) -> Result<user::Model, ServiceError> {
            Ok(self.users.insert_with(|id| user::Model { id, ..row }))
        }

        async fn update_user(&self, row: user::Model) -> Result<user::Model, ServiceError> {
            let id = row.id;
            self.users.replace(id, row).ok_or_else(|| vanished("users", id))
        }

        async fn delete_user(&self, id: i32) -> Result<bool, ServiceError> {
            Ok(self.users.remove(id))
        }
    }
}
