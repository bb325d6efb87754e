use async_trait::async_trait;
use models::users::{role, user};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, SqlErr,
};

use crate::errors::ServiceError;
use crate::users::repository::UsersRepository;

pub struct SeaOrmUsersRepository {
    pub db: DatabaseConnection,
}

/// Both `rut` and `email` are unique; the violated index names which one.
fn user_conflict(err: DbErr) -> ServiceError {
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
        let msg = if detail.contains("email") {
            user::DUPLICATE_EMAIL
        } else {
            user::DUPLICATE_RUT
        };
        return ServiceError::Conflict(msg.into());
    }
    ServiceError::from_db(err, user::DUPLICATE_RUT)
}

#[async_trait]
impl UsersRepository for SeaOrmUsersRepository {
    async fn list_roles(&self) -> Result<Vec<role::Model>, ServiceError> {
        Ok(role::Entity::find().order_by_asc(role::Column::Id).all(&self.db).await?)
    }

    async fn find_role(&self, id: i32) -> Result<Option<role::Model>, ServiceError> {
        Ok(role::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_role_by_name(&self, name: &str) -> Result<Option<role::Model>, ServiceError> {
        Ok(role::Entity::find().filter(role::Column::Name.eq(name)).one(&self.db).await?)
    }

    async fn count_roles(&self) -> Result<u64, ServiceError> {
        Ok(role::Entity::find().count(&self.db).await?)
    }

    async fn insert_role(&self, row: role::Model) -> Result<role::Model, ServiceError> {
        let mut am = role::ActiveModel::from(row).reset_all();
        am.id = NotSet;
        am.insert(&self.db).await.map_err(|e| ServiceError::from_db(e, role::DUPLICATE))
    }

    async fn update_role(&self, row: role::Model) -> Result<role::Model, ServiceError> {
        role::ActiveModel::from(row)
            .reset_all()
            .update(&self.db)
            .await
            .map_err(|e| ServiceError::from_db(e, role::DUPLICATE))
    }

    async fn delete_role(&self, id: i32) -> Result<bool, ServiceError> {
        let res = role::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn list_users(&self) -> Result<Vec<user::Model>, ServiceError> {
        Ok(user::Entity::find().order_by_asc(user::Column::Id).all(&self.db).await?)
    }

    async fn find_user(&self, id: i32) -> Result<Option<user::Model>, ServiceError> {
        Ok(user::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_user_by_rut(&self, rut: &str) -> Result<Option<user::Model>, ServiceError> {
        Ok(user::Entity::find().filter(user::Column::Rut.eq(rut)).one(&self.db).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<user::Model>, ServiceError> {
        Ok(user::Entity::find().filter(user::Column::Email.eq(email)).one(&self.db).await?)
    }

    async fn users_by_role(&self, role_id: i32) -> Result<Vec<user::Model>, ServiceError> {
        Ok(user::Entity::find()
            .filter(user::Column::RoleId.eq(role_id))
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn users_by_status(&self, status_id: i32) -> Result<Vec<user::Model>, ServiceError> {
        Ok(user::Entity::find()
            .filter(user::Column::StatusId.eq(status_id))
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn insert_user(&self, row: user::Model) -> Result<user::Model, ServiceError> {
        let mut am = user::ActiveModel::from(row).reset_all();
        am.id = NotSet;
        am.insert(&self.db).await.map_err(user_conflict)
    }

    async fn update_user(&self, row: user::Model) -> Result<user::Model, ServiceError> {
        user::ActiveModel::from(row).reset_all().update(&self.db).await.map_err(user_conflict)
    }

    async fn delete_user(&self, id: i32) -> Result<bool, ServiceError> {
        let res = user::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}
