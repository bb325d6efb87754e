use async_trait::async_trait;
use models::products::{category, product, status};
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::errors::ServiceError;
use crate::products::repository::ProductsRepository;

/// `%query%` with the LIKE metacharacters of `query` taken literally.
fn contains_pattern(query: &str) -> LikeExpr {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for c in query.to_lowercase().chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    LikeExpr::new(escaped).escape('\\')
}

pub struct SeaOrmProductsRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl ProductsRepository for SeaOrmProductsRepository {
    async fn list_categories(&self) -> Result<Vec<category::Model>, ServiceError> {
        Ok(category::Entity::find().order_by_asc(category::Column::Id).all(&self.db).await?)
    }

    async fn find_category(&self, id: i32) -> Result<Option<category::Model>, ServiceError> {
        Ok(category::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_category_by_name(
        &self,
        name: &str,
    ) -> Result<Option<category::Model>, ServiceError> {
        Ok(category::Entity::find().filter(category::Column::Name.eq(name)).one(&self.db).await?)
    }

    async fn count_categories(&self) -> Result<u64, ServiceError> {
        Ok(category::Entity::find().count(&self.db).await?)
    }

    async fn insert_category(&self, row: category::Model) -> Result<category::Model, ServiceError> {
        let mut am = category::ActiveModel::from(row).reset_all();
        am.id = NotSet;
        am.insert(&self.db).await.map_err(|e| ServiceError::from_db(e, category::DUPLICATE))
    }

    async fn update_category(&self, row: category::Model) -> Result<category::Model, ServiceError> {
        category::ActiveModel::from(row)
            .reset_all()
            .update(&self.db)
            .await
            .map_err(|e| ServiceError::from_db(e, category::DUPLICATE))
    }

    async fn delete_category(&self, id: i32) -> Result<bool, ServiceError> {
        let res = category::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn list_statuses(&self) -> Result<Vec<status::Model>, ServiceError> {
        Ok(status::Entity::find().order_by_asc(status::Column::Id).all(&self.db).await?)
    }

    async fn find_status(&self, id: i32) -> Result<Option<status::Model>, ServiceError> {
        Ok(status::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_status_by_name(&self, name: &str) -> Result<Option<status::Model>, ServiceError> {
        Ok(status::Entity::find().filter(status::Column::Name.eq(name)).one(&self.db).await?)
    }

    async fn insert_status(&self, row: status::Model) -> Result<status::Model, ServiceError> {
        let mut am = status::ActiveModel::from(row).reset_all();
        am.id = NotSet;
        am.insert(&self.db).await.map_err(|e| ServiceError::from_db(e, status::DUPLICATE))
    }

    async fn update_status(&self, row: status::Model) -> Result<status::Model, ServiceError> {
        status::ActiveModel::from(row)
            .reset_all()
            .update(&self.db)
            .await
            .map_err(|e| ServiceError::from_db(e, status::DUPLICATE))
    }

    async fn delete_status(&self, id: i32) -> Result<bool, ServiceError> {
        let res = status::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn list_products(&self) -> Result<Vec<product::Model>, ServiceError> {
        Ok(product::Entity::find().order_by_asc(product::Column::Id).all(&self.db).await?)
    }

    async fn find_product(&self, id: i32) -> Result<Option<product::Model>, ServiceError> {
        Ok(product::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn products_by_category(
        &self,
        category_id: i32,
    ) -> Result<Vec<product::Model>, ServiceError> {
        Ok(product::Entity::find()
            .filter(product::Column::CategoryId.eq(category_id))
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn count_products_by_category(&self, category_id: i32) -> Result<u64, ServiceError> {
        Ok(product::Entity::find()
            .filter(product::Column::CategoryId.eq(category_id))
            .count(&self.db)
            .await?)
    }

    async fn products_by_status(
        &self,
        status_id: i32,
    ) -> Result<Vec<product::Model>, ServiceError> {
        Ok(product::Entity::find()
            .filter(product::Column::StatusId.eq(status_id))
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn search_products(&self, query: &str) -> Result<Vec<product::Model>, ServiceError> {
        let lowered = |col: product::Column| Expr::expr(Func::lower(Expr::col(col)));
        Ok(product::Entity::find()
            .filter(
                Condition::any()
                    .add(lowered(product::Column::Name).like(contains_pattern(query)))
                    .add(lowered(product::Column::Description).like(contains_pattern(query))),
            )
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn insert_product(&self, row: product::Model) -> Result<product::Model, ServiceError> {
        let mut am = product::ActiveModel::from(row).reset_all();
        am.id = NotSet;
        Ok(am.insert(&self.db).await?)
    }

    async fn update_product(&self, row: product::Model) -> Result<product::Model, ServiceError> {
        Ok(product::ActiveModel::from(row).reset_all().update(&self.db).await?)
    }

    async fn delete_product(&self, id: i32) -> Result<bool, ServiceError> {
        let res = product::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::memory_db;
    use migration::ProductsMigrator;

    async fn catalogue() -> Result<(SeaOrmProductsRepository, i32, i32), anyhow::Error> {
        let repo = SeaOrmProductsRepository { db: memory_db::<ProductsMigrator>().await? };
        let c = repo.insert_category(category::Model { id: 0, name: "Hogar".into() }).await?;
        let s = repo.insert_status(status::Model { id: 0, name: "Disponible".into() }).await?;
        Ok((repo, c.id, s.id))
    }

    fn product(
        name: &str,
        description: Option<&str>,
        category_id: i32,
        status_id: i32,
    ) -> product::Model {
        product::Model {
            id: 0,
            name: name.into(),
            description: description.map(Into::into),
            price: 12_990,
            stock: 3,
            category_id,
            status_id,
        }
    }

    #[tokio::test]
    async fn search_ignores_case_and_covers_description() -> Result<(), anyhow::Error> {
        let (repo, c, s) = catalogue().await?;
        repo.insert_product(product("Lámpara de mesa", None, c, s)).await?;
        repo.insert_product(product("Cojín", Some("Funda de LINO"), c, s)).await?;
        repo.insert_product(product("Alfombra", None, c, s)).await?;

        let by_name = repo.search_products("MESA").await?;
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Lámpara de mesa");
        assert_eq!(repo.search_products("lino").await?.len(), 1);
        assert!(repo.search_products("silla").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn search_treats_wildcards_literally() -> Result<(), anyhow::Error> {
        let (repo, c, s) = catalogue().await?;
        repo.insert_product(product("Mesa", None, c, s)).await?;
        repo.insert_product(product("Silla", None, c, s)).await?;
        repo.insert_product(product("Descuento 50%", Some("precio_final"), c, s)).await?;

        assert!(repo.search_products("a%").await?.is_empty());
        assert!(repo.search_products("m_sa").await?.is_empty());
        assert!(repo.search_products("\\").await?.is_empty());
        assert_eq!(repo.search_products("%").await?.len(), 1);
        assert_eq!(repo.search_products("_").await?.len(), 1);
        assert_eq!(repo.search_products("50%").await?[0].name, "Descuento 50%");
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_status_maps_to_conflict() -> Result<(), anyhow::Error> {
        let (repo, _, _) = catalogue().await?;
        let dup = repo.insert_status(status::Model { id: 0, name: "Disponible".into() }).await;
        assert_eq!(dup, Err(ServiceError::Conflict(status::DUPLICATE.into())));
        Ok(())
    }

    #[tokio::test]
    async fn status_in_use_cannot_be_deleted() -> Result<(), anyhow::Error> {
        let (repo, c, s) = catalogue().await?;
        repo.insert_product(product("Mesa", None, c, s)).await?;
        assert!(matches!(repo.delete_status(s).await, Err(ServiceError::Blocked(_))));
        assert_eq!(repo.products_by_status(s).await?.len(), 1);
        assert_eq!(repo.count_products_by_category(c).await?, 1);
        Ok(())
    }
}
