use std::sync::Arc;

use models::products::{category, product, status};
use models::rules::required_id;
use tracing::{info, instrument};

use super::domain::{NamedInput, ProductInput};
use super::repository::ProductsRepository;
use crate::errors::ServiceError;
use crate::references::{CATEGORY, PRODUCT, STATUS};

const SEED_CATEGORIES: &[&str] = &["Electrónica", "Hogar", "Deportes"];
const SEED_STATUSES: &[&str] = &["Disponible", "Agotado", "Descontinuado"];
/// (name, description, price, stock, category index, status index)
const SEED_PRODUCTS: &[(&str, &str, i64, i32, usize, usize)] = &[
    ("Audífonos inalámbricos", "Bluetooth 5.3 con cancelación de ruido", 49_990, 25, 0, 0),
    ("Hervidor eléctrico", "1,7 litros, acero inoxidable", 19_990, 40, 1, 0),
    ("Balón de fútbol", "Tamaño 5", 14_990, 0, 2, 1),
];

pub const SEARCH_MISSING: &str = "El texto de búsqueda es obligatorio";

/// Products business service independent of web framework
pub struct ProductsService {
    repo: Arc<dyn ProductsRepository>,
}

impl ProductsService {
    pub fn new(repo: Arc<dyn ProductsRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_categories(&self) -> Result<Vec<category::Model>, ServiceError> {
        self.repo.list_categories().await
    }

    pub async fn get_category(&self, id: i32) -> Result<category::Model, ServiceError> {
        self.repo.find_category(id).await?.ok_or_else(|| CATEGORY.not_found(id))
    }

    #[instrument(skip(self, input))]
    pub async fn create_category(
        &self,
        input: NamedInput,
    ) -> Result<category::Model, ServiceError> {
        let name = category::NAME.check(input.name.as_deref())?;
        if self.repo.find_category_by_name(&name).await?.is_some() {
            return Err(ServiceError::Conflict(category::DUPLICATE.into()));
        }
        let created = self.repo.insert_category(category::Model { id: 0, name }).await?;
        info!(category_id = created.id, "category_created");
        Ok(created)
    }

    #[instrument(skip(self, input))]
    pub async fn update_category(
        &self,
        id: i32,
        input: NamedInput,
    ) -> Result<Option<category::Model>, ServiceError> {
        let Some(mut current) = self.repo.find_category(id).await? else {
            return Ok(None);
        };
        if input.name.is_some() {
            let name = category::NAME.check(input.name.as_deref())?;
            if self.repo.find_category_by_name(&name).await?.is_some_and(|other| other.id != id) {
                return Err(ServiceError::Conflict(category::DUPLICATE.into()));
            }
            current.name = name;
        }
        Ok(Some(self.repo.update_category(current).await?))
    }

    /// Refuses while products still belong to the category.
    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: i32) -> Result<bool, ServiceError> {
        if self.repo.find_category(id).await?.is_none() {
            return Ok(false);
        }
        let dependents = self.repo.count_products_by_category(id).await?;
        if dependents > 0 {
            let noun = if dependents == 1 { "producto asociado" } else { "productos asociados" };
            return Err(ServiceError::Blocked(format!(
                "No se puede eliminar la categoría porque tiene {dependents} {noun}"
            )));
        }
        let deleted = self.repo.delete_category(id).await?;
        info!(category_id = id, deleted, "category_deleted");
        Ok(deleted)
    }

    pub async fn list_statuses(&self) -> Result<Vec<status::Model>, ServiceError> {
        self.repo.list_statuses().await
    }

    pub async fn get_status(&self, id: i32) -> Result<status::Model, ServiceError> {
        self.repo.find_status(id).await?.ok_or_else(|| STATUS.not_found(id))
    }

    #[instrument(skip(self, input))]
    pub async fn create_status(&self, input: NamedInput) -> Result<status::Model, ServiceError> {
        let name = status::NAME.check(input.name.as_deref())?;
        if self.repo.find_status_by_name(&name).await?.is_some() {
            return Err(ServiceError::Conflict(status::DUPLICATE.into()));
        }
        let created = self.repo.insert_status(status::Model { id: 0, name }).await?;
        info!(status_id = created.id, "status_created");
        Ok(created)
    }

    #[instrument(skip(self, input))]
    pub async fn update_status(
        &self,
        id: i32,
        input: NamedInput,
    ) -> Result<Option<status::Model>, ServiceError> {
        let Some(mut current) = self.repo.find_status(id).await? else {
            return Ok(None);
        };
        if input.name.is_some() {
            let name = status::NAME.check(input.name.as_deref())?;
            if self.repo.find_status_by_name(&name).await?.is_some_and(|other| other.id != id) {
                return Err(ServiceError::Conflict(status::DUPLICATE.into()));
            }
            current.name = name;
        }
        Ok(Some(self.repo.update_status(current).await?))
    }

    #[instrument(skip(self))]
    pub async fn delete_status(&self, id: i32) -> Result<bool, ServiceError> {
        if self.repo.find_status(id).await?.is_none() {
            return Ok(false);
        }
        self.repo.delete_status(id).await
    }

    pub async fn list_products(&self) -> Result<Vec<product::Model>, ServiceError> {
        self.repo.list_products().await
    }

    pub async fn get_product(&self, id: i32) -> Result<product::Model, ServiceError> {
        self.repo.find_product(id).await?.ok_or_else(|| PRODUCT.not_found(id))
    }

    pub async fn products_by_category(
        &self,
        category_id: i32,
    ) -> Result<Vec<product::Model>, ServiceError> {
        self.repo.products_by_category(category_id).await
    }

    pub async fn products_by_status(
        &self,
        status_id: i32,
    ) -> Result<Vec<product::Model>, ServiceError> {
        self.repo.products_by_status(status_id).await
    }

    pub async fn search_products(&self, query: &str) -> Result<Vec<product::Model>, ServiceError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ServiceError::Validation(SEARCH_MISSING.into()));
        }
        self.repo.search_products(query).await
    }

    /// Create a product in an existing category and status.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::products::domain::{NamedInput, ProductInput};
    /// use service::products::{repository::mock::MockProductsRepository, ProductsService};
    /// let svc = ProductsService::new(Arc::new(MockProductsRepository::default()));
    /// let hogar = NamedInput { name: Some("Hogar".into()) };
    /// let c = tokio_test::block_on(svc.create_category(hogar)).unwrap();
    /// let disponible = NamedInput { name: Some("Disponible".into()) };
    /// let s = tokio_test::block_on(svc.create_status(disponible)).unwrap();
    /// let input = ProductInput {
    ///     name: Some("Mesa".into()),
    ///     price: Some(10_000),
    ///     stock: Some(2),
    ///     category_id: Some(c.id),
    ///     status_id: Some(s.id),
    ///     ..Default::default()
    /// };
    /// let p = tokio_test::block_on(svc.create_product(input)).unwrap();
    /// assert_eq!(p.description, None);
    /// ```
    #[instrument(skip(self, input))]
    pub async fn create_product(
        &self,
        input: ProductInput,
    ) -> Result<product::Model, ServiceError> {
        let name = product::NAME.check(input.name.as_deref())?;
        let description = product::DESCRIPTION.check_optional(input.description.as_deref())?;
        let price = product::PRICE.check(input.price)?;
        let stock = product::STOCK.check_i32(input.stock)?;
        let category_id = required_id(input.category_id, product::CATEGORY_ID_MISSING)?;
        let status_id = required_id(input.status_id, product::STATUS_ID_MISSING)?;
        self.ensure_category(category_id).await?;
        self.ensure_status(status_id).await?;
        let created = self
            .repo
            .insert_product(product::Model {
                id: 0,
                name,
                description,
                price,
                stock,
                category_id,
                status_id,
            })
            .await?;
        info!(product_id = created.id, category_id, status_id, "product_created");
        Ok(created)
    }

    #[instrument(skip(self, input))]
    pub async fn update_product(
        &self,
        id: i32,
        input: ProductInput,
    ) -> Result<Option<product::Model>, ServiceError> {
        let Some(mut current) = self.repo.find_product(id).await? else {
            return Ok(None);
        };
        if input.name.is_some() {
            current.name = product::NAME.check(input.name.as_deref())?;
        }
        if input.description.is_some() {
            current.description =
                product::DESCRIPTION.check_optional(input.description.as_deref())?;
        }
        if input.price.is_some() {
            current.price = product::PRICE.check(input.price)?;
        }
        if input.stock.is_some() {
            current.stock = product::STOCK.check_i32(input.stock)?;
        }
        if let Some(category_id) = input.category_id {
            self.ensure_category(category_id).await?;
            current.category_id = category_id;
        }
        if let Some(status_id) = input.status_id {
            self.ensure_status(status_id).await?;
            current.status_id = status_id;
        }
        let updated = self.repo.update_product(current).await?;
        info!(product_id = id, "product_updated");
        Ok(Some(updated))
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i32) -> Result<bool, ServiceError> {
        if self.repo.find_product(id).await?.is_none() {
            return Ok(false);
        }
        self.repo.delete_product(id).await
    }

    /// Insert fixture categories, statuses and products when no category exists yet.
    #[instrument(skip(self))]
    pub async fn seed(&self) -> Result<u64, ServiceError> {
        if self.repo.count_categories().await? > 0 {
            info!("products_seed_skipped");
            return Ok(0);
        }
        let mut written = 0u64;
        let mut categories = Vec::with_capacity(SEED_CATEGORIES.len());
        for name in SEED_CATEGORIES {
            let row = category::Model { id: 0, name: (*name).into() };
            categories.push(self.repo.insert_category(row).await?.id);
            written += 1;
        }
        let mut statuses = Vec::with_capacity(SEED_STATUSES.len());
        for name in SEED_STATUSES {
            // statuses may already exist when only categories were wiped
            let id = match self.repo.find_status_by_name(name).await? {
                Some(existing) => existing.id,
                None => {
                    written += 1;
                    self.repo.insert_status(status::Model { id: 0, name: (*name).into() }).await?.id
                }
            };
            statuses.push(id);
        }
        for (name, description, price, stock, c, s) in SEED_PRODUCTS {
            let row = product::Model {
                id: 0,
                name: (*name).into(),
                description: Some((*description).into()),
                price: *price,
                stock: *stock,
                category_id: categories[*c],
                status_id: statuses[*s],
            };
            self.repo.insert_product(row).await?;
            written += 1;
        }
        info!(rows = written, "products_seeded");
        Ok(written)
    }

    async fn ensure_category(&self, id: i32) -> Result<(), ServiceError> {
        CATEGORY.local(id, self.repo.find_category(id).await?.is_some())
    }

    async fn ensure_status(&self, id: i32) -> Result<(), ServiceError> {
        STATUS.local(id, self.repo.find_status(id).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::products::repository::mock::MockProductsRepository;

    fn svc() -> (Arc<MockProductsRepository>, ProductsService) {
        let repo = Arc::new(MockProductsRepository::default());
        (repo.clone(), ProductsService::new(repo))
    }

    fn named(name: &str) -> NamedInput {
        NamedInput { name: Some(name.into()) }
    }

    async fn with_product(svc: &ProductsService) -> product::Model {
        let c = svc.create_category(named("Hogar")).await.unwrap();
        let s = svc.create_status(named("Disponible")).await.unwrap();
        svc.create_product(ProductInput {
            name: Some("Lámpara".into()),
            description: Some("LED".into()),
            price: Some(9_990),
            stock: Some(4),
            category_id: Some(c.id),
            status_id: Some(s.id),
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn negative_stock_update_leaves_row_unchanged() {
        let (_, svc) = svc();
        let p = with_product(&svc).await;
        let patch = ProductInput { stock: Some(-5), ..Default::default() };
        let err = svc.update_product(p.id, patch).await.unwrap_err();
        assert_eq!(err, ServiceError::Validation("El stock no puede ser negativo".into()));
        assert_eq!(svc.get_product(p.id).await.unwrap(), p);
    }

    #[tokio::test]
    async fn fields_are_checked_in_order() {
        let (_, svc) = svc();
        let input = ProductInput { name: Some(" ".into()), price: Some(-1), ..Default::default() };
        assert_eq!(svc.create_product(input).await.unwrap_err().to_string(), product::NAME.missing);

        let input = ProductInput {
            name: Some("Mesa".into()),
            price: Some(-1),
            stock: Some(-1),
            ..Default::default()
        };
        let err = svc.create_product(input).await.unwrap_err();
        assert_eq!(err.to_string(), "El precio no puede ser negativo");
    }

    #[tokio::test]
    async fn product_requires_local_category_and_status() {
        let (repo, svc) = svc();
        let s = svc.create_status(named("Disponible")).await.unwrap();
        let input = ProductInput {
            name: Some("Mesa".into()),
            price: Some(1),
            stock: Some(1),
            category_id: Some(7),
            status_id: Some(s.id),
            ..Default::default()
        };
        let err = svc.create_product(input).await.unwrap_err();
        assert_eq!(err.to_string(), "La categoría con id 7 no existe");
        assert!(repo.products.is_empty());
    }

    #[tokio::test]
    async fn category_with_products_cannot_be_deleted() {
        let (_, svc) = svc();
        let p = with_product(&svc).await;
        let err = svc.delete_category(p.category_id).await.unwrap_err();
        let msg = "No se puede eliminar la categoría porque tiene 1 producto asociado";
        assert_eq!(err, ServiceError::Blocked(msg.into()));

        assert!(svc.delete_product(p.id).await.unwrap());
        assert!(svc.delete_category(p.category_id).await.unwrap());
        assert!(!svc.delete_category(p.category_id).await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_status_name_is_conflict() {
        let (_, svc) = svc();
        svc.create_status(named("Agotado")).await.unwrap();
        let dup = svc.create_status(named("Agotado")).await;
        assert!(matches!(dup, Err(ServiceError::Conflict(_))));
    }

    #[tokio::test]
    async fn blank_description_clears_it() {
        let (_, svc) = svc();
        let p = with_product(&svc).await;
        let patch = ProductInput { description: Some("  ".into()), ..Default::default() };
        let updated = svc.update_product(p.id, patch).await.unwrap().unwrap();
        assert_eq!(updated.description, None);
    }

    #[tokio::test]
    async fn search_requires_text() {
        let (_, svc) = svc();
        with_product(&svc).await;
        assert_eq!(svc.search_products("lám").await.unwrap().len(), 1);
        assert_eq!(svc.search_products("  ").await.unwrap_err().to_string(), SEARCH_MISSING);
    }

    #[tokio::test]
    async fn seed_is_idempotent() {
        let (_, svc) = svc();
        assert_eq!(svc.seed().await.unwrap(), 9);
        assert_eq!(svc.seed().await.unwrap(), 0);
        assert_eq!(svc.list_statuses().await.unwrap().len(), 3);
        assert_eq!(svc.products_by_status(2).await.unwrap().len(), 1);
    }
}
