use std::sync::Arc;

use chrono::Utc;
use common::remote::{ExistenceCheck, RemoteError};
use models::rules::required_id;
use models::shopping::{buy, detail};
use tracing::{debug, info, instrument};

use super::domain::{BuyInput, DetailInput};
use super::repository::ShoppingRepository;
use crate::errors::ServiceError;
use crate::references::{ADDRESS, BUY, PRODUCT, STATUS, USER};

/// Sibling lookups used by shopping.
#[derive(Clone)]
pub struct ShoppingRemotes {
    pub users: Arc<dyn ExistenceCheck>,
    pub addresses: Arc<dyn ExistenceCheck>,
    pub statuses: Arc<dyn ExistenceCheck>,
    pub products: Arc<dyn ExistenceCheck>,
}

pub const SUBTOTAL_OVERFLOW: &str = "El subtotal excede el máximo permitido";

/// `quantity * unit_price`, rejected when it does not fit in an `i64`.
fn line_subtotal(quantity: i32, unit_price: i64) -> Result<i64, ServiceError> {
    let subtotal = i64::from(quantity)
        .checked_mul(unit_price)
        .ok_or_else(|| ServiceError::Validation(SUBTOTAL_OVERFLOW.into()))?;
    Ok(detail::SUBTOTAL.check(Some(subtotal))?)
}

async fn lookup(check: &dyn ExistenceCheck, id: Option<i32>) -> Option<Result<bool, RemoteError>> {
    match id {
        Some(id) => Some(check.exists(id).await),
        None => None,
    }
}

/// Shopping business service independent of web framework
pub struct ShoppingService {
    repo: Arc<dyn ShoppingRepository>,
    remotes: ShoppingRemotes,
}

impl ShoppingService {
    pub fn new(repo: Arc<dyn ShoppingRepository>, remotes: ShoppingRemotes) -> Self {
        Self { repo, remotes }
    }

    pub async fn list_buys(&self) -> Result<Vec<buy::Model>, ServiceError> {
        self.repo.list_buys().await
    }

    pub async fn get_buy(&self, id: i32) -> Result<buy::Model, ServiceError> {
        self.repo.find_buy(id).await?.ok_or_else(|| BUY.not_found(id))
    }

    pub async fn buys_by_user(&self, user_id: i32) -> Result<Vec<buy::Model>, ServiceError> {
        self.repo.buys_by_user(user_id).await
    }

    pub async fn buys_by_status(&self, status_id: i32) -> Result<Vec<buy::Model>, ServiceError> {
        self.repo.buys_by_status(status_id).await
    }

    /// Verify whichever of user, address and status are given.
    ///
    /// The lookups run concurrently but are judged in the order user, address,
    /// status so the reported failure does not depend on timing.
    async fn verify_buy_refs(
        &self,
        user: Option<i32>,
        address: Option<i32>,
        status: Option<i32>,
    ) -> Result<(), ServiceError> {
        let (u, a, s) = tokio::join!(
            lookup(self.remotes.users.as_ref(), user),
            lookup(self.remotes.addresses.as_ref(), address),
            lookup(self.remotes.statuses.as_ref(), status),
        );
        let checks = [(USER, user, u), (ADDRESS, address, a), (STATUS, status, s)];
        for (reference, id, outcome) in checks {
            if let (Some(id), Some(outcome)) = (id, outcome) {
                reference.remote(id, outcome)?;
            }
        }
        Ok(())
    }

    async fn ensure_order_number_free(
        &self,
        order_number: &str,
        own_id: Option<i32>,
    ) -> Result<(), ServiceError> {
        match self.repo.find_buy_by_order_number(order_number).await? {
            Some(existing) if Some(existing.id) != own_id => {
                Err(ServiceError::Conflict(buy::DUPLICATE.into()))
            }
            _ => Ok(()),
        }
    }

    /// Create a buy after confirming its user, address and status with the
    /// sibling services. Nothing is written when any of them is missing.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use common::remote::mock::StaticExistence;
    /// use service::shopping::domain::BuyInput;
    /// use service::shopping::repository::mock::MockShoppingRepository;
    /// use service::shopping::{ShoppingRemotes, ShoppingService};
    /// let remotes = ShoppingRemotes {
    ///     users: Arc::new(StaticExistence::new("users", [1])),
    ///     addresses: Arc::new(StaticExistence::new("addresses", [1])),
    ///     statuses: Arc::new(StaticExistence::new("statuses", [1])),
    ///     products: Arc::new(StaticExistence::new("products", [1])),
    /// };
    /// let svc = ShoppingService::new(Arc::new(MockShoppingRepository::default()), remotes);
    /// let input = BuyInput {
    ///     order_number: Some("ORD-1".into()),
    ///     subtotal: Some(1000),
    ///     iva: Some(190),
    ///     shipping: Some(0),
    ///     total: Some(1190),
    ///     payment_method: Some("Crédito".into()),
    ///     user_id: Some(1),
    ///     address_id: Some(1),
    ///     status_id: Some(1),
    ///     ..Default::default()
    /// };
    /// let buy = tokio_test::block_on(svc.create_buy(input)).unwrap();
    /// assert_eq!(buy.order_number, "ORD-1");
    /// ```
    #[instrument(skip(self, input), fields(order_number = ?input.order_number))]
    pub async fn create_buy(&self, input: BuyInput) -> Result<buy::Model, ServiceError> {
        let order_number = buy::ORDER_NUMBER.check(input.order_number.as_deref())?;
        let subtotal = buy::SUBTOTAL.check(input.subtotal)?;
        let iva = buy::IVA.check(input.iva)?;
        let shipping = buy::SHIPPING.check(input.shipping)?;
        let total = buy::TOTAL.check(input.total)?;
        let payment_method = buy::PAYMENT_METHOD.check(input.payment_method.as_deref())?;
        let user_id = required_id(input.user_id, buy::USER_ID_MISSING)?;
        let address_id = required_id(input.address_id, buy::ADDRESS_ID_MISSING)?;
        let status_id = required_id(input.status_id, buy::STATUS_ID_MISSING)?;

        self.ensure_order_number_free(&order_number, None).await?;
        self.verify_buy_refs(Some(user_id), Some(address_id), Some(status_id)).await?;

        let row = buy::Model {
            id: 0,
            order_number,
            date: input.date.unwrap_or_else(|| Utc::now().into()),
            subtotal,
            iva,
            shipping,
            total,
            payment_method,
            user_id,
            address_id,
            status_id,
        };
        let created = self.repo.insert_buy(row).await?;
        info!(buy_id = created.id, user_id, total, "buy_created");
        Ok(created)
    }

    #[instrument(skip(self, input))]
    pub async fn update_buy(
        &self,
        id: i32,
        input: BuyInput,
    ) -> Result<Option<buy::Model>, ServiceError> {
        let Some(mut current) = self.repo.find_buy(id).await? else {
            return Ok(None);
        };
        if input.order_number.is_some() {
            let order_number = buy::ORDER_NUMBER.check(input.order_number.as_deref())?;
            self.ensure_order_number_free(&order_number, Some(id)).await?;
            current.order_number = order_number;
        }
        if let Some(date) = input.date {
            current.date = date;
        }
        if input.subtotal.is_some() {
            current.subtotal = buy::SUBTOTAL.check(input.subtotal)?;
        }
        if input.iva.is_some() {
            current.iva = buy::IVA.check(input.iva)?;
        }
        if input.shipping.is_some() {
            current.shipping = buy::SHIPPING.check(input.shipping)?;
        }
        if input.total.is_some() {
            current.total = buy::TOTAL.check(input.total)?;
        }
        if input.payment_method.is_some() {
            current.payment_method = buy::PAYMENT_METHOD.check(input.payment_method.as_deref())?;
        }
        self.verify_buy_refs(input.user_id, input.address_id, input.status_id).await?;
        current.user_id = input.user_id.unwrap_or(current.user_id);
        current.address_id = input.address_id.unwrap_or(current.address_id);
        current.status_id = input.status_id.unwrap_or(current.status_id);

        let updated = self.repo.update_buy(current).await?;
        info!(buy_id = id, "buy_updated");
        Ok(Some(updated))
    }

    /// Removes the buy together with its details.
    #[instrument(skip(self))]
    pub async fn delete_buy(&self, id: i32) -> Result<bool, ServiceError> {
        if self.repo.find_buy(id).await?.is_none() {
            return Ok(false);
        }
        let deleted = self.repo.delete_buy(id).await?;
        info!(buy_id = id, deleted, "buy_deleted");
        Ok(deleted)
    }

    pub async fn list_details(&self) -> Result<Vec<detail::Model>, ServiceError> {
        self.repo.list_details().await
    }

    pub async fn get_detail(&self, id: i32) -> Result<detail::Model, ServiceError> {
        self.repo.find_detail(id).await?.ok_or_else(|| {
            ServiceError::NotFound(format!("El detalle con id {id} no fue encontrado"))
        })
    }

    pub async fn details_by_buy(&self, buy_id: i32) -> Result<Vec<detail::Model>, ServiceError> {
        self.repo.details_by_buy(buy_id).await
    }

    #[instrument(skip(self, input))]
    pub async fn create_detail(&self, input: DetailInput) -> Result<detail::Model, ServiceError> {
        let buy_id = required_id(input.buy_id, detail::BUY_ID_MISSING)?;
        let product_id = required_id(input.product_id, detail::PRODUCT_ID_MISSING)?;
        let quantity = detail::QUANTITY.check_i32(input.quantity)?;
        let unit_price = detail::UNIT_PRICE.check(input.unit_price)?;
        let subtotal = match input.subtotal {
            Some(given) => detail::SUBTOTAL.check(Some(given))?,
            None => line_subtotal(quantity, unit_price)?,
        };

        BUY.local(buy_id, self.repo.find_buy(buy_id).await?.is_some())?;
        PRODUCT.ensure_remote(self.remotes.products.as_ref(), product_id).await?;

        let created = self
            .repo
            .insert_detail(detail::Model {
                id: 0,
                buy_id,
                product_id,
                quantity,
                unit_price,
                subtotal,
            })
            .await?;
        info!(detail_id = created.id, buy_id, product_id, "detail_created");
        Ok(created)
    }

    /// Changing quantity or unit price without a subtotal recomputes it.
    /// Fields are validated before any reference lookup.
    #[instrument(skip(self, input))]
    pub async fn update_detail(
        &self,
        id: i32,
        input: DetailInput,
    ) -> Result<Option<detail::Model>, ServiceError> {
        let Some(mut current) = self.repo.find_detail(id).await? else {
            return Ok(None);
        };
        if input.quantity.is_some() {
            current.quantity = detail::QUANTITY.check_i32(input.quantity)?;
        }
        if input.unit_price.is_some() {
            current.unit_price = detail::UNIT_PRICE.check(input.unit_price)?;
        }
        if input.subtotal.is_some() {
            current.subtotal = detail::SUBTOTAL.check(input.subtotal)?;
        } else if input.quantity.is_some() || input.unit_price.is_some() {
            current.subtotal = line_subtotal(current.quantity, current.unit_price)?;
            debug!(detail_id = id, subtotal = current.subtotal, "subtotal_recomputed");
        }
        if let Some(buy_id) = input.buy_id {
            BUY.local(buy_id, self.repo.find_buy(buy_id).await?.is_some())?;
            current.buy_id = buy_id;
        }
        if let Some(product_id) = input.product_id {
            PRODUCT.ensure_remote(self.remotes.products.as_ref(), product_id).await?;
            current.product_id = product_id;
        }
        Ok(Some(self.repo.update_detail(current).await?))
    }

    #[instrument(skip(self))]
    pub async fn delete_detail(&self, id: i32) -> Result<bool, ServiceError> {
        if self.repo.find_detail(id).await?.is_none() {
            return Ok(false);
        }
        self.repo.delete_detail(id).await
    }

    /// Insert a sample order when no buy exists yet. The fixture points at the
    /// first user, address, status and products seeded by the sibling services
    /// and is written without asking them.
    #[instrument(skip(self))]
    pub async fn seed(&self) -> Result<u64, ServiceError> {
        if self.repo.count_buys().await? > 0 {
            info!("shopping_seed_skipped");
            return Ok(0);
        }
        let lines: [(i32, i64, i64); 2] = [(1, 1, 49_990), (2, 2, 19_990)];
        let subtotal: i64 = lines.iter().map(|(_, q, p)| q * p).sum();
        let iva = subtotal * 19 / 100;
        let shipping = 3_990;
        let order = buy::Model {
            id: 0,
            order_number: "ORD-0001".into(),
            date: Utc::now().into(),
            subtotal,
            iva,
            shipping,
            total: subtotal + iva + shipping,
            payment_method: "Tarjeta de crédito".into(),
            user_id: 1,
            address_id: 1,
            status_id: 1,
        };
        let order = self.repo.insert_buy(order).await?;
        for (product_id, quantity, unit_price) in lines {
            let quantity = quantity as i32;
            self.repo
                .insert_detail(detail::Model {
                    id: 0,
                    buy_id: order.id,
                    product_id,
                    quantity,
                    unit_price,
                    subtotal: i64::from(quantity) * unit_price,
                })
                .await?;
        }
        let written = 1 + lines.len() as u64;
        info!(rows = written, "shopping_seeded");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shopping::repository::mock::MockShoppingRepository;
    use common::remote::mock::{CallLog, StaticExistence};

    struct Fixture {
        repo: Arc<MockShoppingRepository>,
        svc: ShoppingService,
        log: CallLog,
    }

    fn fixture_with(
        users: StaticExistence,
        addresses: StaticExistence,
        statuses: StaticExistence,
    ) -> Fixture {
        let log = CallLog::default();
        let remotes = ShoppingRemotes {
            users: Arc::new(users.with_log(log.clone())),
            addresses: Arc::new(addresses.with_log(log.clone())),
            statuses: Arc::new(statuses.with_log(log.clone())),
            products: Arc::new(StaticExistence::new("products", [1, 2]).with_log(log.clone())),
        };
        let repo = Arc::new(MockShoppingRepository::default());
        Fixture { svc: ShoppingService::new(repo.clone(), remotes), repo, log }
    }

    fn fixture() -> Fixture {
        fixture_with(
            StaticExistence::new("users", [1]),
            StaticExistence::new("addresses", [1]),
            StaticExistence::new("statuses", [1]),
        )
    }

    fn buy_input(order_number: &str, user_id: i32) -> BuyInput {
        BuyInput {
            order_number: Some(order_number.into()),
            subtotal: Some(10_000),
            iva: Some(1_900),
            shipping: Some(0),
            total: Some(11_900),
            payment_method: Some("Débito".into()),
            user_id: Some(user_id),
            address_id: Some(1),
            status_id: Some(1),
            ..Default::default()
        }
    }

    fn calls(log: &CallLog) -> Vec<(&'static str, i32)> {
        log.lock().unwrap().clone()
    }

    #[tokio::test]
    async fn buy_checks_each_sibling_once_in_order() {
        let f = fixture();
        let b = f.svc.create_buy(buy_input("ORD-1", 1)).await.unwrap();
        assert_eq!(calls(&f.log), vec![("users", 1), ("addresses", 1), ("statuses", 1)]);
        assert_eq!(f.svc.get_buy(b.id).await.unwrap().payment_method, "Débito");
    }

    #[tokio::test]
    async fn unknown_user_writes_nothing() {
        let f = fixture();
        let err = f.svc.create_buy(buy_input("ORD-2", 999)).await.unwrap_err();
        assert_eq!(err, ServiceError::Validation("El usuario con id 999 no existe".into()));
        assert!(err.to_string().contains("no existe"));
        assert_eq!(calls(&f.log).len(), 3);
        assert!(f.repo.buys.is_empty());
        assert!(f.repo.details.is_empty());
    }

    #[tokio::test]
    async fn first_failing_reference_wins() {
        let f = fixture_with(
            StaticExistence::new("users", [1]),
            StaticExistence::new("addresses", []),
            StaticExistence::unreachable("statuses"),
        );
        let err = f.svc.create_buy(buy_input("ORD-3", 1)).await.unwrap_err();
        assert_eq!(err.to_string(), "La dirección con id 1 no existe");
    }

    #[tokio::test]
    async fn unreachable_sibling_is_unavailable() {
        let f = fixture_with(
            StaticExistence::unreachable("users"),
            StaticExistence::new("addresses", [1]),
            StaticExistence::new("statuses", [1]),
        );
        let err = f.svc.create_buy(buy_input("ORD-4", 1)).await.unwrap_err();
        let msg = "No se pudo verificar el usuario con id 1";
        assert_eq!(err, ServiceError::Unavailable(msg.into()));
        assert!(f.repo.buys.is_empty());
    }

    #[tokio::test]
    async fn duplicate_order_number_skips_remote_checks() {
        let f = fixture();
        f.svc.create_buy(buy_input("ORD-5", 1)).await.unwrap();
        f.log.lock().unwrap().clear();
        let err = f.svc.create_buy(buy_input("ORD-5", 1)).await.unwrap_err();
        assert_eq!(err, ServiceError::Conflict(buy::DUPLICATE.into()));
        assert!(calls(&f.log).is_empty());
    }

    #[tokio::test]
    async fn update_only_checks_given_references() {
        let f = fixture();
        let b = f.svc.create_buy(buy_input("ORD-6", 1)).await.unwrap();
        f.log.lock().unwrap().clear();

        let patch = BuyInput { total: Some(12_000), ..Default::default() };
        let updated = f.svc.update_buy(b.id, patch).await.unwrap().unwrap();
        assert_eq!(updated.total, 12_000);
        assert!(calls(&f.log).is_empty());

        let patch = BuyInput { status_id: Some(8), ..Default::default() };
        let err = f.svc.update_buy(b.id, patch).await.unwrap_err();
        assert_eq!(err.to_string(), "El estado con id 8 no existe");
        assert_eq!(calls(&f.log), vec![("statuses", 8)]);
        assert_eq!(f.svc.get_buy(b.id).await.unwrap().status_id, 1);
    }

    #[tokio::test]
    async fn detail_subtotal_defaults_to_quantity_times_price() {
        let f = fixture();
        let b = f.svc.create_buy(buy_input("ORD-7", 1)).await.unwrap();
        let d = f.svc.create_detail(line(b.id, 2, 3, 1_500)).await.unwrap();
        assert_eq!(d.subtotal, 4_500);

        let patch = DetailInput { quantity: Some(4), ..Default::default() };
        let updated = f.svc.update_detail(d.id, patch).await.unwrap().unwrap();
        assert_eq!(updated.subtotal, 6_000);
    }

    #[tokio::test]
    async fn detail_rules() {
        let f = fixture();
        let b = f.svc.create_buy(buy_input("ORD-8", 1)).await.unwrap();
        let err = f.svc.create_detail(line(b.id, 1, 0, 10)).await.unwrap_err();
        assert_eq!(err.to_string(), "La cantidad debe ser al menos 1");

        let err = f.svc.create_detail(line(50, 1, 1, 10)).await.unwrap_err();
        assert_eq!(err.to_string(), "La compra con id 50 no existe");

        let err = f.svc.create_detail(line(b.id, 9, 1, 10)).await.unwrap_err();
        assert_eq!(err.to_string(), "El producto con id 9 no existe");
        assert!(f.repo.details.is_empty());
    }

    fn line(buy_id: i32, product_id: i32, quantity: i32, unit_price: i64) -> DetailInput {
        DetailInput {
            buy_id: Some(buy_id),
            product_id: Some(product_id),
            quantity: Some(quantity),
            unit_price: Some(unit_price),
            subtotal: None,
        }
    }

    #[tokio::test]
    async fn overflowing_subtotal_is_rejected_on_create() {
        let f = fixture();
        let b = f.svc.create_buy(buy_input("ORD-11", 1)).await.unwrap();
        f.log.lock().unwrap().clear();

        let err = f.svc.create_detail(line(b.id, 1, 2, i64::MAX)).await.unwrap_err();
        assert_eq!(err, ServiceError::Validation(SUBTOTAL_OVERFLOW.into()));
        assert!(f.repo.details.is_empty());
        assert!(calls(&f.log).is_empty());
    }

    #[tokio::test]
    async fn overflowing_subtotal_is_rejected_on_update() {
        let f = fixture();
        let b = f.svc.create_buy(buy_input("ORD-12", 1)).await.unwrap();
        let d = f.svc.create_detail(line(b.id, 1, 1, i64::MAX)).await.unwrap();
        assert_eq!(d.subtotal, i64::MAX);

        let patch = DetailInput { quantity: Some(3), ..Default::default() };
        let err = f.svc.update_detail(d.id, patch).await.unwrap_err();
        assert_eq!(err, ServiceError::Validation(SUBTOTAL_OVERFLOW.into()));
        let stored = f.svc.get_detail(d.id).await.unwrap();
        assert_eq!((stored.quantity, stored.subtotal), (1, i64::MAX));
    }

    #[tokio::test]
    async fn invalid_detail_patch_skips_sibling_lookup() {
        let f = fixture();
        let b = f.svc.create_buy(buy_input("ORD-13", 1)).await.unwrap();
        let d = f.svc.create_detail(line(b.id, 1, 1, 100)).await.unwrap();
        f.log.lock().unwrap().clear();

        let patch = DetailInput { product_id: Some(2), quantity: Some(0), ..Default::default() };
        let err = f.svc.update_detail(d.id, patch).await.unwrap_err();
        assert_eq!(err.to_string(), "La cantidad debe ser al menos 1");
        assert!(calls(&f.log).is_empty());
        assert_eq!(f.svc.get_detail(d.id).await.unwrap().product_id, 1);
    }

    #[tokio::test]
    async fn delete_buy_removes_details() {
        let f = fixture();
        assert_eq!(f.svc.seed().await.unwrap(), 3);
        assert_eq!(f.svc.seed().await.unwrap(), 0);
        let b = f.svc.list_buys().await.unwrap().remove(0);
        assert_eq!(b.total, b.subtotal + b.iva + b.shipping);
        assert_eq!(f.svc.details_by_buy(b.id).await.unwrap().len(), 2);

        assert!(f.svc.delete_buy(b.id).await.unwrap());
        assert!(f.svc.list_details().await.unwrap().is_empty());
        assert!(!f.svc.delete_buy(b.id).await.unwrap());
    }
}
