use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Buy body; `date` defaults to now on create.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BuyInput {
    pub order_number: Option<String>,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub date: Option<DateTimeWithTimeZone>,
    pub subtotal: Option<i64>,
    pub iva: Option<i64>,
    pub shipping: Option<i64>,
    pub total: Option<i64>,
    pub payment_method: Option<String>,
    pub user_id: Option<i32>,
    pub address_id: Option<i32>,
    pub status_id: Option<i32>,
}

/// Detail body; `subtotal` defaults to `quantity * unit_price`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DetailInput {
    pub buy_id: Option<i32>,
    pub product_id: Option<i32>,
    pub quantity: Option<i32>,
    pub unit_price: Option<i64>,
    pub subtotal: Option<i64>,
}
