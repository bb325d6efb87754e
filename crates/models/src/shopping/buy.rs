use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::rules::{AmountRule, TextRule};

/// A purchase. `user_id`, `address_id` and `status_id` belong to sibling
/// services and were confirmed only when the row was written.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "buys")]
#[serde(rename_all = "camelCase")]
#[schema(as = Buy)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub order_number: String,
    #[schema(value_type = String, format = DateTime)]
    pub date: DateTimeWithTimeZone,
    pub subtotal: i64,
    pub iva: i64,
    pub shipping: i64,
    pub total: i64,
    pub payment_method: String,
    pub user_id: i32,
    pub address_id: i32,
    pub status_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Detail,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Detail => Entity::has_many(super::detail::Entity).into() }
    }
}

impl Related<super::detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Detail.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub const ORDER_NUMBER: TextRule = TextRule {
    max: 50,
    missing: "El número de orden es obligatorio",
    too_long: "El número de orden no puede superar los 50 caracteres",
};

pub const PAYMENT_METHOD: TextRule = TextRule {
    max: 50,
    missing: "El método de pago es obligatorio",
    too_long: "El método de pago no puede superar los 50 caracteres",
};

pub const SUBTOTAL: AmountRule = AmountRule {
    min: 0,
    missing: "El subtotal es obligatorio",
    below_min: "El subtotal no puede ser negativo",
};
pub const IVA: AmountRule = AmountRule {
    min: 0,
    missing: "El IVA es obligatorio",
    below_min: "El IVA no puede ser negativo",
};
pub const SHIPPING: AmountRule = AmountRule {
    min: 0,
    missing: "El costo de envío es obligatorio",
    below_min: "El costo de envío no puede ser negativo",
};
pub const TOTAL: AmountRule = AmountRule {
    min: 0,
    missing: "El total es obligatorio",
    below_min: "El total no puede ser negativo",
};

pub const DUPLICATE: &str = "Ya existe una compra con ese número de orden";

pub const USER_ID_MISSING: &str = "El id del usuario es obligatorio";
pub const ADDRESS_ID_MISSING: &str = "El id de la dirección es obligatorio";
pub const STATUS_ID_MISSING: &str = "El id del estado es obligatorio";
