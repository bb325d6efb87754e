use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::rules::AmountRule;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "details")]
#[serde(rename_all = "camelCase")]
#[schema(as = Detail)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub buy_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: i64,
    pub subtotal: i64,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Buy,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Buy => Entity::belongs_to(super::buy::Entity)
                .from(Column::BuyId)
                .to(super::buy::Column::Id)
                .into(),
        }
    }
}

impl Related<super::buy::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Buy.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub const QUANTITY: AmountRule = AmountRule {
    min: 1,
    missing: "La cantidad es obligatoria",
    below_min: "La cantidad debe ser al menos 1",
};
pub const UNIT_PRICE: AmountRule = AmountRule {
    min: 0,
    missing: "El precio unitario es obligatorio",
    below_min: "El precio unitario no puede ser negativo",
};
pub const SUBTOTAL: AmountRule = AmountRule {
    min: 0,
    missing: "El subtotal es obligatorio",
    below_min: "El subtotal no puede ser negativo",
};

pub const BUY_ID_MISSING: &str = "El id de la compra es obligatorio";
pub const PRODUCT_ID_MISSING: &str = "El id del producto es obligatorio";
