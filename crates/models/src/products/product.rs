use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::rules::{AmountRule, TextRule};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "products")]
#[serde(rename_all = "camelCase")]
#[schema(as = Product)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub stock: i32,
    pub category_id: i32,
    pub status_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Category,
    Status,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Category => Entity::belongs_to(super::category::Entity)
                .from(Column::CategoryId)
                .to(super::category::Column::Id)
                .into(),
            Relation::Status => Entity::belongs_to(super::status::Entity)
                .from(Column::StatusId)
                .to(super::status::Column::Id)
                .into(),
        }
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub const NAME: TextRule = TextRule {
    max: 150,
    missing: "El nombre del producto es obligatorio",
    too_long: "El nombre del producto no puede superar los 150 caracteres",
};

pub const DESCRIPTION: TextRule = TextRule {
    max: 500,
    missing: "La descripción es obligatoria",
    too_long: "La descripción no puede superar los 500 caracteres",
};

pub const PRICE: AmountRule = AmountRule {
    min: 0,
    missing: "El precio es obligatorio",
    below_min: "El precio no puede ser negativo",
};

pub const STOCK: AmountRule = AmountRule {
    min: 0,
    missing: "El stock es obligatorio",
    below_min: "El stock no puede ser negativo",
};

pub const CATEGORY_ID_MISSING: &str = "El id de la categoría es obligatorio";
pub const STATUS_ID_MISSING: &str = "El id del estado es obligatorio";
