use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::rules::TextRule;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "statuses")]
#[serde(rename_all = "camelCase")]
#[schema(as = Status)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub const NAME: TextRule = TextRule {
    max: 50,
    missing: "El nombre del estado es obligatorio",
    too_long: "El nombre del estado no puede superar los 50 caracteres",
};

pub const DUPLICATE: &str = "Ya existe un estado con ese nombre";
