use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::rules::TextRule;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "regions")]
#[serde(rename_all = "camelCase")]
#[schema(as = Region)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Comuna,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Comuna => Entity::has_many(super::comuna::Entity).into() }
    }
}

impl Related<super::comuna::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comuna.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub const NAME: TextRule = TextRule {
    max: 100,
    missing: "El nombre de la región es obligatorio",
    too_long: "El nombre de la región no puede superar los 100 caracteres",
};

pub const DUPLICATE: &str = "Ya existe una región con ese nombre";
