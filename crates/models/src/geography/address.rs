use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::rules::TextRule;

/// `user_id` references the users service and is never checked by the store.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "addresses")]
#[serde(rename_all = "camelCase")]
#[schema(as = Address)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub street: String,
    pub number: String,
    pub comuna_id: i32,
    pub user_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Comuna,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Comuna => Entity::belongs_to(super::comuna::Entity)
                .from(Column::ComunaId)
                .to(super::comuna::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub const STREET: TextRule = TextRule {
    max: 150,
    missing: "La calle es obligatoria",
    too_long: "La calle no puede superar los 150 caracteres",
};

pub const NUMBER: TextRule = TextRule {
    max: 20,
    missing: "El número es obligatorio",
    too_long: "El número no puede superar los 20 caracteres",
};

pub const COMUNA_ID_MISSING: &str = "El id de la comuna es obligatorio";
pub const USER_ID_MISSING: &str = "El id del usuario es obligatorio";
