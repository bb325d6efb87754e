use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::rules::TextRule;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "comunas")]
#[serde(rename_all = "camelCase")]
#[schema(as = Comuna)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub region_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Region,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Region => Entity::belongs_to(super::region::Entity)
                .from(Column::RegionId)
                .to(super::region::Column::Id)
                .into(),
        }
    }
}

impl Related<super::region::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Region.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub const NAME: TextRule = TextRule {
    max: 100,
    missing: "El nombre de la comuna es obligatorio",
    too_long: "El nombre de la comuna no puede superar los 100 caracteres",
};

pub const REGION_ID_MISSING: &str = "El id de la región es obligatorio";
