use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Region body for create and partial update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegionInput {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComunaInput {
    pub name: Option<String>,
    pub region_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressInput {
    pub street: Option<String>,
    pub number: Option<String>,
    pub comuna_id: Option<i32>,
    pub user_id: Option<i32>,
}
