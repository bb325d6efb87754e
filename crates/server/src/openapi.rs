//! OpenAPI documents, one per service, served at `/api-docs/openapi.json`.

use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::routes::{self, geography, products, shopping, users, SeedReport};

/// Body of `GET /health`.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Geography service", description = "Regions, comunas and addresses"),
    paths(
        routes::health,
        geography::list_regions, geography::get_region, geography::create_region,
        geography::update_region, geography::delete_region,
        geography::list_comunas, geography::get_comuna, geography::comunas_by_region,
        geography::create_comuna, geography::update_comuna,
        geography::delete_comuna,
        geography::list_addresses, geography::get_address, geography::addresses_by_user,
        geography::addresses_by_comuna,
        geography::create_address, geography::update_address, geography::delete_address,
        geography::seed,
    ),
    components(schemas(
        HealthResponse, SeedReport,
        models::geography::region::Model, models::geography::comuna::Model,
        models::geography::address::Model,
        service::geography::domain::RegionInput, service::geography::domain::ComunaInput,
        service::geography::domain::AddressInput,
    ))
)]
pub struct GeographyApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Products service", description = "Categories, statuses and products"),
    paths(
        routes::health,
        products::list_categories, products::get_category, products::create_category,
        products::update_category, products::delete_category,
        products::list_statuses, products::get_status, products::create_status,
        products::update_status, products::delete_status,
        products::list_products, products::get_product, products::products_by_category,
        products::products_by_status,
        products::search_products, products::create_product, products::update_product,
        products::delete_product,
        products::seed,
    ),
    components(schemas(
        HealthResponse, SeedReport,
        models::products::category::Model, models::products::status::Model,
        models::products::product::Model,
        service::products::domain::NamedInput, service::products::domain::ProductInput,
    ))
)]
pub struct ProductsApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Shopping service", description = "Buys and order details"),
    paths(
        routes::health,
        shopping::list_buys, shopping::get_buy, shopping::buys_by_user, shopping::buys_by_status,
        shopping::create_buy, shopping::update_buy, shopping::delete_buy,
        shopping::list_details, shopping::get_detail, shopping::details_by_buy,
        shopping::create_detail, shopping::update_detail, shopping::delete_detail,
        shopping::seed,
    ),
    components(schemas(
        HealthResponse, SeedReport,
        models::shopping::buy::Model, models::shopping::detail::Model,
        service::shopping::domain::BuyInput, service::shopping::domain::DetailInput,
    ))
)]
pub struct ShoppingApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Users service", description = "Roles, accounts and login"),
    paths(
        routes::health,
        users::list_roles, users::get_role, users::create_role, users::update_role,
        users::delete_role,
        users::list_users, users::get_user, users::users_by_role, users::users_by_status,
        users::create_user, users::update_user, users::delete_user, users::login,
        users::seed,
    ),
    components(schemas(
        HealthResponse, SeedReport,
        models::users::role::Model, models::users::user::Model,
        service::users::domain::RoleInput, service::users::domain::UserInput,
        service::users::domain::LoginInput,
    ))
)]
pub struct UsersApi;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn products_document_lists_search_path() {
        let doc = ProductsApi::openapi();
        assert!(doc.paths.paths.contains_key("/api/products/search"));
        assert!(doc.paths.paths.contains_key("/health"));
    }

    #[test]
    fn users_document_lists_login() {
        let doc = UsersApi::openapi();
        assert!(doc.paths.paths.contains_key("/api/users/login"));
        assert!(!doc.paths.paths.contains_key("/api/buys"));
    }
}
