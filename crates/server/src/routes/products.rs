use std::sync::Arc;

use axum::extract::Query;
use axum::routing::{get, post};
use axum::Router;
use common::envelope::ApiResponse;
use models::products::{category, product, status};
use serde::Deserialize;
use service::products::domain::{NamedInput, ProductInput};
use service::products::ProductsService;
use service::references::{CATEGORY, PRODUCT, STATUS};
use utoipa::IntoParams;

use super::{not_found, seed_response, SeedReport};
use crate::errors::ApiError;
use crate::extract::{Body, Id};

type Svc = axum::extract::State<Arc<ProductsService>>;
type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

pub fn router(svc: Arc<ProductsService>) -> Router {
    Router::new()
        .route("/api/categories", get(list_categories).post(create_category))
        .route(
            "/api/categories/:id",
            get(get_category).put(update_category).delete(delete_category),
        )
        .route("/api/statuses", get(list_statuses).post(create_status))
        .route("/api/statuses/:id", get(get_status).put(update_status).delete(delete_status))
        .route("/api/products", get(list_products).post(create_product))
        .route("/api/products/search", get(search_products))
        .route("/api/products/:id", get(get_product).put(update_product).delete(delete_product))
        .route("/api/products/category/:id", get(products_by_category))
        .route("/api/products/status/:id", get(products_by_status))
        .route("/api/init/seed", post(seed))
        .with_state(svc)
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Matched case-insensitively against name and description.
    #[serde(default)]
    pub query: String,
}

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "categories",
    responses(
        (status = 200, description = "All categories"),
        (status = 204, description = "No categories"),
    )
)]
pub async fn list_categories(svc: Svc) -> ApiResult<Vec<category::Model>> {
    Ok(ApiResponse::list(
        svc.list_categories().await?,
        "Categorías encontradas",
        "No hay categorías registradas",
    ))
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    tag = "categories",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category found"),
        (status = 404, description = "Unknown category"),
    )
)]
pub async fn get_category(svc: Svc, Id(id): Id) -> ApiResult<category::Model> {
    Ok(ApiResponse::ok(svc.get_category(id).await?, "Categoría encontrada"))
}

#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "categories",
    request_body = NamedInput,
    responses(
        (status = 201, description = "Category created"),
        (status = 400, description = "Invalid or duplicate name"),
    )
)]
pub async fn create_category(
    svc: Svc,
    Body(input): Body<NamedInput>,
) -> ApiResult<category::Model> {
    Ok(ApiResponse::created(svc.create_category(input).await?, "Categoría creada"))
}

#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    tag = "categories",
    request_body = NamedInput,
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category updated"),
        (status = 400, description = "Invalid field"),
        (status = 404, description = "Unknown category"),
    )
)]
pub async fn update_category(
    svc: Svc,
    Id(id): Id,
    Body(input): Body<NamedInput>,
) -> ApiResult<category::Model> {
    let updated = svc.update_category(id, input).await?.ok_or_else(|| not_found(CATEGORY, id))?;
    Ok(ApiResponse::ok(updated, "Categoría actualizada"))
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    tag = "categories",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 400, description = "Category still has products"),
        (status = 404, description = "Unknown category"),
    )
)]
pub async fn delete_category(svc: Svc, Id(id): Id) -> ApiResult<()> {
    if !svc.delete_category(id).await? {
        return Err(not_found(CATEGORY, id));
    }
    Ok(ApiResponse::done("Categoría eliminada"))
}

#[utoipa::path(
    get,
    path = "/api/statuses",
    tag = "statuses",
    responses(
        (status = 200, description = "All statuses"),
        (status = 204, description = "No statuses"),
    )
)]
pub async fn list_statuses(svc: Svc) -> ApiResult<Vec<status::Model>> {
    Ok(ApiResponse::list(
        svc.list_statuses().await?,
        "Estados encontrados",
        "No hay estados registrados",
    ))
}

#[utoipa::path(
    get,
    path = "/api/statuses/{id}",
    tag = "statuses",
    params(("id" = i32, Path, description = "Status id")),
    responses(
        (status = 200, description = "Status found"),
        (status = 404, description = "Unknown status"),
    )
)]
pub async fn get_status(svc: Svc, Id(id): Id) -> ApiResult<status::Model> {
    Ok(ApiResponse::ok(svc.get_status(id).await?, "Estado encontrado"))
}

#[utoipa::path(
    post,
    path = "/api/statuses",
    tag = "statuses",
    request_body = NamedInput,
    responses(
        (status = 201, description = "Status created"),
        (status = 400, description = "Invalid or duplicate name"),
    )
)]
pub async fn create_status(svc: Svc, Body(input): Body<NamedInput>) -> ApiResult<status::Model> {
    Ok(ApiResponse::created(svc.create_status(input).await?, "Estado creado"))
}

#[utoipa::path(
    put,
    path = "/api/statuses/{id}",
    tag = "statuses",
    request_body = NamedInput,
    params(("id" = i32, Path, description = "Status id")),
    responses(
        (status = 200, description = "Status updated"),
        (status = 400, description = "Invalid field"),
        (status = 404, description = "Unknown status"),
    )
)]
pub async fn update_status(
    svc: Svc,
    Id(id): Id,
    Body(input): Body<NamedInput>,
) -> ApiResult<status::Model> {
    let updated = svc.update_status(id, input).await?.ok_or_else(|| not_found(STATUS, id))?;
    Ok(ApiResponse::ok(updated, "Estado actualizado"))
}

#[utoipa::path(
    delete,
    path = "/api/statuses/{id}",
    tag = "statuses",
    params(("id" = i32, Path, description = "Status id")),
    responses(
        (status = 200, description = "Status deleted"),
        (status = 400, description = "Status still in use"),
        (status = 404, description = "Unknown status"),
    )
)]
pub async fn delete_status(svc: Svc, Id(id): Id) -> ApiResult<()> {
    if !svc.delete_status(id).await? {
        return Err(not_found(STATUS, id));
    }
    Ok(ApiResponse::done("Estado eliminado"))
}

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "products",
    responses(
        (status = 200, description = "All products"),
        (status = 204, description = "No products"),
    )
)]
pub async fn list_products(svc: Svc) -> ApiResult<Vec<product::Model>> {
    Ok(ApiResponse::list(
        svc.list_products().await?,
        "Productos encontrados",
        "No hay productos registrados",
    ))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found"),
        (status = 404, description = "Unknown product"),
    )
)]
pub async fn get_product(svc: Svc, Id(id): Id) -> ApiResult<product::Model> {
    Ok(ApiResponse::ok(svc.get_product(id).await?, "Producto encontrado"))
}

#[utoipa::path(
    get,
    path = "/api/products/category/{id}",
    tag = "products",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Products of the category"),
        (status = 204, description = "No products"),
    )
)]
pub async fn products_by_category(svc: Svc, Id(id): Id) -> ApiResult<Vec<product::Model>> {
    Ok(ApiResponse::list(
        svc.products_by_category(id).await?,
        "Productos de la categoría",
        "La categoría no tiene productos",
    ))
}

#[utoipa::path(
    get,
    path = "/api/products/status/{id}",
    tag = "products",
    params(("id" = i32, Path, description = "Status id")),
    responses(
        (status = 200, description = "Products with the status"),
        (status = 204, description = "No products"),
    )
)]
pub async fn products_by_status(svc: Svc, Id(id): Id) -> ApiResult<Vec<product::Model>> {
    Ok(ApiResponse::list(
        svc.products_by_status(id).await?,
        "Productos con el estado",
        "No hay productos con ese estado",
    ))
}

#[utoipa::path(
    get,
    path = "/api/products/search",
    tag = "products",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching products"),
        (status = 204, description = "No matches"),
        (status = 400, description = "Blank query"),
    )
)]
pub async fn search_products(
    svc: Svc,
    Query(params): Query<SearchQuery>,
) -> ApiResult<Vec<product::Model>> {
    Ok(ApiResponse::list(
        svc.search_products(&params.query).await?,
        "Productos encontrados",
        "Ningún producto coincide con la búsqueda",
    ))
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "products",
    request_body = ProductInput,
    responses(
        (status = 201, description = "Product created"),
        (status = 400, description = "Invalid field, unknown category or status"),
    )
)]
pub async fn create_product(
    svc: Svc,
    Body(input): Body<ProductInput>,
) -> ApiResult<product::Model> {
    Ok(ApiResponse::created(svc.create_product(input).await?, "Producto creado"))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "products",
    request_body = ProductInput,
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product updated"),
        (status = 400, description = "Invalid field"),
        (status = 404, description = "Unknown product"),
    )
)]
pub async fn update_product(
    svc: Svc,
    Id(id): Id,
    Body(input): Body<ProductInput>,
) -> ApiResult<product::Model> {
    let updated = svc.update_product(id, input).await?.ok_or_else(|| not_found(PRODUCT, id))?;
    Ok(ApiResponse::ok(updated, "Producto actualizado"))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 404, description = "Unknown product"),
    )
)]
pub async fn delete_product(svc: Svc, Id(id): Id) -> ApiResult<()> {
    if !svc.delete_product(id).await? {
        return Err(not_found(PRODUCT, id));
    }
    Ok(ApiResponse::done("Producto eliminado"))
}

#[utoipa::path(
    post,
    path = "/api/init/seed",
    tag = "seed",
    responses(
        (status = 200, description = "Fixture rows written", body = SeedReport),
    )
)]
pub async fn seed(svc: Svc) -> ApiResult<SeedReport> {
    Ok(seed_response(svc.seed().await?))
}
