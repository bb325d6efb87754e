use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use common::envelope::ApiResponse;
use models::shopping::{buy, detail};
use service::references::BUY;
use service::shopping::domain::{BuyInput, DetailInput};
use service::shopping::ShoppingService;

use super::{seed_response, SeedReport};
use crate::errors::ApiError;
use crate::extract::{Body, Id};

type Svc = axum::extract::State<Arc<ShoppingService>>;
type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

pub fn router(svc: Arc<ShoppingService>) -> Router {
    Router::new()
        .route("/api/buys", get(list_buys).post(create_buy))
        .route("/api/buys/:id", get(get_buy).put(update_buy).delete(delete_buy))
        .route("/api/buys/user/:id", get(buys_by_user))
        .route("/api/buys/status/:id", get(buys_by_status))
        .route("/api/details", get(list_details).post(create_detail))
        .route("/api/details/:id", get(get_detail).put(update_detail).delete(delete_detail))
        .route("/api/details/buy/:id", get(details_by_buy))
        .route("/api/init/seed", post(seed))
        .with_state(svc)
}

fn detail_not_found(id: i32) -> ApiError {
    ApiError::NotFound(format!("El detalle con id {} no fue encontrado", id))
}

#[utoipa::path(
    get,
    path = "/api/buys",
    tag = "buys",
    responses(
        (status = 200, description = "All buys"),
        (status = 204, description = "No buys"),
    )
)]
pub async fn list_buys(svc: Svc) -> ApiResult<Vec<buy::Model>> {
    Ok(ApiResponse::list(
        svc.list_buys().await?,
        "Compras encontradas",
        "No hay compras registradas",
    ))
}

#[utoipa::path(
    get,
    path = "/api/buys/{id}",
    tag = "buys",
    params(("id" = i32, Path, description = "Buy id")),
    responses(
        (status = 200, description = "Buy found"),
        (status = 404, description = "Unknown buy"),
    )
)]
pub async fn get_buy(svc: Svc, Id(id): Id) -> ApiResult<buy::Model> {
    Ok(ApiResponse::ok(svc.get_buy(id).await?, "Compra encontrada"))
}

#[utoipa::path(
    get,
    path = "/api/buys/user/{id}",
    tag = "buys",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "Buys of the user"),
        (status = 204, description = "No buys"),
    )
)]
pub async fn buys_by_user(svc: Svc, Id(id): Id) -> ApiResult<Vec<buy::Model>> {
    Ok(ApiResponse::list(
        svc.buys_by_user(id).await?,
        "Compras del usuario",
        "El usuario no tiene compras",
    ))
}

#[utoipa::path(
    get,
    path = "/api/buys/status/{id}",
    tag = "buys",
    params(("id" = i32, Path, description = "Status id")),
    responses(
        (status = 200, description = "Buys with the status"),
        (status = 204, description = "No buys"),
    )
)]
pub async fn buys_by_status(svc: Svc, Id(id): Id) -> ApiResult<Vec<buy::Model>> {
    Ok(ApiResponse::list(
        svc.buys_by_status(id).await?,
        "Compras con el estado",
        "No hay compras con ese estado",
    ))
}

#[utoipa::path(
    post,
    path = "/api/buys",
    tag = "buys",
    request_body = BuyInput,
    responses(
        (status = 201, description = "Buy created"),
        (status = 400, description = "Invalid field, duplicate order number or unknown reference"),
        (status = 502, description = "A sibling service could not confirm a reference"),
    )
)]
pub async fn create_buy(svc: Svc, Body(input): Body<BuyInput>) -> ApiResult<buy::Model> {
    Ok(ApiResponse::created(svc.create_buy(input).await?, "Compra creada"))
}

#[utoipa::path(
    put,
    path = "/api/buys/{id}",
    tag = "buys",
    request_body = BuyInput,
    params(("id" = i32, Path, description = "Buy id")),
    responses(
        (status = 200, description = "Buy updated"),
        (status = 400, description = "Invalid field or unknown reference"),
        (status = 404, description = "Unknown buy"),
        (status = 502, description = "A sibling service could not confirm a reference"),
    )
)]
pub async fn update_buy(
    svc: Svc,
    Id(id): Id,
    Body(input): Body<BuyInput>,
) -> ApiResult<buy::Model> {
    let updated = svc.update_buy(id, input).await?.ok_or_else(|| super::not_found(BUY, id))?;
    Ok(ApiResponse::ok(updated, "Compra actualizada"))
}

#[utoipa::path(
    delete,
    path = "/api/buys/{id}",
    tag = "buys",
    params(("id" = i32, Path, description = "Buy id")),
    responses(
        (status = 200, description = "Buy and its details deleted"),
        (status = 404, description = "Unknown buy"),
    )
)]
pub async fn delete_buy(svc: Svc, Id(id): Id) -> ApiResult<()> {
    if !svc.delete_buy(id).await? {
        return Err(super::not_found(BUY, id));
    }
    Ok(ApiResponse::done("Compra eliminada"))
}

#[utoipa::path(
    get,
    path = "/api/details",
    tag = "details",
    responses(
        (status = 200, description = "All details"),
        (status = 204, description = "No details"),
    )
)]
pub async fn list_details(svc: Svc) -> ApiResult<Vec<detail::Model>> {
    Ok(ApiResponse::list(
        svc.list_details().await?,
        "Detalles encontrados",
        "No hay detalles registrados",
    ))
}

#[utoipa::path(
    get,
    path = "/api/details/{id}",
    tag = "details",
    params(("id" = i32, Path, description = "Detail id")),
    responses(
        (status = 200, description = "Detail found"),
        (status = 404, description = "Unknown detail"),
    )
)]
pub async fn get_detail(svc: Svc, Id(id): Id) -> ApiResult<detail::Model> {
    Ok(ApiResponse::ok(svc.get_detail(id).await?, "Detalle encontrado"))
}

#[utoipa::path(
    get,
    path = "/api/details/buy/{id}",
    tag = "details",
    params(("id" = i32, Path, description = "Buy id")),
    responses(
        (status = 200, description = "Details of the buy"),
        (status = 204, description = "No details"),
    )
)]
pub async fn details_by_buy(svc: Svc, Id(id): Id) -> ApiResult<Vec<detail::Model>> {
    Ok(ApiResponse::list(
        svc.details_by_buy(id).await?,
        "Detalles de la compra",
        "La compra no tiene detalles",
    ))
}

#[utoipa::path(
    post,
    path = "/api/details",
    tag = "details",
    request_body = DetailInput,
    responses(
        (status = 201, description = "Detail created"),
        (status = 400, description = "Invalid field, unknown buy or product"),
        (status = 502, description = "Products service could not confirm the product"),
    )
)]
pub async fn create_detail(svc: Svc, Body(input): Body<DetailInput>) -> ApiResult<detail::Model> {
    Ok(ApiResponse::created(svc.create_detail(input).await?, "Detalle creado"))
}

#[utoipa::path(
    put,
    path = "/api/details/{id}",
    tag = "details",
    request_body = DetailInput,
    params(("id" = i32, Path, description = "Detail id")),
    responses(
        (status = 200, description = "Detail updated"),
        (status = 400, description = "Invalid field"),
        (status = 404, description = "Unknown detail"),
    )
)]
pub async fn update_detail(
    svc: Svc,
    Id(id): Id,
    Body(input): Body<DetailInput>,
) -> ApiResult<detail::Model> {
    let updated = svc.update_detail(id, input).await?.ok_or_else(|| detail_not_found(id))?;
    Ok(ApiResponse::ok(updated, "Detalle actualizado"))
}

#[utoipa::path(
    delete,
    path = "/api/details/{id}",
    tag = "details",
    params(("id" = i32, Path, description = "Detail id")),
    responses(
        (status = 200, description = "Detail deleted"),
        (status = 404, description = "Unknown detail"),
    )
)]
pub async fn delete_detail(svc: Svc, Id(id): Id) -> ApiResult<()> {
    if !svc.delete_detail(id).await? {
        return Err(detail_not_found(id));
    }
    Ok(ApiResponse::done("Detalle eliminado"))
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
