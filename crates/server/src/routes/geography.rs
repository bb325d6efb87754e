use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use common::envelope::ApiResponse;
use models::geography::{address, comuna, region};
use service::geography::domain::{AddressInput, ComunaInput, RegionInput};
use service::geography::GeographyService;
use service::references::{ADDRESS, COMUNA, REGION};

use super::{not_found, seed_response, SeedReport};
use crate::errors::ApiError;
use crate::extract::{Body, Id};

type Svc = axum::extract::State<Arc<GeographyService>>;
type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

pub fn router(svc: Arc<GeographyService>) -> Router {
    Router::new()
        .route("/api/regions", get(list_regions).post(create_region))
        .route("/api/regions/:id", get(get_region).put(update_region).delete(delete_region))
        .route("/api/comunas", get(list_comunas).post(create_comuna))
        .route("/api/comunas/:id", get(get_comuna).put(update_comuna).delete(delete_comuna))
        .route("/api/comunas/region/:id", get(comunas_by_region))
        .route("/api/addresses", get(list_addresses).post(create_address))
        .route("/api/addresses/:id", get(get_address).put(update_address).delete(delete_address))
        .route("/api/addresses/user/:id", get(addresses_by_user))
        .route("/api/addresses/comuna/:id", get(addresses_by_comuna))
        .route("/api/init/seed", post(seed))
        .with_state(svc)
}

#[utoipa::path(
    get,
    path = "/api/regions",
    tag = "regions",
    responses(
        (status = 200, description = "All regions"),
        (status = 204, description = "No regions"),
    )
)]
pub async fn list_regions(svc: Svc) -> ApiResult<Vec<region::Model>> {
    Ok(ApiResponse::list(
        svc.list_regions().await?,
        "Regiones encontradas",
        "No hay regiones registradas",
    ))
}

#[utoipa::path(
    get,
    path = "/api/regions/{id}",
    tag = "regions",
    params(("id" = i32, Path, description = "Region id")),
    responses(
        (status = 200, description = "Region found"),
        (status = 404, description = "Unknown region"),
    )
)]
pub async fn get_region(svc: Svc, Id(id): Id) -> ApiResult<region::Model> {
    Ok(ApiResponse::ok(svc.get_region(id).await?, "Región encontrada"))
}

#[utoipa::path(
    post,
    path = "/api/regions",
    tag = "regions",
    request_body = RegionInput,
    responses(
        (status = 201, description = "Region created"),
        (status = 400, description = "Invalid or duplicate name"),
    )
)]
pub async fn create_region(svc: Svc, Body(input): Body<RegionInput>) -> ApiResult<region::Model> {
    Ok(ApiResponse::created(svc.create_region(input).await?, "Región creada"))
}

#[utoipa::path(
    put,
    path = "/api/regions/{id}",
    tag = "regions",
    request_body = RegionInput,
    params(("id" = i32, Path, description = "Region id")),
    responses(
        (status = 200, description = "Region updated"),
        (status = 400, description = "Invalid field"),
        (status = 404, description = "Unknown region"),
    )
)]
pub async fn update_region(
    svc: Svc,
    Id(id): Id,
    Body(input): Body<RegionInput>,
) -> ApiResult<region::Model> {
    let updated = svc.update_region(id, input).await?.ok_or_else(|| not_found(REGION, id))?;
    Ok(ApiResponse::ok(updated, "Región actualizada"))
}

#[utoipa::path(
    delete,
    path = "/api/regions/{id}",
    tag = "regions",
    params(("id" = i32, Path, description = "Region id")),
    responses(
        (status = 200, description = "Region deleted"),
        (status = 400, description = "Region still has comunas"),
        (status = 404, description = "Unknown region"),
    )
)]
pub async fn delete_region(svc: Svc, Id(id): Id) -> ApiResult<()> {
    if !svc.delete_region(id).await? {
        return Err(not_found(REGION, id));
    }
    Ok(ApiResponse::done("Región eliminada"))
}

#[utoipa::path(
    get,
    path = "/api/comunas",
    tag = "comunas",
    responses(
        (status = 200, description = "All comunas"),
        (status = 204, description = "No comunas"),
    )
)]
pub async fn list_comunas(svc: Svc) -> ApiResult<Vec<comuna::Model>> {
    Ok(ApiResponse::list(
        svc.list_comunas().await?,
        "Comunas encontradas",
        "No hay comunas registradas",
    ))
}

#[utoipa::path(
    get,
    path = "/api/comunas/{id}",
    tag = "comunas",
    params(("id" = i32, Path, description = "Comuna id")),
    responses(
        (status = 200, description = "Comuna found"),
        (status = 404, description = "Unknown comuna"),
    )
)]
pub async fn get_comuna(svc: Svc, Id(id): Id) -> ApiResult<comuna::Model> {
    Ok(ApiResponse::ok(svc.get_comuna(id).await?, "Comuna encontrada"))
}

#[utoipa::path(
    get,
    path = "/api/comunas/region/{id}",
    tag = "comunas",
    params(("id" = i32, Path, description = "Region id")),
    responses(
        (status = 200, description = "Comunas of the region"),
        (status = 204, description = "No comunas"),
    )
)]
pub async fn comunas_by_region(svc: Svc, Id(id): Id) -> ApiResult<Vec<comuna::Model>> {
    Ok(ApiResponse::list(
        svc.comunas_by_region(id).await?,
        "Comunas de la región",
        "La región no tiene comunas",
    ))
}

#[utoipa::path(
    post,
    path = "/api/comunas",
    tag = "comunas",
    request_body = ComunaInput,
    responses(
        (status = 201, description = "Comuna created"),
        (status = 400, description = "Invalid field or unknown region"),
    )
)]
pub async fn create_comuna(svc: Svc, Body(input): Body<ComunaInput>) -> ApiResult<comuna::Model> {
    Ok(ApiResponse::created(svc.create_comuna(input).await?, "Comuna creada"))
}

#[utoipa::path(
    put,
    path = "/api/comunas/{id}",
    tag = "comunas",
    request_body = ComunaInput,
    params(("id" = i32, Path, description = "Comuna id")),
    responses(
        (status = 200, description = "Comuna updated"),
        (status = 400, description = "Invalid field"),
        (status = 404, description = "Unknown comuna"),
    )
)]
pub async fn update_comuna(
    svc: Svc,
    Id(id): Id,
    Body(input): Body<ComunaInput>,
) -> ApiResult<comuna::Model> {
    let updated = svc.update_comuna(id, input).await?.ok_or_else(|| not_found(COMUNA, id))?;
    Ok(ApiResponse::ok(updated, "Comuna actualizada"))
}

#[utoipa::path(
    delete,
    path = "/api/comunas/{id}",
    tag = "comunas",
    params(("id" = i32, Path, description = "Comuna id")),
    responses(
        (status = 200, description = "Comuna deleted"),
        (status = 404, description = "Unknown comuna"),
    )
)]
pub async fn delete_comuna(svc: Svc, Id(id): Id) -> ApiResult<()> {
    if !svc.delete_comuna(id).await? {
        return Err(not_found(COMUNA, id));
    }
    Ok(ApiResponse::done("Comuna eliminada"))
}

#[utoipa::path(
    get,
    path = "/api/addresses",
    tag = "addresses",
    responses(
        (status = 200, description = "All addresses"),
        (status = 204, description = "No addresses"),
    )
)]
pub async fn list_addresses(svc: Svc) -> ApiResult<Vec<address::Model>> {
    Ok(ApiResponse::list(
        svc.list_addresses().await?,
        "Direcciones encontradas",
        "No hay direcciones registradas",
    ))
}

#[utoipa::path(
    get,
    path = "/api/addresses/{id}",
    tag = "addresses",
    params(("id" = i32, Path, description = "Address id")),
    responses(
        (status = 200, description = "Address found"),
        (status = 404, description = "Unknown address"),
    )
)]
pub async fn get_address(svc: Svc, Id(id): Id) -> ApiResult<address::Model> {
    Ok(ApiResponse::ok(svc.get_address(id).await?, "Dirección encontrada"))
}

#[utoipa::path(
    get,
    path = "/api/addresses/user/{id}",
    tag = "addresses",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "Addresses of the user"),
        (status = 204, description = "No addresses"),
    )
)]
pub async fn addresses_by_user(svc: Svc, Id(id): Id) -> ApiResult<Vec<address::Model>> {
    Ok(ApiResponse::list(
        svc.addresses_by_user(id).await?,
        "Direcciones del usuario",
        "El usuario no tiene direcciones",
    ))
}

#[utoipa::path(
    get,
    path = "/api/addresses/comuna/{id}",
    tag = "addresses",
    params(("id" = i32, Path, description = "Comuna id")),
    responses(
        (status = 200, description = "Addresses in the comuna"),
        (status = 204, description = "No addresses"),
    )
)]
pub async fn addresses_by_comuna(svc: Svc, Id(id): Id) -> ApiResult<Vec<address::Model>> {
    Ok(ApiResponse::list(
        svc.addresses_by_comuna(id).await?,
        "Direcciones de la comuna",
        "La comuna no tiene direcciones",
    ))
}

#[utoipa::path(
    post,
    path = "/api/addresses",
    tag = "addresses",
    request_body = AddressInput,
    responses(
        (status = 201, description = "Address created"),
        (status = 400, description = "Invalid field, unknown comuna or user"),
        (status = 502, description = "Users service could not confirm the user"),
    )
)]
pub async fn create_address(
    svc: Svc,
    Body(input): Body<AddressInput>,
) -> ApiResult<address::Model> {
    Ok(ApiResponse::created(svc.create_address(input).await?, "Dirección creada"))
}

#[utoipa::path(
    put,
    path = "/api/addresses/{id}",
    tag = "addresses",
    request_body = AddressInput,
    params(("id" = i32, Path, description = "Address id")),
    responses(
        (status = 200, description = "Address updated"),
        (status = 400, description = "Invalid field"),
        (status = 404, description = "Unknown address"),
        (status = 502, description = "Users service could not confirm the user"),
    )
)]
pub async fn update_address(
    svc: Svc,
    Id(id): Id,
    Body(input): Body<AddressInput>,
) -> ApiResult<address::Model> {
    let updated = svc.update_address(id, input).await?.ok_or_else(|| not_found(ADDRESS, id))?;
    Ok(ApiResponse::ok(updated, "Dirección actualizada"))
}

#[utoipa::path(
    delete,
    path = "/api/addresses/{id}",
    tag = "addresses",
    params(("id" = i32, Path, description = "Address id")),
    responses(
        (status = 200, description = "Address deleted"),
        (status = 404, description = "Unknown address"),
    )
)]
pub async fn delete_address(svc: Svc, Id(id): Id) -> ApiResult<()> {
    if !svc.delete_address(id).await? {
        return Err(not_found(ADDRESS, id));
    }
    Ok(ApiResponse::done("Dirección eliminada"))
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
