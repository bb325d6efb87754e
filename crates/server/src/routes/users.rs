use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use common::envelope::ApiResponse;
use models::users::{role, user};
use service::references::{ROLE, USER};
use service::users::domain::{LoginInput, RoleInput, UserInput};
use service::users::UsersService;

use super::{not_found, seed_response, SeedReport};
use crate::errors::ApiError;
use crate::extract::{Body, Id};

type Svc = axum::extract::State<Arc<UsersService>>;
type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

pub fn router(svc: Arc<UsersService>) -> Router {
    Router::new()
        .route("/api/roles", get(list_roles).post(create_role))
        .route("/api/roles/:id", get(get_role).put(update_role).delete(delete_role))
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/users/login", post(login))
        .route("/api/users/:id", get(get_user).put(update_user).delete(delete_user))
        .route("/api/users/role/:id", get(users_by_role))
        .route("/api/users/status/:id", get(users_by_status))
        .route("/api/init/seed", post(seed))
        .with_state(svc)
}

#[utoipa::path(
    get,
    path = "/api/roles",
    tag = "roles",
    responses(
        (status = 200, description = "All roles"),
        (status = 204, description = "No roles"),
    )
)]
pub async fn list_roles(svc: Svc) -> ApiResult<Vec<role::Model>> {
    Ok(ApiResponse::list(svc.list_roles().await?, "Roles encontrados", "No hay roles registrados"))
}

#[utoipa::path(
    get,
    path = "/api/roles/{id}",
    tag = "roles",
    params(("id" = i32, Path, description = "Role id")),
    responses(
        (status = 200, description = "Role found"),
        (status = 404, description = "Unknown role"),
    )
)]
pub async fn get_role(svc: Svc, Id(id): Id) -> ApiResult<role::Model> {
    Ok(ApiResponse::ok(svc.get_role(id).await?, "Rol encontrado"))
}

#[utoipa::path(
    post,
    path = "/api/roles",
    tag = "roles",
    request_body = RoleInput,
    responses(
        (status = 201, description = "Role created"),
        (status = 400, description = "Invalid or duplicate name"),
    )
)]
pub async fn create_role(svc: Svc, Body(input): Body<RoleInput>) -> ApiResult<role::Model> {
    Ok(ApiResponse::created(svc.create_role(input).await?, "Rol creado"))
}

#[utoipa::path(
    put,
    path = "/api/roles/{id}",
    tag = "roles",
    request_body = RoleInput,
    params(("id" = i32, Path, description = "Role id")),
    responses(
        (status = 200, description = "Role updated"),
        (status = 400, description = "Invalid field"),
        (status = 404, description = "Unknown role"),
    )
)]
pub async fn update_role(
    svc: Svc,
    Id(id): Id,
    Body(input): Body<RoleInput>,
) -> ApiResult<role::Model> {
    let updated = svc.update_role(id, input).await?.ok_or_else(|| not_found(ROLE, id))?;
    Ok(ApiResponse::ok(updated, "Rol actualizado"))
}

#[utoipa::path(
    delete,
    path = "/api/roles/{id}",
    tag = "roles",
    params(("id" = i32, Path, description = "Role id")),
    responses(
        (status = 200, description = "Role deleted"),
        (status = 400, description = "Role still assigned"),
        (status = 404, description = "Unknown role"),
    )
)]
pub async fn delete_role(svc: Svc, Id(id): Id) -> ApiResult<()> {
    if !svc.delete_role(id).await? {
        return Err(not_found(ROLE, id));
    }
    Ok(ApiResponse::done("Rol eliminado"))
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    responses(
        (status = 200, description = "All users"),
        (status = 204, description = "No users"),
    )
)]
pub async fn list_users(svc: Svc) -> ApiResult<Vec<user::Model>> {
    Ok(ApiResponse::list(
        svc.list_users().await?,
        "Usuarios encontrados",
        "No hay usuarios registrados",
    ))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User found"),
        (status = 404, description = "Unknown user"),
    )
)]
pub async fn get_user(svc: Svc, Id(id): Id) -> ApiResult<user::Model> {
    Ok(ApiResponse::ok(svc.get_user(id).await?, "Usuario encontrado"))
}

#[utoipa::path(
    get,
    path = "/api/users/role/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "Role id")),
    responses(
        (status = 200, description = "Users with the role"),
        (status = 204, description = "No users"),
    )
)]
pub async fn users_by_role(svc: Svc, Id(id): Id) -> ApiResult<Vec<user::Model>> {
    Ok(ApiResponse::list(
        svc.users_by_role(id).await?,
        "Usuarios con el rol",
        "No hay usuarios con ese rol",
    ))
}

#[utoipa::path(
    get,
    path = "/api/users/status/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "Status id")),
    responses(
        (status = 200, description = "Users with the status"),
        (status = 204, description = "No users"),
    )
)]
pub async fn users_by_status(svc: Svc, Id(id): Id) -> ApiResult<Vec<user::Model>> {
    Ok(ApiResponse::list(
        svc.users_by_status(id).await?,
        "Usuarios con el estado",
        "No hay usuarios con ese estado",
    ))
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = UserInput,
    responses(
        (status = 201, description = "User created"),
        (status = 400, description = "Invalid field, duplicate key, unknown role or status"),
        (status = 502, description = "Products service could not confirm the status"),
    )
)]
pub async fn create_user(svc: Svc, Body(input): Body<UserInput>) -> ApiResult<user::Model> {
    Ok(ApiResponse::created(svc.create_user(input).await?, "Usuario creado"))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "users",
    request_body = UserInput,
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User updated"),
        (status = 400, description = "Invalid field"),
        (status = 404, description = "Unknown user"),
        (status = 502, description = "Products service could not confirm the status"),
    )
)]
pub async fn update_user(
    svc: Svc,
    Id(id): Id,
    Body(input): Body<UserInput>,
) -> ApiResult<user::Model> {
    let updated = svc.update_user(id, input).await?.ok_or_else(|| not_found(USER, id))?;
    Ok(ApiResponse::ok(updated, "Usuario actualizado"))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "Unknown user"),
    )
)]
pub async fn delete_user(svc: Svc, Id(id): Id) -> ApiResult<()> {
    if !svc.delete_user(id).await? {
        return Err(not_found(USER, id));
    }
    Ok(ApiResponse::done("Usuario eliminado"))
}

#[utoipa::path(
    post,
    path = "/api/users/login",
    tag = "users",
    request_body = LoginInput,
    responses(
        (status = 200, description = "Credentials accepted"),
        (status = 401, description = "Unknown email or wrong password"),
    )
)]
pub async fn login(svc: Svc, Body(input): Body<LoginInput>) -> ApiResult<user::Model> {
    Ok(ApiResponse::ok(svc.login(input).await?, "Inicio de sesión exitoso"))
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
