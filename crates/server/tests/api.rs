use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use common::remote::mock::StaticExistence;
use configs::AppConfig;
use serde_json::{json, Value};
use server::openapi::{GeographyApi, ShoppingApi, UsersApi};
use server::routes;
use server::startup::{build_app, ServiceKind};
use service::geography::repository::mock::MockGeographyRepository;
use service::geography::GeographyService;
use service::shopping::repository::mock::MockShoppingRepository;
use service::shopping::{ShoppingRemotes, ShoppingService};
use service::users::repository::mock::MockUsersRepository;
use service::users::UsersService;
use tower::ServiceExt;
use utoipa::OpenApi;

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, json)
}

fn geography_app() -> Router {
    let repo = Arc::new(MockGeographyRepository::default());
    let svc = GeographyService::new(repo, Arc::new(StaticExistence::new("users", [1])));
    routes::build_router(routes::geography::router(Arc::new(svc)), GeographyApi::openapi())
}

fn shopping_app() -> Router {
    let remotes = ShoppingRemotes {
        users: Arc::new(StaticExistence::new("users", [1])),
        addresses: Arc::new(StaticExistence::new("addresses", [1])),
        statuses: Arc::new(StaticExistence::new("statuses", [1])),
        products: Arc::new(StaticExistence::new("products", [1])),
    };
    let svc = ShoppingService::new(Arc::new(MockShoppingRepository::default()), remotes);
    routes::build_router(routes::shopping::router(Arc::new(svc)), ShoppingApi::openapi())
}

fn sqlite_config() -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.database.url = "sqlite::memory:".into();
    cfg.services.request_timeout_secs = 2;
    cfg
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = send(&geography_app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (status, body) = send(&shopping_app(), Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/buys"].is_object());
    assert!(body["paths"]["/api/details/buy/{id}"].is_object());
}

#[tokio::test]
async fn duplicate_region_name_is_rejected() {
    let app = geography_app();
    let payload = json!({"name": "Región X"});
    let (status, body) = send(&app, Method::POST, "/api/regions", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "Región X");

    let (status, body) = send(&app, Method::POST, "/api/regions", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["statusCode"], 400);
    assert_eq!(body["message"], "Ya existe una región con ese nombre");
}

#[tokio::test]
async fn empty_collection_is_no_content() {
    let (status, _) = send(&geography_app(), Method::GET, "/api/regions", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn region_with_comunas_cannot_be_deleted() {
    let app = geography_app();
    let payload = json!({"name": "Valparaíso"});
    let (_, region) = send(&app, Method::POST, "/api/regions", Some(payload)).await;
    let region_id = region["data"]["id"].as_i64().unwrap();
    let payload = json!({"name": "Viña del Mar", "regionId": region_id});
    let (status, _) = send(&app, Method::POST, "/api/comunas", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/api/regions/{region_id}");
    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("1 comuna"));

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unknown_region_is_not_found() {
    let app = geography_app();
    let (status, body) = send(&app, Method::GET, "/api/regions/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["statusCode"], 404);

    let (status, _) = send(&app, Method::DELETE, "/api/regions/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_requests_use_the_envelope() {
    let app = geography_app();
    let (status, body) = send(&app, Method::GET, "/api/regions/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/regions")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn buy_with_unknown_user_is_rejected_and_not_stored() {
    let app = shopping_app();
    let input = json!({
        "orderNumber": "ORD-9",
        "subtotal": 1000, "iva": 190, "shipping": 0, "total": 1190,
        "paymentMethod": "Débito",
        "userId": 999, "addressId": 1, "statusId": 1
    });
    let (status, body) = send(&app, Method::POST, "/api/buys", Some(input)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("no existe"));

    let (status, _) = send(&app, Method::GET, "/api/buys", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn detail_subtotal_defaults_from_quantity() {
    let app = shopping_app();
    let buy = json!({
        "orderNumber": "ORD-10",
        "subtotal": 2000, "iva": 380, "shipping": 0, "total": 2380,
        "paymentMethod": "Crédito",
        "userId": 1, "addressId": 1, "statusId": 1
    });
    let (status, created) = send(&app, Method::POST, "/api/buys", Some(buy)).await;
    assert_eq!(status, StatusCode::CREATED);
    let buy_id = created["data"]["id"].as_i64().unwrap();

    let detail = json!({"buyId": buy_id, "productId": 1, "quantity": 2, "unitPrice": 1000});
    let (status, body) = send(&app, Method::POST, "/api/details", Some(detail)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["subtotal"], 2000);

    let (status, body) = send(&app, Method::GET, &format!("/api/details/buy/{buy_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
}

#[tokio::test]
async fn login_with_unknown_email_is_unauthorized() {
    let repo = Arc::new(MockUsersRepository::default());
    let svc = UsersService::new(repo, Arc::new(StaticExistence::new("statuses", [1])));
    let app = routes::build_router(routes::users::router(Arc::new(svc)), UsersApi::openapi());
    let payload = json!({"email": "nadie@correo.cl", "password": "clave-secreta"});
    let (status, body) = send(&app, Method::POST, "/api/users/login", Some(payload)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Credenciales inválidas");
}

#[tokio::test]
async fn negative_stock_leaves_product_unchanged() {
    let db = models::db::connect_in_memory().await.unwrap();
    let app = build_app(ServiceKind::Products, &sqlite_config(), db).await.unwrap();

    let (status, body) = send(&app, Method::POST, "/api/init/seed", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["inserted"].as_u64().unwrap() > 0);

    let (_, before) = send(&app, Method::GET, "/api/products/1", None).await;
    let (status, _) = send(&app, Method::PUT, "/api/products/1", Some(json!({"stock": -5}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (_, after) = send(&app, Method::GET, "/api/products/1", None).await;
    assert_eq!(before["data"], after["data"]);
}

#[tokio::test]
async fn product_search_requires_a_query() {
    let db = models::db::connect_in_memory().await.unwrap();
    let app = build_app(ServiceKind::Products, &sqlite_config(), db).await.unwrap();
    send(&app, Method::POST, "/api/init/seed", None).await;

    let (status, _) = send(&app, Method::GET, "/api/products/search?query=%20", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, Method::GET, "/api/products/search", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn second_seed_inserts_nothing() {
    let db = models::db::connect_in_memory().await.unwrap();
    let app = build_app(ServiceKind::Geography, &sqlite_config(), db).await.unwrap();
    let (_, first) = send(&app, Method::POST, "/api/init/seed", None).await;
    assert!(first["data"]["inserted"].as_u64().unwrap() > 0);
    let (status, second) = send(&app, Method::POST, "/api/init/seed", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["data"]["inserted"], 0);
}

#[tokio::test]
async fn unreachable_users_service_is_bad_gateway() {
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut cfg = sqlite_config();
    cfg.services.users_url = format!("http://{addr}");
    let db = models::db::connect_in_memory().await.unwrap();
    let app = build_app(ServiceKind::Geography, &cfg, db).await.unwrap();
    send(&app, Method::POST, "/api/init/seed", None).await;

    let input = json!({"street": "Av. Libertad", "number": "123", "comunaId": 1, "userId": 1});
    let (status, body) = send(&app, Method::POST, "/api/addresses", Some(input)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["message"], "No se pudo verificar el usuario con id 1");

    let (status, _) = send(&app, Method::GET, "/api/addresses", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}
