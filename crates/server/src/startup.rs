use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use common::remote::{ExistenceCheck, HttpExistenceClient, RemoteError};
use configs::AppConfig;
use migration::{
    GeographyMigrator, MigratorTrait, ProductsMigrator, ShoppingMigrator, UsersMigrator,
};
use sea_orm::DatabaseConnection;
use service::errors::ServiceError;
use service::geography::repo::seaorm::SeaOrmGeographyRepository;
use service::geography::GeographyService;
use service::products::repo::seaorm::SeaOrmProductsRepository;
use service::products::ProductsService;
use service::shopping::repo::seaorm::SeaOrmShoppingRepository;
use service::shopping::{ShoppingRemotes, ShoppingService};
use service::users::repo::seaorm::SeaOrmUsersRepository;
use service::users::UsersService;
use tokio::net::TcpListener;
use tracing::{info, warn};
use utoipa::OpenApi;

use crate::errors::StartupError;
use crate::openapi::{GeographyApi, ProductsApi, ShoppingApi, UsersApi};
use crate::routes;

/// The four deployable services. Each owns its database and port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Geography,
    Products,
    Shopping,
    Users,
}

impl ServiceKind {
    pub fn name(self) -> &'static str {
        match self {
            ServiceKind::Geography => "geography",
            ServiceKind::Products => "products",
            ServiceKind::Shopping => "shopping",
            ServiceKind::Users => "users",
        }
    }

    pub fn default_port(self) -> u16 {
        match self {
            ServiceKind::Geography => 8081,
            ServiceKind::Products => 8082,
            ServiceKind::Shopping => 8083,
            ServiceKind::Users => 8084,
        }
    }
}

/// `config/<service>.toml` (or `CONFIG_PATH`) with env overrides applied.
pub fn load_config(kind: ServiceKind) -> Result<AppConfig, StartupError> {
    configs::load_for_service(kind.name(), kind.default_port())
        .map_err(|e| StartupError::InvalidConfig(format!("{e:#}")))
}

/// Sibling clients share one connection pool.
struct Siblings {
    http: reqwest::Client,
}

impl Siblings {
    fn new(cfg: &AppConfig) -> Result<Self, StartupError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.services.request_timeout_secs))
            .build()
            .map_err(|e| RemoteError::Network(e.to_string()))?;
        Ok(Self { http })
    }

    fn check(&self, base_url: &str, resource: &'static str) -> Arc<dyn ExistenceCheck> {
        Arc::new(HttpExistenceClient::with_client(self.http.clone(), base_url, resource))
    }
}

fn report_seed(kind: ServiceKind, outcome: Result<u64, ServiceError>) {
    match outcome {
        Ok(inserted) => {
            info!(service = kind.name(), event = "seed", inserted, "startup seed finished")
        }
        Err(e) => {
            warn!(service = kind.name(), event = "seed_failed", error = %e, "startup seed skipped")
        }
    }
}

/// Run the service's migrations, wire repositories and sibling clients and
/// return the complete router.
pub async fn build_app(
    kind: ServiceKind,
    cfg: &AppConfig,
    db: DatabaseConnection,
) -> Result<Router, StartupError> {
    let siblings = Siblings::new(cfg)?;
    let services = &cfg.services;

    let app = match kind {
        ServiceKind::Geography => {
            GeographyMigrator::up(&db, None).await?;
            let repo = Arc::new(SeaOrmGeographyRepository { db });
            let users = siblings.check(&services.users_url, "users");
            let svc = Arc::new(GeographyService::new(repo, users));
            if cfg.seed.on_startup {
                report_seed(kind, svc.seed().await);
            }
            routes::build_router(routes::geography::router(svc), GeographyApi::openapi())
        }
        ServiceKind::Products => {
            ProductsMigrator::up(&db, None).await?;
            let svc = Arc::new(ProductsService::new(Arc::new(SeaOrmProductsRepository { db })));
            if cfg.seed.on_startup {
                report_seed(kind, svc.seed().await);
            }
            routes::build_router(routes::products::router(svc), ProductsApi::openapi())
        }
        ServiceKind::Shopping => {
            ShoppingMigrator::up(&db, None).await?;
            let remotes = ShoppingRemotes {
                users: siblings.check(&services.users_url, "users"),
                addresses: siblings.check(&services.geography_url, "addresses"),
                statuses: siblings.check(&services.products_url, "statuses"),
                products: siblings.check(&services.products_url, "products"),
            };
            let repo = Arc::new(SeaOrmShoppingRepository { db });
            let svc = Arc::new(ShoppingService::new(repo, remotes));
            if cfg.seed.on_startup {
                report_seed(kind, svc.seed().await);
            }
            routes::build_router(routes::shopping::router(svc), ShoppingApi::openapi())
        }
        ServiceKind::Users => {
            UsersMigrator::up(&db, None).await?;
            let repo = Arc::new(SeaOrmUsersRepository { db });
            let statuses = siblings.check(&services.products_url, "statuses");
            let svc = Arc::new(UsersService::new(repo, statuses));
            if cfg.seed.on_startup {
                report_seed(kind, svc.seed().await);
            }
            routes::build_router(routes::users::router(svc), UsersApi::openapi())
        }
    };
    info!(service = kind.name(), event = "app_ready", "routes mounted");
    Ok(app)
}

async fn shutdown_signal(kind: ServiceKind) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(service = kind.name(), error = %e, "could not listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!(
        service = kind.name(),
        event = "shutdown_signal",
        "received Ctrl+C, draining connections"
    );
}

/// Connect, build the app and serve until Ctrl+C.
pub async fn run(kind: ServiceKind, cfg: AppConfig) -> Result<(), StartupError> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    let app = build_app(kind, &cfg, db).await?;

    let listener = TcpListener::bind((cfg.server.host.as_str(), cfg.server.port)).await?;
    let addr = listener.local_addr()?;
    info!(service = kind.name(), %addr, "listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal(kind)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ports_are_distinct() {
        let kinds = [
            ServiceKind::Geography,
            ServiceKind::Products,
            ServiceKind::Shopping,
            ServiceKind::Users,
        ];
        let ports: Vec<u16> = kinds
            .into_iter()
            .map(ServiceKind::default_port)
            .collect();
        assert_eq!(ports, vec![8081, 8082, 8083, 8084]);
    }

    #[test]
    fn names_match_config_files() {
        assert_eq!(ServiceKind::Shopping.name(), "shopping");
        assert_eq!(ServiceKind::Users.name(), "users");
    }
}
