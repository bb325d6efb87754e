//! Existence checks against sibling services.
//!
//! A sibling answers `GET {base}/api/{resource}/{id}` with 2xx when the row
//! exists and 404 when it does not. Anything else means the reference could
//! not be confirmed, which is reported as an error rather than as "absent".

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RemoteError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },
}

/// "Does remote entity `id` exist?"
#[async_trait]
pub trait ExistenceCheck: Send + Sync {
    async fn exists(&self, id: i32) -> Result<bool, RemoteError>;
}

/// reqwest-backed client for one resource of one sibling service.
#[derive(Clone, Debug)]
pub struct HttpExistenceClient {
    http: reqwest::Client,
    base_url: String,
    resource: &'static str,
}

impl HttpExistenceClient {
    pub fn new(
        base_url: &str,
        resource: &'static str,
        timeout: Duration,
    ) -> Result<Self, RemoteError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::Network(e.to_string()))?;
        Ok(Self::with_client(http, base_url, resource))
    }

    /// Reuse an existing connection pool.
    pub fn with_client(http: reqwest::Client, base_url: &str, resource: &'static str) -> Self {
        Self { http, base_url: base_url.trim_end_matches('/').to_string(), resource }
    }

    pub fn url_for(&self, id: i32) -> String {
        format!("{}/api/{}/{}", self.base_url, self.resource, id)
    }
}

#[async_trait]
impl ExistenceCheck for HttpExistenceClient {
    async fn exists(&self, id: i32) -> Result<bool, RemoteError> {
        let url = self.url_for(id);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| {
                warn!(resource = self.resource, id, err = %e, "existence check failed");
                RemoteError::Network(e.to_string())
            })?;
        let status = resp.status();
        debug!(resource = self.resource, id, status = status.as_u16(), "existence check");
        if status.is_success() {
            Ok(true)
        } else if status == StatusCode::NOT_FOUND {
            Ok(false)
        } else {
            Err(RemoteError::Status { status: status.as_u16(), url })
        }
    }
}

/// In-memory existence checks for tests and local wiring.
pub mod mock {
    use super::*;
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex, PoisonError};

    /// Shared record of `(resource, id)` lookups in call order.
    pub type CallLog = Arc<Mutex<Vec<(&'static str, i32)>>>;

    pub struct StaticExistence {
        resource: &'static str,
        known: HashSet<i32>,
        unreachable: bool,
        log: CallLog,
    }

    impl StaticExistence {
        pub fn new(resource: &'static str, known: impl IntoIterator<Item = i32>) -> Self {
            Self {
                resource,
                known: known.into_iter().collect(),
                unreachable: false,
                log: CallLog::default(),
            }
        }

        /// Every lookup fails as if the sibling were down.
        pub fn unreachable(resource: &'static str) -> Self {
            Self { unreachable: true, ..Self::new(resource, []) }
        }

        pub fn with_log(mut self, log: CallLog) -> Self {
            self.log = log;
            self
        }

        pub fn calls(&self) -> Vec<(&'static str, i32)> {
            self.log.lock().unwrap_or_else(PoisonError::into_inner).clone()
        }
    }

    #[async_trait]
    impl ExistenceCheck for StaticExistence {
        async fn exists(&self, id: i32) -> Result<bool, RemoteError> {
            self.log.lock().unwrap_or_else(PoisonError::into_inner).push((self.resource, id));
            if self.unreachable {
                return Err(RemoteError::Network(format!("{} service unreachable", self.resource)));
            }
            Ok(self.known.contains(&id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Path, http::StatusCode as AxumStatus, routing::get, Router};
    use tokio::net::TcpListener;

    async fn user_lookup(Path(id): Path<i32>) -> AxumStatus {
        match id {
            1 => AxumStatus::OK,
            2 => AxumStatus::NOT_FOUND,
            _ => AxumStatus::INTERNAL_SERVER_ERROR,
        }
    }

    async fn spawn_sibling() -> String {
        let app = Router::new().route("/api/users/:id", get(user_lookup));
        let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{}/", addr)
    }

    #[tokio::test]
    async fn maps_sibling_statuses() {
        let base = spawn_sibling().await;
        let client = HttpExistenceClient::new(&base, "users", Duration::from_secs(5)).unwrap();

        assert_eq!(client.exists(1).await, Ok(true));
        assert_eq!(client.exists(2).await, Ok(false));
        match client.exists(3).await {
            Err(RemoteError::Status { status, url }) => {
                assert_eq!(status, 500);
                assert!(url.ends_with("/api/users/3"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn connection_refused_is_network_error() {
        let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client =
            HttpExistenceClient::new(&format!("http://{}", addr), "users", Duration::from_secs(2))
                .unwrap();
        assert!(matches!(client.exists(1).await, Err(RemoteError::Network(_))));
    }

    #[test]
    fn url_strips_trailing_slash() {
        let client = HttpExistenceClient::with_client(
            reqwest::Client::new(),
            "http://geo:8081/",
            "addresses",
        );
        assert_eq!(client.url_for(7), "http://geo:8081/api/addresses/7");
    }

    #[tokio::test]
    async fn static_existence_records_calls() {
        let check = mock::StaticExistence::new("statuses", [1]);
        assert_eq!(check.exists(1).await, Ok(true));
        assert_eq!(check.exists(9).await, Ok(false));
        assert_eq!(check.calls(), vec![("statuses", 1), ("statuses", 9)]);

        let down = mock::StaticExistence::unreachable("users");
        assert!(down.exists(1).await.is_err());
    }
}
