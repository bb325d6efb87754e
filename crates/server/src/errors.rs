use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::envelope::ApiResponse;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

pub const INTERNAL: &str = "Error interno del servidor";

/// Handler failure rendered as the standard envelope.
#[derive(Debug, Error, PartialEq)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadGateway(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(m) | ServiceError::Conflict(m) | ServiceError::Blocked(m) => {
                ApiError::BadRequest(m)
            }
            ServiceError::NotFound(m) => ApiError::NotFound(m),
            ServiceError::Unauthorized(m) => ApiError::Unauthorized(m),
            ServiceError::Unavailable(m) => ApiError::BadGateway(m),
            ServiceError::Db(m) => ApiError::Internal(m),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::Internal(detail) => {
                // storage details stay in the logs
                error!(error = %detail, "request failed");
                INTERNAL.to_string()
            }
            ApiError::BadGateway(msg) => {
                warn!(error = %msg, "sibling service unavailable");
                msg
            }
            ApiError::BadRequest(msg) | ApiError::Unauthorized(msg) | ApiError::NotFound(msg) => {
                msg
            }
        };
        ApiResponse::<()>::failure(status, message).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
    #[error("sibling client error: {0}")]
    Remote(#[from] common::remote::RemoteError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::Validation("v".into()), StatusCode::BAD_REQUEST),
            (ServiceError::Conflict("c".into()), StatusCode::BAD_REQUEST),
            (ServiceError::Blocked("b".into()), StatusCode::BAD_REQUEST),
            (ServiceError::NotFound("n".into()), StatusCode::NOT_FOUND),
            (ServiceError::Unauthorized("u".into()), StatusCode::UNAUTHORIZED),
            (ServiceError::Unavailable("x".into()), StatusCode::BAD_GATEWAY),
            (ServiceError::Db("d".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn internal_detail_is_not_returned() {
        let res = ApiError::Internal("relation \"users\" does not exist".into()).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
