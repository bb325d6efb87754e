//! Uniform response envelope shared by every service.
//!
//! All endpoints answer with `{success, statusCode, message, data, count}`;
//! `count` is only filled for collection responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub status_code: u16,
    pub message: String,
    pub data: Option<T>,
    pub count: Option<usize>,
}

impl<T> ApiResponse<T> {
    fn with_status(
        status: StatusCode,
        message: impl Into<String>,
        data: Option<T>,
        count: Option<usize>,
    ) -> Self {
        Self {
            success: status.is_success(),
            status_code: status.as_u16(),
            message: message.into(),
            data,
            count,
        }
    }

    /// 200 with a single item.
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self::with_status(StatusCode::OK, message, Some(data), None)
    }

    /// 201 with the created item.
    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self::with_status(StatusCode::CREATED, message, Some(data), None)
    }

    /// Error envelope: `success = false`, no data.
    pub fn failure(status: StatusCode, message: impl Into<String>) -> Self {
        Self::with_status(status, message, None, None)
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Collection response: 204 when empty, otherwise 200 with `count`.
    pub fn list(
        items: Vec<T>,
        message: impl Into<String>,
        empty_message: impl Into<String>,
    ) -> Self {
        if items.is_empty() {
            return Self::with_status(StatusCode::NO_CONTENT, empty_message, None, Some(0));
        }
        let count = items.len();
        Self::with_status(StatusCode::OK, message, Some(items), Some(count))
    }
}

impl ApiResponse<()> {
    /// 200 without payload, used for deletions and seeding.
    pub fn done(message: impl Into<String>) -> Self {
        Self::with_status(StatusCode::OK, message, None, None)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_status_code() {
        let body = serde_json::to_value(ApiResponse::ok("x", "bien")).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["statusCode"], 200);
        assert_eq!(body["data"], "x");
        assert!(body["count"].is_null());
    }

    #[test]
    fn empty_list_is_no_content() {
        let res = ApiResponse::<Vec<i32>>::list(vec![], "lista", "vacía");
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        assert_eq!(res.message, "vacía");
        assert!(res.data.is_none());
    }

    #[test]
    fn list_counts_items() {
        let res = ApiResponse::list(vec![1, 2, 3], "lista", "vacía");
        assert_eq!(res.status_code, 200);
        assert_eq!(res.count, Some(3));
    }

    #[test]
    fn failure_is_not_success() {
        let res = ApiResponse::<()>::failure(StatusCode::BAD_REQUEST, "mal");
        assert!(!res.success);
        assert_eq!(res.status_code, 400);
    }
}
