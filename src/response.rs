//! Uniform response envelope and pagination shapes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Every successful endpoint answers `{status, message, data}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self { status: 200, message: message.into(), data }
    }

    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self { status: 201, message: message.into(), data }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let code = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
        (code, Json(self)).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
}

impl ListParams {
    /// Clamped (page, per_page, offset) with the defaults used across all
    /// list endpoints.
    pub fn paging(&self) -> (u32, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = i64::from(self.per_page.unwrap_or(20).min(100));
        (page, per_page, (i64::from(page) - 1) * per_page)
    }
}

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
}
