//! REST API endpoints.
//!
//! Axum-based HTTP API over the results table: health probe, per-swimmer
//! summary, and opponent-pool ranking. Routes are mounted under `/api`
//! and, for front-end path compatibility, `/api/api`.

use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::store::StoreError;

pub mod routes;
pub mod state;

use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for ApiError {
    /// Store failures are retryable by the client once the connection is
    /// back, so they must surface as 503 and never read as not-found.
    fn from(err: StoreError) -> Self {
        ApiError::Unavailable(err.to_string())
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Unavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Pull a required query parameter or fail with 400. Missing parameters
/// are a client error, never silently defaulted.
pub fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, ApiError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::BadRequest(format!("missing required parameter: {name}")))
}

/// Offset cursor over an in-memory listing.
#[derive(Debug, Clone, Copy)]
pub struct CursorPage {
    pub limit: usize,
    pub offset: usize,
}

impl CursorPage {
    pub fn new(limit: Option<u32>, cursor: Option<u32>) -> Self {
        Self {
            limit: limit.unwrap_or(200).clamp(1, 2000) as usize,
            offset: cursor.unwrap_or(0) as usize,
        }
    }

    /// The page slice plus the next cursor when more rows remain.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> (&'a [T], Option<u32>) {
        let start = self.offset.min(items.len());
        let end = (self.offset + self.limit).min(items.len());
        let next = (end < items.len()).then_some(end as u32);
        (&items[start..end], next)
    }
}

/// Build the application router.
pub fn build_router(state: AppState, cors_origins: &str) -> Router {
    let api = Router::new()
        .route("/health", get(routes::health::health))
        .route("/summary", get(routes::summary::summary))
        .route("/rank", get(routes::rank::rank))
        .with_state(state);

    Router::new()
        .nest("/api", api.clone())
        .nest("/api/api", api)
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.trim() == "*" {
        layer.allow_origin(Any)
    } else {
        let list: Vec<HeaderValue> = origins
            .split(',')
            .filter_map(|o| o.trim().parse().ok())
            .collect();
        layer.allow_origin(AllowOrigin::list(list))
    }
}
