//! API Handlers

pub mod bookings;
pub mod categories;
pub mod health;
pub mod items;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::api::dto::ApiResponse;
use crate::application::services::{BookingService, CatalogService, PricingService};
use crate::domain::{DomainError, RepositoryProvider};

/// Shared state for all API routes.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
    pub pricing: Arc<PricingService>,
    pub bookings: Arc<BookingService>,
}

impl AppState {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self {
            catalog: Arc::new(CatalogService::new(Arc::clone(&repos))),
            pricing: Arc::new(PricingService::new(Arc::clone(&repos))),
            bookings: Arc::new(BookingService::new(repos)),
        }
    }
}

/// Maps domain errors onto HTTP status codes and the standard
/// `ApiResponse` error envelope.
pub struct ApiError(DomainError);

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::Validation(_) | DomainError::InvalidState(_) => StatusCode::BAD_REQUEST,
            DomainError::Conflict(_) => StatusCode::CONFLICT,
            DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("request failed: {}", self.0);
        }
        (status, Json(ApiResponse::<()>::error(self.0.to_string()))).into_response()
    }
}

/// Standard handler result: success envelope or mapped domain error.
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(e: DomainError) -> StatusCode {
        ApiError(e).into_response().status()
    }

    #[test]
    fn domain_errors_map_to_expected_statuses() {
        assert_eq!(
            status_of(DomainError::not_found("Item", "x")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(DomainError::Validation("bad".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(DomainError::InvalidState("off".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(DomainError::Conflict("taken".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(DomainError::Storage("io".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
