pub mod cashiers;
pub mod health;
pub mod metrics;
pub mod orders;
pub mod products;

pub use cashiers::*;
pub use health::*;
pub use metrics::*;
pub use orders::*;
pub use products::*;

use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Json, Response},
    routing::{get, post, put},
    Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::models::{RepositoryError, ServiceError};
use crate::observability::{observability_middleware, Metrics};
use crate::services::{CashierService, OrderService, ProductService};

/// Shared application state containing all services
#[derive(Clone)]
pub struct AppState {
    pub cashier_service: Arc<CashierService>,
    pub product_service: Arc<ProductService>,
    pub order_service: Arc<OrderService>,
}

/// Create the application router with all endpoints and middleware
pub fn create_router(state: AppState, metrics: Arc<Metrics>) -> Router {
    let metrics_for_middleware = metrics.clone();

    Router::new()
        // Health and metrics endpoints (with metrics state)
        .route("/health/status", get(health_check))
        .route("/metrics", get(metrics_handler))
        .with_state(metrics)
        // API endpoints (with service state)
        .route("/cashiers", post(create_cashier))
        .route("/cashiers/:id", get(get_cashier))
        .route("/products", get(list_products).post(create_product))
        .route("/products/:id", put(update_product))
        .route("/orders", get(list_orders).post(create_order))
        .route("/orders/:id", get(get_order).delete(delete_order))
        .with_state(state)
        // Middleware layers (outer to inner)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(move |req, next| {
            observability_middleware(metrics_for_middleware.clone(), req, next)
        }))
}

/// Convert a ServiceError to an HTTP response.
///
/// Not-found answers carry no body; validation failures carry the message;
/// everything else is an opaque server error.
pub(crate) fn service_error_response(err: ServiceError) -> Response {
    match err {
        ServiceError::CashierNotFound { .. }
        | ServiceError::ProductNotFound { .. }
        | ServiceError::OrderNotFound { .. } => StatusCode::NOT_FOUND.into_response(),

        ServiceError::Validation { message } => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": message })),
        )
            .into_response(),

        ServiceError::Repository { source } => {
            let status = match source {
                RepositoryError::NotFound => StatusCode::NOT_FOUND,
                RepositoryError::ConnectionFailed(_) | RepositoryError::PoolExhausted => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };

            if status == StatusCode::NOT_FOUND {
                status.into_response()
            } else {
                (status, Json(json!({ "error": "Internal server error" }))).into_response()
            }
        }
    }
}
