use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Json, Response},
};
use tracing::{error, info, instrument};

use crate::models::{Cashier, CashierDetailResponse, CreateCashierRequest};

use super::{service_error_response, AppState};

/// Create a new cashier
#[instrument(name = "create_cashier", skip(state, request), fields(
    first_name = %request.first_name,
    last_name = %request.last_name,
))]
pub async fn create_cashier(
    State(state): State<AppState>,
    Json(request): Json<CreateCashierRequest>,
) -> Result<(StatusCode, Json<Cashier>), Response> {
    info!("Creating new cashier");

    match state.cashier_service.create_cashier(request).await {
        Ok(cashier) => {
            info!("Successfully created cashier with ID: {}", cashier.id);
            Ok((StatusCode::CREATED, Json(cashier)))
        }
        Err(err) => {
            error!("Failed to create cashier: {}", err);
            Err(service_error_response(err))
        }
    }
}

/// Get a cashier with its orders, lines and products
#[instrument(name = "get_cashier", skip(state), fields(cashier_id = %id))]
pub async fn get_cashier(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CashierDetailResponse>, Response> {
    info!("Getting cashier with ID: {}", id);

    match state.cashier_service.get_cashier_with_orders(id).await {
        Ok(graph) => Ok(Json(CashierDetailResponse::from_graph(graph))),
        Err(err) => {
            error!("Failed to get cashier {}: {}", id, err);
            Err(service_error_response(err))
        }
    }
}
