use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Json, Response},
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{error, info, instrument};

use crate::models::{
    CreateOrderRequest, OrderDetailResponse, OrderSummaryResponse, OrderWithLinesResponse,
};

use super::{service_error_response, AppState};

/// Query parameters for listing orders
#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    #[serde(rename = "paidOnDate")]
    pub paid_on_date: Option<NaiveDate>,
}

/// Get an order with cashier, lines, products and categories
#[instrument(name = "get_order", skip(state), fields(order_id = %id))]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<OrderDetailResponse>, Response> {
    info!("Getting order with ID: {}", id);

    match state.order_service.get_order_detail(id).await {
        Ok(graph) => Ok(Json(OrderDetailResponse::from_graph(graph))),
        Err(err) => {
            error!("Failed to get order {}: {}", id, err);
            Err(service_error_response(err))
        }
    }
}

/// List order summaries, optionally filtered to one paid-on date
#[instrument(name = "list_orders", skip(state), fields(paid_on_date = ?query.paid_on_date))]
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<ListOrdersQuery>,
) -> Result<Json<Vec<OrderSummaryResponse>>, Response> {
    info!("Listing orders");

    match state.order_service.list_orders(query.paid_on_date).await {
        Ok(orders) => {
            info!("Successfully listed {} orders", orders.len());
            let summaries: Vec<OrderSummaryResponse> = orders
                .into_iter()
                .map(OrderSummaryResponse::from_entity)
                .collect();
            Ok(Json(summaries))
        }
        Err(err) => {
            error!("Failed to list orders: {}", err);
            Err(service_error_response(err))
        }
    }
}

/// Delete an order and, through the cascade, its lines
#[instrument(name = "delete_order", skip(state), fields(order_id = %id))]
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, Response> {
    info!("Deleting order with ID: {}", id);

    match state.order_service.delete_order(id).await {
        Ok(()) => {
            info!("Successfully deleted order: {}", id);
            Ok(StatusCode::NO_CONTENT)
        }
        Err(err) => {
            error!("Failed to delete order {}: {}", id, err);
            Err(service_error_response(err))
        }
    }
}

/// Create an order with its embedded lines
#[instrument(name = "create_order", skip(state, request), fields(
    cashier_id = %request.cashier_id,
    lines = request.lines.len(),
))]
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderWithLinesResponse>), Response> {
    info!("Creating new order");

    match state.order_service.create_order(request).await {
        Ok(created) => {
            info!("Successfully created order with ID: {}", created.order.id);
            Ok((
                StatusCode::CREATED,
                Json(OrderWithLinesResponse::from_graph(created)),
            ))
        }
        Err(err) => {
            error!("Failed to create order: {}", err);
            Err(service_error_response(err))
        }
    }
}
