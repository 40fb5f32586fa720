use serde::{Deserialize, Serialize};

use super::{OrderWithLines, OrderWithLinesResponse};

/// Staff member associated with the orders they processed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cashier {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

/// Request model for creating a new cashier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCashierRequest {
    pub first_name: String,
    pub last_name: String,
}

/// Cashier with orders, lines and products eagerly loaded
#[derive(Debug, Clone, PartialEq)]
pub struct CashierWithOrders {
    pub cashier: Cashier,
    pub orders: Vec<OrderWithLines>,
}

/// Cashier detail: embedded orders use the lines-with-products shape, which
/// never re-embeds the cashier. `orders` projects as null when the cashier
/// has none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashierDetailResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub orders: Option<Vec<OrderWithLinesResponse>>,
}

impl CashierDetailResponse {
    pub fn from_graph(graph: CashierWithOrders) -> Self {
        let orders: Vec<OrderWithLinesResponse> = graph
            .orders
            .into_iter()
            .map(OrderWithLinesResponse::from_graph)
            .collect();

        Self {
            id: graph.cashier.id,
            first_name: graph.cashier.first_name,
            last_name: graph.cashier.last_name,
            orders: if orders.is_empty() {
                None
            } else {
                Some(orders)
            },
        }
    }
}
