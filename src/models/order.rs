use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Cashier, Category, Product, ProductResponse, ProductWithCategory};

/// Core order model. A null `paid_on` marks an unpaid order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub cashier_id: i64,
    pub paid_on: Option<DateTime<Utc>>,
}

/// Request model for creating a new order with its embedded lines. Each
/// line names a product at most once; the (order, product) pair is the
/// line's identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub cashier_id: i64,
    pub lines: Vec<CreateOrderLineRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderLineRequest {
    pub product_id: i64,
    pub quantity: i64,
}

/// Line with its product eagerly loaded (no category)
#[derive(Debug, Clone, PartialEq)]
pub struct LineWithProduct {
    pub product: Product,
    pub quantity: i64,
}

/// Line with product and category eagerly loaded
#[derive(Debug, Clone, PartialEq)]
pub struct LineWithProductAndCategory {
    pub product: Product,
    pub category: Category,
    pub quantity: i64,
}

/// Order with its lines and their products, as loaded after creation and
/// inside cashier detail
#[derive(Debug, Clone, PartialEq)]
pub struct OrderWithLines {
    pub order: Order,
    pub lines: Vec<LineWithProduct>,
}

/// Fully loaded order graph: cashier, lines, products and their categories
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetailGraph {
    pub order: Order,
    pub cashier: Cashier,
    pub lines: Vec<LineWithProductAndCategory>,
}

/// Line item inside order responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineResponse {
    pub product_id: i64,
    pub quantity: i64,
    pub product: ProductResponse,
}

/// Shape returned by order creation and embedded in cashier detail: lines
/// with products, no categories, no cashier nesting. `lines` projects as
/// null when the order has none, and `total` is computed from the projected
/// line data itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderWithLinesResponse {
    pub id: i64,
    pub cashier_id: i64,
    pub paid_on: Option<DateTime<Utc>>,
    pub lines: Option<Vec<OrderLineResponse>>,
    pub total: Decimal,
}

impl OrderWithLinesResponse {
    pub fn from_graph(graph: OrderWithLines) -> Self {
        let lines: Vec<OrderLineResponse> = graph
            .lines
            .into_iter()
            .map(|line| OrderLineResponse {
                product_id: line.product.id,
                quantity: line.quantity,
                product: ProductResponse::from_entity(line.product),
            })
            .collect();
        let total = order_total(&lines);

        Self {
            id: graph.order.id,
            cashier_id: graph.order.cashier_id,
            paid_on: graph.order.paid_on,
            lines: none_when_empty(lines),
            total,
        }
    }
}

/// Full order detail: cashier summary (without its order list) plus lines
/// whose products carry their category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetailResponse {
    pub id: i64,
    pub cashier_id: i64,
    pub cashier: Cashier,
    pub paid_on: Option<DateTime<Utc>>,
    pub lines: Option<Vec<OrderLineResponse>>,
    pub total: Decimal,
}

impl OrderDetailResponse {
    pub fn from_graph(graph: OrderDetailGraph) -> Self {
        let lines: Vec<OrderLineResponse> = graph
            .lines
            .into_iter()
            .map(|line| OrderLineResponse {
                product_id: line.product.id,
                quantity: line.quantity,
                product: ProductResponse::from_graph(ProductWithCategory {
                    product: line.product,
                    category: line.category,
                }),
            })
            .collect();
        let total = order_total(&lines);

        Self {
            id: graph.order.id,
            cashier_id: graph.order.cashier_id,
            cashier: graph.cashier,
            paid_on: graph.order.paid_on,
            lines: none_when_empty(lines),
            total,
        }
    }
}

/// Summary shape for order listings: no lines, no cashier, no total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummaryResponse {
    pub id: i64,
    pub cashier_id: i64,
    pub paid_on: Option<DateTime<Utc>>,
}

impl OrderSummaryResponse {
    pub fn from_entity(order: Order) -> Self {
        Self {
            id: order.id,
            cashier_id: order.cashier_id,
            paid_on: order.paid_on,
        }
    }
}

/// Sum of price × quantity over the projected lines. Zero for no lines.
fn order_total(lines: &[OrderLineResponse]) -> Decimal {
    lines
        .iter()
        .map(|line| line.product.price * Decimal::from(line.quantity))
        .sum()
}

/// Collections that were loaded empty project as null, never as `[]`.
fn none_when_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}
