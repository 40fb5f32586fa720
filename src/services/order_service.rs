use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::models::{
    CreateOrderRequest, Order, OrderDetailGraph, OrderWithLines, RepositoryError, ServiceError,
    ServiceResult,
};
use crate::repositories::OrderRepository;

/// Service for managing orders
pub struct OrderService {
    repository: Arc<dyn OrderRepository>,
}

impl OrderService {
    pub fn new(repository: Arc<dyn OrderRepository>) -> Self {
        Self { repository }
    }

    /// Load an order with cashier, lines, products and categories
    #[instrument(skip(self), fields(order_id = id))]
    pub async fn get_order_detail(&self, id: i64) -> ServiceResult<OrderDetailGraph> {
        match self.repository.find_detail(id).await? {
            Some(graph) => Ok(graph),
            None => {
                warn!("Order not found");
                Err(ServiceError::OrderNotFound { id })
            }
        }
    }

    /// List orders, optionally restricted to a paid-on calendar date
    #[instrument(skip(self))]
    pub async fn list_orders(&self, paid_on_date: Option<NaiveDate>) -> ServiceResult<Vec<Order>> {
        let orders = self.repository.find_all(paid_on_date).await?;
        info!(count = orders.len(), "Listed orders");
        Ok(orders)
    }

    /// Delete an order; its lines go with it
    #[instrument(skip(self), fields(order_id = id))]
    pub async fn delete_order(&self, id: i64) -> ServiceResult<()> {
        match self.repository.delete(id).await {
            Ok(()) => {
                info!("Order deleted successfully");
                Ok(())
            }
            Err(RepositoryError::NotFound) => {
                warn!("Order not found");
                Err(ServiceError::OrderNotFound { id })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Create an order with its embedded lines.
    ///
    /// The paid-on timestamp is stamped with the current time: every order
    /// taken through the API is recorded as paid at creation. Unpaid orders
    /// exist only in seeded data.
    #[instrument(skip(self, request), fields(cashier_id = request.cashier_id, lines = request.lines.len()))]
    pub async fn create_order(&self, request: CreateOrderRequest) -> ServiceResult<OrderWithLines> {
        for line in &request.lines {
            if line.quantity <= 0 {
                return Err(ServiceError::validation(
                    "Order line quantity must be positive",
                ));
            }
        }

        let paid_on = Utc::now();
        let created = self
            .repository
            .create(request.cashier_id, paid_on, &request.lines)
            .await?;

        info!(order_id = created.order.id, "Order created successfully");
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateOrderLineRequest;
    use crate::repositories::{test_support::seeded_db, SqliteOrderRepository};

    async fn service() -> OrderService {
        let db = seeded_db().await;
        OrderService::new(Arc::new(SqliteOrderRepository::new(db.pool().clone())))
    }

    #[tokio::test]
    async fn test_create_order_rejects_non_positive_quantity() {
        let service = service().await;

        let result = service
            .create_order(CreateOrderRequest {
                cashier_id: 1,
                lines: vec![CreateOrderLineRequest {
                    product_id: 1,
                    quantity: 0,
                }],
            })
            .await;

        match result {
            Err(ServiceError::Validation { .. }) => {}
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_order_stamps_paid_on() {
        let service = service().await;

        let created = service
            .create_order(CreateOrderRequest {
                cashier_id: 1,
                lines: vec![CreateOrderLineRequest {
                    product_id: 2,
                    quantity: 3,
                }],
            })
            .await
            .unwrap();

        assert!(created.order.paid_on.is_some());
        assert_eq!(created.lines.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_order_maps_to_typed_not_found() {
        let service = service().await;

        match service.get_order_detail(999).await {
            Err(ServiceError::OrderNotFound { id: 999 }) => {}
            other => panic!("Expected OrderNotFound, got {:?}", other),
        }

        match service.delete_order(999).await {
            Err(ServiceError::OrderNotFound { id: 999 }) => {}
            other => panic!("Expected OrderNotFound, got {:?}", other),
        }
    }
}
