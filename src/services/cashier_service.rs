use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::models::{
    Cashier, CashierWithOrders, CreateCashierRequest, ServiceError, ServiceResult,
};
use crate::repositories::CashierRepository;

/// Service for managing cashiers
pub struct CashierService {
    repository: Arc<dyn CashierRepository>,
}

impl CashierService {
    pub fn new(repository: Arc<dyn CashierRepository>) -> Self {
        Self { repository }
    }

    /// Create a new cashier
    #[instrument(skip(self, request), fields(first_name = %request.first_name))]
    pub async fn create_cashier(&self, request: CreateCashierRequest) -> ServiceResult<Cashier> {
        if request.first_name.trim().is_empty() {
            return Err(ServiceError::validation("First name cannot be empty"));
        }
        if request.last_name.trim().is_empty() {
            return Err(ServiceError::validation("Last name cannot be empty"));
        }

        let cashier = self
            .repository
            .insert(&request.first_name, &request.last_name)
            .await?;

        info!(cashier_id = cashier.id, "Cashier created successfully");
        Ok(cashier)
    }

    /// Load a cashier with its orders, lines and products
    #[instrument(skip(self), fields(cashier_id = id))]
    pub async fn get_cashier_with_orders(&self, id: i64) -> ServiceResult<CashierWithOrders> {
        match self.repository.find_with_orders(id).await? {
            Some(graph) => Ok(graph),
            None => {
                warn!("Cashier not found");
                Err(ServiceError::CashierNotFound { id })
            }
        }
    }
}
