use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::models::{
    CreateProductRequest, Product, ProductFilters, ProductWithCategory, RepositoryError,
    ServiceError, ServiceResult, UpdateProductRequest,
};
use crate::repositories::ProductRepository;

const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Service for managing the product catalog
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    /// List products with their categories, optionally filtered
    #[instrument(skip(self), fields(filters = ?filters))]
    pub async fn list_products(
        &self,
        filters: ProductFilters,
    ) -> ServiceResult<Vec<ProductWithCategory>> {
        let products = self.repository.find_all(filters).await?;
        info!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Create a new product
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_product(&self, request: CreateProductRequest) -> ServiceResult<Product> {
        validate_name(&request.name)?;
        validate_price(request.price)?;

        let product = self.repository.insert(&request).await?;

        info!(product_id = product.id, "Product created successfully");
        Ok(product)
    }

    /// Overwrite an existing product's fields
    #[instrument(skip(self, request), fields(product_id = id))]
    pub async fn update_product(
        &self,
        id: i64,
        request: UpdateProductRequest,
    ) -> ServiceResult<()> {
        validate_name(&request.name)?;
        validate_price(request.price)?;

        match self.repository.update(id, &request).await {
            Ok(()) => {
                info!("Product updated successfully");
                Ok(())
            }
            Err(RepositoryError::NotFound) => {
                warn!("Product not found");
                Err(ServiceError::ProductNotFound { id })
            }
            Err(err) => Err(err.into()),
        }
    }
}

fn validate_name(name: &str) -> ServiceResult<()> {
    if name.trim().is_empty() {
        return Err(ServiceError::validation("Product name cannot be empty"));
    }
    Ok(())
}

fn validate_price(price: Decimal) -> ServiceResult<()> {
    if price <= Decimal::ZERO {
        return Err(ServiceError::validation(
            "Product price must be greater than zero",
        ));
    }
    if price > MAX_PRICE {
        return Err(ServiceError::validation("Product price is out of range"));
    }
    if price.scale() > 2 {
        return Err(ServiceError::validation(
            "Product price cannot have more than two decimal places",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{test_support::seeded_db, SqliteProductRepository};
    use rust_decimal_macros::dec;

    async fn service() -> ProductService {
        let db = seeded_db().await;
        ProductService::new(Arc::new(SqliteProductRepository::new(db.pool().clone())))
    }

    #[tokio::test]
    async fn test_create_product_rejects_invalid_prices() {
        let service = service().await;

        for price in [dec!(0), dec!(-1.50), dec!(1.999), dec!(2000000)] {
            let result = service
                .create_product(CreateProductRequest {
                    name: "Test".to_string(),
                    price,
                    brand: "Brand".to_string(),
                    category_id: 1,
                })
                .await;

            match result {
                Err(ServiceError::Validation { .. }) => {}
                other => panic!("Expected Validation error for {}, got {:?}", price, other),
            }
        }
    }

    #[tokio::test]
    async fn test_create_and_list_products() {
        let service = service().await;

        let created = service
            .create_product(CreateProductRequest {
                name: "Iced Tea".to_string(),
                price: dec!(1.89),
                brand: "Lipton".to_string(),
                category_id: 1,
            })
            .await
            .unwrap();
        assert_eq!(created.price, dec!(1.89));

        let listed = service
            .list_products(ProductFilters {
                name: Some("iced tea".to_string()),
                category_name: None,
            })
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].category.name, "Beverages");
    }

    #[tokio::test]
    async fn test_update_missing_product_maps_to_typed_not_found() {
        let service = service().await;

        let result = service
            .update_product(
                999,
                UpdateProductRequest {
                    name: "Ghost".to_string(),
                    price: dec!(1.00),
                    brand: "None".to_string(),
                    category_id: 1,
                },
            )
            .await;

        match result {
            Err(ServiceError::ProductNotFound { id: 999 }) => {}
            other => panic!("Expected ProductNotFound, got {:?}", other),
        }
    }
}
