use async_trait::async_trait;
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::models::{
    cents_to_price, price_to_cents, Category, CreateProductRequest, Product, ProductFilters,
    ProductWithCategory, RepositoryError, RepositoryResult, UpdateProductRequest,
};

/// Trait defining the interface for product data access operations
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Load products joined with their category. Name and category filters
    /// are case-insensitive equality matches, ANDed when both are given.
    async fn find_all(&self, filters: ProductFilters) -> RepositoryResult<Vec<ProductWithCategory>>;

    /// Insert a product row and return it with its assigned identity.
    async fn insert(&self, request: &CreateProductRequest) -> RepositoryResult<Product>;

    /// Overwrite name, price, brand and category reference of an existing
    /// product. `NotFound` when no row matches.
    async fn update(&self, id: i64, request: &UpdateProductRequest) -> RepositoryResult<()>;
}

/// SQLite implementation of the ProductRepository trait
pub struct SqliteProductRepository {
    pool: SqlitePool,
}

impl SqliteProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ProductCategoryRow {
    id: i64,
    name: String,
    price_cents: i64,
    brand: String,
    category_id: i64,
    category_name: String,
}

impl ProductCategoryRow {
    fn into_graph(self) -> ProductWithCategory {
        ProductWithCategory {
            product: Product {
                id: self.id,
                name: self.name,
                price: cents_to_price(self.price_cents),
                brand: self.brand,
                category_id: self.category_id,
            },
            category: Category {
                id: self.category_id,
                name: self.category_name,
            },
        }
    }
}

fn cents_or_constraint(request_price: rust_decimal::Decimal) -> RepositoryResult<i64> {
    price_to_cents(request_price).ok_or_else(|| RepositoryError::ConstraintViolation {
        message: "price outside the storable range".to_string(),
    })
}

#[async_trait]
impl ProductRepository for SqliteProductRepository {
    async fn find_all(&self, filters: ProductFilters) -> RepositoryResult<Vec<ProductWithCategory>> {
        debug!(filters = ?filters, "Listing products");

        let rows = sqlx::query_as::<_, ProductCategoryRow>(
            r#"
            SELECT
                p.id,
                p.name,
                p.price_cents,
                p.brand,
                p.category_id,
                c.name AS category_name
            FROM products p
            INNER JOIN categories c ON c.id = p.category_id
            WHERE (?1 IS NULL OR LOWER(p.name) = LOWER(?1))
              AND (?2 IS NULL OR LOWER(c.name) = LOWER(?2))
            ORDER BY p.id
            "#,
        )
        .bind(filters.name)
        .bind(filters.category_name)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ProductCategoryRow::into_graph).collect())
    }

    async fn insert(&self, request: &CreateProductRequest) -> RepositoryResult<Product> {
        debug!(name = %request.name, "Inserting product");

        let price_cents = cents_or_constraint(request.price)?;

        let result = sqlx::query(
            "INSERT INTO products (name, price_cents, brand, category_id) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&request.name)
        .bind(price_cents)
        .bind(&request.brand)
        .bind(request.category_id)
        .execute(&self.pool)
        .await?;

        Ok(Product {
            id: result.last_insert_rowid(),
            name: request.name.clone(),
            price: cents_to_price(price_cents),
            brand: request.brand.clone(),
            category_id: request.category_id,
        })
    }

    async fn update(&self, id: i64, request: &UpdateProductRequest) -> RepositoryResult<()> {
        debug!(id = id, "Updating product");

        let price_cents = cents_or_constraint(request.price)?;

        let result = sqlx::query(
            "UPDATE products SET name = ?2, price_cents = ?3, brand = ?4, category_id = ?5 \
             WHERE id = ?1",
        )
        .bind(id)
        .bind(&request.name)
        .bind(price_cents)
        .bind(&request.brand)
        .bind(request.category_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::test_support::seeded_db;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_find_all_without_filters() {
        let db = seeded_db().await;
        let repo = SqliteProductRepository::new(db.pool().clone());

        let products = repo.find_all(ProductFilters::default()).await.unwrap();
        assert_eq!(products.len(), 5);
        assert_eq!(products[0].product.name, "Cola");
        assert_eq!(products[0].category.name, "Beverages");
    }

    #[tokio::test]
    async fn test_name_filter_is_case_insensitive() {
        let db = seeded_db().await;
        let repo = SqliteProductRepository::new(db.pool().clone());

        let upper = repo
            .find_all(ProductFilters {
                name: Some("Cola".to_string()),
                category_name: None,
            })
            .await
            .unwrap();
        let lower = repo
            .find_all(ProductFilters {
                name: Some("cola".to_string()),
                category_name: None,
            })
            .await
            .unwrap();

        assert_eq!(upper.len(), 1);
        assert_eq!(upper, lower);
    }

    #[tokio::test]
    async fn test_filters_are_anded() {
        let db = seeded_db().await;
        let repo = SqliteProductRepository::new(db.pool().clone());

        let beverages = repo
            .find_all(ProductFilters {
                name: None,
                category_name: Some("beverages".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(beverages.len(), 2);

        let both = repo
            .find_all(ProductFilters {
                name: Some("COLA".to_string()),
                category_name: Some("BEVERAGES".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].product.name, "Cola");

        let mismatch = repo
            .find_all(ProductFilters {
                name: Some("Cola".to_string()),
                category_name: Some("Snacks".to_string()),
            })
            .await
            .unwrap();
        assert!(mismatch.is_empty());
    }

    #[tokio::test]
    async fn test_insert_and_update() {
        let db = seeded_db().await;
        let repo = SqliteProductRepository::new(db.pool().clone());

        let created = repo
            .insert(&CreateProductRequest {
                name: "Sparkling Water".to_string(),
                price: dec!(0.99),
                brand: "Topo Chico".to_string(),
                category_id: 1,
            })
            .await
            .unwrap();
        assert_eq!(created.id, 6);
        assert_eq!(created.price, dec!(0.99));

        repo.update(
            created.id,
            &UpdateProductRequest {
                name: "Sparkling Water 500ml".to_string(),
                price: dec!(1.19),
                brand: "Topo Chico".to_string(),
                category_id: 1,
            },
        )
        .await
        .unwrap();

        let reloaded = repo
            .find_all(ProductFilters {
                name: Some("sparkling water 500ml".to_string()),
                category_name: None,
            })
            .await
            .unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded[0].product.price, dec!(1.19));
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let db = seeded_db().await;
        let repo = SqliteProductRepository::new(db.pool().clone());

        let result = repo
            .update(
                999,
                &UpdateProductRequest {
                    name: "Ghost".to_string(),
                    price: dec!(1.00),
                    brand: "None".to_string(),
                    category_id: 1,
                },
            )
            .await;

        match result {
            Err(RepositoryError::NotFound) => {}
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }
}
