use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::models::{
    cents_to_price, Cashier, CashierWithOrders, LineWithProduct, Order, OrderWithLines, Product,
    RepositoryResult,
};

/// Trait defining the interface for cashier data access operations
#[async_trait]
pub trait CashierRepository: Send + Sync {
    /// Insert a cashier row and return it with its assigned identity.
    async fn insert(&self, first_name: &str, last_name: &str) -> RepositoryResult<Cashier>;

    /// Load a cashier plus its orders, each order's lines and each line's
    /// product (three-level eager fetch). `None` when no cashier matches.
    async fn find_with_orders(&self, id: i64) -> RepositoryResult<Option<CashierWithOrders>>;
}

/// SQLite implementation of the CashierRepository trait
pub struct SqliteCashierRepository {
    pool: SqlitePool,
}

impl SqliteCashierRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct CashierRow {
    id: i64,
    first_name: String,
    last_name: String,
}

#[derive(FromRow)]
struct OrderRow {
    id: i64,
    cashier_id: i64,
    paid_on: Option<DateTime<Utc>>,
}

#[derive(FromRow)]
struct LineProductRow {
    order_id: i64,
    quantity: i64,
    product_id: i64,
    name: String,
    price_cents: i64,
    brand: String,
    category_id: i64,
}

impl LineProductRow {
    fn into_line(self) -> LineWithProduct {
        LineWithProduct {
            product: Product {
                id: self.product_id,
                name: self.name,
                price: cents_to_price(self.price_cents),
                brand: self.brand,
                category_id: self.category_id,
            },
            quantity: self.quantity,
        }
    }
}

#[async_trait]
impl CashierRepository for SqliteCashierRepository {
    async fn insert(&self, first_name: &str, last_name: &str) -> RepositoryResult<Cashier> {
        debug!(first_name = %first_name, last_name = %last_name, "Inserting cashier");

        let result = sqlx::query("INSERT INTO cashiers (first_name, last_name) VALUES (?1, ?2)")
            .bind(first_name)
            .bind(last_name)
            .execute(&self.pool)
            .await?;

        Ok(Cashier {
            id: result.last_insert_rowid(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        })
    }

    async fn find_with_orders(&self, id: i64) -> RepositoryResult<Option<CashierWithOrders>> {
        let cashier = sqlx::query_as::<_, CashierRow>(
            "SELECT id, first_name, last_name FROM cashiers WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(cashier) = cashier else {
            return Ok(None);
        };

        let order_rows = sqlx::query_as::<_, OrderRow>(
            "SELECT id, cashier_id, paid_on FROM orders WHERE cashier_id = ?1 ORDER BY id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        // One pass over all of this cashier's lines, grouped per order below.
        let line_rows = sqlx::query_as::<_, LineProductRow>(
            r#"
            SELECT
                ol.order_id,
                ol.quantity,
                p.id AS product_id,
                p.name,
                p.price_cents,
                p.brand,
                p.category_id
            FROM order_lines ol
            INNER JOIN products p ON p.id = ol.product_id
            WHERE ol.order_id IN (SELECT id FROM orders WHERE cashier_id = ?1)
            ORDER BY ol.order_id, p.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let mut orders: Vec<OrderWithLines> = order_rows
            .into_iter()
            .map(|row| OrderWithLines {
                order: Order {
                    id: row.id,
                    cashier_id: row.cashier_id,
                    paid_on: row.paid_on,
                },
                lines: Vec::new(),
            })
            .collect();

        for row in line_rows {
            if let Some(order) = orders.iter_mut().find(|o| o.order.id == row.order_id) {
                order.lines.push(row.into_line());
            }
        }

        debug!(cashier_id = id, orders = orders.len(), "Loaded cashier graph");

        Ok(Some(CashierWithOrders {
            cashier: Cashier {
                id: cashier.id,
                first_name: cashier.first_name,
                last_name: cashier.last_name,
            },
            orders,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::test_support::seeded_db;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_insert_assigns_identity() {
        let db = seeded_db().await;
        let repo = SqliteCashierRepository::new(db.pool().clone());

        let cashier = repo.insert("Frank", "Lee").await.unwrap();
        assert_eq!(cashier.id, 6);
        assert_eq!(cashier.first_name, "Frank");
    }

    #[tokio::test]
    async fn test_find_with_orders_loads_three_levels() {
        let db = seeded_db().await;
        let repo = SqliteCashierRepository::new(db.pool().clone());

        let graph = repo.find_with_orders(1).await.unwrap().unwrap();
        assert_eq!(graph.cashier.first_name, "Alice");
        // Seeded orders 1 and 4 belong to cashier 1.
        assert_eq!(graph.orders.len(), 2);

        let first = &graph.orders[0];
        assert_eq!(first.order.id, 1);
        assert_eq!(first.lines.len(), 2);
        assert_eq!(first.lines[0].product.name, "Cola");
        assert_eq!(first.lines[0].product.price, dec!(1.49));
        assert_eq!(first.lines[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_find_with_orders_for_cashier_without_orders() {
        let db = seeded_db().await;
        let repo = SqliteCashierRepository::new(db.pool().clone());

        let graph = repo.find_with_orders(5).await.unwrap().unwrap();
        assert_eq!(graph.cashier.first_name, "Evelyn");
        assert!(graph.orders.is_empty());
    }

    #[tokio::test]
    async fn test_find_with_orders_missing_cashier() {
        let db = seeded_db().await;
        let repo = SqliteCashierRepository::new(db.pool().clone());

        assert!(repo.find_with_orders(999).await.unwrap().is_none());
    }
}
