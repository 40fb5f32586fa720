use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::models::{
    cents_to_price, Cashier, Category, CreateOrderLineRequest, LineWithProduct,
    LineWithProductAndCategory, Order, OrderDetailGraph, OrderWithLines, Product,
    RepositoryError, RepositoryResult,
};

/// Trait defining the interface for order data access operations
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Load an order plus its cashier, lines, products and product
    /// categories (four-level eager fetch). `None` when no order matches.
    async fn find_detail(&self, id: i64) -> RepositoryResult<Option<OrderDetailGraph>>;

    /// Load orders without lines. With a date filter, keeps only orders paid
    /// on that calendar date (unpaid orders never match).
    async fn find_all(&self, paid_on_date: Option<NaiveDate>) -> RepositoryResult<Vec<Order>>;

    /// Delete an order row; its lines cascade at the engine level.
    /// `NotFound` when no row matches.
    async fn delete(&self, id: i64) -> RepositoryResult<()>;

    /// Insert an order and its embedded lines, then reload the order with
    /// lines and products. The whole sequence runs in one transaction so a
    /// failure partway through leaves no partial order.
    async fn create(
        &self,
        cashier_id: i64,
        paid_on: DateTime<Utc>,
        lines: &[CreateOrderLineRequest],
    ) -> RepositoryResult<OrderWithLines>;
}

/// SQLite implementation of the OrderRepository trait
pub struct SqliteOrderRepository {
    pool: SqlitePool,
}

impl SqliteOrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct OrderRow {
    id: i64,
    cashier_id: i64,
    paid_on: Option<DateTime<Utc>>,
}

#[derive(FromRow)]
struct OrderCashierRow {
    id: i64,
    cashier_id: i64,
    paid_on: Option<DateTime<Utc>>,
    first_name: String,
    last_name: String,
}

#[derive(FromRow)]
struct LineProductRow {
    quantity: i64,
    product_id: i64,
    name: String,
    price_cents: i64,
    brand: String,
    category_id: i64,
}

#[derive(FromRow)]
struct LineFullRow {
    quantity: i64,
    product_id: i64,
    name: String,
    price_cents: i64,
    brand: String,
    category_id: i64,
    category_name: String,
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

impl LineFullRow {
    fn into_line(self) -> LineWithProductAndCategory {
        LineWithProductAndCategory {
            product: Product {
                id: self.product_id,
                name: self.name,
                price: cents_to_price(self.price_cents),
                brand: self.brand,
                category_id: self.category_id,
            },
            category: Category {
                id: self.category_id,
                name: self.category_name,
            },
            quantity: self.quantity,
        }
    }
}

#[async_trait]
impl OrderRepository for SqliteOrderRepository {
    async fn find_detail(&self, id: i64) -> RepositoryResult<Option<OrderDetailGraph>> {
        let order = sqlx::query_as::<_, OrderCashierRow>(
            r#"
            SELECT o.id, o.cashier_id, o.paid_on, c.first_name, c.last_name
            FROM orders o
            INNER JOIN cashiers c ON c.id = o.cashier_id
            WHERE o.id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(order) = order else {
            return Ok(None);
        };

        let lines = sqlx::query_as::<_, LineFullRow>(
            r#"
            SELECT
                ol.quantity,
                p.id AS product_id,
                p.name,
                p.price_cents,
                p.brand,
                p.category_id,
                c.name AS category_name
            FROM order_lines ol
            INNER JOIN products p ON p.id = ol.product_id
            INNER JOIN categories c ON c.id = p.category_id
            WHERE ol.order_id = ?1
            ORDER BY p.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        debug!(order_id = id, lines = lines.len(), "Loaded order detail graph");

        Ok(Some(OrderDetailGraph {
            order: Order {
                id: order.id,
                cashier_id: order.cashier_id,
                paid_on: order.paid_on,
            },
            cashier: Cashier {
                id: order.cashier_id,
                first_name: order.first_name,
                last_name: order.last_name,
            },
            lines: lines.into_iter().map(LineFullRow::into_line).collect(),
        }))
    }

    async fn find_all(&self, paid_on_date: Option<NaiveDate>) -> RepositoryResult<Vec<Order>> {
        debug!(paid_on_date = ?paid_on_date, "Listing orders");

        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, cashier_id, paid_on
            FROM orders
            WHERE ?1 IS NULL OR (paid_on IS NOT NULL AND date(paid_on) = ?1)
            ORDER BY id
            "#,
        )
        .bind(paid_on_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| Order {
                id: row.id,
                cashier_id: row.cashier_id,
                paid_on: row.paid_on,
            })
            .collect())
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        debug!(order_id = id, "Deleting order");

        let result = sqlx::query("DELETE FROM orders WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn create(
        &self,
        cashier_id: i64,
        paid_on: DateTime<Utc>,
        lines: &[CreateOrderLineRequest],
    ) -> RepositoryResult<OrderWithLines> {
        debug!(cashier_id = cashier_id, lines = lines.len(), "Creating order");

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("INSERT INTO orders (cashier_id, paid_on) VALUES (?1, ?2)")
            .bind(cashier_id)
            .bind(paid_on)
            .execute(&mut *tx)
            .await?;
        let order_id = result.last_insert_rowid();

        for line in lines {
            sqlx::query(
                "INSERT INTO order_lines (order_id, product_id, quantity) VALUES (?1, ?2, ?3)",
            )
            .bind(order_id)
            .bind(line.product_id)
            .bind(line.quantity)
            .execute(&mut *tx)
            .await?;
        }

        // Reload inside the transaction; dropping it on any error above
        // rolls the whole order back.
        let order = sqlx::query_as::<_, OrderRow>(
            "SELECT id, cashier_id, paid_on FROM orders WHERE id = ?1",
        )
        .bind(order_id)
        .fetch_one(&mut *tx)
        .await?;

        let line_rows = sqlx::query_as::<_, LineProductRow>(
            r#"
            SELECT
                ol.quantity,
                p.id AS product_id,
                p.name,
                p.price_cents,
                p.brand,
                p.category_id
            FROM order_lines ol
            INNER JOIN products p ON p.id = ol.product_id
            WHERE ol.order_id = ?1
            ORDER BY p.id
            "#,
        )
        .bind(order_id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(OrderWithLines {
            order: Order {
                id: order.id,
                cashier_id: order.cashier_id,
                paid_on: order.paid_on,
            },
            lines: line_rows.into_iter().map(LineProductRow::into_line).collect(),
        })
    }
}
