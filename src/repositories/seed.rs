use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;
use tracing::info;

use crate::models::RepositoryResult;

/// Applies the demo dataset used by local and test environments: five
/// cashiers, four categories, five products, five orders (one unpaid) and
/// ten order lines.
///
/// Idempotent: rows carry fixed ids and are inserted with INSERT OR IGNORE,
/// so repeated bootstraps leave existing data untouched.
pub async fn apply(pool: &SqlitePool) -> RepositoryResult<()> {
    let now = Utc::now();
    let mut tx = pool.begin().await?;

    let cashiers: [(i64, &str, &str); 5] = [
        (1, "Alice", "Smith"),
        (2, "Bob", "Johnson"),
        (3, "Carlos", "Martinez"),
        (4, "Diana", "Brown"),
        (5, "Evelyn", "Garcia"),
    ];
    for (id, first_name, last_name) in cashiers {
        sqlx::query("INSERT OR IGNORE INTO cashiers (id, first_name, last_name) VALUES (?1, ?2, ?3)")
            .bind(id)
            .bind(first_name)
            .bind(last_name)
            .execute(&mut *tx)
            .await?;
    }

    let categories: [(i64, &str); 4] = [
        (1, "Beverages"),
        (2, "Snacks"),
        (3, "Household Supplies"),
        (4, "Personal Care"),
    ];
    for (id, name) in categories {
        sqlx::query("INSERT OR IGNORE INTO categories (id, name) VALUES (?1, ?2)")
            .bind(id)
            .bind(name)
            .execute(&mut *tx)
            .await?;
    }

    let products: [(i64, &str, i64, &str, i64); 5] = [
        (1, "Cola", 149, "Coca-Cola", 1),
        (2, "Chips", 299, "Lay's", 2),
        (3, "Dish Soap", 379, "Dawn", 3),
        (4, "Toothpaste", 429, "Colgate", 4),
        (5, "Orange Juice", 299, "Tropicana", 1),
    ];
    for (id, name, price_cents, brand, category_id) in products {
        sqlx::query(
            "INSERT OR IGNORE INTO products (id, name, price_cents, brand, category_id) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(id)
        .bind(name)
        .bind(price_cents)
        .bind(brand)
        .bind(category_id)
        .execute(&mut *tx)
        .await?;
    }

    // Order 3 is deliberately unpaid.
    let orders: [(i64, i64, Option<DateTime<Utc>>); 5] = [
        (1, 1, Some(now - Duration::days(2))),
        (2, 2, Some(now - Duration::days(1))),
        (3, 3, None),
        (4, 1, Some(now - Duration::days(7))),
        (5, 4, Some(now - Duration::days(3))),
    ];
    for (id, cashier_id, paid_on) in orders {
        sqlx::query("INSERT OR IGNORE INTO orders (id, cashier_id, paid_on) VALUES (?1, ?2, ?3)")
            .bind(id)
            .bind(cashier_id)
            .bind(paid_on)
            .execute(&mut *tx)
            .await?;
    }

    let order_lines: [(i64, i64, i64); 10] = [
        (1, 1, 2),
        (1, 2, 1),
        (2, 3, 1),
        (2, 5, 3),
        (3, 4, 1),
        (3, 1, 4),
        (4, 2, 2),
        (4, 3, 1),
        (5, 4, 2),
        (5, 5, 1),
    ];
    for (order_id, product_id, quantity) in order_lines {
        sqlx::query(
            "INSERT OR IGNORE INTO order_lines (order_id, product_id, quantity) \
             VALUES (?1, ?2, ?3)",
        )
        .bind(order_id)
        .bind(product_id)
        .bind(quantity)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    info!("Seed data applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{Database, DbConfig};

    #[tokio::test]
    async fn test_seed_populates_all_tables() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        apply(db.pool()).await.unwrap();

        let cashiers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cashiers")
            .fetch_one(db.pool())
            .await
            .unwrap();
        let categories: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(db.pool())
            .await
            .unwrap();
        let products: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(db.pool())
            .await
            .unwrap();
        let orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(db.pool())
            .await
            .unwrap();
        let lines: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_lines")
            .fetch_one(db.pool())
            .await
            .unwrap();

        assert_eq!(cashiers, 5);
        assert_eq!(categories, 4);
        assert_eq!(products, 5);
        assert_eq!(orders, 5);
        assert_eq!(lines, 10);
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        apply(db.pool()).await.unwrap();
        apply(db.pool()).await.unwrap();

        let orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(orders, 5);

        let unpaid: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE paid_on IS NULL")
                .fetch_one(db.pool())
                .await
                .unwrap();
        assert_eq!(unpaid, 1);
    }
}
