// Repositories module - data access layer

pub mod cashier_repository;
pub mod db;
pub mod order_repository;
pub mod product_repository;
pub mod seed;

pub use cashier_repository::{CashierRepository, SqliteCashierRepository};
pub use db::{Database, DbConfig};
pub use order_repository::{OrderRepository, SqliteOrderRepository};
pub use product_repository::{ProductRepository, SqliteProductRepository};

#[cfg(test)]
pub(crate) mod test_support {
    use super::{db::DbConfig, seed, Database};

    /// Fresh in-memory database with schema and seed rows applied.
    pub(crate) async fn seeded_db() -> Database {
        let db = Database::new(DbConfig::in_memory())
            .await
            .expect("in-memory database should initialize");
        seed::apply(db.pool())
            .await
            .expect("seed data should apply");
        db
    }
}
