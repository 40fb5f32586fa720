use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tokio::net::TcpListener;

use cornerstore_rs::{
    handlers::{create_router, AppState},
    repositories::{
        seed, Database, DbConfig, SqliteCashierRepository, SqliteOrderRepository,
        SqliteProductRepository,
    },
    services::{CashierService, OrderService, ProductService},
    Metrics,
};

/// Boots the real router against a fresh seeded in-memory database on an
/// ephemeral port.
pub struct TestEnvironment {
    pub client: Client,
    pub base_url: String,
}

impl TestEnvironment {
    pub async fn new() -> Self {
        let database = Database::new(DbConfig::in_memory())
            .await
            .expect("Failed to create in-memory database");
        seed::apply(database.pool())
            .await
            .expect("Failed to seed test data");

        let state = AppState {
            cashier_service: Arc::new(CashierService::new(Arc::new(
                SqliteCashierRepository::new(database.pool().clone()),
            ))),
            product_service: Arc::new(ProductService::new(Arc::new(
                SqliteProductRepository::new(database.pool().clone()),
            ))),
            order_service: Arc::new(OrderService::new(Arc::new(SqliteOrderRepository::new(
                database.pool().clone(),
            )))),
        };

        let metrics = Arc::new(Metrics::new().expect("Failed to create metrics"));
        let app = create_router(state, metrics);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind listener");
        let addr = listener.local_addr().expect("Failed to get local address");
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Failed to serve app");
        });

        // Wait for the server to start accepting connections
        tokio::time::sleep(Duration::from_millis(50)).await;

        Self {
            client: Client::new(),
            base_url,
        }
    }
}
