use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use cornerstore_rs::{
    handlers::{create_router, AppState},
    init_observability,
    repositories::{
        seed, Database, DbConfig, SqliteCashierRepository, SqliteOrderRepository,
        SqliteProductRepository,
    },
    services::{CashierService, OrderService, ProductService},
    Config, Metrics,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration first
    let config = Config::from_env()?;

    init_observability(
        &config.observability.service_name,
        config.observability.enable_json_logging,
    )?;

    info!("Starting cornerstore-rs service");
    info!(
        "Service: {} v{}",
        config.observability.service_name, config.observability.service_version
    );
    info!("Database: {}", config.database.database_path);

    // Initialize metrics
    let metrics = Arc::new(Metrics::new()?);
    info!("Metrics initialized successfully");

    // Connect, migrate and seed the database
    let db_config = DbConfig::new(&config.database.database_path)
        .max_connections(config.database.max_connections);
    let database = Database::new(db_config).await?;
    if config.database.run_seed {
        seed::apply(database.pool()).await?;
    }
    info!("Database initialized successfully");

    // Initialize repositories and services
    let state = AppState {
        cashier_service: Arc::new(CashierService::new(Arc::new(SqliteCashierRepository::new(
            database.pool().clone(),
        )))),
        product_service: Arc::new(ProductService::new(Arc::new(SqliteProductRepository::new(
            database.pool().clone(),
        )))),
        order_service: Arc::new(OrderService::new(Arc::new(SqliteOrderRepository::new(
            database.pool().clone(),
        )))),
    };
    info!("Services initialized successfully");

    // Build the application router
    let app = create_router(state, metrics);

    // Create socket address
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    // Set up graceful shutdown
    let database_for_shutdown = database.clone();
    let shutdown_signal = async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
        info!("Shutdown signal received");
        database_for_shutdown.close().await;
    };

    // Start the server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
