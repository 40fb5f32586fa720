// Services module - business logic layer

pub mod cashier_service;
pub mod order_service;
pub mod product_service;

pub use cashier_service::CashierService;
pub use order_service::OrderService;
pub use product_service::ProductService;
