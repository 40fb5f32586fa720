use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Json, Response},
};
use serde::Deserialize;
use tracing::{error, info, instrument};

use crate::models::{
    CreateProductRequest, Product, ProductFilters, ProductResponse, UpdateProductRequest,
};

use super::{service_error_response, AppState};

/// Query parameters for listing products
#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    #[serde(rename = "productName")]
    pub product_name: Option<String>,
    #[serde(rename = "categoryName")]
    pub category_name: Option<String>,
}

/// List products with optional name and category filters
#[instrument(name = "list_products", skip(state), fields(
    product_name = query.product_name.as_deref(),
    category_name = query.category_name.as_deref(),
))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> Result<Json<Vec<ProductResponse>>, Response> {
    info!("Listing products with filters");

    let filters = ProductFilters {
        name: query.product_name,
        category_name: query.category_name,
    };

    match state.product_service.list_products(filters).await {
        Ok(products) => {
            info!("Successfully listed {} products", products.len());
            let responses: Vec<ProductResponse> = products
                .into_iter()
                .map(ProductResponse::from_graph)
                .collect();
            Ok(Json(responses))
        }
        Err(err) => {
            error!("Failed to list products: {}", err);
            Err(service_error_response(err))
        }
    }
}

/// Create a new product
#[instrument(name = "create_product", skip(state, request), fields(
    name = %request.name,
    price = %request.price,
))]
pub async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>), Response> {
    info!("Creating new product: {}", request.name);

    match state.product_service.create_product(request).await {
        Ok(product) => {
            info!("Successfully created product with ID: {}", product.id);
            Ok((StatusCode::CREATED, Json(product)))
        }
        Err(err) => {
            error!("Failed to create product: {}", err);
            Err(service_error_response(err))
        }
    }
}

/// Replace an existing product's fields
#[instrument(name = "update_product", skip(state, request), fields(product_id = %id))]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<StatusCode, Response> {
    info!("Updating product with ID: {}", id);

    match state.product_service.update_product(id, request).await {
        Ok(()) => {
            info!("Successfully updated product: {}", id);
            Ok(StatusCode::NO_CONTENT)
        }
        Err(err) => {
            error!("Failed to update product {}: {}", id, err);
            Err(service_error_response(err))
        }
    }
}
