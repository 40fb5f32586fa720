use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Category;

/// Core product model.
///
/// Prices are persisted as integer cents and surfaced as two-fraction-digit
/// decimals at this boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub brand: String,
    pub category_id: i64,
}

/// Request model for creating a new product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: Decimal,
    pub brand: String,
    pub category_id: i64,
}

/// Request model for replacing an existing product.
///
/// Every field is overwritten; there is no partial update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProductRequest {
    pub name: String,
    pub price: Decimal,
    pub brand: String,
    pub category_id: i64,
}

/// Filters for querying products. Both filters are case-insensitive exact
/// matches and are ANDed when both are present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilters {
    pub name: Option<String>,
    pub category_name: Option<String>,
}

/// Product together with its eagerly loaded category
#[derive(Debug, Clone, PartialEq)]
pub struct ProductWithCategory {
    pub product: Product,
    pub category: Category,
}

/// Response model for products.
///
/// `category` is only populated by shapes that eager-load it (product
/// listings and order detail); everywhere else it projects as null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub brand: String,
    pub category_id: i64,
    pub category: Option<Category>,
}

impl ProductResponse {
    /// Project a bare product, without its category.
    pub fn from_entity(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            brand: product.brand,
            category_id: product.category_id,
            category: None,
        }
    }

    /// Project a product together with its category.
    pub fn from_graph(graph: ProductWithCategory) -> Self {
        let mut response = Self::from_entity(graph.product);
        response.category = Some(graph.category);
        response
    }
}

/// Convert an API price to stored cents.
///
/// Returns `None` when the value carries more than two fraction digits or
/// does not fit the storable range.
pub fn price_to_cents(price: Decimal) -> Option<i64> {
    if price.scale() > 2 {
        return None;
    }
    price.checked_mul(Decimal::ONE_HUNDRED)?.to_i64()
}

/// Convert stored cents back to the API price representation.
pub fn cents_to_price(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}
