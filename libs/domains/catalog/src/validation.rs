//! Entity invariants checked before anything is persisted.
//!
//! Each function reports the first violated rule only.

use crate::categories::models::Category;
use crate::error::{CatalogError, CatalogResult};
use crate::products::models::Product;
use rust_decimal::Decimal;

pub const CATEGORY_NAME_REQUIRED: &str = "Category name is required.";
pub const INVALID_CATEGORY: &str = "Invalid category.";
pub const INVALID_PRODUCT: &str = "Invalid product.";
pub const PRODUCT_NAME_REQUIRED: &str = "Product name is required.";
pub const NEGATIVE_PRICE: &str = "Product price cannot be negative.";
pub const NEGATIVE_STOCK: &str = "Stock quantity cannot be negative.";

fn invalid(message: &str) -> CatalogError {
    CatalogError::Validation(message.to_string())
}

pub fn validate_category_for_create(category: &Category) -> CatalogResult<()> {
    if category.name.trim().is_empty() {
        return Err(invalid(CATEGORY_NAME_REQUIRED));
    }
    Ok(())
}

pub fn validate_category_for_update(category: &Category) -> CatalogResult<()> {
    if category.id.is_nil() {
        return Err(invalid(INVALID_CATEGORY));
    }
    validate_category_for_create(category)
}

pub fn validate_product_for_create(product: &Product) -> CatalogResult<()> {
    if product.name.trim().is_empty() {
        return Err(invalid(PRODUCT_NAME_REQUIRED));
    }
    if product.price < Decimal::ZERO {
        return Err(invalid(NEGATIVE_PRICE));
    }
    if product.stock_quantity < 0 {
        return Err(invalid(NEGATIVE_STOCK));
    }
    if product.category_id.is_nil() {
        return Err(invalid(INVALID_CATEGORY));
    }
    Ok(())
}

pub fn validate_product_for_update(product: &Product) -> CatalogResult<()> {
    if product.id.is_nil() {
        return Err(invalid(INVALID_PRODUCT));
    }
    validate_product_for_create(product)
}
