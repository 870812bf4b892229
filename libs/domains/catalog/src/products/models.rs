use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::storage::ImageUpload;

/// Product domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub is_active: bool,
    pub category_id: Uuid,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Editable product fields as submitted by clients.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFields {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub is_active: bool,
    pub category_id: Uuid,
}

impl Product {
    /// New product with a fresh id. The name is trimmed and a missing
    /// description becomes empty.
    pub fn new(fields: ProductFields, image_url: Option<String>) -> Self {
        let now = Utc::now();
        let mut product = Self {
            id: Uuid::new_v4(),
            name: String::new(),
            description: String::new(),
            price: Decimal::ZERO,
            stock_quantity: 0,
            is_active: true,
            category_id: Uuid::nil(),
            image_url,
            created_at: now,
            updated_at: now,
        };
        product.apply_fields(fields);
        product
    }

    pub fn apply_fields(&mut self, fields: ProductFields) {
        self.name = fields.name.trim().to_string();
        self.description = fields.description.unwrap_or_default();
        self.price = fields.price;
        self.stock_quantity = fields.stock_quantity;
        self.is_active = fields.is_active;
        self.category_id = fields.category_id;
        self.updated_at = Utc::now();
    }
}

/// Input for creating a product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateProduct {
    pub fields: ProductFields,
    pub image: Option<ImageUpload>,
}

/// Input for replacing a product.
///
/// A new `image` always wins over `remove_image`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateProduct {
    pub id: Uuid,
    pub fields: ProductFields,
    pub remove_image: bool,
    pub image: Option<ImageUpload>,
}

/// Query for `GET /products/filter`. Unset fields do not restrict the result;
/// price bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, IntoParams, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProductFilter {
    pub category_id: Option<Uuid>,
    #[param(value_type = Option<f64>)]
    #[schema(value_type = Option<f64>)]
    pub min_price: Option<Decimal>,
    #[param(value_type = Option<f64>)]
    #[schema(value_type = Option<f64>)]
    pub max_price: Option<Decimal>,
    pub is_active: Option<bool>,
}

impl ProductFilter {
    pub fn has_inverted_price_range(&self) -> bool {
        matches!((self.min_price, self.max_price), (Some(min), Some(max)) if min > max)
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.category_id.is_none_or(|id| product.category_id == id)
            && self.min_price.is_none_or(|min| product.price >= min)
            && self.max_price.is_none_or(|max| product.price <= max)
            && self.is_active.is_none_or(|active| product.is_active == active)
    }
}

/// Product enriched with the name of its category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[schema(value_type = f64, example = 15.0)]
    pub price: Decimal,
    pub stock_quantity: i32,
    pub is_active: bool,
    pub image_url: Option<String>,
    pub category_id: Uuid,
    /// Empty when the category no longer exists
    pub category_name: String,
}

impl ProductResponse {
    pub fn new(product: Product, category_name: String) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            stock_quantity: product.stock_quantity,
            is_active: product.is_active,
            image_url: product.image_url,
            category_id: product.category_id,
            category_name,
        }
    }
}

/// Product as listed inside a category detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NestedProductResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub stock_quantity: i32,
    pub is_active: bool,
    pub image_url: Option<String>,
}

impl From<Product> for NestedProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            stock_quantity: product.stock_quantity,
            is_active: product.is_active,
            image_url: product.image_url,
        }
    }
}
