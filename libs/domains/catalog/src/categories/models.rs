use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::products::models::NestedProductResponse;

/// Category domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// New category with a fresh id and a trimmed name.
    pub fn new(name: String, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            description,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, input: UpdateCategory) {
        self.name = input.name.trim().to_string();
        self.description = input.description;
        self.updated_at = Utc::now();
    }
}

/// Body of `POST /categories`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategory {
    #[serde(default)]
    #[validate(length(max = 150))]
    #[schema(example = "Books")]
    pub name: String,
    pub description: Option<String>,
}

/// Body of `PUT /categories/{id}`; `id` must equal the route id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategory {
    #[serde(default)]
    pub id: Uuid,
    #[serde(default)]
    #[validate(length(max = 150))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
        }
    }
}

/// A category together with every product assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDetailResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub products: Vec<NestedProductResponse>,
}

impl CategoryDetailResponse {
    pub fn new(category: Category, products: Vec<NestedProductResponse>) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
            products,
        }
    }
}
