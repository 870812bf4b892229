//! Catalog domain: categories, products and product images.
//!
//! ```text
//! handlers ── HTTP, envelope, multipart forms
//!    │
//! services ── business rules, validation, image upload
//!    │
//! repositories ── in-memory or Postgres (SeaORM)      storage ── S3 or in-memory
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use domain_catalog::{
//!     CategoryService, InMemoryStorageGateway, PgCategoryRepository, PgProductRepository,
//!     ProductService,
//! };
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("postgres://...").await?;
//! let categories = PgCategoryRepository::new(db.clone());
//! let products = PgProductRepository::new(db);
//!
//! let category_service = CategoryService::new(categories.clone(), products.clone());
//! let product_service =
//!     ProductService::new(products, categories, Arc::new(InMemoryStorageGateway::new()));
//! # Ok(())
//! # }
//! ```

pub mod categories;
pub mod error;
pub mod pagination;
pub mod products;
pub mod storage;
pub mod validation;

pub use categories::{
    models::{Category, CategoryDetailResponse, CategoryResponse, CreateCategory, UpdateCategory},
    postgres::PgCategoryRepository,
    repository::{CategoryRepository, InMemoryCategoryRepository},
    service::CategoryService,
};
pub use error::{CatalogError, CatalogResult};
pub use pagination::{PagedResponse, PaginationQuery};
pub use products::{
    models::{
        CreateProduct, NestedProductResponse, Product, ProductFields, ProductFilter,
        ProductResponse, UpdateProduct,
    },
    postgres::PgProductRepository,
    repository::{InMemoryProductRepository, ProductRepository},
    service::ProductService,
};
pub use storage::{
    ImageUpload, InMemoryStorageGateway, S3StorageGateway, StorageConfig, StorageGateway,
};
