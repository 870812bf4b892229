//! Object storage for product images.

mod memory;
mod s3;

pub use memory::InMemoryStorageGateway;
pub use s3::{S3StorageGateway, StorageConfig};

use async_trait::async_trait;
use bytes::Bytes;
use uuid::Uuid;

use crate::error::CatalogResult;

pub const KEY_PREFIX: &str = "products/";
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// An image received with a product form.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub bytes: Bytes,
    pub file_name: String,
    pub content_type: Option<String>,
}

impl ImageUpload {
    pub fn content_type_or_default(&self) -> &str {
        self.content_type.as_deref().unwrap_or(DEFAULT_CONTENT_TYPE)
    }
}

/// Uploads a binary object and returns its public URL.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageGateway: Send + Sync {
    async fn upload(&self, image: ImageUpload) -> CatalogResult<String>;
}

/// `products/{uuid}_{file_name}`; the random part keeps same-named uploads apart.
pub fn object_key(file_name: &str) -> String {
    format!("{}{}_{}", KEY_PREFIX, Uuid::new_v4(), file_name)
}
