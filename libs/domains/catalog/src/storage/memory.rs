use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::{object_key, ImageUpload, StorageGateway};
use crate::error::{CatalogError, CatalogResult};

/// Keeps uploads in memory; used by tests and local runs without S3.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorageGateway {
    uploads: Arc<Mutex<Vec<(String, ImageUpload)>>>,
    failure: Option<String>,
}

impl InMemoryStorageGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway whose uploads always fail with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Stored `(key, upload)` pairs in upload order.
    pub async fn uploads(&self) -> Vec<(String, ImageUpload)> {
        self.uploads.lock().await.clone()
    }
}

#[async_trait]
impl StorageGateway for InMemoryStorageGateway {
    async fn upload(&self, image: ImageUpload) -> CatalogResult<String> {
        if let Some(message) = &self.failure {
            return Err(CatalogError::Storage(message.clone()));
        }

        let key = object_key(&image.file_name);
        self.uploads.lock().await.push((key.clone(), image));
        tracing::info!(key = %key, "Stored image in memory");
        Ok(format!("memory://{}", key))
    }
}
