use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::categories::models::Category;
use crate::error::CatalogResult;

/// Persistence for categories.
///
/// Listings are ordered by name, then id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, category: Category) -> CatalogResult<Category>;

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Category>>;

    /// One page of categories and the total number of categories.
    async fn list(&self, offset: u64, limit: u64) -> CatalogResult<(Vec<Category>, u64)>;

    /// Replace a stored category. `None` if it no longer exists.
    async fn update(&self, category: Category) -> CatalogResult<Option<Category>>;

    /// `false` if nothing was deleted.
    async fn delete(&self, id: Uuid) -> CatalogResult<bool>;
}

/// In-memory implementation of CategoryRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCategoryRepository {
    categories: Arc<RwLock<HashMap<Uuid, Category>>>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn create(&self, category: Category) -> CatalogResult<Category> {
        self.categories
            .write()
            .await
            .insert(category.id, category.clone());

        tracing::info!(category_id = %category.id, "Created category");
        Ok(category)
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Category>> {
        Ok(self.categories.read().await.get(&id).cloned())
    }

    async fn list(&self, offset: u64, limit: u64) -> CatalogResult<(Vec<Category>, u64)> {
        let categories = self.categories.read().await;

        let mut all: Vec<Category> = categories.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        let total = all.len() as u64;
        let page = all
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();

        Ok((page, total))
    }

    async fn update(&self, category: Category) -> CatalogResult<Option<Category>> {
        let mut categories = self.categories.write().await;

        let Some(stored) = categories.get_mut(&category.id) else {
            return Ok(None);
        };
        *stored = category.clone();

        tracing::info!(category_id = %category.id, "Updated category");
        Ok(Some(category))
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let removed = self.categories.write().await.remove(&id).is_some();
        if removed {
            tracing::info!(category_id = %id, "Deleted category");
        }
        Ok(removed)
    }
}
