use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::products::models::{Product, ProductFilter};

/// Persistence for products.
///
/// Listings and filter results are ordered by name, then id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, product: Product) -> CatalogResult<Product>;

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>>;

    /// One page of products and the total number of products.
    async fn list(&self, offset: u64, limit: u64) -> CatalogResult<(Vec<Product>, u64)>;

    async fn list_by_category(&self, category_id: Uuid) -> CatalogResult<Vec<Product>>;

    async fn count_by_category(&self, category_id: Uuid) -> CatalogResult<u64>;

    /// Every product matching all supplied filters. Not paginated.
    async fn find_by_filters(&self, filter: ProductFilter) -> CatalogResult<Vec<Product>>;

    /// Replace a stored product. `None` if it no longer exists.
    async fn update(&self, product: Product) -> CatalogResult<Option<Product>>;

    /// `false` if nothing was deleted.
    async fn delete(&self, id: Uuid) -> CatalogResult<bool>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn sorted_where(&self, keep: impl Fn(&Product) -> bool) -> Vec<Product> {
        let products = self.products.read().await;
        let mut result: Vec<Product> = products.values().filter(|p| keep(p)).cloned().collect();
        result.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        result
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: Product) -> CatalogResult<Product> {
        self.products
            .write()
            .await
            .insert(product.id, product.clone());

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn list(&self, offset: u64, limit: u64) -> CatalogResult<(Vec<Product>, u64)> {
        let all = self.sorted_where(|_| true).await;
        let total = all.len() as u64;
        let page = all
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok((page, total))
    }

    async fn list_by_category(&self, category_id: Uuid) -> CatalogResult<Vec<Product>> {
        Ok(self.sorted_where(|p| p.category_id == category_id).await)
    }

    async fn count_by_category(&self, category_id: Uuid) -> CatalogResult<u64> {
        let products = self.products.read().await;
        Ok(products
            .values()
            .filter(|p| p.category_id == category_id)
            .count() as u64)
    }

    async fn find_by_filters(&self, filter: ProductFilter) -> CatalogResult<Vec<Product>> {
        Ok(self.sorted_where(|p| filter.matches(p)).await)
    }

    async fn update(&self, product: Product) -> CatalogResult<Option<Product>> {
        let mut products = self.products.write().await;

        let Some(stored) = products.get_mut(&product.id) else {
            return Ok(None);
        };
        *stored = product.clone();

        tracing::info!(product_id = %product.id, "Updated product");
        Ok(Some(product))
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let removed = self.products.write().await.remove(&id).is_some();
        if removed {
            tracing::info!(product_id = %id, "Deleted product");
        }
        Ok(removed)
    }
}
