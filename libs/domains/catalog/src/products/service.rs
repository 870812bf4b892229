use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::categories::repository::CategoryRepository;
use crate::categories::service::ID_MISMATCH;
use crate::error::{CatalogError, CatalogResult};
use crate::pagination::{PagedResponse, PaginationQuery};
use crate::products::models::{CreateProduct, Product, ProductFilter, ProductResponse, UpdateProduct};
use crate::products::repository::ProductRepository;
use crate::storage::{ImageUpload, StorageGateway};
use crate::validation::{validate_product_for_create, validate_product_for_update, INVALID_CATEGORY};

pub const PRODUCT_NOT_FOUND: &str = "Product not found.";
pub const INVERTED_PRICE_RANGE: &str = "Minimum price cannot be greater than maximum price.";

/// Product use cases. Images go through the storage gateway before the row is written.
pub struct ProductService<P: ProductRepository, C: CategoryRepository> {
    products: Arc<P>,
    categories: Arc<C>,
    storage: Arc<dyn StorageGateway>,
}

impl<P: ProductRepository, C: CategoryRepository> Clone for ProductService<P, C> {
    fn clone(&self) -> Self {
        Self {
            products: Arc::clone(&self.products),
            categories: Arc::clone(&self.categories),
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<P: ProductRepository, C: CategoryRepository> ProductService<P, C> {
    pub fn new(products: P, categories: C, storage: Arc<dyn StorageGateway>) -> Self {
        Self {
            products: Arc::new(products),
            categories: Arc::new(categories),
            storage,
        }
    }

    #[instrument(skip(self, input), fields(product_name = %input.fields.name))]
    pub async fn create(&self, input: CreateProduct) -> CatalogResult<ProductResponse> {
        let category_name = self.require_category(input.fields.category_id).await?;

        let image_url = match input.image {
            Some(image) => self.upload(image).await?,
            None => None,
        };

        let product = Product::new(input.fields, image_url);
        validate_product_for_create(&product)?;

        let created = self
            .products
            .create(product)
            .await
            .map_err(|e| CatalogError::persistence(e, "Failed to create product."))?;

        Ok(ProductResponse::new(created, category_name))
    }

    /// Replace a product's fields. A new image replaces the stored URL;
    /// otherwise `remove_image` clears it.
    #[instrument(skip(self, input), fields(product_id = %id))]
    pub async fn update(&self, id: Uuid, input: UpdateProduct) -> CatalogResult<ProductResponse> {
        if input.id != id {
            return Err(CatalogError::BadRequest(ID_MISMATCH.to_string()));
        }

        let mut product = self
            .products
            .get_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(PRODUCT_NOT_FOUND.to_string()))?;

        let category_name = self.require_category(input.fields.category_id).await?;
        product.apply_fields(input.fields);

        let new_url = match input.image {
            Some(image) => self.upload(image).await?,
            None => None,
        };
        match new_url {
            Some(url) => product.image_url = Some(url),
            None if input.remove_image => product.image_url = None,
            None => {}
        }

        validate_product_for_update(&product)?;

        let updated = self
            .products
            .update(product)
            .await
            .map_err(|e| CatalogError::persistence(e, "Failed to update product."))?
            .ok_or_else(|| CatalogError::Internal("Failed to update product.".to_string()))?;

        Ok(ProductResponse::new(updated, category_name))
    }

    /// Delete a product and return it as it was. The stored image is kept.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete(&self, id: Uuid) -> CatalogResult<ProductResponse> {
        let product = self
            .products
            .get_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(PRODUCT_NOT_FOUND.to_string()))?;

        let deleted = self
            .products
            .delete(id)
            .await
            .map_err(|e| CatalogError::persistence(e, "Failed to delete product."))?;
        if !deleted {
            return Err(CatalogError::Internal("Failed to delete product.".to_string()));
        }

        self.enrich(product).await
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self, page: PaginationQuery) -> CatalogResult<PagedResponse<ProductResponse>> {
        let (products, total) = self.products.list(page.offset(), page.limit()).await?;

        let mut data = Vec::with_capacity(products.len());
        for product in products {
            data.push(self.enrich(product).await?);
        }

        Ok(PagedResponse::new(data, total, page.page_number, page.page_size))
    }

    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<ProductResponse>> {
        match self.products.get_by_id(id).await? {
            Some(product) => Ok(Some(self.enrich(product).await?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_by_filters(&self, filter: ProductFilter) -> CatalogResult<Vec<ProductResponse>> {
        if filter.has_inverted_price_range() {
            return Err(CatalogError::BadRequest(INVERTED_PRICE_RANGE.to_string()));
        }

        let products = self.products.find_by_filters(filter).await?;

        let mut data = Vec::with_capacity(products.len());
        for product in products {
            data.push(self.enrich(product).await?);
        }
        Ok(data)
    }

    /// Name of an existing category, or `InvalidArgument`.
    async fn require_category(&self, category_id: Uuid) -> CatalogResult<String> {
        self.categories
            .get_by_id(category_id)
            .await?
            .map(|c| c.name)
            .ok_or_else(|| CatalogError::InvalidArgument(INVALID_CATEGORY.to_string()))
    }

    async fn enrich(&self, product: Product) -> CatalogResult<ProductResponse> {
        let category_name = self
            .categories
            .get_by_id(product.category_id)
            .await?
            .map(|c| c.name)
            .unwrap_or_default();
        Ok(ProductResponse::new(product, category_name))
    }

    /// Uploads unless the file name is blank, which counts as no image.
    async fn upload(&self, image: ImageUpload) -> CatalogResult<Option<String>> {
        if image.file_name.trim().is_empty() {
            return Ok(None);
        }

        let file_name = image.file_name.clone();
        let url = self.storage.upload(image).await?;
        tracing::info!(file_name = %file_name, url = %url, "Product image uploaded");
        Ok(Some(url))
    }
}
