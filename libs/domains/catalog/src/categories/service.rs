use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::categories::models::{
    Category, CategoryDetailResponse, CategoryResponse, CreateCategory, UpdateCategory,
};
use crate::categories::repository::CategoryRepository;
use crate::error::{CatalogError, CatalogResult};
use crate::pagination::{PagedResponse, PaginationQuery};
use crate::products::repository::ProductRepository;
use crate::validation::{validate_category_for_create, validate_category_for_update};

pub const CATEGORY_NOT_FOUND: &str = "Category not found.";
pub const CATEGORY_HAS_PRODUCTS: &str = "Cannot delete a category that has associated products.";
pub const ID_MISMATCH: &str = "Body ID does not match route ID.";

/// Category use cases. Reads products to build details and to guard deletes.
pub struct CategoryService<C: CategoryRepository, P: ProductRepository> {
    categories: Arc<C>,
    products: Arc<P>,
}

impl<C: CategoryRepository, P: ProductRepository> Clone for CategoryService<C, P> {
    fn clone(&self) -> Self {
        Self {
            categories: Arc::clone(&self.categories),
            products: Arc::clone(&self.products),
        }
    }
}

impl<C: CategoryRepository, P: ProductRepository> CategoryService<C, P> {
    pub fn new(categories: C, products: P) -> Self {
        Self {
            categories: Arc::new(categories),
            products: Arc::new(products),
        }
    }

    #[instrument(skip(self, input), fields(category_name = %input.name))]
    pub async fn create(&self, input: CreateCategory) -> CatalogResult<CategoryResponse> {
        let category = Category::new(input.name, input.description);
        validate_category_for_create(&category)?;

        let created = self
            .categories
            .create(category)
            .await
            .map_err(|e| CatalogError::persistence(e, "Failed to create category."))?;

        Ok(created.into())
    }

    #[instrument(skip(self, input), fields(category_id = %id))]
    pub async fn update(&self, id: Uuid, input: UpdateCategory) -> CatalogResult<CategoryResponse> {
        if input.id != id {
            return Err(CatalogError::BadRequest(ID_MISMATCH.to_string()));
        }

        let mut category = self
            .categories
            .get_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(CATEGORY_NOT_FOUND.to_string()))?;

        category.apply_update(input);
        validate_category_for_update(&category)?;

        let updated = self
            .categories
            .update(category)
            .await
            .map_err(|e| CatalogError::persistence(e, "Failed to update category."))?
            .ok_or_else(|| CatalogError::Internal("Failed to update category.".to_string()))?;

        Ok(updated.into())
    }

    /// Delete a category that has no products. Returns the deleted category.
    ///
    /// The product check and the delete are separate statements; the
    /// `products.category_id` foreign key rejects a delete that races an insert.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn delete(&self, id: Uuid) -> CatalogResult<CategoryResponse> {
        let category = self
            .categories
            .get_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(CATEGORY_NOT_FOUND.to_string()))?;

        if self.products.count_by_category(id).await? > 0 {
            return Err(CatalogError::Conflict(CATEGORY_HAS_PRODUCTS.to_string()));
        }

        let deleted = self
            .categories
            .delete(id)
            .await
            .map_err(|e| CatalogError::persistence(e, "Failed to delete category."))?;
        if !deleted {
            return Err(CatalogError::Internal("Failed to delete category.".to_string()));
        }

        Ok(category.into())
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self, page: PaginationQuery) -> CatalogResult<PagedResponse<CategoryResponse>> {
        let (categories, total) = self.categories.list(page.offset(), page.limit()).await?;

        Ok(PagedResponse::new(categories, total, page.page_number, page.page_size)
            .map(CategoryResponse::from))
    }

    /// The category with its products, or `None` if it does not exist.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<CategoryDetailResponse>> {
        let Some(category) = self.categories.get_by_id(id).await? else {
            return Ok(None);
        };

        let products = self.products.list_by_category(id).await?;
        Ok(Some(CategoryDetailResponse::new(
            category,
            products.into_iter().map(Into::into).collect(),
        )))
    }
}
