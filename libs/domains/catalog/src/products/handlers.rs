use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestResponse, BadRequestUuidResponse, InternalServerErrorResponse, NotFoundResponse,
    },
    ApiResponse, AppError, UuidPath, ValidatedQuery,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::categories::repository::CategoryRepository;
use crate::error::CatalogResult;
use crate::pagination::{PagedResponse, PaginationQuery};
use crate::products::form::{CreateProductForm, ProductForm, UpdateProductForm};
use crate::products::models::{ProductFilter, ProductResponse};
use crate::products::repository::ProductRepository;
use crate::products::service::ProductService;

const TAG: &str = "products";

/// Product routes accept bodies up to this size so that the per-image limit,
/// not the transport limit, decides whether an upload is too large.
pub const BODY_LIMIT: usize = 10 * 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(list_products, filter_products, get_product, create_product, update_product, delete_product),
    components(
        schemas(
            ProductResponse,
            ProductFilter,
            CreateProductForm,
            UpdateProductForm
        ),
        responses(
            BadRequestResponse,
            BadRequestUuidResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Products and their images"))
)]
pub struct ApiDoc;

type SharedService<P, C> = Arc<ProductService<P, C>>;

pub fn router<P, C>(service: ProductService<P, C>) -> Router
where
    P: ProductRepository + 'static,
    C: CategoryRepository + 'static,
{
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/filter", get(filter_products))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .with_state(Arc::new(service))
}

/// List products one page at a time, ordered by name
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of products", body = ApiResponse<PagedResponse<ProductResponse>>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<P: ProductRepository, C: CategoryRepository>(
    State(service): State<SharedService<P, C>>,
    ValidatedQuery(page): ValidatedQuery<PaginationQuery>,
) -> CatalogResult<ApiResponse<PagedResponse<ProductResponse>>> {
    Ok(ApiResponse::ok(service.get_all(page).await?))
}

/// Products matching every supplied filter; price bounds are inclusive
#[utoipa::path(
    get,
    path = "/filter",
    tag = TAG,
    params(ProductFilter),
    responses(
        (status = 200, description = "Matching products", body = ApiResponse<Vec<ProductResponse>>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn filter_products<P: ProductRepository, C: CategoryRepository>(
    State(service): State<SharedService<P, C>>,
    ValidatedQuery(filter): ValidatedQuery<ProductFilter>,
) -> CatalogResult<ApiResponse<Vec<ProductResponse>>> {
    Ok(ApiResponse::ok(service.get_by_filters(filter).await?))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<ProductResponse>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<P: ProductRepository, C: CategoryRepository>(
    State(service): State<SharedService<P, C>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Response> {
    Ok(match service.get_by_id(id).await? {
        Some(product) => ApiResponse::ok(product).into_response(),
        None => AppError::NotFound("Product not found".to_string()).into_response(),
    })
}

/// Create a product, uploading its image first when one is attached
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body(content = CreateProductForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductResponse>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<P: ProductRepository, C: CategoryRepository>(
    State(service): State<SharedService<P, C>>,
    form: ProductForm,
) -> CatalogResult<(StatusCode, Json<ApiResponse<ProductResponse>>)> {
    let product = service.create(form.into_create()?).await?;
    Ok(ApiResponse::ok(product).with_status(StatusCode::CREATED))
}

/// Replace a product. A new image wins over `removeImage`
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body(content = UpdateProductForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<ProductResponse>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<P: ProductRepository, C: CategoryRepository>(
    State(service): State<SharedService<P, C>>,
    UuidPath(id): UuidPath,
    form: ProductForm,
) -> CatalogResult<ApiResponse<ProductResponse>> {
    Ok(ApiResponse::ok(service.update(id, form.into_update(id)?).await?))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Deleted product", body = ApiResponse<ProductResponse>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<P: ProductRepository, C: CategoryRepository>(
    State(service): State<SharedService<P, C>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<ApiResponse<ProductResponse>> {
    Ok(ApiResponse::ok(service.delete(id).await?))
}
