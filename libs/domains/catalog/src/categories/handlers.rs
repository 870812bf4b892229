use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestResponse, BadRequestUuidResponse, InternalServerErrorResponse, NotFoundResponse,
    },
    ApiResponse, AppError, UuidPath, ValidatedJson, ValidatedQuery,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::categories::models::{
    CategoryDetailResponse, CategoryResponse, CreateCategory, UpdateCategory,
};
use crate::categories::repository::CategoryRepository;
use crate::categories::service::CategoryService;
use crate::error::CatalogResult;
use crate::pagination::{PagedResponse, PaginationQuery};
use crate::products::models::NestedProductResponse;
use crate::products::repository::ProductRepository;

const TAG: &str = "categories";

#[derive(OpenApi)]
#[openapi(
    paths(list_categories, get_category, create_category, update_category, delete_category),
    components(
        schemas(
            CategoryResponse,
            CategoryDetailResponse,
            NestedProductResponse,
            CreateCategory,
            UpdateCategory
        ),
        responses(
            BadRequestResponse,
            BadRequestUuidResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Product categories"))
)]
pub struct ApiDoc;

type SharedService<C, P> = Arc<CategoryService<C, P>>;

pub fn router<C, P>(service: CategoryService<C, P>) -> Router
where
    C: CategoryRepository + 'static,
    P: ProductRepository + 'static,
{
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
        .with_state(Arc::new(service))
}

/// List categories one page at a time, ordered by name
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of categories", body = ApiResponse<PagedResponse<CategoryResponse>>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories<C: CategoryRepository, P: ProductRepository>(
    State(service): State<SharedService<C, P>>,
    ValidatedQuery(page): ValidatedQuery<PaginationQuery>,
) -> CatalogResult<ApiResponse<PagedResponse<CategoryResponse>>> {
    Ok(ApiResponse::ok(service.get_all(page).await?))
}

/// Get a category with its products
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryDetailResponse>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_category<C: CategoryRepository, P: ProductRepository>(
    State(service): State<SharedService<C, P>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Response> {
    Ok(match service.get_by_id(id).await? {
        Some(category) => ApiResponse::ok(category).into_response(),
        None => AppError::NotFound("Category not found".to_string()).into_response(),
    })
}

/// Create a category
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponse>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_category<C: CategoryRepository, P: ProductRepository>(
    State(service): State<SharedService<C, P>>,
    ValidatedJson(input): ValidatedJson<CreateCategory>,
) -> CatalogResult<(StatusCode, Json<ApiResponse<CategoryResponse>>)> {
    let category = service.create(input).await?;
    Ok(ApiResponse::ok(category).with_status(StatusCode::CREATED))
}

/// Replace a category's name and description
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Category ID")),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoryResponse>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_category<C: CategoryRepository, P: ProductRepository>(
    State(service): State<SharedService<C, P>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateCategory>,
) -> CatalogResult<ApiResponse<CategoryResponse>> {
    Ok(ApiResponse::ok(service.update(id, input).await?))
}

/// Delete a category that has no products
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Deleted category", body = ApiResponse<CategoryResponse>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_category<C: CategoryRepository, P: ProductRepository>(
    State(service): State<SharedService<C, P>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<ApiResponse<CategoryResponse>> {
    Ok(ApiResponse::ok(service.delete(id).await?))
}
