use axum::Router;
use domain_catalog::{
    categories::handlers, CategoryService, PgCategoryRepository, PgProductRepository,
};

pub fn router(state: &crate::state::AppState) -> Router {
    let service = CategoryService::new(
        PgCategoryRepository::new(state.db.clone()),
        PgProductRepository::new(state.db.clone()),
    );
    handlers::router(service)
}
