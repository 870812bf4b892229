use axum::Router;
use domain_catalog::{
    products::handlers, PgCategoryRepository, PgProductRepository, ProductService,
};

pub fn router(state: &crate::state::AppState) -> Router {
    let service = ProductService::new(
        PgProductRepository::new(state.db.clone()),
        PgCategoryRepository::new(state.db.clone()),
        state.storage.clone(),
    );
    handlers::router(service)
}
