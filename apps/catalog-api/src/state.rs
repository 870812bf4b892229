//! Shared application state.

use domain_catalog::StorageGateway;
use std::sync::Arc;

/// Cloned into every router; all fields are cheap handles.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// PostgreSQL connection pool
    pub db: database::postgres::DatabaseConnection,
    /// Where product images are uploaded
    pub storage: Arc<dyn StorageGateway>,
}
