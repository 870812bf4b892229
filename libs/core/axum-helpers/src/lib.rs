//! # Axum Helpers
//!
//! Shared HTTP plumbing for the catalog services.
//!
//! - **[`envelope`]**: the `{success, data, error}` response envelope
//! - **[`errors`]**: `AppError` and OpenAPI error descriptors
//! - **[`extractors`]**: UUID path, validated JSON and validated query extractors
//! - **[`http`]**: CORS and security header middleware
//! - **[`server`]**: router assembly, health endpoints, graceful shutdown
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//!
//! let router = create_router::<ApiDoc>(api_routes)?.merge(health_router(app_info!()));
//! create_production_app(router, &config.server, Duration::from_secs(30), async {}).await?;
//! ```

pub mod envelope;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use envelope::ApiResponse;
pub use errors::{error_response, AppError, ErrorResponse};
pub use extractors::{UuidPath, ValidatedJson, ValidatedQuery};
pub use http::{cors_layer_from_origins, create_cors_layer, security_headers};
pub use server::{
    create_production_app, create_router, health_router, run_health_checks, shutdown_signal,
    HealthCheckFuture, HealthResponse, ShutdownCoordinator,
};
