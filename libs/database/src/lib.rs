//! Postgres connectivity for the catalog services.
//!
//! # Features
//!
//! - `postgres` (default): SeaORM connection pool, migrations and health check
//! - `config` (default): `core_config::FromEnv` for [`postgres::PostgresConfig`]
//!
//! ```ignore
//! use database::postgres::{self, PostgresConfig};
//! use core_config::FromEnv;
//!
//! let db = postgres::connect_from_config_with_retry(PostgresConfig::from_env()?, None).await?;
//! postgres::run_migrations::<migration::Migrator>(&db, "catalog_api").await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use common::{retry, retry_with_backoff, DatabaseError, DatabaseResult, RetryConfig};
