use core_config::{app_info, env_parse_or_default, server::ServerConfig, AppInfo, FromEnv};
use database::postgres::PostgresConfig;
use domain_catalog::StorageConfig;

pub use core_config::Environment;

/// Everything the API needs, read once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub environment: Environment,
    /// Apply pending migrations before serving
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // DATABASE_URL is required
        let server = ServerConfig::from_env()?;
        let storage = StorageConfig::from_env()?; // S3_BUCKET_NAME is required

        Ok(Self {
            app: app_info!(),
            database,
            server,
            storage,
            environment,
            run_migrations: env_parse_or_default("RUN_MIGRATIONS", true)?,
        })
    }
}
