use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use core_config::{env_optional, env_or_default, env_parse_or_default, env_required, ConfigError, FromEnv};
use tracing::{error, info};

use super::{object_key, ImageUpload, StorageGateway};
use crate::error::{CatalogError, CatalogResult};

pub const DEFAULT_REGION: &str = "us-east-2";

/// S3 connection settings.
///
/// Static credentials are used only when both keys are set; otherwise the
/// AWS default credential chain applies.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    /// Custom endpoint for S3-compatible stores such as MinIO
    pub endpoint_url: Option<String>,
    pub force_path_style: bool,
    /// Base of returned image URLs; defaults to the bucket's virtual-hosted address
    pub public_base_url: Option<String>,
}

impl StorageConfig {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            region: DEFAULT_REGION.to_string(),
            access_key_id: None,
            secret_access_key: None,
            endpoint_url: None,
            force_path_style: false,
            public_base_url: None,
        }
    }

    pub fn public_url(&self, key: &str) -> String {
        match &self.public_base_url {
            Some(base) => format!("{}/{}", base.trim_end_matches('/'), key),
            None => format!("https://{}.s3.amazonaws.com/{}", self.bucket, key),
        }
    }
}

impl FromEnv for StorageConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            bucket: env_required("S3_BUCKET_NAME")?,
            region: env_or_default("AWS_REGION", DEFAULT_REGION),
            access_key_id: env_optional("AWS_ACCESS_KEY_ID"),
            secret_access_key: env_optional("AWS_SECRET_ACCESS_KEY"),
            endpoint_url: env_optional("S3_ENDPOINT_URL"),
            force_path_style: env_parse_or_default("S3_FORCE_PATH_STYLE", false)?,
            public_base_url: env_optional("S3_PUBLIC_BASE_URL"),
        })
    }
}

/// Uploads product images to an S3 bucket with `PutObject`.
#[derive(Clone)]
pub struct S3StorageGateway {
    client: Client,
    config: StorageConfig,
}

impl S3StorageGateway {
    pub fn new(client: Client, config: StorageConfig) -> Self {
        Self { client, config }
    }

    /// Build the SDK client from `config`.
    pub async fn connect(config: StorageConfig) -> Self {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region.clone()));

        if let (Some(access_key_id), Some(secret_access_key)) =
            (&config.access_key_id, &config.secret_access_key)
        {
            loader = loader.credentials_provider(Credentials::new(
                access_key_id,
                secret_access_key,
                None,
                None,
                "catalog-static",
            ));
        }

        let shared = loader.load().await;
        let mut s3_config = aws_sdk_s3::config::Builder::from(&shared);
        if let Some(endpoint_url) = &config.endpoint_url {
            s3_config = s3_config.endpoint_url(endpoint_url);
        }
        if config.force_path_style {
            s3_config = s3_config.force_path_style(true);
        }

        info!(bucket = %config.bucket, region = %config.region, "S3 storage configured");
        Self::new(Client::from_conf(s3_config.build()), config)
    }

    pub fn bucket(&self) -> &str {
        &self.config.bucket
    }
}

#[async_trait]
impl StorageGateway for S3StorageGateway {
    async fn upload(&self, image: ImageUpload) -> CatalogResult<String> {
        let key = object_key(&image.file_name);
        let content_type = image.content_type_or_default().to_string();

        self.client
            .put_object()
            .bucket(&self.config.bucket)
            .key(&key)
            .content_type(content_type)
            .body(ByteStream::from(image.bytes))
            .send()
            .await
            .map_err(|e| {
                error!(key = %key, error = %e, "Failed to upload image to S3");
                CatalogError::Storage(format!("Failed to upload image: {}", e))
            })?;

        info!(key = %key, "Uploaded image to S3");
        Ok(self.config.public_url(&key))
    }
}
