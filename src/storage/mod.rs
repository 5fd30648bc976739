use anyhow::Result;
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::{
  config::{Credentials, SharedCredentialsProvider},
  primitives::ByteStream,
  Client as S3Client,
};

use crate::config::StorageConfig;

/// Object storage for uploaded media. `upload_file` returns the public URL of the stored object.
#[async_trait]
pub trait FileStorage: Send + Sync {
  async fn upload_file(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<String>;
}

#[derive(Clone)]
pub struct S3Storage {
  client: S3Client,
  bucket: String,
  endpoint: Option<String>,
  public_endpoint: Option<String>,
}

impl S3Storage {
  pub async fn new(config: &StorageConfig) -> Result<Self> {
    let credentials = Credentials::new(&config.access_key, &config.secret_key, None, None, "custom");
    let credentials_provider = SharedCredentialsProvider::new(credentials);

    let mut config_builder = aws_config::defaults(BehaviorVersion::latest())
      .region(Region::new(config.region.clone()))
      .credentials_provider(credentials_provider);

    if let Some(ref endpoint_url) = config.endpoint {
      config_builder = config_builder.endpoint_url(endpoint_url);
    }

    let sdk_config = config_builder.load().await;
    let mut s3_config_builder = aws_sdk_s3::config::Builder::from(&sdk_config);

    // Custom endpoints (MinIO, R2) need path-style addressing.
    if let Some(ref endpoint_url) = config.endpoint {
      s3_config_builder = s3_config_builder.endpoint_url(endpoint_url).force_path_style(true);
    }

    Ok(Self {
      client: S3Client::from_conf(s3_config_builder.build()),
      bucket: config.bucket.clone(),
      endpoint: config.endpoint.clone(),
      public_endpoint: config.public_endpoint.clone(),
    })
  }

  pub fn object_url(&self, key: &str) -> String {
    let endpoint_for_url = self.public_endpoint.as_ref().or(self.endpoint.as_ref());

    match endpoint_for_url {
      Some(endpoint) => format!("{}/{}/{}", endpoint.trim_end_matches('/'), self.bucket, key),
      None => format!("https://{}.s3.amazonaws.com/{}", self.bucket, key),
    }
  }
}

#[async_trait]
impl FileStorage for S3Storage {
  async fn upload_file(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<String> {
    self
      .client
      .put_object()
      .bucket(&self.bucket)
      .key(key)
      .body(ByteStream::from(data))
      .content_type(content_type)
      .send()
      .await
      .map_err(|e| anyhow::anyhow!("Failed to upload file to S3: {:?}", e))?;

    Ok(self.object_url(key))
  }
}
