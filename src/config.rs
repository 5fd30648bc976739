use anyhow::{Context, Result};
use std::env;

/// Thirty days, the lifetime of a login session.
pub const DEFAULT_SESSION_MAX_AGE_SECS: i64 = 30 * 24 * 60 * 60;

#[derive(Debug, Clone)]
pub struct StorageConfig {
  pub endpoint: Option<String>,
  pub public_endpoint: Option<String>,
  pub access_key: String,
  pub secret_key: String,
  pub region: String,
  pub bucket: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub database_url: String,
  pub database_max_connections: u32,
  pub host: String,
  pub port: u16,
  pub jwt_secret: String,
  pub session_max_age_secs: i64,
  pub storage: StorageConfig,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    let storage = StorageConfig {
      endpoint: env::var("S3_ENDPOINT").ok(),
      public_endpoint: env::var("S3_PUBLIC_ENDPOINT").ok(),
      access_key: env::var("S3_ACCESS_KEY").context("S3_ACCESS_KEY not set")?,
      secret_key: env::var("S3_SECRET_KEY").context("S3_SECRET_KEY not set")?,
      region: env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
      bucket: env::var("S3_BUCKET").context("S3_BUCKET not set")?,
    };

    Ok(Self {
      database_url: env::var("DATABASE_URL").context("DATABASE_URL not set")?,
      database_max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 10)?,
      host: env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
      port: parse_or("APP_PORT", 8000)?,
      jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET not set")?,
      session_max_age_secs: parse_or("SESSION_MAX_AGE_SECS", DEFAULT_SESSION_MAX_AGE_SECS)?,
      storage,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.host, self.port)
  }
}

fn parse_or<T>(key: &str, default: T) -> Result<T>
where
  T: std::str::FromStr,
  T::Err: std::error::Error + Send + Sync + 'static,
{
  match env::var(key) {
    Ok(raw) => raw.trim().parse::<T>().with_context(|| format!("{} is not valid: {:?}", key, raw)),
    Err(_) => Ok(default),
  }
}
