use async_trait::async_trait;
use std::{error::Error, sync::Arc};
use uuid::Uuid;

use super::model::{FileKind, UploadedFile};
use crate::storage::FileStorage;

pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;
pub const MAX_VIDEO_BYTES: usize = 100 * 1024 * 1024;
pub const ALLOWED_IMAGE_TYPES: [&str; 5] = ["image/jpeg", "image/png", "image/gif", "image/svg+xml", "image/webp"];

pub const FILE_REQUIRED: &str = "File is required";
pub const NOT_A_VIDEO: &str = "Please upload a video file";
pub const NOT_AN_IMAGE: &str = "Please upload an image file (jpeg, png, gif, svg, webp)";
pub const VIDEO_TOO_LARGE: &str = "File size should be less than 100MB";
pub const IMAGE_TOO_LARGE: &str = "File size should be less than 10MB";

#[derive(Debug)]
pub enum UploadServiceError {
  BadRequest(String),
  InternalServerError(String),
}

impl Error for UploadServiceError {}

impl std::fmt::Display for UploadServiceError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      UploadServiceError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
      UploadServiceError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
    }
  }
}

pub fn max_size(kind: FileKind) -> usize {
  match kind {
    FileKind::Image => MAX_IMAGE_BYTES,
    FileKind::Video => MAX_VIDEO_BYTES,
  }
}

/// Parameters such as `; charset=utf-8` are ignored.
pub fn validate_content_type(kind: FileKind, content_type: &str) -> Result<(), UploadServiceError> {
  let content_type = content_type
    .split(';')
    .next()
    .unwrap_or_default()
    .trim()
    .to_ascii_lowercase();
  match kind {
    FileKind::Video if !content_type.starts_with("video/") => Err(UploadServiceError::BadRequest(NOT_A_VIDEO.to_string())),
    FileKind::Image if !ALLOWED_IMAGE_TYPES.contains(&content_type.as_str()) => {
      Err(UploadServiceError::BadRequest(NOT_AN_IMAGE.to_string()))
    }
    _ => Ok(()),
  }
}

/// A file of exactly the limit is accepted.
pub fn validate_size(kind: FileKind, size: usize) -> Result<(), UploadServiceError> {
  if size <= max_size(kind) {
    return Ok(());
  }

  let message = match kind {
    FileKind::Image => IMAGE_TOO_LARGE,
    FileKind::Video => VIDEO_TOO_LARGE,
  };
  Err(UploadServiceError::BadRequest(message.to_string()))
}

fn sanitize_file_name(kind: FileKind, file_name: Option<&str>) -> String {
  let base = file_name
    .and_then(|name| name.rsplit(|c: char| c == '/' || c == '\\').next())
    .unwrap_or_default();

  let cleaned: String = base
    .chars()
    .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
    .collect();

  if cleaned.trim_matches(|c: char| c == '.' || c == '_').is_empty() {
    kind.default_file_name().to_string()
  } else {
    cleaned
  }
}

/// Returns `(object key, stored file name)`. The name is prefixed with a UUID so uploads never collide.
pub fn object_key(kind: FileKind, file_name: Option<&str>) -> (String, String) {
  let name = format!("{}_{}", Uuid::new_v4().simple(), sanitize_file_name(kind, file_name));
  (format!("{}/{}", kind.folder(), name), name)
}

#[async_trait]
pub trait UploadService: Send + Sync {
  async fn upload_file(
    &self,
    kind: FileKind,
    file_name: Option<String>,
    content_type: String,
    data: Vec<u8>,
  ) -> Result<UploadedFile, UploadServiceError>;
}

pub struct UploadServiceImpl {
  storage: Arc<dyn FileStorage>,
}

impl UploadServiceImpl {
  pub fn new(storage: Arc<dyn FileStorage>) -> Self {
    Self { storage }
  }
}

#[async_trait]
impl UploadService for UploadServiceImpl {
  async fn upload_file(
    &self,
    kind: FileKind,
    file_name: Option<String>,
    content_type: String,
    data: Vec<u8>,
  ) -> Result<UploadedFile, UploadServiceError> {
    if data.is_empty() {
      return Err(UploadServiceError::BadRequest(FILE_REQUIRED.to_string()));
    }
    validate_content_type(kind, &content_type)?;
    validate_size(kind, data.len())?;

    let size = data.len();
    let (key, name) = object_key(kind, file_name.as_deref());

    let url = self
      .storage
      .upload_file(&key, data, &content_type)
      .await
      .map_err(|e| UploadServiceError::InternalServerError(format!("Failed to upload to storage: {}", e)))?;

    tracing::info!(key = %key, size, file_type = ?kind, "file uploaded");
    Ok(UploadedFile {
      url,
      file_path: key,
      name,
      file_type: kind,
      size,
    })
  }
}
