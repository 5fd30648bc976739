use axum::{
  extract::{
    multipart::{MultipartError, MultipartRejection},
    rejection::QueryRejection,
    DefaultBodyLimit, Multipart, Query, State,
  },
  http::{HeaderMap, StatusCode},
  response::Json as JsonResponse,
  routing::post,
  Router,
};

use super::{
  model::{UploadQuery, UploadedFile},
  service::{max_size, validate_content_type, validate_size, FILE_REQUIRED, MAX_VIDEO_BYTES},
};
use crate::{
  middleware::auth::auth_middleware,
  state::{AppState, SharedAppState},
  AppError,
};

const FILE_FIELD: &str = "file";
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;
const INVALID_MULTIPART_BODY: &str = "Invalid multipart body";

pub fn upload_routes() -> Router<SharedAppState> {
  Router::new()
    .route("/upload", post(upload_handler))
    .layer(DefaultBodyLimit::max(MAX_VIDEO_BYTES + MULTIPART_OVERHEAD_BYTES))
}

fn multipart_error(err: MultipartError) -> AppError {
  if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
    return AppError::new(StatusCode::PAYLOAD_TOO_LARGE, "Request body is too large");
  }

  tracing::warn!("multipart error: {}", err.body_text());
  AppError::bad_request(INVALID_MULTIPART_BODY)
}

pub async fn upload_handler(
  State(state): State<SharedAppState>,
  query: Result<Query<UploadQuery>, QueryRejection>,
  headers: HeaderMap,
  multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, JsonResponse<UploadedFile>), AppError> {
  auth_middleware(&headers, state.session_keys())?;
  let Query(query) = query.map_err(|_| AppError::bad_request("fileType must be either video or image"))?;
  let mut multipart = multipart.map_err(|rejection| {
    tracing::warn!("multipart rejection: {}", rejection.body_text());
    AppError::bad_request(INVALID_MULTIPART_BODY)
  })?;
  let kind = query.file_type;

  while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
    if field.name() != Some(FILE_FIELD) {
      continue;
    }

    let file_name = field.file_name().map(str::to_string);
    let content_type = field
      .content_type()
      .unwrap_or("application/octet-stream")
      .to_string();
    validate_content_type(kind, &content_type)?;

    // Stop reading as soon as the limit is crossed.
    let limit = max_size(kind);
    let mut data = Vec::new();
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
      data.extend_from_slice(&chunk);
      if data.len() > limit {
        validate_size(kind, data.len())?;
      }
    }

    let uploaded = state.upload_file(kind, file_name, content_type, data).await?;
    return Ok((StatusCode::CREATED, JsonResponse(uploaded)));
  }

  Err(AppError::bad_request(FILE_REQUIRED))
}
