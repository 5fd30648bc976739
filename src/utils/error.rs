use axum::{
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde_json::json;

pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

#[derive(Debug)]
pub struct AppError {
  pub status_code: StatusCode,
  pub message: String,
}

impl AppError {
  pub fn new(status_code: StatusCode, message: impl Into<String>) -> Self {
    Self {
      status_code,
      message: message.into(),
    }
  }

  pub fn bad_request(message: impl Into<String>) -> Self {
    Self::new(StatusCode::BAD_REQUEST, message)
  }

  pub fn unauthorized(message: impl Into<String>) -> Self {
    Self::new(StatusCode::UNAUTHORIZED, message)
  }

  pub fn not_found(message: impl Into<String>) -> Self {
    Self::new(StatusCode::NOT_FOUND, message)
  }

  /// Logs `detail` and answers with the generic message so internals never reach the client.
  pub fn internal_server_error(detail: impl std::fmt::Display) -> Self {
    tracing::error!(error = %detail, "request failed");
    Self::new(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR_MESSAGE)
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    let body = Json(json!({
      "error": self.message,
      "status_code": self.status_code.as_u16(),
    }));

    (self.status_code, body).into_response()
  }
}

impl From<AppError> for StatusCode {
  fn from(err: AppError) -> Self {
    err.status_code
  }
}

impl From<sqlx::Error> for AppError {
  fn from(error: sqlx::Error) -> Self {
    AppError::internal_server_error(format!("Database error: {:?}", error))
  }
}

impl From<JsonRejection> for AppError {
  fn from(rejection: JsonRejection) -> Self {
    tracing::warn!("JSON rejection: {}", rejection.body_text());
    AppError::bad_request("Invalid JSON body")
  }
}

impl From<crate::domains::user::service::UserServiceError> for AppError {
  fn from(error: crate::domains::user::service::UserServiceError) -> Self {
    use crate::domains::user::service::UserServiceError;
    match error {
      UserServiceError::ValidationError(msg) => AppError::bad_request(msg),
      UserServiceError::Unauthorized(msg) => AppError::unauthorized(msg),
      UserServiceError::UserNotFound(msg) => AppError::not_found(msg),
      UserServiceError::InternalServerError(msg) => AppError::internal_server_error(msg),
    }
  }
}

impl From<crate::domains::video::service::VideoServiceError> for AppError {
  fn from(error: crate::domains::video::service::VideoServiceError) -> Self {
    use crate::domains::video::service::VideoServiceError;
    match error {
      VideoServiceError::ValidationError(msg) => AppError::bad_request(msg),
      VideoServiceError::NotFound(msg) => AppError::not_found(msg),
      VideoServiceError::InternalServerError(msg) => AppError::internal_server_error(msg),
    }
  }
}

impl From<crate::domains::upload::service::UploadServiceError> for AppError {
  fn from(error: crate::domains::upload::service::UploadServiceError) -> Self {
    use crate::domains::upload::service::UploadServiceError;
    match error {
      UploadServiceError::BadRequest(msg) => AppError::bad_request(msg),
      UploadServiceError::InternalServerError(msg) => AppError::internal_server_error(msg),
    }
  }
}
