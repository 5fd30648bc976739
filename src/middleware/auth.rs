use axum::http::HeaderMap;

use crate::utils::error::AppError;
use crate::utils::jwt::{Claims, SessionKeys};

pub fn auth_middleware(headers: &HeaderMap, keys: &SessionKeys) -> Result<Claims, AppError> {
  let auth_header = headers
    .get(axum::http::header::AUTHORIZATION)
    .ok_or_else(|| AppError::unauthorized("Authorization header missing"))?
    .to_str()
    .map_err(|_| AppError::unauthorized("Invalid authorization header"))?;

  let token = auth_header
    .strip_prefix("Bearer ")
    .ok_or_else(|| AppError::unauthorized("Invalid authorization format"))?;

  let claims = keys.decode(token.trim()).map_err(|e| {
    tracing::debug!("rejected session token: {}", e);
    AppError::unauthorized("Invalid or expired session")
  })?;

  Ok(claims)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domains::user::model::User;
  use axum::http::{header::AUTHORIZATION, HeaderValue, StatusCode};
  use chrono::Utc;
  use uuid::Uuid;

  fn headers_with(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_str(value).expect("header value"));
    headers
  }

  #[test]
  fn test_auth_middleware_accepts_bearer_token() {
    let keys = SessionKeys::new("middleware-secret", 60);
    let user = User {
      id: Uuid::new_v4(),
      name: "Header".to_string(),
      email: "header@example.com".to_string(),
      password: String::new(),
      created_at: Utc::now(),
      updated_at: Utc::now(),
    };
    let (token, _) = keys.issue(&user).expect("issue");

    let claims = auth_middleware(&headers_with(&format!("Bearer {}", token)), &keys).expect("claims");
    assert_eq!(claims.sub, user.id);
  }

  #[test]
  fn test_auth_middleware_rejects_missing_header() {
    let keys = SessionKeys::new("middleware-secret", 60);
    let err = auth_middleware(&HeaderMap::new(), &keys).unwrap_err();
    assert_eq!(err.status_code, StatusCode::UNAUTHORIZED);
  }

  #[test]
  fn test_auth_middleware_rejects_other_schemes_and_garbage() {
    let keys = SessionKeys::new("middleware-secret", 60);

    let err = auth_middleware(&headers_with("Basic dXNlcjpwYXNz"), &keys).unwrap_err();
    assert_eq!(err.status_code, StatusCode::UNAUTHORIZED);

    let err = auth_middleware(&headers_with("Bearer not.a.jwt"), &keys).unwrap_err();
    assert_eq!(err.status_code, StatusCode::UNAUTHORIZED);
  }
}
