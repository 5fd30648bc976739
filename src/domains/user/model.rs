use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor};
use uuid::Uuid;
use validator::Validate;

use crate::db::RepositoryError;

#[derive(Debug, Clone, FromRow, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  pub id: Uuid,
  pub name: String,
  pub email: String,
  /// Argon2 PHC string, never serialized.
  #[serde(skip_serializing, default)]
  pub password: String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct RegisterRequest {
  #[serde(default, deserialize_with = "crate::utils::null_as_empty")]
  #[validate(custom(function = "crate::utils::not_blank"))]
  pub name: String,
  #[serde(default, deserialize_with = "crate::utils::null_as_empty")]
  #[validate(custom(function = "crate::utils::not_blank"))]
  pub email: String,
  #[serde(default, deserialize_with = "crate::utils::null_as_empty")]
  #[validate(length(min = 1))]
  pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct LoginRequest {
  #[serde(default, deserialize_with = "crate::utils::null_as_empty")]
  #[validate(custom(function = "crate::utils::not_blank"))]
  pub email: String,
  #[serde(default, deserialize_with = "crate::utils::null_as_empty")]
  #[validate(length(min = 1))]
  pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
  #[serde(default, deserialize_with = "crate::utils::null_as_empty")]
  #[validate(length(min = 1))]
  pub current_password: String,
  #[serde(default, deserialize_with = "crate::utils::null_as_empty")]
  #[validate(length(min = 1))]
  pub new_password: String,
  #[serde(default, deserialize_with = "crate::utils::null_as_empty")]
  #[validate(length(min = 1))]
  pub confirm_new_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionUser {
  pub id: Uuid,
  pub name: String,
  pub email: String,
}

/// What the client sees of a login: `user.id` is the stable identifier copied from the token.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Session {
  pub user: SessionUser,
  pub expires: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginResponse {
  pub token: String,
  pub session: Session,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MessageResponse {
  pub message: String,
}

impl MessageResponse {
  pub fn new(message: impl Into<String>) -> Self {
    Self { message: message.into() }
  }
}

const USER_COLUMNS: &str = "id, name, email, password, created_at, updated_at";

fn hash_for_storage(password: &str) -> Result<String, RepositoryError> {
  crate::utils::hash_password(password).map_err(|e| RepositoryError::PasswordHash(e.to_string()))
}

impl User {
  /// Inserts a user. `password` is plaintext and is hashed here, right before the write.
  pub async fn create_with_executor<'e, E>(
    executor: E,
    name: &str,
    email: &str,
    password: &str,
  ) -> Result<User, RepositoryError>
  where
    E: PgExecutor<'e>,
  {
    let hashed_password = hash_for_storage(password)?;

    let user = sqlx::query_as::<_, User>(&format!(
      "INSERT INTO users (id, name, email, password) VALUES ($1, $2, $3, $4) RETURNING {}",
      USER_COLUMNS
    ))
    .bind(Uuid::new_v4())
    .bind(name.trim())
    .bind(crate::utils::normalize_email(email))
    .bind(hashed_password)
    .fetch_one(executor)
    .await?;

    Ok(user)
  }

  pub async fn find_by_email<'e, E>(executor: E, email: &str) -> Result<Option<User>, RepositoryError>
  where
    E: PgExecutor<'e>,
  {
    let user = sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS))
      .bind(crate::utils::normalize_email(email))
      .fetch_optional(executor)
      .await?;

    Ok(user)
  }

  pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<User>, RepositoryError>
  where
    E: PgExecutor<'e>,
  {
    let user = sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
      .bind(id)
      .fetch_optional(executor)
      .await?;

    Ok(user)
  }

  /// Replaces the stored hash with one computed from the new plaintext `password`.
  pub async fn update_password_with_executor<'e, E>(
    executor: E,
    id: Uuid,
    password: &str,
  ) -> Result<User, RepositoryError>
  where
    E: PgExecutor<'e>,
  {
    let hashed_password = hash_for_storage(password)?;

    let user = sqlx::query_as::<_, User>(&format!(
      "UPDATE users SET password = $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
      USER_COLUMNS
    ))
    .bind(id)
    .bind(hashed_password)
    .fetch_optional(executor)
    .await?;

    user.ok_or_else(|| RepositoryError::NotFound("User not found".to_string()))
  }

  pub async fn delete_with_executor<'e, E>(executor: E, id: Uuid) -> Result<bool, RepositoryError>
  where
    E: PgExecutor<'e>,
  {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
      .bind(id)
      .execute(executor)
      .await?;

    Ok(result.rows_affected() > 0)
  }
}
