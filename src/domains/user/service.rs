use async_trait::async_trait;
use std::error::Error;
use uuid::Uuid;
use validator::Validate;

use super::{
  model::{LoginRequest, LoginResponse, RegisterRequest, Session, UpdatePasswordRequest, User},
  repository::UserRepository,
};
use crate::{db::RepositoryError, impl_service_error_conversions, utils::jwt::SessionKeys};

pub const ALL_FIELDS_REQUIRED: &str = "All fields are required";
pub const USER_ALREADY_EXISTS: &str = "User already exists";
pub const USER_NOT_FOUND: &str = "User not found";
pub const USER_ID_REQUIRED: &str = "User id is required";
pub const INCORRECT_PASSWORD: &str = "Incorrect password";
pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match";
pub const CURRENT_PASSWORD_INCORRECT: &str = "Current password is incorrect";

#[derive(Debug)]
pub enum UserServiceError {
  Unauthorized(String),
  ValidationError(String),
  InternalServerError(String),
  UserNotFound(String),
}

impl Error for UserServiceError {}

impl std::fmt::Display for UserServiceError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      UserServiceError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
      UserServiceError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
      UserServiceError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
      UserServiceError::UserNotFound(msg) => write!(f, "User Not Found: {}", msg),
    }
  }
}

impl_service_error_conversions!(UserServiceError, InternalServerError, UserNotFound);

#[async_trait]
pub trait UserService: Send + Sync {
  async fn register(&self, req: RegisterRequest) -> Result<User, UserServiceError>;
  async fn authorize(&self, req: LoginRequest) -> Result<LoginResponse, UserServiceError>;
  async fn get_user(&self, user_id: &str) -> Result<User, UserServiceError>;
  async fn delete_user(&self, user_id: &str) -> Result<(), UserServiceError>;
  async fn update_password(&self, user_id: &str, req: UpdatePasswordRequest) -> Result<(), UserServiceError>;
}

pub struct UserServiceImpl<U> {
  user_repository: U,
  session_keys: SessionKeys,
}

impl<U> UserServiceImpl<U>
where
  U: UserRepository,
{
  pub fn new(user_repository: U, session_keys: SessionKeys) -> Self {
    Self {
      user_repository,
      session_keys,
    }
  }

  async fn find_existing(&self, user_id: &str) -> Result<User, UserServiceError> {
    let id = match parse_user_id(user_id) {
      Some(id) => id,
      None => return Err(UserServiceError::UserNotFound(USER_NOT_FOUND.to_string())),
    };

    self
      .user_repository
      .find_by_id(id)
      .await?
      .ok_or_else(|| UserServiceError::UserNotFound(USER_NOT_FOUND.to_string()))
  }
}

/// Ids that are not UUIDs cannot name a stored user.
fn parse_user_id(raw: &str) -> Option<Uuid> {
  Uuid::parse_str(raw.trim()).ok()
}

fn check_password(plain: &str, hash: &str) -> Result<bool, UserServiceError> {
  crate::utils::verify_password(plain, hash)
    .map_err(|e| UserServiceError::InternalServerError(format!("Password verification failed: {}", e)))
}

#[async_trait]
impl<U> UserService for UserServiceImpl<U>
where
  U: UserRepository,
{
  async fn register(&self, req: RegisterRequest) -> Result<User, UserServiceError> {
    req
      .validate()
      .map_err(|_| UserServiceError::ValidationError(ALL_FIELDS_REQUIRED.to_string()))?;

    let email = crate::utils::normalize_email(&req.email);

    if self.user_repository.find_by_email(&email).await?.is_some() {
      tracing::warn!(email = %email, "email already registered");
      return Err(UserServiceError::ValidationError(USER_ALREADY_EXISTS.to_string()));
    }

    let user = match self.user_repository.create(&req.name, &email, &req.password).await {
      Ok(user) => user,
      Err(RepositoryError::Conflict(_)) => {
        return Err(UserServiceError::ValidationError(USER_ALREADY_EXISTS.to_string()));
      }
      Err(e) => return Err(e.into()),
    };

    tracing::info!(user_id = %user.id, "user registered");
    Ok(user)
  }

  async fn authorize(&self, req: LoginRequest) -> Result<LoginResponse, UserServiceError> {
    req
      .validate()
      .map_err(|_| UserServiceError::ValidationError(ALL_FIELDS_REQUIRED.to_string()))?;

    let user = self
      .user_repository
      .find_by_email(&req.email)
      .await?
      .ok_or_else(|| UserServiceError::Unauthorized(USER_NOT_FOUND.to_string()))?;

    if !check_password(&req.password, &user.password)? {
      tracing::warn!(user_id = %user.id, "login with incorrect password");
      return Err(UserServiceError::Unauthorized(INCORRECT_PASSWORD.to_string()));
    }

    let (token, claims) = self
      .session_keys
      .issue(&user)
      .map_err(|e| UserServiceError::InternalServerError(format!("JWT encoding failed: {}", e)))?;

    tracing::info!(user_id = %user.id, "user logged in");
    Ok(LoginResponse {
      token,
      session: Session::from(claims),
    })
  }

  async fn get_user(&self, user_id: &str) -> Result<User, UserServiceError> {
    self.find_existing(user_id).await
  }

  async fn delete_user(&self, user_id: &str) -> Result<(), UserServiceError> {
    if user_id.trim().is_empty() {
      return Err(UserServiceError::ValidationError(USER_ID_REQUIRED.to_string()));
    }

    let user = self.find_existing(user_id).await?;

    if !self.user_repository.delete(user.id).await? {
      return Err(UserServiceError::UserNotFound(USER_NOT_FOUND.to_string()));
    }

    tracing::info!(user_id = %user.id, "user deleted");
    Ok(())
  }

  async fn update_password(&self, user_id: &str, req: UpdatePasswordRequest) -> Result<(), UserServiceError> {
    req
      .validate()
      .map_err(|_| UserServiceError::ValidationError(ALL_FIELDS_REQUIRED.to_string()))?;

    if req.new_password != req.confirm_new_password {
      return Err(UserServiceError::ValidationError(PASSWORDS_DO_NOT_MATCH.to_string()));
    }

    let user = self.find_existing(user_id).await?;

    if !check_password(&req.current_password, &user.password)? {
      return Err(UserServiceError::ValidationError(CURRENT_PASSWORD_INCORRECT.to_string()));
    }

    self.user_repository.update_password(user.id, &req.new_password).await?;

    tracing::info!(user_id = %user.id, "password updated");
    Ok(())
  }
}
