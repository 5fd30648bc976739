use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::model::User;
use crate::db::RepositoryError;

/// Persistence for users. Implementations receive plaintext passwords and store only hashes.
#[async_trait]
pub trait UserRepository: Send + Sync {
  async fn create(&self, name: &str, email: &str, password: &str) -> Result<User, RepositoryError>;
  async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;
  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError>;
  async fn update_password(&self, id: Uuid, password: &str) -> Result<User, RepositoryError>;
  async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
}

pub struct SqlxUserRepository {
  pub pool: PgPool,
}

impl SqlxUserRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
  async fn create(&self, name: &str, email: &str, password: &str) -> Result<User, RepositoryError> {
    User::create_with_executor(&self.pool, name, email, password).await
  }

  async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
    User::find_by_email(&self.pool, email).await
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
    User::find_by_id(&self.pool, id).await
  }

  async fn update_password(&self, id: Uuid, password: &str) -> Result<User, RepositoryError> {
    User::update_password_with_executor(&self.pool, id, password).await
  }

  async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
    User::delete_with_executor(&self.pool, id).await
  }
}
