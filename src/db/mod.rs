use std::error::Error;

pub mod pool;

#[derive(Debug)]
pub enum RepositoryError {
  DatabaseError(sqlx::Error),
  NotFound(String),
  Conflict(String),
  /// A referenced row (e.g. a video's owner) does not exist.
  MissingReference(String),
  PasswordHash(String),
}

impl Error for RepositoryError {}

impl std::fmt::Display for RepositoryError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      RepositoryError::DatabaseError(e) => write!(f, "Database error: {}", e),
      RepositoryError::NotFound(msg) => write!(f, "Not found: {}", msg),
      RepositoryError::Conflict(msg) => write!(f, "Conflict: {}", msg),
      RepositoryError::MissingReference(msg) => write!(f, "Missing reference: {}", msg),
      RepositoryError::PasswordHash(msg) => write!(f, "Password hash error: {}", msg),
    }
  }
}

impl From<sqlx::Error> for RepositoryError {
  fn from(err: sqlx::Error) -> Self {
    let (unique_violation, foreign_key_violation) = err
      .as_database_error()
      .map(|db_err| (db_err.is_unique_violation(), db_err.is_foreign_key_violation()))
      .unwrap_or((false, false));

    if unique_violation {
      RepositoryError::Conflict("Unique constraint violated".to_string())
    } else if foreign_key_violation {
      RepositoryError::MissingReference("Foreign key constraint violated".to_string())
    } else {
      RepositoryError::DatabaseError(err)
    }
  }
}
