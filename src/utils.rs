use argon2::{
  password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
  Argon2,
};
use serde::{Deserialize, Deserializer};
use validator::ValidationError;

pub mod error;
pub mod jwt;

pub fn hash_password(password: &str) -> anyhow::Result<String> {
  let salt = SaltString::generate(&mut OsRng);
  let hash = Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map_err(|e| anyhow::anyhow!("argon2 hash_password error: {}", e))?
    .to_string();
  Ok(hash)
}

/// Returns `Ok(false)` for a wrong password and `Err` only when `hash` is not a PHC string.
pub fn verify_password(password: &str, hash: &str) -> anyhow::Result<bool> {
  let parsed = PasswordHash::new(hash).map_err(|e| anyhow::anyhow!("argon2 parse hash error: {}", e))?;
  Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
}

pub fn normalize_email(email: &str) -> String {
  email.trim().to_lowercase()
}

/// Reads an absent or `null` JSON string as empty, leaving the "required" check to validation.
pub fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
  if value.trim().is_empty() {
    return Err(ValidationError::new("blank"));
  }
  Ok(())
}
