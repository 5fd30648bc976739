use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domains::user::model::{Session, SessionUser, User};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
  pub sub: Uuid,
  pub name: String,
  pub email: String,
  pub iat: usize,
  pub exp: usize,
}

impl Claims {
  pub fn expires_at(&self) -> DateTime<Utc> {
    Utc.timestamp_opt(self.exp as i64, 0).single().unwrap_or_else(Utc::now)
  }
}

impl From<Claims> for Session {
  fn from(claims: Claims) -> Self {
    let expires = claims.expires_at();
    Session {
      user: SessionUser {
        id: claims.sub,
        name: claims.name,
        email: claims.email,
      },
      expires,
    }
  }
}

#[derive(Clone)]
pub struct SessionKeys {
  encoding: EncodingKey,
  decoding: DecodingKey,
  max_age: Duration,
}

impl SessionKeys {
  pub fn new(secret: &str, max_age_secs: i64) -> Self {
    Self {
      encoding: EncodingKey::from_secret(secret.as_bytes()),
      decoding: DecodingKey::from_secret(secret.as_bytes()),
      max_age: Duration::seconds(max_age_secs),
    }
  }

  /// Copies the user's identity into fresh claims and signs them.
  pub fn issue(&self, user: &User) -> Result<(String, Claims), jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
      sub: user.id,
      name: user.name.clone(),
      email: user.email.clone(),
      iat: now.timestamp() as usize,
      exp: (now + self.max_age).timestamp() as usize,
    };

    let token = encode(&Header::default(), &claims, &self.encoding)?;
    Ok((token, claims))
  }

  pub fn decode(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
    Ok(token_data.claims)
  }
}
