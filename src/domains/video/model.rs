use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, FromRow, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
  pub id: Uuid,
  pub user_id: Uuid,
  pub title: String,
  pub description: String,
  pub video_url: String,
  pub thumbnail_url: String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVideoRequest {
  #[serde(default, deserialize_with = "crate::utils::null_as_empty")]
  #[validate(custom(function = "crate::utils::not_blank"))]
  pub title: String,
  #[serde(default, deserialize_with = "crate::utils::null_as_empty")]
  #[validate(custom(function = "crate::utils::not_blank"))]
  pub description: String,
  #[serde(default, deserialize_with = "crate::utils::null_as_empty")]
  #[validate(custom(function = "crate::utils::not_blank"))]
  pub video_url: String,
  #[serde(default, deserialize_with = "crate::utils::null_as_empty")]
  #[validate(custom(function = "crate::utils::not_blank"))]
  pub thumbnail_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VideosResponse {
  pub videos: Vec<Video>,
}
