use async_trait::async_trait;
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use super::model::{CreateVideoRequest, Video};
use crate::db::RepositoryError;

const VIDEO_COLUMNS: &str = "id, user_id, title, description, video_url, thumbnail_url, created_at, updated_at";

#[async_trait]
pub trait VideoRepository: Send + Sync {
  async fn create(&self, user_id: Uuid, req: &CreateVideoRequest) -> Result<Video, RepositoryError>;
  async fn find_all(&self) -> Result<Vec<Video>, RepositoryError>;
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Video>, RepositoryError>;
}

pub async fn create_with_executor<'e, E>(
  executor: E,
  user_id: Uuid,
  req: &CreateVideoRequest,
) -> Result<Video, RepositoryError>
where
  E: PgExecutor<'e>,
{
  let video = sqlx::query_as::<_, Video>(&format!(
    r#"
      INSERT INTO videos (id, user_id, title, description, video_url, thumbnail_url)
      VALUES ($1, $2, $3, $4, $5, $6)
      RETURNING {}
    "#,
    VIDEO_COLUMNS
  ))
  .bind(Uuid::new_v4())
  .bind(user_id)
  .bind(req.title.trim())
  .bind(req.description.trim())
  .bind(req.video_url.trim())
  .bind(req.thumbnail_url.trim())
  .fetch_one(executor)
  .await?;

  Ok(video)
}

pub async fn find_all_with_executor<'e, E>(executor: E) -> Result<Vec<Video>, RepositoryError>
where
  E: PgExecutor<'e>,
{
  let videos = sqlx::query_as::<_, Video>(&format!(
    "SELECT {} FROM videos ORDER BY created_at DESC",
    VIDEO_COLUMNS
  ))
  .fetch_all(executor)
  .await?;

  Ok(videos)
}

pub async fn find_by_id_with_executor<'e, E>(executor: E, id: Uuid) -> Result<Option<Video>, RepositoryError>
where
  E: PgExecutor<'e>,
{
  let video = sqlx::query_as::<_, Video>(&format!("SELECT {} FROM videos WHERE id = $1", VIDEO_COLUMNS))
    .bind(id)
    .fetch_optional(executor)
    .await?;

  Ok(video)
}

pub struct SqlxVideoRepository {
  pub pool: PgPool,
}

impl SqlxVideoRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl VideoRepository for SqlxVideoRepository {
  async fn create(&self, user_id: Uuid, req: &CreateVideoRequest) -> Result<Video, RepositoryError> {
    create_with_executor(&self.pool, user_id, req).await
  }

  async fn find_all(&self) -> Result<Vec<Video>, RepositoryError> {
    find_all_with_executor(&self.pool).await
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Video>, RepositoryError> {
    find_by_id_with_executor(&self.pool, id).await
  }
}
