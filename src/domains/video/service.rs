use async_trait::async_trait;
use std::error::Error;
use uuid::Uuid;
use validator::{Validate, ValidateUrl};

use super::{
  model::{CreateVideoRequest, Video, VideosResponse},
  repository::VideoRepository,
};
use crate::{db::RepositoryError, impl_service_error_conversions};

pub const ALL_FIELDS_REQUIRED: &str = "All fields are required";
pub const INVALID_MEDIA_URL: &str = "videoUrl and thumbnailUrl must be valid URLs";
pub const VIDEO_NOT_FOUND: &str = "Video not found";
pub const OWNER_NOT_FOUND: &str = "User not found";

#[derive(Debug)]
pub enum VideoServiceError {
  ValidationError(String),
  NotFound(String),
  InternalServerError(String),
}

impl Error for VideoServiceError {}

impl std::fmt::Display for VideoServiceError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      VideoServiceError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
      VideoServiceError::NotFound(msg) => write!(f, "Not Found: {}", msg),
      VideoServiceError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
    }
  }
}

impl_service_error_conversions!(VideoServiceError, InternalServerError, NotFound);

#[async_trait]
pub trait VideoService: Send + Sync {
  async fn get_videos(&self) -> Result<VideosResponse, VideoServiceError>;
  async fn get_video(&self, video_id: &str) -> Result<Video, VideoServiceError>;
  async fn create_video(&self, user_id: Uuid, req: CreateVideoRequest) -> Result<Video, VideoServiceError>;
}

pub struct VideoServiceImpl<R> {
  video_repository: R,
}

impl<R> VideoServiceImpl<R>
where
  R: VideoRepository,
{
  pub fn new(video_repository: R) -> Self {
    Self { video_repository }
  }
}

#[async_trait]
impl<R> VideoService for VideoServiceImpl<R>
where
  R: VideoRepository,
{
  async fn get_videos(&self) -> Result<VideosResponse, VideoServiceError> {
    let videos = self.video_repository.find_all().await?;
    Ok(VideosResponse { videos })
  }

  async fn get_video(&self, video_id: &str) -> Result<Video, VideoServiceError> {
    let id = Uuid::parse_str(video_id.trim()).map_err(|_| VideoServiceError::NotFound(VIDEO_NOT_FOUND.to_string()))?;

    self
      .video_repository
      .find_by_id(id)
      .await?
      .ok_or_else(|| VideoServiceError::NotFound(VIDEO_NOT_FOUND.to_string()))
  }

  async fn create_video(&self, user_id: Uuid, req: CreateVideoRequest) -> Result<Video, VideoServiceError> {
    req
      .validate()
      .map_err(|_| VideoServiceError::ValidationError(ALL_FIELDS_REQUIRED.to_string()))?;

    if !req.video_url.trim().validate_url() || !req.thumbnail_url.trim().validate_url() {
      return Err(VideoServiceError::ValidationError(INVALID_MEDIA_URL.to_string()));
    }

    // The session can outlive its user.
    let video = match self.video_repository.create(user_id, &req).await {
      Ok(video) => video,
      Err(RepositoryError::MissingReference(_)) => {
        tracing::warn!(user_id = %user_id, "video posted for a deleted user");
        return Err(VideoServiceError::NotFound(OWNER_NOT_FOUND.to_string()));
      }
      Err(e) => return Err(e.into()),
    };

    tracing::info!(video_id = %video.id, user_id = %user_id, "video created");
    Ok(video)
  }
}
