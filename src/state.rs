use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
  domains::{
    upload::{
      model::{FileKind, UploadedFile},
      service::{UploadService, UploadServiceError, UploadServiceImpl},
    },
    user::{
      model::{LoginRequest, LoginResponse, RegisterRequest, UpdatePasswordRequest, User},
      repository::SqlxUserRepository,
      service::{UserService, UserServiceError, UserServiceImpl},
    },
    video::{
      model::{CreateVideoRequest, Video, VideosResponse},
      repository::SqlxVideoRepository,
      service::{VideoService, VideoServiceError, VideoServiceImpl},
    },
  },
  storage::FileStorage,
  utils::jwt::SessionKeys,
};

pub trait AppState: Clone + Send + Sync + 'static {
  fn session_keys(&self) -> &SessionKeys;
  fn register(&self, req: RegisterRequest) -> impl std::future::Future<Output = Result<User, UserServiceError>> + Send;
  fn authorize(
    &self,
    req: LoginRequest,
  ) -> impl std::future::Future<Output = Result<LoginResponse, UserServiceError>> + Send;
  fn get_user(&self, user_id: &str) -> impl std::future::Future<Output = Result<User, UserServiceError>> + Send;
  fn delete_user(&self, user_id: &str) -> impl std::future::Future<Output = Result<(), UserServiceError>> + Send;
  fn update_password(
    &self,
    user_id: &str,
    req: UpdatePasswordRequest,
  ) -> impl std::future::Future<Output = Result<(), UserServiceError>> + Send;
  fn get_videos(&self) -> impl std::future::Future<Output = Result<VideosResponse, VideoServiceError>> + Send;
  fn get_video(&self, video_id: &str) -> impl std::future::Future<Output = Result<Video, VideoServiceError>> + Send;
  fn create_video(
    &self,
    user_id: Uuid,
    req: CreateVideoRequest,
  ) -> impl std::future::Future<Output = Result<Video, VideoServiceError>> + Send;
  fn upload_file(
    &self,
    kind: FileKind,
    file_name: Option<String>,
    content_type: String,
    data: Vec<u8>,
  ) -> impl std::future::Future<Output = Result<UploadedFile, UploadServiceError>> + Send;
}

#[derive(Clone)]
pub struct SharedAppState {
  pub user_service: Arc<dyn UserService>,
  pub video_service: Arc<dyn VideoService>,
  pub upload_service: Arc<dyn UploadService>,
  pub session_keys: SessionKeys,
}

impl SharedAppState {
  pub fn new(pool: PgPool, storage: Arc<dyn FileStorage>, session_keys: SessionKeys) -> Self {
    let user_repository = SqlxUserRepository::new(pool.clone());
    let video_repository = SqlxVideoRepository::new(pool);

    Self {
      user_service: Arc::new(UserServiceImpl::new(user_repository, session_keys.clone())),
      video_service: Arc::new(VideoServiceImpl::new(video_repository)),
      upload_service: Arc::new(UploadServiceImpl::new(storage)),
      session_keys,
    }
  }

  pub fn from_services(
    user_service: Arc<dyn UserService>,
    video_service: Arc<dyn VideoService>,
    upload_service: Arc<dyn UploadService>,
    session_keys: SessionKeys,
  ) -> Self {
    Self {
      user_service,
      video_service,
      upload_service,
      session_keys,
    }
  }
}

impl AppState for SharedAppState {
  fn session_keys(&self) -> &SessionKeys {
    &self.session_keys
  }

  async fn register(&self, req: RegisterRequest) -> Result<User, UserServiceError> {
    self.user_service.register(req).await
  }

  async fn authorize(&self, req: LoginRequest) -> Result<LoginResponse, UserServiceError> {
    self.user_service.authorize(req).await
  }

  async fn get_user(&self, user_id: &str) -> Result<User, UserServiceError> {
    self.user_service.get_user(user_id).await
  }

  async fn delete_user(&self, user_id: &str) -> Result<(), UserServiceError> {
    self.user_service.delete_user(user_id).await
  }

  async fn update_password(&self, user_id: &str, req: UpdatePasswordRequest) -> Result<(), UserServiceError> {
    self.user_service.update_password(user_id, req).await
  }

  async fn get_videos(&self) -> Result<VideosResponse, VideoServiceError> {
    self.video_service.get_videos().await
  }

  async fn get_video(&self, video_id: &str) -> Result<Video, VideoServiceError> {
    self.video_service.get_video(video_id).await
  }

  async fn create_video(&self, user_id: Uuid, req: CreateVideoRequest) -> Result<Video, VideoServiceError> {
    self.video_service.create_video(user_id, req).await
  }

  async fn upload_file(
    &self,
    kind: FileKind,
    file_name: Option<String>,
    content_type: String,
    data: Vec<u8>,
  ) -> Result<UploadedFile, UploadServiceError> {
    self.upload_service.upload_file(kind, file_name, content_type, data).await
  }
}
