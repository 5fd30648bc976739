use std::{
  collections::HashMap,
  sync::{Arc, Mutex},
};

use async_trait::async_trait;
use axum::{
  body::{Body, Bytes},
  http::{Request, StatusCode},
  Router,
};
use chrono::Utc;
use serde::Serialize;
use tower::ServiceExt;
use uuid::Uuid;

use crate::{
  app::create_app,
  db::RepositoryError,
  domains::{
    upload::service::UploadServiceImpl,
    user::{model::User, repository::UserRepository, service::UserServiceImpl},
    video::{
      model::{CreateVideoRequest, Video},
      repository::VideoRepository,
      service::VideoServiceImpl,
    },
  },
  state::SharedAppState,
  storage::FileStorage,
  utils::jwt::SessionKeys,
};

pub const TEST_SECRET: &str = "test-session-secret";

#[derive(Clone, Default)]
pub struct MemoryUserRepository {
  users: Arc<Mutex<HashMap<Uuid, User>>>,
}

impl MemoryUserRepository {
  pub fn len(&self) -> usize {
    self.users.lock().unwrap().len()
  }

  pub fn find_email(&self, email: &str) -> Option<User> {
    let email = crate::utils::normalize_email(email);
    self.users.lock().unwrap().values().find(|u| u.email == email).cloned()
  }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
  async fn create(&self, name: &str, email: &str, password: &str) -> Result<User, RepositoryError> {
    let email = crate::utils::normalize_email(email);
    if self.find_email(&email).is_some() {
      return Err(RepositoryError::Conflict("Unique constraint violated".to_string()));
    }

    let password = crate::utils::hash_password(password).map_err(|e| RepositoryError::PasswordHash(e.to_string()))?;
    let now = Utc::now();
    let user = User {
      id: Uuid::new_v4(),
      name: name.trim().to_string(),
      email,
      password,
      created_at: now,
      updated_at: now,
    };

    self.users.lock().unwrap().insert(user.id, user.clone());
    Ok(user)
  }

  async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
    Ok(self.find_email(email))
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
    Ok(self.users.lock().unwrap().get(&id).cloned())
  }

  async fn update_password(&self, id: Uuid, password: &str) -> Result<User, RepositoryError> {
    let password = crate::utils::hash_password(password).map_err(|e| RepositoryError::PasswordHash(e.to_string()))?;
    let mut users = self.users.lock().unwrap();
    let user = users
      .get_mut(&id)
      .ok_or_else(|| RepositoryError::NotFound("User not found".to_string()))?;

    user.password = password;
    user.updated_at = Utc::now();
    Ok(user.clone())
  }

  async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
    Ok(self.users.lock().unwrap().remove(&id).is_some())
  }
}

/// Videos reference users through `users`, like the `videos.user_id` foreign key.
#[derive(Clone)]
pub struct MemoryVideoRepository {
  videos: Arc<Mutex<Vec<Video>>>,
  users: MemoryUserRepository,
}

impl MemoryVideoRepository {
  pub fn new(users: MemoryUserRepository) -> Self {
    Self {
      videos: Arc::default(),
      users,
    }
  }

  pub fn len(&self) -> usize {
    self.videos.lock().unwrap().len()
  }
}

#[async_trait]
impl VideoRepository for MemoryVideoRepository {
  async fn create(&self, user_id: Uuid, req: &CreateVideoRequest) -> Result<Video, RepositoryError> {
    if !self.users.users.lock().unwrap().contains_key(&user_id) {
      return Err(RepositoryError::MissingReference("Foreign key constraint violated".to_string()));
    }

    let now = Utc::now();
    let video = Video {
      id: Uuid::new_v4(),
      user_id,
      title: req.title.trim().to_string(),
      description: req.description.trim().to_string(),
      video_url: req.video_url.trim().to_string(),
      thumbnail_url: req.thumbnail_url.trim().to_string(),
      created_at: now,
      updated_at: now,
    };

    self.videos.lock().unwrap().push(video.clone());
    Ok(video)
  }

  async fn find_all(&self) -> Result<Vec<Video>, RepositoryError> {
    // Insertion order stands in for created_at.
    Ok(self.videos.lock().unwrap().iter().rev().cloned().collect())
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Video>, RepositoryError> {
    Ok(self.videos.lock().unwrap().iter().find(|v| v.id == id).cloned())
  }
}

#[derive(Clone, Default)]
pub struct MemoryStorage {
  objects: Arc<Mutex<HashMap<String, (Vec<u8>, String)>>>,
}

impl MemoryStorage {
  pub fn len(&self) -> usize {
    self.objects.lock().unwrap().len()
  }

  pub fn object(&self, key: &str) -> Option<Vec<u8>> {
    self.objects.lock().unwrap().get(key).map(|(data, _)| data.clone())
  }

  pub fn content_type(&self, key: &str) -> Option<String> {
    self.objects.lock().unwrap().get(key).map(|(_, ct)| ct.clone())
  }
}

#[async_trait]
impl FileStorage for MemoryStorage {
  async fn upload_file(&self, key: &str, data: Vec<u8>, content_type: &str) -> anyhow::Result<String> {
    self
      .objects
      .lock()
      .unwrap()
      .insert(key.to_string(), (data, content_type.to_string()));
    Ok(format!("https://media.test/{}", key))
  }
}

pub struct TestApp {
  pub router: Router,
  pub users: MemoryUserRepository,
  pub videos: MemoryVideoRepository,
  pub storage: Arc<MemoryStorage>,
  pub keys: SessionKeys,
}

impl TestApp {
  /// Registers a user directly in the repository and returns a signed session token for it.
  pub async fn user_with_token(&self, email: &str) -> (User, String) {
    let user = self.users.create("Test User", email, "password123").await.expect("create user");
    let (token, _) = self.keys.issue(&user).expect("issue token");
    (user, token)
  }
}

pub fn memory_app() -> TestApp {
  let users = MemoryUserRepository::default();
  let videos = MemoryVideoRepository::new(users.clone());
  let storage = Arc::new(MemoryStorage::default());
  let keys = SessionKeys::new(TEST_SECRET, 3600);

  let state = SharedAppState::from_services(
    Arc::new(UserServiceImpl::new(users.clone(), keys.clone())),
    Arc::new(VideoServiceImpl::new(videos.clone())),
    Arc::new(UploadServiceImpl::new(storage.clone())),
    keys.clone(),
  );

  TestApp {
    router: create_app(state),
    users,
    videos,
    storage,
    keys,
  }
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Bytes) {
  let response = app.oneshot(request).await.expect("handle request");
  let status = response.status();
  let body = axum::body::to_bytes(response.into_body(), usize::MAX)
    .await
    .expect("read response body");
  (status, body)
}

fn json_request<T: Serialize>(method: &str, uri: &str, token: Option<&str>, body: &T) -> Request<Body> {
  let mut builder = Request::builder()
    .method(method)
    .uri(uri)
    .header("content-type", "application/json");
  if let Some(token) = token {
    builder = builder.header("authorization", format!("Bearer {}", token));
  }

  builder
    .body(Body::from(serde_json::to_vec(body).expect("serialize request body")))
    .expect("build request")
}

fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
  let mut builder = Request::builder().method(method).uri(uri);
  if let Some(token) = token {
    builder = builder.header("authorization", format!("Bearer {}", token));
  }

  builder.body(Body::empty()).expect("build request")
}

pub async fn post_json<T: Serialize>(app: Router, uri: &str, body: &T) -> (StatusCode, Bytes) {
  send(app, json_request("POST", uri, None, body)).await
}

pub async fn post_json_with_token<T: Serialize>(app: Router, uri: &str, token: &str, body: &T) -> (StatusCode, Bytes) {
  send(app, json_request("POST", uri, Some(token), body)).await
}

pub async fn put_json<T: Serialize>(app: Router, uri: &str, body: &T) -> (StatusCode, Bytes) {
  send(app, json_request("PUT", uri, None, body)).await
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Bytes) {
  send(app, empty_request("GET", uri, None)).await
}

pub async fn get_with_token(app: Router, uri: &str, token: &str) -> (StatusCode, Bytes) {
  send(app, empty_request("GET", uri, Some(token))).await
}

pub async fn delete(app: Router, uri: &str) -> (StatusCode, Bytes) {
  send(app, empty_request("DELETE", uri, None)).await
}

pub fn multipart_request(uri: &str, token: Option<&str>, content_type: &str, file_name: &str, data: &[u8]) -> Request<Body> {
  const BOUNDARY: &str = "vidshare-test-boundary";

  let mut body = Vec::new();
  body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
  body.extend_from_slice(
    format!(
      "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
      file_name, content_type
    )
    .as_bytes(),
  );
  body.extend_from_slice(data);
  body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

  let mut builder = Request::builder()
    .method("POST")
    .uri(uri)
    .header("content-type", format!("multipart/form-data; boundary={}", BOUNDARY));
  if let Some(token) = token {
    builder = builder.header("authorization", format!("Bearer {}", token));
  }

  builder.body(Body::from(body)).expect("build request")
}

pub fn error_message(body: &Bytes) -> String {
  let json: serde_json::Value = serde_json::from_slice(body).expect("error body is json");
  json["error"].as_str().unwrap_or_default().to_string()
}
