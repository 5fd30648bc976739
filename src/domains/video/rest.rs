use axum::{
  extract::{rejection::JsonRejection, Json, Path, State},
  http::{HeaderMap, StatusCode},
  response::Json as JsonResponse,
  routing::get,
  Router,
};

use super::model::{CreateVideoRequest, Video, VideosResponse};
use crate::{
  middleware::auth::auth_middleware,
  state::{AppState, SharedAppState},
  AppError,
};

pub fn video_routes() -> Router<SharedAppState> {
  Router::new()
    .route("/videos", get(get_videos_handler).post(create_video_handler))
    .route("/videos/{video_id}", get(get_video_handler))
}

pub async fn get_videos_handler(State(state): State<SharedAppState>) -> Result<JsonResponse<VideosResponse>, AppError> {
  state.get_videos().await.map(JsonResponse).map_err(Into::into)
}

pub async fn get_video_handler(
  State(state): State<SharedAppState>,
  Path(video_id): Path<String>,
) -> Result<JsonResponse<Video>, AppError> {
  state.get_video(&video_id).await.map(JsonResponse).map_err(Into::into)
}

pub async fn create_video_handler(
  State(state): State<SharedAppState>,
  headers: HeaderMap,
  payload: Result<Json<CreateVideoRequest>, JsonRejection>,
) -> Result<(StatusCode, JsonResponse<Video>), AppError> {
  let claims = auth_middleware(&headers, state.session_keys())?;
  let Json(payload) = payload?;

  let video = state.create_video(claims.sub, payload).await?;
  Ok((StatusCode::CREATED, JsonResponse(video)))
}
