use axum::{
  extract::{rejection::JsonRejection, Json, Path, State},
  http::{HeaderMap, StatusCode},
  response::Json as JsonResponse,
  routing::{delete, get, post},
  Router,
};

use super::model::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest, Session, UpdatePasswordRequest, User};
use crate::{
  middleware::auth::auth_middleware,
  state::{AppState, SharedAppState},
  AppError,
};

pub fn user_routes() -> Router<SharedAppState> {
  Router::new()
    .route("/auth/register", post(register_handler))
    .route("/auth/login", post(login_handler))
    .route("/auth/session", get(session_handler))
    .route("/user/", delete(delete_without_id_handler))
    .route(
      "/user/{user_id}",
      get(get_user_handler).delete(delete_user_handler).put(update_password_handler),
    )
}

pub async fn register_handler(
  State(state): State<SharedAppState>,
  payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, JsonResponse<MessageResponse>), AppError> {
  let Json(payload) = payload?;
  state.register(payload).await?;

  Ok((
    StatusCode::CREATED,
    JsonResponse(MessageResponse::new("User registered successfully")),
  ))
}

pub async fn login_handler(
  State(state): State<SharedAppState>,
  payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<JsonResponse<LoginResponse>, AppError> {
  let Json(payload) = payload?;
  state.authorize(payload).await.map(JsonResponse).map_err(Into::into)
}

pub async fn session_handler(
  State(state): State<SharedAppState>,
  headers: HeaderMap,
) -> Result<JsonResponse<Session>, AppError> {
  let claims = auth_middleware(&headers, state.session_keys())?;
  Ok(JsonResponse(Session::from(claims)))
}

pub async fn get_user_handler(
  State(state): State<SharedAppState>,
  Path(user_id): Path<String>,
) -> Result<JsonResponse<User>, AppError> {
  state.get_user(&user_id).await.map(JsonResponse).map_err(Into::into)
}

pub async fn delete_user_handler(
  State(state): State<SharedAppState>,
  Path(user_id): Path<String>,
) -> Result<JsonResponse<MessageResponse>, AppError> {
  state.delete_user(&user_id).await?;
  Ok(JsonResponse(MessageResponse::new("User deleted successfully")))
}

/// `DELETE /user/` carries no id segment; answer it the same way as a blank id.
pub async fn delete_without_id_handler(
  State(state): State<SharedAppState>,
) -> Result<JsonResponse<MessageResponse>, AppError> {
  delete_user_handler(State(state), Path(String::new())).await
}

pub async fn update_password_handler(
  State(state): State<SharedAppState>,
  Path(user_id): Path<String>,
  payload: Result<Json<UpdatePasswordRequest>, JsonRejection>,
) -> Result<JsonResponse<MessageResponse>, AppError> {
  let Json(payload) = payload?;
  state.update_password(&user_id, payload).await?;
  Ok(JsonResponse(MessageResponse::new("Password updated successfully")))
}
