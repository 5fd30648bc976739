use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
  domains::{upload::rest::upload_routes, user::rest::user_routes, video::rest::video_routes},
  state::SharedAppState,
};

pub fn create_app(state: SharedAppState) -> Router {
  Router::new()
    .route("/health", get(health_handler))
    .nest("/api", user_routes().merge(video_routes()).merge(upload_routes()))
    .with_state(state)
    .layer(CorsLayer::permissive())
    .layer(
      TraceLayer::new_for_http()
        .make_span_with(|req: &axum::http::Request<_>| {
          let method = req.method().clone();
          let uri = req.uri().clone();
          tracing::info_span!("http_request", %method, uri = %uri, status = tracing::field::Empty)
        })
        .on_response(
          |res: &axum::http::Response<_>, latency: std::time::Duration, span: &tracing::Span| {
            let status = res.status();
            span.record("status", tracing::field::display(status));
            if status.is_server_error() {
              tracing::error!(%status, latency_ms = latency.as_millis() as u64, "response");
            } else {
              tracing::info!(%status, latency_ms = latency.as_millis() as u64, "response");
            }
          },
        ),
    )
}

pub async fn health_handler() -> &'static str {
  "ok"
}
