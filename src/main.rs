use std::sync::Arc;

use tokio::signal;

use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use vidshare_api::app::create_app;
use vidshare_api::config::AppConfig;
use vidshare_api::db::pool::create_pool;
use vidshare_api::state::SharedAppState;
use vidshare_api::storage::S3Storage;
use vidshare_api::utils::jwt::SessionKeys;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenv().ok();

  let env_filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vidshare_api=debug,tower_http=info"));
  tracing_subscriber::fmt().with_env_filter(env_filter).init();

  let config = AppConfig::from_env()?;

  let pool = create_pool(&config).await?;

  sqlx::migrate!("./migrations").run(&pool).await?;

  tracing::info!("database migrations applied");

  let storage = S3Storage::new(&config.storage).await?;
  let session_keys = SessionKeys::new(&config.jwt_secret, config.session_max_age_secs);
  let app_state = SharedAppState::new(pool, Arc::new(storage), session_keys);
  let app = create_app(app_state);

  let addr = config.bind_address();
  let listener = tokio::net::TcpListener::bind(&addr).await?;

  tracing::info!("server running on http://{}", addr);

  axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

  Ok(())
}

async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = signal::ctrl_c().await {
      tracing::error!("failed to install Ctrl+C handler: {}", e);
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
      Ok(mut stream) => {
        stream.recv().await;
      }
      Err(e) => {
        tracing::error!("failed to install SIGTERM handler: {}", e);
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
      _ = ctrl_c => {},
      _ = terminate => {},
  }

  tracing::info!("received termination signal, shutting down gracefully");
}
