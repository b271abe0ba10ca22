//! HTTP 服務：分形圖片、多項式零點與健康檢查端點。

pub mod actuator;
pub mod handlers;

use crate::config::{AppConfig, LocalStorage};
use crate::utils::error::{FractalError, Result};
use crate::utils::number::NumberLocale;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

/// 所有 handler 共用的狀態
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub locale: NumberLocale,
    pub storage: LocalStorage,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self::with_storage(config, LocalStorage::new("."))
    }

    pub fn with_storage(config: AppConfig, storage: LocalStorage) -> Self {
        Self {
            locale: config.number_locale(),
            config: Arc::new(config),
            storage,
            started_at: Utc::now(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/fractal-music/png", get(handlers::square_png))
        .route("/fractal-music/polynomial/png", get(handlers::polynomial_png))
        .route("/fractal-music/sample/png/", get(handlers::sample_png))
        .route("/fractal-music/sample/png", get(handlers::sample_png))
        .route("/btm/png", get(handlers::backtrace_png))
        .route("/math/zeros", get(handlers::zeros))
        .route("/actuator", get(actuator::links))
        .route("/actuator/health", get(actuator::health))
        .route("/actuator/info", get(actuator::info))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;
    debug!("{} {} -> {}", method, path, response.status());

    response
}

/// 在已綁定的 listener 上服務，直到 `shutdown` 完成
pub async fn serve_on<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!("🚀 fractal-music listening on http://{}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("👋 Server stopped");
    Ok(())
}

/// 依設定綁定位址並服務到收到 Ctrl-C
pub async fn serve(config: AppConfig) -> Result<()> {
    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await.map_err(|e| {
        FractalError::ConfigError {
            message: format!("Failed to bind {}: {}", address, e),
        }
    })?;

    info!(
        "🌍 Parsing query numbers with locale {} ({:?})",
        config.mls.locale,
        config.number_locale()
    );

    serve_on(listener, AppState::new(config), shutdown_signal()).await
}

pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("⚠️ Cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("🛑 Shutdown signal received");
}
