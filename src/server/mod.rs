//! HTTP surface: `GET /count` plus the static index page at `/`.

use crate::core::service::CountService;
use crate::domain::model::ErrorBody;
use crate::utils::error::{CounterError, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
struct AppState {
    service: Arc<CountService>,
}

pub fn router(service: Arc<CountService>, index_path: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/count", get(count_handler))
        .route_service("/", ServeFile::new(index_path))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { service })
}

async fn count_handler(State(state): State<AppState>) -> Response {
    match state.service.count().await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => {
            tracing::error!("❌ Count failed: {} (Category: {:?})", e, e.category());
            let body = ErrorBody {
                error: e.to_string(),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

pub async fn bind(host: &str, port: u16) -> Result<TcpListener> {
    TcpListener::bind((host, port))
        .await
        .map_err(|e| CounterError::ServerError {
            message: format!("failed to bind {}:{}: {}", host, port, e),
        })
}

/// Serves until Ctrl-C.
pub async fn serve(listener: TcpListener, app: Router) -> Result<()> {
    let addr: SocketAddr = listener.local_addr()?;
    tracing::info!("🌐 HTTP server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| CounterError::ServerError {
            message: e.to_string(),
        })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("HTTP server shutting down");
}
