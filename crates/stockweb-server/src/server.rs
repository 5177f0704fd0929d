//! Router assembly and the serve loop.

use std::path::Path;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use stockweb_core::AlphaVantageAdapter;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::handlers::{self, AppState};

/// Routes served by stockweb, in registration order.
pub const ROUTES: [(&str, &str); 6] = [
    ("GET", "/health"),
    ("POST", "/stockData"),
    ("POST", "/calculateStandardDeviation"),
    ("POST", "/calculateLineRegression"),
    ("POST", "/calculateResistanceAndSupport"),
    ("POST", "/calculateMovingAverage"),
];

/// Builds the application router. Paths outside the API fall through to
/// `static_dir` when one is given.
pub fn router(state: AppState, static_dir: Option<&Path>) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::health))
        .route("/stockData", post(handlers::stock_data))
        .route(
            "/calculateStandardDeviation",
            post(handlers::standard_deviation),
        )
        .route("/calculateLineRegression", post(handlers::line_regression))
        .route(
            "/calculateResistanceAndSupport",
            post(handlers::resistance_and_support),
        )
        .route("/calculateMovingAverage", post(handlers::moving_average));

    let app = match static_dir {
        Some(dir) => api.fallback_service(ServeDir::new(dir)),
        None => api,
    };

    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds the configured address and serves until Ctrl-C.
pub async fn serve(config: ServerConfig) -> Result<(), ServerError> {
    let adapter = AlphaVantageAdapter::new(config.alphavantage());
    info!(
        base_url = %adapter.config().base_url,
        output_size = %adapter.config().output_size,
        quota_per_minute = adapter.config().quota_limit,
        "configured alphavantage source"
    );

    let app = router(
        AppState::new(Arc::new(adapter)),
        config.static_dir.as_deref(),
    );

    let listener = TcpListener::bind(config.bind)
        .await
        .map_err(|source| ServerError::Bind {
            addr: config.bind,
            source,
        })?;

    info!(addr = %config.bind, version = env!("CARGO_PKG_VERSION"), "stockweb listening");
    for (method, path) in ROUTES {
        info!("  {method:<4} {path}");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    info!("stockweb stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(error) => {
            error!(%error, "failed to install Ctrl-C handler; running until killed");
            std::future::pending::<()>().await;
        }
    }
}
