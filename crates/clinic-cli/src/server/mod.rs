//! HTTP server startup with graceful shutdown.

mod error;
mod http_server;
mod lifecycle;
mod shutdown;

use axum::Router;
pub use error::{Result, ServerError};
use http_server::serve_http;
use shutdown::shutdown_signal;

use crate::config::ServerConfig;

/// Binds the configured address and serves `app` until a shutdown signal.
pub async fn serve(app: Router, config: ServerConfig) -> Result<()> {
    serve_http(app, config).await
}
