//! HTTP server startup.

use std::future::IntoFuture;
use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::{TRACING_TARGET_SERVER_SHUTDOWN, TRACING_TARGET_SERVER_STARTUP};
use crate::config::ServerConfig;
use crate::server::lifecycle::serve_with_shutdown;
use crate::server::{Result, ServerError, shutdown_signal};

/// Validates the configuration, binds the listener and serves `app` until
/// a shutdown signal.
///
/// In-flight requests get the configured shutdown timeout to finish; the
/// server stops without them once it elapses.
pub async fn serve_http(app: Router, server_config: ServerConfig) -> Result<()> {
    server_config
        .validate()
        .map_err(|err| ServerError::invalid_config(&err))?;

    let server_addr = server_config.server_addr();
    let listener = TcpListener::bind(server_addr).await.map_err(|err| {
        tracing::error!(
            target: TRACING_TARGET_SERVER_STARTUP,
            addr = %server_addr,
            error = %err,
            "Failed to bind to address"
        );
        ServerError::bind_error(&server_addr.to_string(), err)
    })?;

    let shutdown_timeout = server_config.shutdown_timeout();
    let (signalled_tx, signalled_rx) = oneshot::channel::<()>();
    let shutdown_signal = async move {
        shutdown_signal(shutdown_timeout).await;
        let _ = signalled_tx.send(());
    };

    serve_with_shutdown(&server_config, || async move {
        let server = axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal)
        .into_future();

        let drain_deadline = async move {
            if signalled_rx.await.is_ok() {
                tokio::time::sleep(shutdown_timeout).await;
            } else {
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            result = server => result,
            () = drain_deadline => {
                tracing::warn!(
                    target: TRACING_TARGET_SERVER_SHUTDOWN,
                    timeout_secs = shutdown_timeout.as_secs(),
                    "Shutdown timeout elapsed, dropping in-flight requests"
                );
                Ok(())
            }
        }
    })
    .await
}
