//! Request tracing and request ids.

use axum::Router;
use axum::http::{HeaderName, header};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::TraceLayer;

use crate::extract::ACCESS_TOKEN_HEADER;

const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Extension trait for `axum::`[`Router`] to apply observability middleware.
pub trait RouterObservabilityExt<S> {
    /// Assigns an `x-request-id` to every request, echoes it on the
    /// response and opens a tracing span per request.
    ///
    /// The `access_token`, `authorization` and `cookie` headers are marked
    /// sensitive so they are redacted from logs.
    fn with_observability(self) -> Self;
}

impl<S> RouterObservabilityExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_observability(self) -> Self {
        self.layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER))
            .layer(SetSensitiveRequestHeadersLayer::new([
                ACCESS_TOKEN_HEADER,
                header::AUTHORIZATION,
                header::COOKIE,
            ]))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(REQUEST_ID_HEADER, MakeRequestUuid))
    }
}

#[cfg(test)]
mod tests {
    use axum::routing::get;
    use axum_test::TestServer;

    use super::*;

    #[tokio::test]
    async fn request_id_is_echoed() -> anyhow::Result<()> {
        let app = Router::new()
            .route("/ping", get(|| async { "pong" }))
            .with_observability();
        let server = TestServer::new(app)?;

        let response = server.get("/ping").await;
        response.assert_status_ok();
        assert!(response.headers().contains_key("x-request-id"));
        Ok(())
    }
}
