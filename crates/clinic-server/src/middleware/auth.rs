//! The authentication gate in front of every protected route.

use aide::axum::ApiRouter;
use axum::extract::Request;
use axum::middleware::{Next, from_fn_with_state};
use axum::response::Response;

use crate::extract::AuthState;
use crate::service::ServiceState;

/// Extension trait for [`ApiRouter`] to require an `access_token` header.
pub trait RouterAuthExt {
    /// Rejects every request to the router's routes that carries no live
    /// access token.
    ///
    /// Applied as a route layer, so unmatched paths still fall through to
    /// the router's fallback.
    fn with_authentication(self, state: ServiceState) -> Self;
}

impl RouterAuthExt for ApiRouter<ServiceState> {
    fn with_authentication(self, state: ServiceState) -> Self {
        self.route_layer(from_fn_with_state(state, require_authentication))
    }
}

/// Resolves the caller's [`AuthState`] before the handler runs.
///
/// The resolved state is cached in the request extensions, so handlers
/// extracting [`AuthState`] reuse it without a second lookup.
pub async fn require_authentication(
    AuthState(_): AuthState,
    request: Request,
    next: Next,
) -> Response {
    next.run(request).await
}
