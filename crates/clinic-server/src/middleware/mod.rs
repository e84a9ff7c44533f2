//! Middleware for `axum::Router` and HTTP request processing.
//!
//! ```rust,ignore
//! use clinic_server::middleware::*;
//!
//! let app = routes(state.clone())
//!     .with_open_api(OpenApiConfig::default())
//!     .with_recovery(&RecoveryConfig::default())
//!     .with_security(&CorsConfig::default())
//!     .with_observability()
//!     .with_state(state);
//! ```

mod auth;
mod observability;
mod recovery;
mod security;
mod specification;

pub use auth::{RouterAuthExt, require_authentication};
pub use observability::RouterObservabilityExt;
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
pub use security::{CorsConfig, RouterSecurityExt};
pub use specification::{OpenApiConfig, RouterOpenApiExt};
