//! Application state, configuration and the services handlers depend on.

mod auth;
mod error;
mod security;
mod service_config;
mod service_state;

pub use crate::service::auth::{AccessTokenService, CredentialAuthenticator, TOKEN_PREFIX};
pub use crate::service::error::{Result, ServiceError};
pub use crate::service::security::PasswordHasher;
pub use crate::service::service_config::{ServiceConfig, ServiceConfigBuilder};
pub use crate::service::service_state::ServiceState;
