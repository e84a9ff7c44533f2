//! Request extractors with clinic error responses.
//!
//! Every extractor here rejects with the crate's [`Error`] so a failed
//! extraction renders the same envelope as a failed handler.
//!
//! - [`AccessTokenHeader`] reads the raw `access_token` header.
//! - [`AuthState`] resolves the header to a verified [`AuthClaims`].
//! - [`PgPool`] checks a connection out of the pool.
//! - [`Json`], [`ValidateJson`], [`Path`] and [`Query`] replace their axum
//!   counterparts.
//!
//! [`Error`]: crate::handler::Error

pub mod auth;
mod pg_connection;
pub mod reject;

pub use crate::TRACING_TARGET_AUTHENTICATION;
pub use crate::extract::auth::{ACCESS_TOKEN_HEADER, AccessTokenHeader, AuthClaims, AuthState};
pub use crate::extract::pg_connection::PgPool;
pub use crate::extract::reject::{Json, MAX_JSON_PAYLOAD_SIZE, Path, Query, ValidateJson};
