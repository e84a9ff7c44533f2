//! Token authentication extractors.
//!
//! - [`AccessTokenHeader`] - the raw token carried by the `access_token` header
//! - [`AuthClaims`] - the identity bound to a verified token
//! - [`AuthState`] - verified claims, resolved once per request

mod auth_header;
mod auth_state;

pub use self::auth_header::{ACCESS_TOKEN_HEADER, AccessTokenHeader};
pub use self::auth_state::{AuthClaims, AuthState};
