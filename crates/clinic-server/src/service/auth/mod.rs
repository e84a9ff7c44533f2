//! Token lifecycle and credential checks.

mod access_tokens;
mod authenticator;

pub use access_tokens::{AccessTokenService, TOKEN_PREFIX};
pub use authenticator::CredentialAuthenticator;
