//! Access token lifecycle: issue, reuse and expiry.

use clinic_postgres::model::{AccessToken, DEFAULT_SCOPE, NewAccessToken};
use clinic_postgres::query::AccessTokenRepository;
use clinic_postgres::types::{AccessTokenConstraints, ConstraintViolation};
use clinic_postgres::{PgConnection, PgResult};
use jiff::{SignedDuration, Timestamp};
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

use crate::TRACING_TARGET_AUTHENTICATION;

/// Prefix of every issued token string.
pub const TOKEN_PREFIX: &str = "access_token_";

/// Random bytes hashed into each token (320 bits).
const TOKEN_ENTROPY_BYTES: usize = 40;

/// Attempts before a token collision is reported as an error.
const MAX_CREATE_ATTEMPTS: usize = 3;

/// Issues and resolves bearer tokens.
///
/// Tokens expire a fixed time after creation and carry the
/// [`DEFAULT_SCOPE`]. Expired tokens are never deleted here; they are
/// treated as absent on lookup.
#[derive(Debug, Clone)]
pub struct AccessTokenService {
    ttl: SignedDuration,
    scope: String,
}

impl AccessTokenService {
    /// Creates a service issuing tokens valid for `ttl`.
    pub fn new(ttl: SignedDuration) -> Self {
        Self {
            ttl,
            scope: DEFAULT_SCOPE.to_owned(),
        }
    }

    /// Creates a service issuing tokens valid for `hours`.
    pub fn with_ttl_hours(hours: u32) -> Self {
        Self::new(SignedDuration::from_hours(i64::from(hours)))
    }

    #[inline]
    pub fn ttl(&self) -> SignedDuration {
        self.ttl
    }

    #[inline]
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Returns the expiry of a token created at `created_at`.
    #[inline]
    pub fn expires_at(&self, created_at: Timestamp) -> Timestamp {
        created_at.saturating_add(self.ttl).unwrap_or(Timestamp::MAX)
    }

    /// Generates a fresh token string: the prefix followed by the hex
    /// SHA-256 digest of 40 random bytes.
    pub fn generate_token() -> String {
        let mut entropy = [0u8; TOKEN_ENTROPY_BYTES];
        OsRng.fill_bytes(&mut entropy);

        let digest = Sha256::digest(entropy);
        format!("{}{}", TOKEN_PREFIX, hex::encode(digest))
    }

    /// Persists a new token for the account.
    ///
    /// A collision on the token column is retried with fresh randomness.
    pub async fn create_token(
        &self,
        conn: &mut PgConnection,
        account_id: i64,
    ) -> PgResult<AccessToken> {
        let mut attempt = 1;
        loop {
            let new_token = NewAccessToken {
                account_id,
                token: Self::generate_token(),
                scope: Some(self.scope.clone()),
                expires_at: self.expires_at(Timestamp::now()).into(),
            };

            match conn.create_access_token(new_token).await {
                Ok(access_token) => {
                    tracing::info!(
                        target: TRACING_TARGET_AUTHENTICATION,
                        account_id,
                        token_id = access_token.id,
                        "Access token issued"
                    );
                    return Ok(access_token);
                }
                Err(error)
                    if attempt < MAX_CREATE_ATTEMPTS
                        && matches!(
                            error.constraint_violation(),
                            Some(ConstraintViolation::AccessToken(
                                AccessTokenConstraints::TokenUnique
                            ))
                        ) =>
                {
                    tracing::warn!(
                        target: TRACING_TARGET_AUTHENTICATION,
                        account_id,
                        attempt,
                        "Access token collision, regenerating"
                    );
                    attempt += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }

    /// Returns the account's latest live token.
    ///
    /// When the latest token is missing or expired, a new one is created if
    /// `create` is set; otherwise nothing is written and `None` is returned.
    pub async fn find_or_create_token(
        &self,
        conn: &mut PgConnection,
        account_id: i64,
        create: bool,
    ) -> PgResult<Option<AccessToken>> {
        let latest = conn
            .find_latest_access_token_by_account(account_id)
            .await?
            .filter(|access_token| !access_token.has_expired());

        match latest {
            Some(access_token) => Ok(Some(access_token)),
            None if create => self.create_token(conn, account_id).await.map(Some),
            None => Ok(None),
        }
    }
}

impl Default for AccessTokenService {
    fn default() -> Self {
        Self::with_ttl_hours(24)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use jiff::ToSpan;

    use super::*;

    #[test]
    fn generated_token_shape() {
        let token = AccessTokenService::generate_token();

        assert!(token.starts_with(TOKEN_PREFIX));
        let digest = &token[TOKEN_PREFIX.len()..];
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn generated_tokens_do_not_repeat() {
        let tokens: HashSet<String> = (0..256)
            .map(|_| AccessTokenService::generate_token())
            .collect();
        assert_eq!(tokens.len(), 256);
    }

    #[test]
    fn default_ttl_is_a_day() {
        let service = AccessTokenService::default();
        let created_at: Timestamp = "2024-01-01T09:00:00Z".parse().unwrap();

        assert_eq!(service.ttl(), SignedDuration::from_hours(24));
        assert_eq!(service.scope(), DEFAULT_SCOPE);
        assert_eq!(
            service.expires_at(created_at),
            created_at + 24.hours()
        );
    }

    #[test]
    fn fresh_token_expires_after_ttl() {
        let service = AccessTokenService::with_ttl_hours(24);
        let created_at = Timestamp::now();
        let token = AccessToken {
            id: 1,
            account_id: 1,
            token: AccessTokenService::generate_token(),
            scope: service.scope().to_owned(),
            expires_at: service.expires_at(created_at).into(),
            created_at: created_at.into(),
        };

        assert!(!token.has_expired_at(created_at));
        assert!(!token.has_expired_at(created_at + 24.hours()));
        assert!(token.has_expired_at(created_at + 24.hours() + 1.second()));
    }
}
