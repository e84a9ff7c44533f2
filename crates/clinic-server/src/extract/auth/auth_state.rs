//! Authenticated identity resolved from the `access_token` header.
//!
//! [`AuthState`] performs exactly one token lookup per request. The result
//! is cached in the request extensions, so the authentication middleware
//! and the handler behind it share the same lookup.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use clinic_postgres::model::{AccessToken, DEFAULT_SCOPE};
use clinic_postgres::query::{AccessTokenRepository, AccountRepository};
use clinic_postgres::{PgClient, PgConnection};
use derive_more::Deref;
use serde::Serialize;

use super::AccessTokenHeader;
use crate::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{Error, ErrorKind, Result};

/// Identity bound to a verified access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthClaims {
    /// Account the token authenticates.
    pub account_id: i64,
    /// Company of that account.
    pub company_id: i64,
    /// Record id of the token, not the token string.
    pub token_id: i64,
    /// Whitespace separated capability tags of the token.
    pub scope: String,
}

/// Verified authentication state.
///
/// Extraction fails with `access_token_not_found` when the header is missing
/// and with `access_token` when no live token with that value exists.
#[derive(Debug, Clone, Deref, PartialEq, Eq)]
pub struct AuthState(pub AuthClaims);

impl AuthState {
    /// Wraps claims that were already verified.
    #[inline]
    #[must_use]
    pub const fn from_verified_claims(auth_claims: AuthClaims) -> Self {
        Self(auth_claims)
    }

    /// Resolves a header against the token store.
    pub async fn from_unverified_header(
        header: &AccessTokenHeader,
        conn: &mut PgConnection,
    ) -> Result<Self> {
        let access_token = conn
            .find_latest_access_token_by_value(header.as_str())
            .await
            .map_err(|db_error| {
                tracing::error!(
                    target: TRACING_TARGET_AUTHENTICATION,
                    error = %db_error,
                    "Database error during access token lookup"
                );
                ErrorKind::ServerError
                    .with_message("Authentication verification is temporarily unavailable")
                    .with_context(db_error.to_string())
            })?
            .ok_or_else(|| {
                tracing::warn!(
                    target: TRACING_TARGET_AUTHENTICATION,
                    "Authentication failed: access token not found"
                );
                ErrorKind::AccessToken.into_error()
            })?;

        Self::verify_token(&access_token)?;

        let account = conn
            .find_account_by_id(access_token.account_id)
            .await
            .map_err(|db_error| {
                tracing::error!(
                    target: TRACING_TARGET_AUTHENTICATION,
                    error = %db_error,
                    account_id = access_token.account_id,
                    "Database error during account lookup"
                );
                ErrorKind::ServerError
                    .with_message("Authentication verification is temporarily unavailable")
                    .with_context(db_error.to_string())
            })?
            .filter(|account| account.can_sign_in())
            .ok_or_else(|| {
                tracing::warn!(
                    target: TRACING_TARGET_AUTHENTICATION,
                    account_id = access_token.account_id,
                    token_id = access_token.id,
                    "Authentication failed: account is missing or inactive"
                );
                ErrorKind::AccessToken.into_error()
            })?;

        tracing::debug!(
            target: TRACING_TARGET_AUTHENTICATION,
            account_id = account.id,
            token_id = access_token.id,
            "Access token verified"
        );

        Ok(Self::from_verified_claims(AuthClaims {
            account_id: account.id,
            company_id: account.company_id,
            token_id: access_token.id,
            scope: access_token.scope,
        }))
    }

    fn verify_token(access_token: &AccessToken) -> Result<()> {
        if access_token.is_valid([DEFAULT_SCOPE]) {
            return Ok(());
        }

        tracing::warn!(
            target: TRACING_TARGET_AUTHENTICATION,
            account_id = access_token.account_id,
            token_id = access_token.id,
            expires_at = ?access_token.expires_at,
            scope = %access_token.scope,
            "Authentication failed: access token has expired or lacks the required scope"
        );

        Err(ErrorKind::AccessToken.into_error())
    }
}

impl<S> FromRequestParts<S> for AuthState
where
    S: Sync + Send + 'static,
    PgClient: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(auth_state) = parts.extensions.get::<Self>() {
            return Ok(auth_state.clone());
        }

        let header = AccessTokenHeader::from_parts(parts)?;

        let pg_client = PgClient::from_ref(state);
        let mut conn = pg_client.get_connection().await.map_err(|db_error| {
            tracing::error!(
                target: TRACING_TARGET_AUTHENTICATION,
                error = %db_error,
                "Database connection failed during authentication"
            );
            ErrorKind::ServerError
                .with_message("Authentication verification is temporarily unavailable")
                .with_context(db_error.to_string())
        })?;

        let auth_state = Self::from_unverified_header(&header, &mut conn).await?;

        parts.extensions.insert(auth_state.clone());
        Ok(auth_state)
    }
}

impl aide::OperationInput for AuthState {}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(scope: &str, expires_in: jiff::SignedDuration) -> AccessToken {
        let now = jiff::Timestamp::now();
        AccessToken {
            id: 3,
            account_id: 1,
            token: "access_token_test".to_owned(),
            scope: scope.to_owned(),
            expires_at: (now + expires_in).into(),
            created_at: (now - jiff::SignedDuration::from_hours(1)).into(),
        }
    }

    #[test]
    fn live_userinfo_token_is_accepted() {
        let token = token(DEFAULT_SCOPE, jiff::SignedDuration::from_hours(23));
        assert!(AuthState::verify_token(&token).is_ok());
    }

    #[test]
    fn token_without_userinfo_scope_is_rejected() {
        let token = token("reports", jiff::SignedDuration::from_hours(23));
        let error = AuthState::verify_token(&token).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::AccessToken);
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = token(DEFAULT_SCOPE, jiff::SignedDuration::from_secs(-1));

        let error = AuthState::verify_token(&token).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::AccessToken);
    }
}
