//! The `access_token` request header.

use std::fmt;

use axum::extract::FromRequestParts;
use axum::http::HeaderName;
use axum::http::request::Parts;

use crate::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{Error, ErrorKind};

/// Name of the header carrying the bearer token.
pub const ACCESS_TOKEN_HEADER: HeaderName = HeaderName::from_static("access_token");

/// The unverified token string sent by the client.
///
/// Extraction only checks that the header is present, non-empty and valid
/// ASCII. Use [`AuthState`] to verify it against the token store.
///
/// [`AuthState`]: super::AuthState
#[derive(Clone, PartialEq, Eq)]
pub struct AccessTokenHeader(String);

impl AccessTokenHeader {
    #[inline]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Reads the header from request parts.
    pub fn from_parts(parts: &Parts) -> Result<Self, Error<'static>> {
        let Some(value) = parts.headers.get(&ACCESS_TOKEN_HEADER) else {
            tracing::debug!(
                target: TRACING_TARGET_AUTHENTICATION,
                "Request rejected: access token header is missing"
            );
            return Err(ErrorKind::AccessTokenNotFound.into_error());
        };

        let token = value
            .to_str()
            .map(str::trim)
            .map_err(|_| ErrorKind::AccessToken.with_context("non-ASCII access token header"))?;

        if token.is_empty() {
            return Err(ErrorKind::AccessTokenNotFound.into_error());
        }

        Ok(Self::new(token))
    }
}

impl fmt::Debug for AccessTokenHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessTokenHeader(..)")
    }
}

impl<S> FromRequestParts<S> for AccessTokenHeader
where
    S: Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_parts(parts)
    }
}

impl aide::OperationInput for AccessTokenHeader {}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    fn parts(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/patients");
        if let Some(value) = header {
            builder = builder.header("access_token", value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn missing_header_is_not_found() {
        let error = AccessTokenHeader::from_parts(&parts(None)).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::AccessTokenNotFound);
    }

    #[test]
    fn blank_header_is_not_found() {
        let error = AccessTokenHeader::from_parts(&parts(Some("   "))).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::AccessTokenNotFound);
    }

    #[test]
    fn header_value_is_trimmed() {
        let header = AccessTokenHeader::from_parts(&parts(Some(" access_token_abc "))).unwrap();
        assert_eq!(header.as_str(), "access_token_abc");
        assert!(!format!("{header:?}").contains("abc"));
    }
}
