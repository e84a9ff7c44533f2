//! Access token model for PostgreSQL database operations.

use std::collections::HashSet;
use std::fmt;

use diesel::prelude::*;
use jiff_diesel::Timestamp;

use crate::schema::access_tokens;

/// Scope granted to tokens issued at login.
pub const DEFAULT_SCOPE: &str = "userinfo";

/// An opaque bearer token issued to an account.
///
/// Tokens are never updated in place. They are created at login, looked up
/// on every authenticated request and deleted at logout.
#[derive(Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = access_tokens)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AccessToken {
    /// Unique record identifier; larger ids are newer.
    pub id: i64,
    /// Account the token authenticates.
    pub account_id: i64,
    /// Globally unique opaque token string.
    pub token: String,
    /// Whitespace separated capability tags.
    pub scope: String,
    /// Timestamp after which the token is rejected.
    pub expires_at: Timestamp,
    /// Timestamp of token creation.
    pub created_at: Timestamp,
}

/// Data for creating a new access token.
#[derive(Clone, Insertable)]
#[diesel(table_name = access_tokens)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewAccessToken {
    pub account_id: i64,
    pub token: String,
    /// Falls back to the column default, [`DEFAULT_SCOPE`].
    pub scope: Option<String>,
    pub expires_at: Timestamp,
}

impl AccessToken {
    /// Returns whether the token had expired at `now`.
    ///
    /// A token is still valid at the exact instant it expires.
    #[inline]
    pub fn has_expired_at(&self, now: jiff::Timestamp) -> bool {
        now > jiff::Timestamp::from(self.expires_at)
    }

    /// Returns whether the token has expired.
    #[inline]
    pub fn has_expired(&self) -> bool {
        self.has_expired_at(jiff::Timestamp::now())
    }

    /// Returns the capability tags granted by this token.
    pub fn scopes(&self) -> HashSet<&str> {
        self.scope.split_whitespace().collect()
    }

    /// Returns whether every required tag is granted.
    ///
    /// An empty requirement always passes.
    pub fn allows_scopes<I, S>(&self, required: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let granted = self.scopes();
        required
            .into_iter()
            .all(|scope| granted.contains(scope.as_ref()))
    }

    /// Returns whether the token is unexpired and grants `required`.
    pub fn is_valid<I, S>(&self, required: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        !self.has_expired() && self.allows_scopes(required)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("id", &self.id)
            .field("account_id", &self.account_id)
            .field("scope", &self.scope)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for NewAccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccessToken")
            .field("account_id", &self.account_id)
            .field("scope", &self.scope)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, ToSpan};

    use super::*;

    fn token(scope: &str, expires_at: jiff::Timestamp) -> AccessToken {
        AccessToken {
            id: 1,
            account_id: 7,
            token: "access_token_test".to_owned(),
            scope: scope.to_owned(),
            expires_at: expires_at.into(),
            created_at: jiff::Timestamp::now().into(),
        }
    }

    #[test]
    fn fresh_token_has_not_expired() {
        let now = jiff::Timestamp::now();
        let token = token(DEFAULT_SCOPE, now + SignedDuration::from_hours(24));

        assert!(!token.has_expired_at(now));
        assert!(!token.has_expired());
        assert!(token.is_valid(None::<&str>));
    }

    #[test]
    fn expiry_is_strict() {
        let expires_at: jiff::Timestamp = "2024-01-02T09:00:00Z".parse().unwrap();
        let token = token(DEFAULT_SCOPE, expires_at);

        assert!(!token.has_expired_at(expires_at));
        assert!(token.has_expired_at(expires_at + 1.second()));
        assert!(!token.has_expired_at(expires_at - 24.hours()));
    }

    #[test]
    fn expired_token_is_invalid() {
        let token = token(DEFAULT_SCOPE, jiff::Timestamp::now() - 1.hour());
        assert!(token.has_expired());
        assert!(!token.is_valid(["userinfo"]));
    }

    #[test]
    fn scope_check_is_a_subset_test() {
        let token = token("userinfo", jiff::Timestamp::now() + 1.hour());

        assert!(token.allows_scopes(Vec::<String>::new()));
        assert!(token.allows_scopes(["userinfo"]));
        assert!(!token.allows_scopes(["admin"]));
        assert!(!token.allows_scopes(["userinfo", "admin"]));
    }

    #[test]
    fn scope_tags_are_whitespace_separated() {
        let token = token("  userinfo\tadmin  ", jiff::Timestamp::now() + 1.hour());

        assert_eq!(token.scopes().len(), 2);
        assert!(token.allows_scopes(["admin", "userinfo"]));
        assert!(!format!("{token:?}").contains("access_token_test"));
    }
}
