//! Access token repository: the persisted token store.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::model::{AccessToken, NewAccessToken};
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for bearer tokens.
///
/// Each operation is a single statement, so concurrent logins, lookups and
/// logouts never need to coordinate.
pub trait AccessTokenRepository {
    /// Inserts a new token.
    ///
    /// Fails with a unique violation on `access_tokens_token_unique_idx`
    /// when the token string already exists.
    fn create_access_token(
        &mut self,
        new_token: NewAccessToken,
    ) -> impl Future<Output = PgResult<AccessToken>> + Send;

    /// Finds the most recently created token of an account, expired or not.
    fn find_latest_access_token_by_account(
        &mut self,
        account_id: i64,
    ) -> impl Future<Output = PgResult<Option<AccessToken>>> + Send;

    /// Finds the most recently created token with exactly this value.
    fn find_latest_access_token_by_value(
        &mut self,
        token: &str,
    ) -> impl Future<Output = PgResult<Option<AccessToken>>> + Send;

    /// Deletes every token with this value and returns how many were removed.
    fn delete_access_tokens_by_value(
        &mut self,
        token: &str,
    ) -> impl Future<Output = PgResult<usize>> + Send;

    /// Deletes every expired token and returns how many were removed.
    fn delete_expired_access_tokens(&mut self) -> impl Future<Output = PgResult<usize>> + Send;
}

impl AccessTokenRepository for PgConnection {
    async fn create_access_token(&mut self, new_token: NewAccessToken) -> PgResult<AccessToken> {
        use schema::access_tokens;

        diesel::insert_into(access_tokens::table)
            .values(&new_token)
            .returning(AccessToken::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn find_latest_access_token_by_account(
        &mut self,
        account_id: i64,
    ) -> PgResult<Option<AccessToken>> {
        use schema::access_tokens::{self, dsl};

        access_tokens::table
            .filter(dsl::account_id.eq(account_id))
            .order(dsl::id.desc())
            .select(AccessToken::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn find_latest_access_token_by_value(
        &mut self,
        token: &str,
    ) -> PgResult<Option<AccessToken>> {
        use schema::access_tokens::{self, dsl};

        access_tokens::table
            .filter(dsl::token.eq(token))
            .order(dsl::id.desc())
            .select(AccessToken::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn delete_access_tokens_by_value(&mut self, token: &str) -> PgResult<usize> {
        use schema::access_tokens::{self, dsl};

        diesel::delete(access_tokens::table.filter(dsl::token.eq(token)))
            .execute(self)
            .await
            .map_err(PgError::from)
    }

    async fn delete_expired_access_tokens(&mut self) -> PgResult<usize> {
        use diesel::dsl::now;
        use schema::access_tokens::{self, dsl};

        diesel::delete(access_tokens::table.filter(dsl::expires_at.lt(now)))
            .execute(self)
            .await
            .map_err(PgError::from)
    }
}
