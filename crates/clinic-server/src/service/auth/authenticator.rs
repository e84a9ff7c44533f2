//! Database, login and password verification for `POST /api/login`.

use clinic_postgres::PgConnection;
use clinic_postgres::model::Account;
use clinic_postgres::query::AccountRepository;

use crate::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{ErrorKind, PgResultExt, Result};
use crate::service::PasswordHasher;

/// Verifies login credentials against the `accounts` table.
#[derive(Debug, Clone)]
pub struct CredentialAuthenticator {
    database: String,
    password_hasher: PasswordHasher,
}

impl CredentialAuthenticator {
    /// Creates an authenticator accepting logins for `database` only.
    pub fn new(database: impl Into<String>, password_hasher: PasswordHasher) -> Self {
        Self {
            database: database.into(),
            password_hasher,
        }
    }

    /// Name of the database logins must target.
    #[inline]
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Returns the account when the credentials are valid.
    ///
    /// A wrong database name, an unknown or inactive login and a wrong
    /// password all yield `None` after the same amount of hashing work.
    pub async fn authenticate(
        &self,
        conn: &mut PgConnection,
        database: &str,
        login: &str,
        password: &str,
    ) -> Result<Option<Account>> {
        if database != self.database {
            tracing::warn!(
                target: TRACING_TARGET_AUTHENTICATION,
                database,
                "Login rejected: unknown database"
            );
            self.password_hasher.verify_dummy_password(password);
            return Ok(None);
        }

        let account = conn
            .find_account_by_login(login)
            .await
            .on_failure(ErrorKind::ServerError)?
            .filter(Account::can_sign_in);

        let Some(account) = account else {
            tracing::warn!(
                target: TRACING_TARGET_AUTHENTICATION,
                "Login rejected: unknown or inactive account"
            );
            self.password_hasher.verify_dummy_password(password);
            return Ok(None);
        };

        match self
            .password_hasher
            .verify_password(password, &account.password_hash)
        {
            Ok(()) => Ok(Some(account)),
            Err(error) if error.kind() == ErrorKind::AuthenticationFailed => {
                tracing::warn!(
                    target: TRACING_TARGET_AUTHENTICATION,
                    account_id = account.id,
                    "Login rejected: wrong password"
                );
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }
}
