//! Account model for PostgreSQL database operations.

use std::fmt;

use diesel::prelude::*;
use jiff_diesel::Timestamp;

use crate::schema::accounts;

/// A user identity allowed to sign in.
#[derive(Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Account {
    /// Unique account identifier.
    pub id: i64,
    /// Company the account belongs to.
    pub company_id: i64,
    /// Display name.
    pub name: String,
    /// Unique login used for authentication.
    pub login: String,
    /// Optional contact email.
    pub email: Option<String>,
    /// Argon2 PHC string.
    pub password_hash: String,
    /// Inactive accounts cannot sign in.
    pub is_active: bool,
    /// Timestamp when the account was created.
    pub created_at: Timestamp,
    /// Timestamp when the account was last updated.
    pub updated_at: Timestamp,
}

/// Data for creating a new account.
#[derive(Clone, Default, Insertable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewAccount {
    pub company_id: i64,
    pub name: String,
    pub login: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub is_active: Option<bool>,
}

impl Account {
    /// Returns whether the account may sign in.
    #[inline]
    pub fn can_sign_in(&self) -> bool {
        self.is_active
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("company_id", &self.company_id)
            .field("name", &self.name)
            .field("login", &self.login)
            .field("email", &self.email)
            .field("is_active", &self.is_active)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccount")
            .field("company_id", &self.company_id)
            .field("name", &self.name)
            .field("login", &self.login)
            .finish_non_exhaustive()
    }
}
