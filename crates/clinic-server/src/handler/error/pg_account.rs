//! Account-related constraint violation error handlers.

use clinic_postgres::types::{AccessTokenConstraints, AccountConstraints, CompanyConstraints};

use crate::handler::{Error, ErrorKind};

impl From<CompanyConstraints> for Error<'static> {
    fn from(c: CompanyConstraints) -> Self {
        match c {
            CompanyConstraints::NameNotEmpty => {
                ErrorKind::ValidationError.with_message("Company name cannot be empty")
            }
        }
    }
}

impl From<AccountConstraints> for Error<'static> {
    fn from(c: AccountConstraints) -> Self {
        match c {
            AccountConstraints::NameNotEmpty => {
                ErrorKind::ValidationError.with_message("Account name cannot be empty")
            }
            AccountConstraints::LoginNotEmpty => {
                ErrorKind::ValidationError.with_message("Login cannot be empty")
            }
            AccountConstraints::LoginUnique => {
                ErrorKind::Conflict.with_message("An account with this login already exists")
            }
            AccountConstraints::CompanyExists => {
                ErrorKind::ValidationError.with_message("Company does not exist")
            }
            AccountConstraints::UpdatedAfterCreated => ErrorKind::ServerError.into_error(),
        }
    }
}

impl From<AccessTokenConstraints> for Error<'static> {
    fn from(c: AccessTokenConstraints) -> Self {
        match c {
            AccessTokenConstraints::TokenUnique => {
                ErrorKind::Conflict.with_message("Access token already exists")
            }
            AccessTokenConstraints::TokenNotEmpty
            | AccessTokenConstraints::ExpiresAfterCreated => ErrorKind::ServerError.into_error(),
        }
    }
}
