//! Companies, accounts, and access tokens constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Companies table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum CompanyConstraints {
    #[strum(serialize = "companies_name_not_empty")]
    NameNotEmpty,
}

impl CompanyConstraints {
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    pub fn categorize(&self) -> ConstraintCategory {
        ConstraintCategory::Validation
    }
}

/// Accounts table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum AccountConstraints {
    #[strum(serialize = "accounts_name_not_empty")]
    NameNotEmpty,
    #[strum(serialize = "accounts_login_not_empty")]
    LoginNotEmpty,

    #[strum(serialize = "accounts_updated_after_created")]
    UpdatedAfterCreated,

    #[strum(serialize = "accounts_login_unique_idx")]
    LoginUnique,
    #[strum(serialize = "accounts_company_id_fkey")]
    CompanyExists,
}

impl AccountConstraints {
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            AccountConstraints::NameNotEmpty | AccountConstraints::LoginNotEmpty => {
                ConstraintCategory::Validation
            }
            AccountConstraints::UpdatedAfterCreated => ConstraintCategory::Chronological,
            AccountConstraints::LoginUnique => ConstraintCategory::Uniqueness,
            AccountConstraints::CompanyExists => ConstraintCategory::BusinessLogic,
        }
    }
}

/// Access tokens table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum AccessTokenConstraints {
    #[strum(serialize = "access_tokens_token_not_empty")]
    TokenNotEmpty,

    #[strum(serialize = "access_tokens_expires_after_created")]
    ExpiresAfterCreated,

    #[strum(serialize = "access_tokens_token_unique_idx")]
    TokenUnique,
}

impl AccessTokenConstraints {
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            AccessTokenConstraints::TokenNotEmpty => ConstraintCategory::Validation,
            AccessTokenConstraints::ExpiresAfterCreated => ConstraintCategory::Chronological,
            AccessTokenConstraints::TokenUnique => ConstraintCategory::Uniqueness,
        }
    }
}

super::impl_string_conversions!(CompanyConstraints, AccountConstraints, AccessTokenConstraints);
