//! Authentication response types.

use clinic_postgres::model::{Account, Company};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Identity and access token returned by a successful login.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LoginData {
    /// ID of the authenticated account.
    pub uid: i64,
    /// Token to send in the `access_token` header of later requests.
    pub access_token: String,
    pub company_id: i64,
    pub company_name: String,
    /// Display name of the account.
    pub name: String,
    pub email: Option<String>,
}

impl LoginData {
    /// Creates the login payload for `account`.
    pub fn new(account: Account, company: Option<Company>, access_token: String) -> Self {
        Self {
            uid: account.id,
            access_token,
            company_id: account.company_id,
            company_name: company.map(|company| company.name).unwrap_or_default(),
            name: account.name,
            email: account.email,
        }
    }
}
