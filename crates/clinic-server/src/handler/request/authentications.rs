//! Authentication request types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Request payload for login.
///
/// Every field is optional at the parsing stage so that a partial body is
/// answered with `missing_credentials` instead of a parse error.
#[must_use]
#[derive(Default, Serialize, Deserialize, JsonSchema)]
pub struct Login {
    /// Name of the clinic database.
    pub db: Option<String>,
    /// Login of the account.
    pub login: Option<String>,
    /// Password of the account.
    pub password: Option<String>,
}

/// Complete login credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub db: String,
    pub login: String,
    pub password: String,
}

impl Login {
    /// Returns the credentials when all three fields are present and not
    /// blank.
    pub fn into_credentials(self) -> Option<Credentials> {
        let present = |value: Option<String>| value.filter(|value| !value.trim().is_empty());

        Some(Credentials {
            db: present(self.db)?,
            login: present(self.login)?,
            password: present(self.password)?,
        })
    }
}

impl std::fmt::Debug for Login {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Login")
            .field("db", &self.db)
            .field("login", &self.login)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("db", &self.db)
            .field("login", &self.login)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl Login {
        fn example() -> Self {
            Self {
                db: Some("clinic".to_owned()),
                login: Some("admin".to_owned()),
                password: Some("********".to_owned()),
            }
        }
    }

    #[test]
    fn complete_login_has_credentials() {
        let credentials = Login::example().into_credentials().unwrap();
        assert_eq!(credentials.db, "clinic");
        assert_eq!(credentials.login, "admin");
    }

    #[test]
    fn missing_or_blank_fields_have_none() {
        assert!(Login::default().into_credentials().is_none());

        let login = Login {
            password: Some("  ".to_owned()),
            ..Login::example()
        };
        assert!(login.into_credentials().is_none());
    }

    #[test]
    fn password_is_not_printed() {
        let printed = format!("{:?}", Login::example());
        assert!(!printed.contains("********"));
    }
}
