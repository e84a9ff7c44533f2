//! Argon2id password hashing for account credentials.
//!
//! Hashes are stored as PHC strings in `accounts.password_hash`. Failures
//! are reported as handler errors so the login handler can return them
//! directly.

use argon2::password_hash::{Error as ArgonError, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher as _, PasswordVerifier};
use rand::Rng;
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;

use crate::handler::{ErrorKind, Result};

const TRACING_TARGET_PASSWORD_HASHER: &str = "clinic_server::service::password_hasher";

/// Password hashing and verification with Argon2id default parameters.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Hashes a password with a fresh random salt.
    ///
    /// Returns a PHC string carrying the algorithm, parameters and salt.
    pub fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!(
                    target: TRACING_TARGET_PASSWORD_HASHER,
                    error = %e,
                    "password hashing operation failed"
                );

                ErrorKind::ServerError
                    .with_message("Password processing failed")
                    .with_context("Hash generation error")
                    .with_resource("authentication")
            })?;

        Ok(password_hash.to_string())
    }

    /// Verifies a password against a stored PHC string.
    ///
    /// A wrong password fails with `authentication_failed`; a malformed hash
    /// or an internal failure with `server_error`.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<()> {
        let parsed_hash = PasswordHash::new(stored_hash).map_err(|e| {
            tracing::warn!(
                target: TRACING_TARGET_PASSWORD_HASHER,
                error = %e,
                "invalid password hash format"
            );

            ErrorKind::ServerError
                .with_message("Authentication temporarily unavailable")
                .with_context("Hash format error")
                .with_resource("authentication")
        })?;

        match self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(()),
            Err(ArgonError::Password) => {
                tracing::debug!(
                    target: TRACING_TARGET_PASSWORD_HASHER,
                    "password verification failed"
                );

                Err(ErrorKind::AuthenticationFailed.with_resource("authentication"))
            }
            Err(e) => {
                tracing::error!(
                    target: TRACING_TARGET_PASSWORD_HASHER,
                    error = %e,
                    "password verification system error"
                );

                Err(ErrorKind::ServerError
                    .with_message("Authentication temporarily unavailable")
                    .with_context("Verification error")
                    .with_resource("authentication"))
            }
        }
    }

    /// Burns one hash and verification so unknown logins take as long as
    /// known ones. Always returns `false`.
    pub fn verify_dummy_password(&self, password: &str) -> bool {
        let mut rng = rand::thread_rng();
        let password_len = rng.gen_range(16..32);
        let dummy_password: String = (&mut rng)
            .sample_iter(&Alphanumeric)
            .take(password_len)
            .map(char::from)
            .collect();

        if let Ok(dummy_hash) = self.hash_password(&dummy_password) {
            let _ = self.verify_password(password, &dummy_hash);
        }

        false
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_password() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash_password("front-desk-2024")?;

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify_password("front-desk-2024", &hash).is_ok());
        Ok(())
    }

    #[test]
    fn hash_produces_unique_salts() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new();

        let hash1 = hasher.hash_password("same")?;
        let hash2 = hasher.hash_password("same")?;

        assert_ne!(hash1, hash2);
        Ok(())
    }

    #[test]
    fn wrong_password_is_authentication_failed() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash_password("correct")?;

        let error = hasher.verify_password("wrong", &hash).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::AuthenticationFailed);
        Ok(())
    }

    #[test]
    fn malformed_hash_is_a_server_error() {
        let hasher = PasswordHasher::new();
        let error = hasher.verify_password("any", "not-a-phc-string").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ServerError);
    }

    #[test]
    fn dummy_verification_never_succeeds() {
        assert!(!PasswordHasher::new().verify_dummy_password("anything"));
    }
}
