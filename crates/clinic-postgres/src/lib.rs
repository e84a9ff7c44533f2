#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Embeds all migrations into the final binary.
pub(crate) const MIGRATIONS: diesel_migrations::EmbeddedMigrations =
    diesel_migrations::embed_migrations!();

/// Tracing target for client initialization and configuration.
pub const TRACING_TARGET_CLIENT: &str = "clinic_postgres::client";

/// Tracing target for repository queries.
pub const TRACING_TARGET_QUERY: &str = "clinic_postgres::queries";

/// Tracing target for schema migrations.
pub const TRACING_TARGET_MIGRATION: &str = "clinic_postgres::migrations";

/// Tracing target for pool and connection lifecycle.
pub const TRACING_TARGET_CONNECTION: &str = "clinic_postgres::connection";

mod client;
pub mod model;
pub mod query;
mod schema;
pub mod types;

use std::borrow::Cow;

use deadpool::managed::TimeoutType;
use diesel::ConnectionError;
use diesel::result::Error;
pub use diesel_async::AsyncPgConnection as PgConnection;

pub use crate::client::{
    ConnectionPool, PgClient, PgConfig, PgConn, PgPoolStatus, PooledConnection,
    run_pending_migrations,
};
use crate::types::ConstraintViolation;

pub mod error {
    //! Error types re-exported from the pool and the ORM.

    /// Type-erased error type for dynamic error handling.
    pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

    pub use deadpool::managed::TimeoutType;
    pub use diesel::result::{ConnectionError as DieselConnectionError, Error as DieselError};
    pub use diesel_async::pooled_connection::PoolError as DieselPoolError;
    pub use diesel_async::pooled_connection::deadpool::PoolError as DeadpoolError;
}

/// Error type for every PostgreSQL operation in this crate.
#[derive(Debug, thiserror::Error)]
#[must_use = "database errors should be handled appropriately"]
pub enum PgError {
    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Waiting for, creating, or recycling a pooled connection timed out.
    #[error("Database operation timed out")]
    Timeout(TimeoutType),

    /// The connection could not be established or was lost.
    #[error("Database connection error: {0}")]
    Connection(#[from] ConnectionError),

    /// Applying the embedded migrations failed.
    #[error("Database migration error: {0}")]
    Migration(error::BoxError),

    /// Query execution failed, including constraint violations.
    #[error("Database query error: {0}")]
    Query(#[from] Error),

    /// Anything the other variants do not cover.
    #[error("Unexpected error: {0}")]
    Unexpected(Cow<'static, str>),
}

impl PgError {
    /// Returns the name of the violated constraint, if any.
    pub fn constraint(&self) -> Option<&str> {
        let PgError::Query(err) = self else {
            return None;
        };

        let Error::DatabaseError(_, err) = err else {
            return None;
        };

        err.constraint_name()
    }

    /// Returns the violated constraint as a typed [`ConstraintViolation`].
    pub fn constraint_violation(&self) -> Option<ConstraintViolation> {
        self.constraint().and_then(ConstraintViolation::new)
    }

    /// Returns whether the failure is a unique-key violation.
    pub fn is_unique_violation(&self) -> bool {
        use diesel::result::DatabaseErrorKind;

        matches!(
            self,
            PgError::Query(Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _))
        )
    }

    /// Returns whether the query matched no rows.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PgError::Query(Error::NotFound))
    }

    /// Returns whether retrying the operation may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PgError::Timeout(_) | PgError::Connection(ConnectionError::BadConnection(_))
        )
    }
}

impl From<error::DeadpoolError> for PgError {
    fn from(value: error::DeadpoolError) -> Self {
        use error::{DeadpoolError, DieselPoolError};

        match value {
            DeadpoolError::Timeout(timeout) => Self::Timeout(timeout),
            DeadpoolError::Backend(DieselPoolError::QueryError(error)) => Self::Query(error),
            DeadpoolError::Backend(DieselPoolError::ConnectionError(error)) => {
                Self::Connection(error)
            }
            DeadpoolError::PostCreateHook(err) => {
                tracing::warn!(target: TRACING_TARGET_CONNECTION, error = %err, "Post-create hook failed");
                Self::Unexpected(err.to_string().into())
            }
            DeadpoolError::NoRuntimeSpecified => Self::Unexpected("No runtime specified".into()),
            DeadpoolError::Closed => Self::Connection(ConnectionError::InvalidConnectionUrl(
                "Connection pool is closed".into(),
            )),
        }
    }
}

/// Specialized [`Result`] type for database operations.
pub type PgResult<T, E = PgError> = Result<T, E>;

#[cfg(test)]
mod tests {
    use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind};

    use super::*;

    struct ViolationInfo(&'static str);

    impl DatabaseErrorInformation for ViolationInfo {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn details(&self) -> Option<&str> {
            None
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            None
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            Some(self.0)
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn unique_violation(constraint: &'static str) -> PgError {
        PgError::Query(Error::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(ViolationInfo(constraint)),
        ))
    }

    #[test]
    fn constraint_name_is_extracted() {
        let error = unique_violation("patients_name_dob_unique");
        assert_eq!(error.constraint(), Some("patients_name_dob_unique"));
        assert!(error.is_unique_violation());
        assert!(error.constraint_violation().is_some());
    }

    #[test]
    fn non_query_errors_have_no_constraint() {
        let error = PgError::Config("missing url".into());
        assert!(error.constraint().is_none());
        assert!(!error.is_unique_violation());
        assert!(!error.is_transient());
    }

    #[test]
    fn not_found_is_detected() {
        assert!(PgError::Query(Error::NotFound).is_not_found());
    }
}
