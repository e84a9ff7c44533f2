//! Database error to HTTP error conversion.
//!
//! Known constraint violations become `validation_error` or `conflict`
//! responses carrying a domain message; the per-table messages live in the
//! sibling `pg_*` modules. Every other database failure is logged and
//! reported with the operation's error kind.

use clinic_postgres::error::DieselError;
use clinic_postgres::types::{ConstraintViolation, ValidationError};
use clinic_postgres::{PgError, PgResult};

use crate::handler::{Error, ErrorKind, Result};

/// Tracing target for database error conversions.
const TRACING_TARGET: &str = "clinic_server::postgres_constraints";

impl From<ConstraintViolation> for Error<'static> {
    fn from(constraint: ConstraintViolation) -> Self {
        let resource = constraint.table_name();
        let error: Error<'static> = match constraint {
            ConstraintViolation::Company(c) => c.into(),
            ConstraintViolation::Account(c) => c.into(),
            ConstraintViolation::AccessToken(c) => c.into(),
            ConstraintViolation::Doctor(c) => c.into(),
            ConstraintViolation::Patient(c) => c.into(),
            ConstraintViolation::Appointment(c) => c.into(),
            ConstraintViolation::AppointmentAttachment(c) => c.into(),
            ConstraintViolation::AppointmentProcedure(c) => c.into(),
            ConstraintViolation::Prescription(c) => c.into(),
        };

        error.with_resource(resource)
    }
}

impl From<ValidationError> for Error<'static> {
    fn from(error: ValidationError) -> Self {
        ErrorKind::ValidationError.with_message(error.to_string())
    }
}

impl Error<'static> {
    /// Converts a database error, reporting `fallback` for failures that
    /// are not a known constraint violation.
    pub fn from_pg(error: PgError, fallback: ErrorKind) -> Self {
        match error {
            PgError::Config(ref config_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %config_error,
                    "database configuration error"
                );
            }
            PgError::Timeout(ref timeout) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    timeout = ?timeout,
                    "database timeout",
                );
            }
            PgError::Connection(ref connection_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %connection_error,
                    "database connection error"
                );
            }
            PgError::Migration(ref migration_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %migration_error,
                    "database migration error"
                );
            }
            PgError::Query(ref query_error) => {
                if let Some(constraint_name) = error.constraint()
                    && let Some(constraint) = ConstraintViolation::new(constraint_name)
                {
                    tracing::warn!(
                        target: TRACING_TARGET,
                        constraint = constraint_name,
                        category = ?constraint.categorize(),
                        error = %query_error,
                        "query error (constraint violation)"
                    );
                    return constraint.into();
                }

                tracing::error!(
                    target: TRACING_TARGET,
                    error = %query_error,
                    "query error"
                );
            }
            PgError::Unexpected(ref unexpected_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %unexpected_error,
                    "unexpected database error"
                );
            }
        }

        fallback.with_context(error.to_string())
    }
}

impl From<PgError> for Error<'static> {
    #[inline]
    fn from(error: PgError) -> Self {
        Self::from_pg(error, ErrorKind::ServerError)
    }
}

/// Lets handlers run their own transactions with [`PgConn::transaction`].
///
/// [`PgConn::transaction`]: clinic_postgres::PgConn::transaction
impl From<DieselError> for Error<'static> {
    #[inline]
    fn from(error: DieselError) -> Self {
        PgError::from(error).into()
    }
}

/// Attaches the operation's error kind to a database result.
pub trait PgResultExt<T> {
    /// Maps a failure with [`Error::from_pg`].
    ///
    /// ```ignore
    /// let patient = conn
    ///     .find_patient_by_id(patient_id)
    ///     .await
    ///     .on_failure(ErrorKind::FetchError)?;
    /// ```
    fn on_failure(self, kind: ErrorKind) -> Result<T>;
}

impl<T> PgResultExt<T> for PgResult<T> {
    #[inline]
    fn on_failure(self, kind: ErrorKind) -> Result<T> {
        self.map_err(|error| Error::from_pg(error, kind))
    }
}

#[cfg(test)]
mod tests {
    use clinic_postgres::types::{AppointmentConstraints, PatientConstraints};

    use super::*;

    #[test]
    fn duplicate_patient_is_a_conflict() {
        let error: Error = ConstraintViolation::Patient(PatientConstraints::NameDateOfBirthUnique)
            .into();

        assert_eq!(error.kind(), ErrorKind::Conflict);
        assert_eq!(error.resource(), Some("patients"));
        assert!(error.message().is_some_and(|m| m.contains("date of birth")));
    }

    #[test]
    fn stop_before_start_is_a_validation_error() {
        let error: Error =
            ConstraintViolation::Appointment(AppointmentConstraints::StopAfterStart).into();

        assert_eq!(error.kind(), ErrorKind::ValidationError);
        assert_eq!(
            error.message(),
            Some("End time cannot be earlier than start time.")
        );
    }

    #[test]
    fn domain_validation_keeps_its_message() {
        let error: Error = ValidationError::EmptyPrescription.into();
        assert_eq!(error.kind(), ErrorKind::ValidationError);
        assert_eq!(
            error.message(),
            Some("The prescription must have at least one medicine line.")
        );
    }

    #[test]
    fn other_failures_use_the_operation_kind() {
        let result: PgResult<()> = Err(PgError::Unexpected("pool closed".into()));
        let error = result.on_failure(ErrorKind::FetchError).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::FetchError);
        assert!(error.context().is_some_and(|c| c.contains("pool closed")));
        assert!(error.message().is_none());
    }

    #[test]
    fn bare_conversion_is_a_server_error() {
        let error: Error = PgError::Config("missing url".into()).into();
        assert_eq!(error.kind(), ErrorKind::ServerError);
    }
}
