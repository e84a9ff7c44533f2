//! Domain validation failures raised before anything is written.

/// A record was refused because its fields break a domain rule.
///
/// Unlike [`PgError`], these are detected in process and never reach the
/// database. The message is meant to be shown to the caller as is.
///
/// [`PgError`]: crate::PgError
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("End time cannot be earlier than start time.")]
    StopBeforeStart,

    #[error("Duration must be a finite number of hours.")]
    InvalidDuration,

    #[error("The appointment time is out of range.")]
    TimeOutOfRange,

    #[error("The prescription must have at least one medicine line.")]
    EmptyPrescription,

    #[error("Medicine trade name is required on every prescription line.")]
    EmptyMedicineName,
}
