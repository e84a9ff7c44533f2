//! [`Error`], [`ErrorKind`] and [`Result`].

mod http_error;
mod pg_account;
mod pg_appointment;
mod pg_error;
mod pg_patient;

pub use http_error::{Error, ErrorKind, Result};
pub use pg_error::PgResultExt;
