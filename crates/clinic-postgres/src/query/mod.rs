//! Repositories implemented for the pooled Postgres connection.
//!
//! Every trait here is implemented for [`PgConnection`], so the methods are
//! callable directly on a checked out [`PgConn`].
//!
//! [`PgConnection`]: crate::PgConnection
//! [`PgConn`]: crate::PgConn

mod access_token;
mod account;
mod appointment;
mod appointment_line;
mod doctor;
mod patient;
mod prescription;
mod sequence;

pub use access_token::AccessTokenRepository;
pub use account::AccountRepository;
pub use appointment::AppointmentRepository;
pub use appointment_line::AppointmentLineRepository;
pub use doctor::DoctorRepository;
pub use patient::PatientRepository;
pub use prescription::PrescriptionRepository;
pub use sequence::SequenceRepository;
