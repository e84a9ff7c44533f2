//! Request types for HTTP handlers.

mod appointment_lines;
mod appointments;
mod authentications;
mod datetimes;
mod doctors;
mod paginations;
mod paths;
mod patients;
mod prescriptions;

pub use appointment_lines::*;
pub use appointments::*;
pub use authentications::*;
pub use doctors::*;
pub use paginations::*;
pub use paths::*;
pub use patients::*;
pub use prescriptions::*;
