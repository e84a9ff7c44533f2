//! PostgreSQL enum mappings.

mod appointment_status;
mod appointment_type;
mod patient_profile;

pub use appointment_status::AppointmentStatus;
pub use appointment_type::AppointmentType;
pub use patient_profile::{BloodType, MaritalStatus, PatientGender, YesNoAnswer};
