//! Contains constraints, enumerations and the pure domain derivations.

mod age;
mod constraint;
mod enums;
mod filtering;
mod pagination;
mod sequence;
mod validation;
mod window;

pub use age::{describe_age, patient_age};
pub use constraint::{
    AccessTokenConstraints, AccountConstraints, AppointmentAttachmentConstraints,
    AppointmentConstraints, AppointmentProcedureConstraints, CompanyConstraints,
    ConstraintCategory, ConstraintViolation, DoctorConstraints, PatientConstraints,
    PrescriptionConstraints,
};
pub use enums::{
    AppointmentStatus, AppointmentType, BloodType, MaritalStatus, PatientGender, YesNoAnswer,
};
pub use filtering::AppointmentFilter;
pub use pagination::{MAX_LIMIT, OffsetPage, OffsetPagination};
pub use sequence::SequenceCode;
pub use validation::ValidationError;
pub use window::{AppointmentWindow, DEFAULT_DURATION_HOURS};
