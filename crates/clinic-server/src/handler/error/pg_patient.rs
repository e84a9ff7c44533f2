//! Patient and doctor constraint violation error handlers.

use clinic_postgres::types::{DoctorConstraints, PatientConstraints};

use crate::handler::{Error, ErrorKind};

impl From<PatientConstraints> for Error<'static> {
    fn from(c: PatientConstraints) -> Self {
        match c {
            PatientConstraints::PatientNameNotEmpty => {
                ErrorKind::ValidationError.with_message("Patient name cannot be empty")
            }
            PatientConstraints::NameDateOfBirthUnique => ErrorKind::Conflict
                .with_message("A patient with the same name and date of birth already exists"),
            PatientConstraints::SerialUnique => {
                ErrorKind::Conflict.with_message("Patient serial number already exists")
            }
            PatientConstraints::UpdatedAfterCreated => ErrorKind::ServerError.into_error(),
        }
    }
}

impl From<DoctorConstraints> for Error<'static> {
    fn from(c: DoctorConstraints) -> Self {
        match c {
            DoctorConstraints::DoctorNameNotEmpty => {
                ErrorKind::ValidationError.with_message("Doctor name cannot be empty")
            }
        }
    }
}
