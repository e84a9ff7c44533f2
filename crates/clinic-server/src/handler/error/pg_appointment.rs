//! Appointment and appointment line constraint violation error handlers.

use clinic_postgres::types::{
    AppointmentAttachmentConstraints, AppointmentConstraints, AppointmentProcedureConstraints,
    PrescriptionConstraints,
};

use crate::handler::{Error, ErrorKind};

const APPOINTMENT_MISSING: &str = "Appointment does not exist";

impl From<AppointmentConstraints> for Error<'static> {
    fn from(c: AppointmentConstraints) -> Self {
        match c {
            AppointmentConstraints::StopAfterStart => ErrorKind::ValidationError
                .with_message("End time cannot be earlier than start time."),
            AppointmentConstraints::SerialUnique => {
                ErrorKind::Conflict.with_message("Appointment serial number already exists")
            }
            AppointmentConstraints::PatientExists => {
                ErrorKind::ValidationError.with_message("Patient does not exist")
            }
            AppointmentConstraints::DoctorExists => {
                ErrorKind::ValidationError.with_message("Doctor does not exist")
            }
            AppointmentConstraints::AssistantExists => {
                ErrorKind::ValidationError.with_message("Assistant account does not exist")
            }
            AppointmentConstraints::UpdatedAfterCreated => ErrorKind::ServerError.into_error(),
        }
    }
}

impl From<AppointmentAttachmentConstraints> for Error<'static> {
    fn from(c: AppointmentAttachmentConstraints) -> Self {
        match c {
            AppointmentAttachmentConstraints::FileSize => {
                ErrorKind::ValidationError.with_message("Attachment exceeds the 10 MB limit")
            }
            AppointmentAttachmentConstraints::AppointmentExists => {
                ErrorKind::ValidationError.with_message(APPOINTMENT_MISSING)
            }
        }
    }
}

impl From<AppointmentProcedureConstraints> for Error<'static> {
    fn from(c: AppointmentProcedureConstraints) -> Self {
        match c {
            AppointmentProcedureConstraints::ToothNumberRange => {
                ErrorKind::ValidationError.with_message("Tooth number must be between 1 and 32")
            }
            AppointmentProcedureConstraints::ProcedureNameNotEmpty => {
                ErrorKind::ValidationError.with_message("Procedure name cannot be empty")
            }
            AppointmentProcedureConstraints::CostNonNegative => {
                ErrorKind::ValidationError.with_message("Procedure cost cannot be negative")
            }
            AppointmentProcedureConstraints::AppointmentExists => {
                ErrorKind::ValidationError.with_message(APPOINTMENT_MISSING)
            }
        }
    }
}

impl From<PrescriptionConstraints> for Error<'static> {
    fn from(c: PrescriptionConstraints) -> Self {
        match c {
            PrescriptionConstraints::SerialUnique => {
                ErrorKind::Conflict.with_message("Prescription serial number already exists")
            }
            PrescriptionConstraints::AppointmentExists => {
                ErrorKind::ValidationError.with_message(APPOINTMENT_MISSING)
            }
            PrescriptionConstraints::MedicineNotEmpty => ErrorKind::ValidationError
                .with_message("Medicine trade name is required on every prescription line."),
        }
    }
}
