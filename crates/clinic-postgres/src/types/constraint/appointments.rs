//! Appointments and appointment line tables constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Appointments table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum AppointmentConstraints {
    // Appointment chronological constraints
    #[strum(serialize = "appointments_stop_after_start")]
    StopAfterStart,
    #[strum(serialize = "appointments_updated_after_created")]
    UpdatedAfterCreated,

    // Appointment unique constraints
    #[strum(serialize = "appointments_appointment_serial_unique_idx")]
    SerialUnique,

    // Appointment references
    #[strum(serialize = "appointments_patient_id_fkey")]
    PatientExists,
    #[strum(serialize = "appointments_doctor_id_fkey")]
    DoctorExists,
    #[strum(serialize = "appointments_assistant_id_fkey")]
    AssistantExists,
}

impl AppointmentConstraints {
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            AppointmentConstraints::StopAfterStart
            | AppointmentConstraints::UpdatedAfterCreated => ConstraintCategory::Chronological,
            AppointmentConstraints::SerialUnique => ConstraintCategory::Uniqueness,
            AppointmentConstraints::PatientExists
            | AppointmentConstraints::DoctorExists
            | AppointmentConstraints::AssistantExists => ConstraintCategory::BusinessLogic,
        }
    }
}

/// Appointment attachments table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum AppointmentAttachmentConstraints {
    #[strum(serialize = "appointment_attachments_file_size")]
    FileSize,
    #[strum(serialize = "appointment_attachments_appointment_id_fkey")]
    AppointmentExists,
}

impl AppointmentAttachmentConstraints {
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            AppointmentAttachmentConstraints::FileSize => ConstraintCategory::Validation,
            AppointmentAttachmentConstraints::AppointmentExists => {
                ConstraintCategory::BusinessLogic
            }
        }
    }
}

/// Appointment procedures table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum AppointmentProcedureConstraints {
    #[strum(serialize = "appointment_procedures_tooth_no_range")]
    ToothNumberRange,
    #[strum(serialize = "appointment_procedures_procedure_name_not_empty")]
    ProcedureNameNotEmpty,
    #[strum(serialize = "appointment_procedures_cost_non_negative")]
    CostNonNegative,
    #[strum(serialize = "appointment_procedures_appointment_id_fkey")]
    AppointmentExists,
}

impl AppointmentProcedureConstraints {
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            AppointmentProcedureConstraints::ToothNumberRange
            | AppointmentProcedureConstraints::ProcedureNameNotEmpty
            | AppointmentProcedureConstraints::CostNonNegative => ConstraintCategory::Validation,
            AppointmentProcedureConstraints::AppointmentExists => {
                ConstraintCategory::BusinessLogic
            }
        }
    }
}

super::impl_string_conversions!(
    AppointmentConstraints,
    AppointmentAttachmentConstraints,
    AppointmentProcedureConstraints,
);
