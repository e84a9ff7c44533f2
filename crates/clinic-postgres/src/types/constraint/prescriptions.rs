//! Prescriptions and prescription lines constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Prescriptions and prescription lines constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum PrescriptionConstraints {
    #[strum(serialize = "prescriptions_prescription_serial_unique_idx")]
    SerialUnique,
    #[strum(serialize = "prescriptions_appointment_id_fkey")]
    AppointmentExists,
    #[strum(serialize = "prescription_lines_medicine_not_empty")]
    MedicineNotEmpty,
}

impl PrescriptionConstraints {
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            PrescriptionConstraints::SerialUnique => ConstraintCategory::Uniqueness,
            PrescriptionConstraints::AppointmentExists => ConstraintCategory::BusinessLogic,
            PrescriptionConstraints::MedicineNotEmpty => ConstraintCategory::Validation,
        }
    }
}

super::impl_string_conversions!(PrescriptionConstraints);
