//! Patients table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Patients table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum PatientConstraints {
    // Patient validation constraints
    #[strum(serialize = "patients_patient_name_not_empty")]
    PatientNameNotEmpty,

    // Patient chronological constraints
    #[strum(serialize = "patients_updated_after_created")]
    UpdatedAfterCreated,

    // Patient unique constraints
    #[strum(serialize = "patients_name_dob_unique")]
    NameDateOfBirthUnique,
    #[strum(serialize = "patients_patient_serial_unique_idx")]
    SerialUnique,
}

impl PatientConstraints {
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            PatientConstraints::PatientNameNotEmpty => ConstraintCategory::Validation,
            PatientConstraints::UpdatedAfterCreated => ConstraintCategory::Chronological,
            PatientConstraints::NameDateOfBirthUnique | PatientConstraints::SerialUnique => {
                ConstraintCategory::Uniqueness
            }
        }
    }
}

super::impl_string_conversions!(PatientConstraints);
