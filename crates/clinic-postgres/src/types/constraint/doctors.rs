//! Doctors table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Doctors table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum DoctorConstraints {
    #[strum(serialize = "doctors_doctor_name_not_empty")]
    DoctorNameNotEmpty,
}

impl DoctorConstraints {
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    pub fn categorize(&self) -> ConstraintCategory {
        ConstraintCategory::Validation
    }
}

super::impl_string_conversions!(DoctorConstraints);
