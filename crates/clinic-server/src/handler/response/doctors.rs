//! Doctor response types.

use clinic_postgres::model;
use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Doctor response.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Doctor {
    pub id: i64,
    pub doctor_name: String,
    pub specialty: Option<String>,
    pub license_number: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl From<model::Doctor> for Doctor {
    fn from(doctor: model::Doctor) -> Self {
        Self {
            id: doctor.id,
            doctor_name: doctor.doctor_name,
            specialty: doctor.specialty,
            license_number: doctor.license_number,
            is_active: doctor.is_active,
            created_at: doctor.created_at.into(),
        }
    }
}
