//! Patient response types.

use clinic_postgres::model;
use clinic_postgres::types::{BloodType, MaritalStatus, PatientGender, YesNoAnswer};
use jiff::Timestamp;
use jiff::civil::Date;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Patient response.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Patient {
    pub id: i64,
    pub patient_serial: String,
    pub patient_name: String,
    pub contact_number: Option<String>,
    pub date_of_birth: Option<Date>,
    /// Age derived from the date of birth, e.g. "24 Years Old".
    pub age: String,
    pub gender: Option<PatientGender>,
    pub occupation: Option<String>,
    pub marital_status: Option<MaritalStatus>,
    pub blood_type: Option<BloodType>,
    pub question_one: Option<YesNoAnswer>,
    pub question_one_note: Option<String>,
    pub question_two: Option<YesNoAnswer>,
    pub question_two_note: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Patient {
    /// Creates a Patient response with the age as of today.
    pub fn from_model(patient: model::Patient) -> Self {
        let age = patient.age();
        Self {
            id: patient.id,
            patient_serial: patient.patient_serial,
            patient_name: patient.patient_name,
            contact_number: patient.contact_number,
            date_of_birth: patient.date_of_birth.map(Into::into),
            age,
            gender: patient.gender,
            occupation: patient.occupation,
            marital_status: patient.marital_status,
            blood_type: patient.blood_type,
            question_one: patient.question_one,
            question_one_note: patient.question_one_note,
            question_two: patient.question_two,
            question_two_note: patient.question_two_note,
            created_at: patient.created_at.into(),
            updated_at: patient.updated_at.into(),
        }
    }
}

/// Payload returned after registering a patient.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PatientCreated {
    pub id: i64,
    pub patient_serial: String,
    pub message: String,
}

impl PatientCreated {
    pub fn from_model(patient: &model::Patient) -> Self {
        Self {
            id: patient.id,
            patient_serial: patient.patient_serial.clone(),
            message: "Patient created successfully".to_owned(),
        }
    }
}
