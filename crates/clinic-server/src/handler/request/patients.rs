//! Patient request types.

use clinic_postgres::model::{NewPatient, UpdatePatient as UpdatePatientModel};
use clinic_postgres::types::{BloodType, MaritalStatus, PatientGender, YesNoAnswer};
use jiff::civil::Date;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request payload for registering a patient.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema, Validate)]
pub struct CreatePatient {
    /// Full name of the patient.
    #[validate(length(min = 1, code = "required"))]
    pub patient_name: String,
    /// Phone number of the patient.
    #[validate(length(min = 1, code = "required"))]
    pub contact_number: String,
    /// Serial to register the patient under. Drawn from the patient
    /// sequence when omitted.
    #[validate(length(max = 32))]
    pub patient_serial: Option<String>,
    /// Date of birth, e.g. `2000-01-01`.
    pub date_of_birth: Option<Date>,
    pub gender: Option<PatientGender>,
    #[validate(length(max = 255))]
    pub occupation: Option<String>,
    pub marital_status: Option<MaritalStatus>,
    pub blood_type: Option<BloodType>,
    /// Whether the patient has chronic diseases.
    pub question_one: Option<YesNoAnswer>,
    pub question_one_note: Option<String>,
    /// Whether the patient currently takes medication.
    pub question_two: Option<YesNoAnswer>,
    pub question_two_note: Option<String>,
}

impl CreatePatient {
    /// Converts this request into a [`NewPatient`] model.
    pub fn into_model(self) -> NewPatient {
        NewPatient {
            patient_serial: self.patient_serial,
            patient_name: self.patient_name.trim().to_owned(),
            contact_number: Some(self.contact_number),
            date_of_birth: self.date_of_birth.map(Into::into),
            gender: self.gender,
            occupation: self.occupation,
            marital_status: self.marital_status,
            blood_type: self.blood_type,
            question_one: self.question_one,
            question_one_note: self.question_one_note,
            question_two: self.question_two,
            question_two_note: self.question_two_note,
        }
    }
}

/// Request payload for updating a patient. Omitted fields are unchanged.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema, Validate)]
pub struct UpdatePatient {
    #[validate(length(min = 1, code = "required"))]
    pub patient_name: Option<String>,
    pub contact_number: Option<String>,
    pub date_of_birth: Option<Date>,
    pub gender: Option<PatientGender>,
    #[validate(length(max = 255))]
    pub occupation: Option<String>,
    pub marital_status: Option<MaritalStatus>,
    pub blood_type: Option<BloodType>,
    pub question_one: Option<YesNoAnswer>,
    pub question_one_note: Option<String>,
    pub question_two: Option<YesNoAnswer>,
    pub question_two_note: Option<String>,
}

impl UpdatePatient {
    /// Converts this request into an [`UpdatePatientModel`].
    pub fn into_model(self) -> UpdatePatientModel {
        UpdatePatientModel {
            patient_name: self.patient_name.map(|name| name.trim().to_owned()),
            contact_number: self.contact_number,
            date_of_birth: self.date_of_birth.map(Into::into),
            gender: self.gender,
            occupation: self.occupation,
            marital_status: self.marital_status,
            blood_type: self.blood_type,
            question_one: self.question_one,
            question_one_note: self.question_one_note,
            question_two: self.question_two,
            question_two_note: self.question_two_note,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn create_keeps_the_serial_optional() {
        let request: CreatePatient = serde_json::from_value(serde_json::json!({
            "patient_name": " Jane Doe ",
            "contact_number": "0100000000",
            "date_of_birth": "2000-01-01",
            "blood_type": "a+",
        }))
        .unwrap();
        assert!(request.validate().is_ok());

        let model = request.into_model();
        assert_eq!(model.patient_name, "Jane Doe");
        assert_eq!(model.blood_type, Some(BloodType::APositive));
        assert_eq!(model.date_of_birth.map(Date::from), Some(date(2000, 1, 1)));
        assert!(model.needs_serial());
    }

    #[test]
    fn empty_name_is_required() {
        let request = CreatePatient {
            contact_number: "0100000000".to_owned(),
            ..Default::default()
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("patient_name"));
    }

    #[test]
    fn empty_update_changes_nothing() {
        assert!(UpdatePatient::default().into_model().is_empty());

        let update = UpdatePatient {
            gender: Some(PatientGender::Male),
            ..Default::default()
        };
        assert!(!update.into_model().is_empty());
    }
}
