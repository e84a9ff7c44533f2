//! Patient model for PostgreSQL database operations.
//!
//! Patients are unique by `(patient_name, date_of_birth)` and carry a serial
//! number (e.g. `PAT00042`) drawn from the patient sequence on creation.
//! The age shown on a record is derived from the date of birth on every read
//! and is never stored.

use diesel::prelude::*;
use jiff_diesel::{Date, Timestamp};

use crate::schema::patients;
use crate::types::{
    BloodType, MaritalStatus, PatientGender, SequenceCode, YesNoAnswer, describe_age,
};

/// A patient record.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = patients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Patient {
    /// Unique patient identifier.
    pub id: i64,
    /// Human readable serial, unique across patients.
    pub patient_serial: String,
    /// Full name.
    pub patient_name: String,
    /// Phone number.
    pub contact_number: Option<String>,
    /// Date of birth; defaults to the creation date when not given.
    pub date_of_birth: Option<Date>,
    pub gender: Option<PatientGender>,
    pub occupation: Option<String>,
    pub marital_status: Option<MaritalStatus>,
    pub blood_type: Option<BloodType>,
    /// "Do you have any chronic diseases?"
    pub question_one: Option<YesNoAnswer>,
    pub question_one_note: Option<String>,
    /// "Are you currently taking any medication?"
    pub question_two: Option<YesNoAnswer>,
    pub question_two_note: Option<String>,
    /// Timestamp when the patient was registered.
    pub created_at: Timestamp,
    /// Timestamp when the patient was last updated.
    pub updated_at: Timestamp,
}

/// Data for registering a new patient.
///
/// The serial is assigned from the patient sequence when left empty.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = patients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewPatient {
    pub patient_serial: Option<String>,
    pub patient_name: String,
    pub contact_number: Option<String>,
    /// Falls back to the column default, the current date.
    pub date_of_birth: Option<Date>,
    pub gender: Option<PatientGender>,
    pub occupation: Option<String>,
    pub marital_status: Option<MaritalStatus>,
    pub blood_type: Option<BloodType>,
    pub question_one: Option<YesNoAnswer>,
    pub question_one_note: Option<String>,
    pub question_two: Option<YesNoAnswer>,
    pub question_two_note: Option<String>,
}

/// Data for updating a patient. `None` leaves a column unchanged.
#[derive(Debug, Default, Clone, AsChangeset)]
#[diesel(table_name = patients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdatePatient {
    pub patient_name: Option<String>,
    pub contact_number: Option<String>,
    pub date_of_birth: Option<Date>,
    pub gender: Option<PatientGender>,
    pub occupation: Option<String>,
    pub marital_status: Option<MaritalStatus>,
    pub blood_type: Option<BloodType>,
    pub question_one: Option<YesNoAnswer>,
    pub question_one_note: Option<String>,
    pub question_two: Option<YesNoAnswer>,
    pub question_two_note: Option<String>,
    pub updated_at: Option<Timestamp>,
}

impl Patient {
    /// Returns the date of birth as a civil date.
    #[inline]
    pub fn date_of_birth(&self) -> Option<jiff::civil::Date> {
        self.date_of_birth.map(jiff::civil::Date::from)
    }

    /// Returns the age on `today`, e.g. `"24 Years Old"`.
    pub fn age_on(&self, today: jiff::civil::Date) -> String {
        describe_age(self.date_of_birth(), today)
    }

    /// Returns the age as of the current local date.
    pub fn age(&self) -> String {
        self.age_on(jiff::Zoned::now().date())
    }
}

impl NewPatient {
    /// Returns whether a serial still has to be drawn from the sequence.
    pub fn needs_serial(&self) -> bool {
        SequenceCode::Patient.is_unassigned(self.patient_serial.as_deref())
    }
}

impl UpdatePatient {
    /// Returns whether the changeset touches no column.
    pub fn is_empty(&self) -> bool {
        self.patient_name.is_none()
            && self.contact_number.is_none()
            && self.date_of_birth.is_none()
            && self.gender.is_none()
            && self.occupation.is_none()
            && self.marital_status.is_none()
            && self.blood_type.is_none()
            && self.question_one.is_none()
            && self.question_one_note.is_none()
            && self.question_two.is_none()
            && self.question_two_note.is_none()
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn jane_doe() -> Patient {
        let now = jiff::Timestamp::now();
        Patient {
            id: 1,
            patient_serial: "PAT00001".to_owned(),
            patient_name: "Jane Doe".to_owned(),
            contact_number: Some("0100000000".to_owned()),
            date_of_birth: Some(date(2000, 1, 1).into()),
            gender: Some(PatientGender::Female),
            occupation: None,
            marital_status: None,
            blood_type: None,
            question_one: None,
            question_one_note: None,
            question_two: None,
            question_two_note: None,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[test]
    fn age_is_derived_from_date_of_birth() {
        let patient = jane_doe();
        assert_eq!(patient.age_on(date(2024, 1, 1)), "24 Years Old");
        assert_eq!(patient.age_on(date(2024, 12, 31)), "24 Years Old");
    }

    #[test]
    fn age_is_empty_without_date_of_birth() {
        let patient = Patient {
            date_of_birth: None,
            ..jane_doe()
        };
        assert_eq!(patient.age(), "");
    }

    #[test]
    fn serial_is_needed_when_absent_or_blank() {
        assert!(NewPatient::default().needs_serial());

        let patient = NewPatient {
            patient_serial: Some("  ".to_owned()),
            ..Default::default()
        };
        assert!(patient.needs_serial());

        let patient = NewPatient {
            patient_serial: Some("New Patient".to_owned()),
            ..Default::default()
        };
        assert!(patient.needs_serial());

        let patient = NewPatient {
            patient_serial: Some("LEGACY-7".to_owned()),
            ..Default::default()
        };
        assert!(!patient.needs_serial());
    }
}
