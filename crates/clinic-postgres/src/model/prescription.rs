//! Prescription models for PostgreSQL database operations.

use diesel::prelude::*;
use jiff_diesel::{Date, Timestamp};

use crate::schema::{prescription_lines, prescriptions};
use crate::types::ValidationError;

/// A prescription issued during an appointment.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = prescriptions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Prescription {
    pub id: i64,
    /// Human readable serial, unique across prescriptions.
    pub prescription_serial: String,
    pub appointment_id: i64,
    /// Copied from the appointment when the prescription is created.
    pub patient_id: i64,
    pub prescription_date: Date,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

/// One medicine on a prescription.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = prescription_lines)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PrescriptionLine {
    pub id: i64,
    pub prescription_id: i64,
    pub medicine_trade_name: String,
    pub therapeutic_regimen: Option<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = prescriptions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewPrescription {
    pub prescription_serial: String,
    pub appointment_id: i64,
    pub patient_id: i64,
    pub prescription_date: Option<Date>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = prescription_lines)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewPrescriptionLine {
    pub prescription_id: i64,
    pub medicine_trade_name: String,
    pub therapeutic_regimen: Option<String>,
}

/// A medicine line before its prescription exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrescriptionLineDraft {
    pub medicine_trade_name: String,
    pub therapeutic_regimen: Option<String>,
}

/// A validated prescription waiting to be written.
///
/// Always holds at least one line with a medicine name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrescriptionDraft {
    appointment_id: i64,
    prescription_date: Option<jiff::civil::Date>,
    notes: Option<String>,
    lines: Vec<PrescriptionLineDraft>,
}

impl PrescriptionDraft {
    pub fn new(
        appointment_id: i64,
        prescription_date: Option<jiff::civil::Date>,
        notes: Option<String>,
        lines: Vec<PrescriptionLineDraft>,
    ) -> Result<Self, ValidationError> {
        if lines.is_empty() {
            return Err(ValidationError::EmptyPrescription);
        }

        if lines
            .iter()
            .any(|line| line.medicine_trade_name.trim().is_empty())
        {
            return Err(ValidationError::EmptyMedicineName);
        }

        Ok(Self {
            appointment_id,
            prescription_date,
            notes,
            lines,
        })
    }

    #[inline]
    pub fn appointment_id(&self) -> i64 {
        self.appointment_id
    }

    #[inline]
    pub fn lines(&self) -> &[PrescriptionLineDraft] {
        &self.lines
    }

    /// Builds the header row once the serial and patient are known.
    pub(crate) fn header(&self, prescription_serial: String, patient_id: i64) -> NewPrescription {
        NewPrescription {
            prescription_serial,
            appointment_id: self.appointment_id,
            patient_id,
            prescription_date: self.prescription_date.map(Date::from),
            notes: self.notes.clone(),
        }
    }

    /// Builds the line rows once the header is written.
    pub(crate) fn line_rows(self, prescription_id: i64) -> Vec<NewPrescriptionLine> {
        self.lines
            .into_iter()
            .map(|line| NewPrescriptionLine {
                prescription_id,
                medicine_trade_name: line.medicine_trade_name,
                therapeutic_regimen: line.therapeutic_regimen,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(name: &str) -> PrescriptionLineDraft {
        PrescriptionLineDraft {
            medicine_trade_name: name.to_owned(),
            therapeutic_regimen: Some("twice daily".to_owned()),
        }
    }

    #[test]
    fn prescription_requires_a_line() {
        let draft = PrescriptionDraft::new(1, None, None, Vec::new());
        assert_eq!(draft, Err(ValidationError::EmptyPrescription));
        assert_eq!(
            ValidationError::EmptyPrescription.to_string(),
            "The prescription must have at least one medicine line."
        );
    }

    #[test]
    fn blank_medicine_is_rejected() {
        let draft = PrescriptionDraft::new(1, None, None, vec![line("Amoxicillin"), line(" ")]);
        assert_eq!(draft, Err(ValidationError::EmptyMedicineName));
    }

    #[test]
    fn lines_are_attached_to_the_header() {
        let draft = PrescriptionDraft::new(4, None, None, vec![line("Amoxicillin")]).unwrap();
        let header = draft.header("RX00001".to_owned(), 9);
        assert_eq!(header.appointment_id, 4);
        assert_eq!(header.patient_id, 9);

        let rows = draft.line_rows(12);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].prescription_id, 12);
    }
}
