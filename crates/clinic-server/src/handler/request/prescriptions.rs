//! Prescription request types.

use clinic_postgres::model::{PrescriptionDraft, PrescriptionLineDraft};
use clinic_postgres::types::ValidationError;
use jiff::civil::Date;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One medicine on a prescription.
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema, Validate)]
pub struct CreatePrescriptionLine {
    /// Trade name of the medicine.
    #[validate(length(min = 1, code = "required"))]
    pub medicine_trade_name: String,
    /// Dosage and schedule, e.g. "500mg twice daily for 5 days".
    pub therapeutic_regimen: Option<String>,
}

/// Request payload for writing a prescription for an appointment.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema, Validate)]
pub struct CreatePrescription {
    /// Date printed on the prescription. Defaults to today.
    pub prescription_date: Option<Date>,
    pub notes: Option<String>,
    /// Medicines to prescribe; at least one.
    #[validate(nested)]
    #[serde(default)]
    pub lines: Vec<CreatePrescriptionLine>,
}

impl CreatePrescription {
    /// Converts this request into a [`PrescriptionDraft`] for
    /// `appointment_id`.
    pub fn into_draft(self, appointment_id: i64) -> Result<PrescriptionDraft, ValidationError> {
        let lines = self
            .lines
            .into_iter()
            .map(|line| PrescriptionLineDraft {
                medicine_trade_name: line.medicine_trade_name.trim().to_owned(),
                therapeutic_regimen: line.therapeutic_regimen,
            })
            .collect();

        PrescriptionDraft::new(appointment_id, self.prescription_date, self.notes, lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_are_required() {
        let request: CreatePrescription =
            serde_json::from_value(serde_json::json!({ "notes": "after meals" })).unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(
            request.into_draft(1).unwrap_err(),
            ValidationError::EmptyPrescription
        );
    }

    #[test]
    fn draft_keeps_the_lines() {
        let request: CreatePrescription = serde_json::from_value(serde_json::json!({
            "lines": [
                { "medicine_trade_name": "Amoxicillin", "therapeutic_regimen": "500mg" },
                { "medicine_trade_name": "Ibuprofen" },
            ],
        }))
        .unwrap();

        let draft = request.into_draft(7).unwrap();
        assert_eq!(draft.appointment_id(), 7);
        assert_eq!(draft.lines().len(), 2);
        assert_eq!(draft.lines()[1].therapeutic_regimen, None);
    }
}
