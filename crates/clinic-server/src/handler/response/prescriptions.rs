//! Prescription response types.

use std::collections::HashMap;

use clinic_postgres::model;
use jiff::Timestamp;
use jiff::civil::Date;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One medicine on a prescription.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PrescriptionLine {
    pub id: i64,
    pub medicine_trade_name: String,
    pub therapeutic_regimen: Option<String>,
}

impl From<model::PrescriptionLine> for PrescriptionLine {
    fn from(line: model::PrescriptionLine) -> Self {
        Self {
            id: line.id,
            medicine_trade_name: line.medicine_trade_name,
            therapeutic_regimen: line.therapeutic_regimen,
        }
    }
}

/// Prescription response with its lines.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Prescription {
    pub id: i64,
    pub prescription_serial: String,
    pub appointment_id: i64,
    pub patient_id: i64,
    pub prescription_date: Date,
    pub notes: Option<String>,
    pub lines: Vec<PrescriptionLine>,
    pub created_at: Timestamp,
}

impl Prescription {
    /// Creates a Prescription response from a header and its lines.
    pub fn from_model(
        prescription: model::Prescription,
        lines: Vec<model::PrescriptionLine>,
    ) -> Self {
        Self {
            id: prescription.id,
            prescription_serial: prescription.prescription_serial,
            appointment_id: prescription.appointment_id,
            patient_id: prescription.patient_id,
            prescription_date: prescription.prescription_date.into(),
            notes: prescription.notes,
            lines: lines.into_iter().map(Into::into).collect(),
            created_at: prescription.created_at.into(),
        }
    }

    /// Pairs every prescription with its lines, keeping the order of
    /// `prescriptions`.
    pub fn from_models(
        prescriptions: Vec<model::Prescription>,
        lines: Vec<model::PrescriptionLine>,
    ) -> Vec<Self> {
        let mut lines_by_prescription: HashMap<i64, Vec<model::PrescriptionLine>> =
            HashMap::new();
        for line in lines {
            lines_by_prescription
                .entry(line.prescription_id)
                .or_default()
                .push(line);
        }

        prescriptions
            .into_iter()
            .map(|prescription| {
                let lines = lines_by_prescription
                    .remove(&prescription.id)
                    .unwrap_or_default();
                Self::from_model(prescription, lines)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn header(id: i64) -> model::Prescription {
        model::Prescription {
            id,
            prescription_serial: format!("RX{id:05}"),
            appointment_id: 1,
            patient_id: 2,
            prescription_date: date(2024, 1, 1).into(),
            notes: None,
            created_at: jiff::Timestamp::now().into(),
        }
    }

    fn line(id: i64, prescription_id: i64) -> model::PrescriptionLine {
        model::PrescriptionLine {
            id,
            prescription_id,
            medicine_trade_name: "Amoxicillin".to_owned(),
            therapeutic_regimen: None,
        }
    }

    #[test]
    fn lines_follow_their_prescription() {
        let prescriptions = Prescription::from_models(
            vec![header(2), header(1)],
            vec![line(10, 1), line(11, 2), line(12, 1)],
        );

        assert_eq!(prescriptions[0].id, 2);
        assert_eq!(prescriptions[0].lines.len(), 1);
        assert_eq!(prescriptions[1].lines.len(), 2);
        assert_eq!(prescriptions[1].prescription_serial, "RX00001");
    }
}
