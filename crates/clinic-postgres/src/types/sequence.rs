//! Named sequences behind the human readable serial numbers.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// A named serial-number sequence.
///
/// Each code is backed by its own Postgres sequence, so concurrent callers
/// never receive the same value.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, Display, EnumIter, EnumString)]
pub enum SequenceCode {
    #[strum(serialize = "patient.sequence")]
    #[serde(rename = "patient.sequence")]
    Patient,
    #[strum(serialize = "patient.appointment.sequence")]
    #[serde(rename = "patient.appointment.sequence")]
    Appointment,
    #[strum(serialize = "patient.appointment.prescription.sequence")]
    #[serde(rename = "patient.appointment.prescription.sequence")]
    Prescription,
}

impl SequenceCode {
    const PADDING: usize = 5;

    /// Postgres sequence the values are drawn from.
    pub fn sequence_name(self) -> &'static str {
        match self {
            SequenceCode::Patient => "patient_serial_seq",
            SequenceCode::Appointment => "appointment_serial_seq",
            SequenceCode::Prescription => "prescription_serial_seq",
        }
    }

    pub fn prefix(self) -> &'static str {
        match self {
            SequenceCode::Patient => "PAT",
            SequenceCode::Appointment => "APT",
            SequenceCode::Prescription => "RX",
        }
    }

    /// Serial shown on records that have not been numbered yet.
    pub fn placeholder(self) -> &'static str {
        match self {
            SequenceCode::Patient => "New Patient",
            SequenceCode::Appointment => "New Appointment",
            SequenceCode::Prescription => "New Prescription",
        }
    }

    /// Returns whether `serial` still has to be drawn from this sequence.
    ///
    /// Absent and blank values count as missing, as does the placeholder.
    pub fn is_unassigned(self, serial: Option<&str>) -> bool {
        serial
            .map(str::trim)
            .is_none_or(|serial| serial.is_empty() || serial == self.placeholder())
    }

    /// Formats a raw sequence value, e.g. `PAT00042`.
    pub fn format(self, value: i64) -> String {
        format!("{}{:0width$}", self.prefix(), value, width = Self::PADDING)
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn serials_are_prefixed_and_padded() {
        assert_eq!(SequenceCode::Patient.format(1), "PAT00001");
        assert_eq!(SequenceCode::Appointment.format(42), "APT00042");
        assert_eq!(SequenceCode::Prescription.format(123456), "RX123456");
    }

    #[test]
    fn codes_parse_from_their_names() {
        for code in SequenceCode::iter() {
            assert_eq!(code.to_string().parse::<SequenceCode>(), Ok(code));
        }

        assert_eq!(
            "patient.appointment.sequence".parse::<SequenceCode>(),
            Ok(SequenceCode::Appointment)
        );
    }

    #[test]
    fn placeholder_counts_as_unassigned() {
        assert!(SequenceCode::Patient.is_unassigned(None));
        assert!(SequenceCode::Patient.is_unassigned(Some(" ")));
        assert!(SequenceCode::Patient.is_unassigned(Some("New Patient")));
        assert!(SequenceCode::Prescription.is_unassigned(Some("New Prescription")));
        assert!(!SequenceCode::Patient.is_unassigned(Some("New Appointment")));
        assert!(!SequenceCode::Appointment.is_unassigned(Some("APT00007")));
    }

    #[test]
    fn every_code_has_its_own_sequence() {
        let names: std::collections::HashSet<_> =
            SequenceCode::iter().map(SequenceCode::sequence_name).collect();
        assert_eq!(names.len(), 3);
    }
}
