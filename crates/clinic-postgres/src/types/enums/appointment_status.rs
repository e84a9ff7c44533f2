//! Appointment workflow status.

use diesel_derive_enum::DbEnum;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Where an appointment stands in the visit workflow.
///
/// Corresponds to the `APPOINTMENT_STATUS` PostgreSQL enum. The nominal
/// progression is draft, confirm, in_exam, completed_exam,
/// completed_appointment, with cancellation possible before completion.
/// Writers may set any value; the progression is not enforced.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[ExistingTypePath = "crate::schema::sql_types::AppointmentStatus"]
pub enum AppointmentStatus {
    #[db_rename = "draft"]
    #[serde(rename = "draft")]
    #[strum(serialize = "draft")]
    #[default]
    Draft,

    #[db_rename = "confirm"]
    #[serde(rename = "confirm", alias = "confirmed")]
    #[strum(to_string = "confirm", serialize = "confirmed")]
    Confirmed,

    #[db_rename = "in_exam"]
    #[serde(rename = "in_exam")]
    #[strum(serialize = "in_exam")]
    InExam,

    #[db_rename = "completed_exam"]
    #[serde(rename = "completed_exam", alias = "exam_completed")]
    #[strum(to_string = "completed_exam", serialize = "exam_completed")]
    ExamCompleted,

    #[db_rename = "completed_appointment"]
    #[serde(rename = "completed_appointment", alias = "appointment_completed")]
    #[strum(to_string = "completed_appointment", serialize = "appointment_completed")]
    AppointmentCompleted,

    #[db_rename = "cancelled"]
    #[serde(rename = "cancelled")]
    #[strum(serialize = "cancelled")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_aliases() {
        let status: AppointmentStatus = serde_json::from_str("\"confirmed\"").unwrap();
        assert_eq!(status, AppointmentStatus::Confirmed);

        let status: AppointmentStatus = "exam_completed".parse().unwrap();
        assert_eq!(status, AppointmentStatus::ExamCompleted);
    }

    #[test]
    fn serializes_stored_names() {
        let json = serde_json::to_string(&AppointmentStatus::AppointmentCompleted).unwrap();
        assert_eq!(json, "\"completed_appointment\"");
        assert_eq!(AppointmentStatus::Confirmed.to_string(), "confirm");
    }

    #[test]
    fn new_appointments_start_as_draft() {
        assert_eq!(AppointmentStatus::default(), AppointmentStatus::Draft);
    }
}
