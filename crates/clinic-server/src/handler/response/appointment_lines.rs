//! Response types for the procedures and attachments of an appointment.

use bigdecimal::ToPrimitive;
use clinic_postgres::model;
use jiff::Timestamp;
use jiff::civil::Date;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Procedure performed during an appointment.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Procedure {
    pub id: i64,
    pub appointment_id: i64,
    pub tooth_no: Option<i16>,
    pub procedure_name: String,
    pub cost: f64,
    pub created_at: Timestamp,
}

impl From<model::AppointmentProcedure> for Procedure {
    fn from(procedure: model::AppointmentProcedure) -> Self {
        Self {
            id: procedure.id,
            appointment_id: procedure.appointment_id,
            tooth_no: procedure.tooth_no,
            procedure_name: procedure.procedure_name,
            cost: procedure.cost.to_f64().unwrap_or_default(),
            created_at: procedure.created_at.into(),
        }
    }
}

/// Attachment metadata. The content itself is never listed.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Attachment {
    pub id: i64,
    pub appointment_id: i64,
    pub file_name: Option<String>,
    pub deposition_date: Date,
    pub created_at: Timestamp,
}

impl From<model::AppointmentAttachmentSummary> for Attachment {
    fn from(attachment: model::AppointmentAttachmentSummary) -> Self {
        Self {
            id: attachment.id,
            appointment_id: attachment.appointment_id,
            file_name: attachment.file_name,
            deposition_date: attachment.deposition_date.into(),
            created_at: attachment.created_at.into(),
        }
    }
}
