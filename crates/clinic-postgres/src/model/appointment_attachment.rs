use diesel::prelude::*;
use jiff_diesel::{Date, Timestamp};

use crate::schema::appointment_attachments;

/// Largest file accepted as an attachment, in bytes.
pub const MAX_ATTACHMENT_SIZE: usize = 10 * 1024 * 1024;

/// A file (x-ray, scan, report) attached to an appointment.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = appointment_attachments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AppointmentAttachment {
    pub id: i64,
    pub appointment_id: i64,
    pub deposition_date: Date,
    pub file_name: Option<String>,
    pub file_data: Vec<u8>,
    pub created_at: Timestamp,
}

/// Attachment metadata without the file contents.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = appointment_attachments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AppointmentAttachmentSummary {
    pub id: i64,
    pub appointment_id: i64,
    pub deposition_date: Date,
    pub file_name: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = appointment_attachments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewAppointmentAttachment {
    pub appointment_id: i64,
    /// Falls back to the column default, the current date.
    pub deposition_date: Option<Date>,
    pub file_name: Option<String>,
    pub file_data: Vec<u8>,
}

impl NewAppointmentAttachment {
    /// Returns whether the file fits within [`MAX_ATTACHMENT_SIZE`].
    #[inline]
    pub fn is_within_size_limit(&self) -> bool {
        self.file_data.len() <= MAX_ATTACHMENT_SIZE
    }
}

impl From<AppointmentAttachment> for AppointmentAttachmentSummary {
    fn from(attachment: AppointmentAttachment) -> Self {
        Self {
            id: attachment.id,
            appointment_id: attachment.appointment_id,
            deposition_date: attachment.deposition_date,
            file_name: attachment.file_name,
            created_at: attachment.created_at,
        }
    }
}
