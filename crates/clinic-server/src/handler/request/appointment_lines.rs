//! Request types for the procedures and attachments of an appointment.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bigdecimal::BigDecimal;
use clinic_postgres::model::{NewAppointmentAttachment, NewAppointmentProcedure};
use jiff::civil::Date;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::handler::{Error, ErrorKind, Result};

/// Request payload for recording a dental procedure.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema, Validate)]
pub struct CreateProcedure {
    /// Name of the procedure, e.g. "Filling".
    #[validate(length(min = 1, code = "required"))]
    pub procedure_name: String,
    /// Tooth number in universal notation.
    #[validate(range(min = 1, max = 32))]
    pub tooth_no: Option<i16>,
    /// Cost of the procedure. Defaults to zero.
    #[validate(range(min = 0.0))]
    pub cost: Option<f64>,
}

impl CreateProcedure {
    /// Converts this request into a [`NewAppointmentProcedure`] model.
    pub fn into_model(self, appointment_id: i64) -> Result<NewAppointmentProcedure> {
        let cost = self
            .cost
            .map(|cost| {
                BigDecimal::try_from(cost).map_err(|_| {
                    ErrorKind::ValidationError.with_message("Field 'cost' must be a finite number")
                })
            })
            .transpose()?;

        Ok(NewAppointmentProcedure {
            appointment_id,
            tooth_no: self.tooth_no,
            procedure_name: self.procedure_name.trim().to_owned(),
            cost: cost.map(|cost| cost.with_scale(2)),
        })
    }
}

/// Request payload for uploading an attachment.
#[must_use]
#[derive(Default, Serialize, Deserialize, JsonSchema, Validate)]
pub struct CreateAttachment {
    /// Original file name.
    #[validate(length(min = 1, code = "required"))]
    pub file_name: String,
    /// File content, base64 encoded.
    #[validate(length(min = 1, code = "required"))]
    pub content_base64: String,
    /// Date the file was handed in. Defaults to today.
    pub deposition_date: Option<Date>,
}

impl CreateAttachment {
    /// Decodes the content into a [`NewAppointmentAttachment`] model.
    pub fn into_model(self, appointment_id: i64) -> Result<NewAppointmentAttachment> {
        let file_data = STANDARD
            .decode(self.content_base64.trim())
            .map_err(|error| -> Error<'static> {
                ErrorKind::BadRequest
                    .with_message("Field 'content_base64' is not valid base64")
                    .with_context(error.to_string())
            })?;

        let attachment = NewAppointmentAttachment {
            appointment_id,
            deposition_date: self.deposition_date.map(Into::into),
            file_name: Some(self.file_name),
            file_data,
        };

        if !attachment.is_within_size_limit() {
            return Err(ErrorKind::ValidationError
                .with_message("Attachment exceeds the 10 MB limit")
                .with_resource("attachment"));
        }

        Ok(attachment)
    }
}

impl std::fmt::Debug for CreateAttachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateAttachment")
            .field("file_name", &self.file_name)
            .field("content_len", &self.content_base64.len())
            .field("deposition_date", &self.deposition_date)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tooth_number_is_bounded() {
        let request = CreateProcedure {
            procedure_name: "Filling".to_owned(),
            tooth_no: Some(33),
            cost: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn negative_cost_is_rejected() {
        let request = CreateProcedure {
            procedure_name: "Filling".to_owned(),
            tooth_no: Some(14),
            cost: Some(-1.0),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn cost_keeps_two_decimals() {
        let request = CreateProcedure {
            procedure_name: "Scaling".to_owned(),
            tooth_no: None,
            cost: Some(150.5),
        };

        let model = request.into_model(3).unwrap();
        assert_eq!(model.cost.unwrap().to_string(), "150.50");
    }

    #[test]
    fn attachment_content_is_decoded() {
        let request = CreateAttachment {
            file_name: "xray.png".to_owned(),
            content_base64: STANDARD.encode(b"png bytes"),
            deposition_date: None,
        };

        let model = request.into_model(9).unwrap();
        assert_eq!(model.file_data, b"png bytes");
        assert_eq!(model.appointment_id, 9);
    }

    #[test]
    fn invalid_base64_is_a_bad_request() {
        let request = CreateAttachment {
            file_name: "xray.png".to_owned(),
            content_base64: "not base64!".to_owned(),
            deposition_date: None,
        };

        let error = request.into_model(9).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::BadRequest);
    }
}
