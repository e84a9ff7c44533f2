//! Attachment and procedure lines of an appointment.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::model::{
    AppointmentAttachmentSummary, AppointmentProcedure, NewAppointmentAttachment,
    NewAppointmentProcedure,
};
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for the lines hanging off an appointment.
pub trait AppointmentLineRepository {
    /// Stores an attachment and returns its metadata.
    fn create_appointment_attachment(
        &mut self,
        new_attachment: NewAppointmentAttachment,
    ) -> impl Future<Output = PgResult<AppointmentAttachmentSummary>> + Send;

    /// Lists attachment metadata of an appointment, latest deposition first.
    fn list_appointment_attachments(
        &mut self,
        appointment_id: i64,
    ) -> impl Future<Output = PgResult<Vec<AppointmentAttachmentSummary>>> + Send;

    /// Records a procedure performed during an appointment.
    fn create_appointment_procedure(
        &mut self,
        new_procedure: NewAppointmentProcedure,
    ) -> impl Future<Output = PgResult<AppointmentProcedure>> + Send;

    /// Lists the procedures of an appointment in the order they were recorded.
    fn list_appointment_procedures(
        &mut self,
        appointment_id: i64,
    ) -> impl Future<Output = PgResult<Vec<AppointmentProcedure>>> + Send;
}

impl AppointmentLineRepository for PgConnection {
    async fn create_appointment_attachment(
        &mut self,
        new_attachment: NewAppointmentAttachment,
    ) -> PgResult<AppointmentAttachmentSummary> {
        use schema::appointment_attachments;

        diesel::insert_into(appointment_attachments::table)
            .values(&new_attachment)
            .returning(AppointmentAttachmentSummary::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn list_appointment_attachments(
        &mut self,
        appointment_id: i64,
    ) -> PgResult<Vec<AppointmentAttachmentSummary>> {
        use schema::appointment_attachments::{self, dsl};

        appointment_attachments::table
            .filter(dsl::appointment_id.eq(appointment_id))
            .order((dsl::deposition_date.desc(), dsl::id.desc()))
            .select(AppointmentAttachmentSummary::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn create_appointment_procedure(
        &mut self,
        new_procedure: NewAppointmentProcedure,
    ) -> PgResult<AppointmentProcedure> {
        use schema::appointment_procedures;

        diesel::insert_into(appointment_procedures::table)
            .values(&new_procedure)
            .returning(AppointmentProcedure::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn list_appointment_procedures(
        &mut self,
        appointment_id: i64,
    ) -> PgResult<Vec<AppointmentProcedure>> {
        use schema::appointment_procedures::{self, dsl};

        appointment_procedures::table
            .filter(dsl::appointment_id.eq(appointment_id))
            .order(dsl::id.asc())
            .select(AppointmentProcedure::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }
}
