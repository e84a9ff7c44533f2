//! Prescription repository.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::{AsyncConnection, RunQueryDsl};

use super::SequenceRepository;
use crate::model::{Prescription, PrescriptionDraft, PrescriptionLine};
use crate::types::SequenceCode;
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for prescriptions and their medicine lines.
pub trait PrescriptionRepository {
    /// Writes a prescription with all of its lines in one transaction.
    ///
    /// The patient is copied from the appointment and a serial is drawn from
    /// the prescription sequence. Returns `None` when the appointment does
    /// not exist.
    fn create_prescription(
        &mut self,
        draft: PrescriptionDraft,
    ) -> impl Future<Output = PgResult<Option<(Prescription, Vec<PrescriptionLine>)>>> + Send;

    /// Finds a prescription by its ID.
    fn find_prescription_by_id(
        &mut self,
        prescription_id: i64,
    ) -> impl Future<Output = PgResult<Option<Prescription>>> + Send;

    /// Lists the prescriptions of an appointment, newest first.
    fn list_prescriptions_by_appointment(
        &mut self,
        appointment_id: i64,
    ) -> impl Future<Output = PgResult<Vec<Prescription>>> + Send;

    /// Lists the lines of the given prescriptions in insertion order.
    fn list_prescription_lines(
        &mut self,
        prescription_ids: &[i64],
    ) -> impl Future<Output = PgResult<Vec<PrescriptionLine>>> + Send;
}

impl PrescriptionRepository for PgConnection {
    async fn create_prescription(
        &mut self,
        draft: PrescriptionDraft,
    ) -> PgResult<Option<(Prescription, Vec<PrescriptionLine>)>> {
        use schema::{appointments, prescription_lines, prescriptions};

        self.transaction(|conn| {
            Box::pin(async move {
                let patient_id = appointments::table
                    .filter(appointments::id.eq(draft.appointment_id()))
                    .select(appointments::patient_id)
                    .first::<i64>(conn)
                    .await
                    .optional()
                    .map_err(PgError::from)?;

                let Some(patient_id) = patient_id else {
                    return Ok(None);
                };

                let serial = conn.next_by_code(SequenceCode::Prescription).await?;
                let prescription = diesel::insert_into(prescriptions::table)
                    .values(&draft.header(serial, patient_id))
                    .returning(Prescription::as_returning())
                    .get_result(conn)
                    .await
                    .map_err(PgError::from)?;

                let lines = diesel::insert_into(prescription_lines::table)
                    .values(&draft.line_rows(prescription.id))
                    .returning(PrescriptionLine::as_returning())
                    .get_results(conn)
                    .await
                    .map_err(PgError::from)?;

                Ok(Some((prescription, lines)))
            })
        })
        .await
    }

    async fn find_prescription_by_id(
        &mut self,
        prescription_id: i64,
    ) -> PgResult<Option<Prescription>> {
        use schema::prescriptions::{self, dsl};

        prescriptions::table
            .filter(dsl::id.eq(prescription_id))
            .select(Prescription::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn list_prescriptions_by_appointment(
        &mut self,
        appointment_id: i64,
    ) -> PgResult<Vec<Prescription>> {
        use schema::prescriptions::{self, dsl};

        prescriptions::table
            .filter(dsl::appointment_id.eq(appointment_id))
            .order(dsl::id.desc())
            .select(Prescription::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn list_prescription_lines(
        &mut self,
        prescription_ids: &[i64],
    ) -> PgResult<Vec<PrescriptionLine>> {
        use schema::prescription_lines::{self, dsl};

        if prescription_ids.is_empty() {
            return Ok(Vec::new());
        }

        prescription_lines::table
            .filter(dsl::prescription_id.eq_any(prescription_ids))
            .order(dsl::id.asc())
            .select(PrescriptionLine::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }
}
