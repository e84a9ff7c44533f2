//! Patient repository.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::{AsyncConnection, RunQueryDsl};

use super::SequenceRepository;
use crate::model::{NewPatient, Patient, UpdatePatient};
use crate::types::{OffsetPage, OffsetPagination, SequenceCode};
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for patient records.
pub trait PatientRepository {
    /// Registers a patient, drawing a serial when none was supplied.
    ///
    /// The serial and the insert share one transaction. A second patient
    /// with the same name and date of birth fails on
    /// `patients_name_dob_unique`.
    fn create_patient(
        &mut self,
        new_patient: NewPatient,
    ) -> impl Future<Output = PgResult<Patient>> + Send;

    /// Finds a patient by its ID.
    fn find_patient_by_id(
        &mut self,
        patient_id: i64,
    ) -> impl Future<Output = PgResult<Option<Patient>>> + Send;

    /// Lists patients newest first, together with the total count.
    fn offset_list_patients(
        &mut self,
        pagination: OffsetPagination,
    ) -> impl Future<Output = PgResult<OffsetPage<Patient>>> + Send;

    /// Counts every patient.
    fn count_patients(&mut self) -> impl Future<Output = PgResult<i64>> + Send;

    /// Updates a patient, returning `None` when it does not exist.
    fn update_patient(
        &mut self,
        patient_id: i64,
        updates: UpdatePatient,
    ) -> impl Future<Output = PgResult<Option<Patient>>> + Send;

    /// Deletes a patient and, by cascade, its appointments.
    fn delete_patient(&mut self, patient_id: i64) -> impl Future<Output = PgResult<bool>> + Send;
}

impl PatientRepository for PgConnection {
    async fn create_patient(&mut self, mut new_patient: NewPatient) -> PgResult<Patient> {
        use schema::patients;

        self.transaction(|conn| {
            Box::pin(async move {
                if new_patient.needs_serial() {
                    let serial = conn.next_by_code(SequenceCode::Patient).await?;
                    new_patient.patient_serial = Some(serial);
                }

                diesel::insert_into(patients::table)
                    .values(&new_patient)
                    .returning(Patient::as_returning())
                    .get_result(conn)
                    .await
                    .map_err(PgError::from)
            })
        })
        .await
    }

    async fn find_patient_by_id(&mut self, patient_id: i64) -> PgResult<Option<Patient>> {
        use schema::patients::{self, dsl};

        patients::table
            .filter(dsl::id.eq(patient_id))
            .select(Patient::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn offset_list_patients(
        &mut self,
        pagination: OffsetPagination,
    ) -> PgResult<OffsetPage<Patient>> {
        use schema::patients::{self, dsl};

        let items = patients::table
            .order((dsl::created_at.desc(), dsl::id.desc()))
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(Patient::as_select())
            .load(self)
            .await
            .map_err(PgError::from)?;

        let total = self.count_patients().await?;
        Ok(OffsetPage::new(items, total))
    }

    async fn count_patients(&mut self) -> PgResult<i64> {
        use schema::patients;

        patients::table
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn update_patient(
        &mut self,
        patient_id: i64,
        mut updates: UpdatePatient,
    ) -> PgResult<Option<Patient>> {
        use schema::patients::{self, dsl};

        updates.updated_at = Some(jiff::Timestamp::now().into());

        diesel::update(patients::table.filter(dsl::id.eq(patient_id)))
            .set(&updates)
            .returning(Patient::as_returning())
            .get_result(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn delete_patient(&mut self, patient_id: i64) -> PgResult<bool> {
        use schema::patients::{self, dsl};

        let rows_affected = diesel::delete(patients::table.filter(dsl::id.eq(patient_id)))
            .execute(self)
            .await
            .map_err(PgError::from)?;

        Ok(rows_affected > 0)
    }
}
