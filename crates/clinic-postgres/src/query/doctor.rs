//! Doctor repository.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::model::{Doctor, NewDoctor, UpdateDoctor};
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for doctors.
pub trait DoctorRepository {
    /// Creates a new doctor.
    fn create_doctor(
        &mut self,
        new_doctor: NewDoctor,
    ) -> impl Future<Output = PgResult<Doctor>> + Send;

    /// Finds a doctor by its ID.
    fn find_doctor_by_id(
        &mut self,
        doctor_id: i64,
    ) -> impl Future<Output = PgResult<Option<Doctor>>> + Send;

    /// Lists doctors ordered by name, active ones only unless `include_inactive`.
    fn list_doctors(
        &mut self,
        include_inactive: bool,
    ) -> impl Future<Output = PgResult<Vec<Doctor>>> + Send;

    /// Updates a doctor, returning `None` when it does not exist.
    fn update_doctor(
        &mut self,
        doctor_id: i64,
        updates: UpdateDoctor,
    ) -> impl Future<Output = PgResult<Option<Doctor>>> + Send;
}

impl DoctorRepository for PgConnection {
    async fn create_doctor(&mut self, new_doctor: NewDoctor) -> PgResult<Doctor> {
        use schema::doctors;

        diesel::insert_into(doctors::table)
            .values(&new_doctor)
            .returning(Doctor::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn find_doctor_by_id(&mut self, doctor_id: i64) -> PgResult<Option<Doctor>> {
        use schema::doctors::{self, dsl};

        doctors::table
            .filter(dsl::id.eq(doctor_id))
            .select(Doctor::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn list_doctors(&mut self, include_inactive: bool) -> PgResult<Vec<Doctor>> {
        use schema::doctors::{self, dsl};

        let mut query = doctors::table
            .select(Doctor::as_select())
            .order((dsl::doctor_name.asc(), dsl::id.asc()))
            .into_boxed();

        if !include_inactive {
            query = query.filter(dsl::is_active.eq(true));
        }

        query.load(self).await.map_err(PgError::from)
    }

    async fn update_doctor(
        &mut self,
        doctor_id: i64,
        mut updates: UpdateDoctor,
    ) -> PgResult<Option<Doctor>> {
        use schema::doctors::{self, dsl};

        updates.updated_at = Some(jiff::Timestamp::now().into());

        diesel::update(doctors::table.filter(dsl::id.eq(doctor_id)))
            .set(&updates)
            .returning(Doctor::as_returning())
            .get_result(self)
            .await
            .optional()
            .map_err(PgError::from)
    }
}
