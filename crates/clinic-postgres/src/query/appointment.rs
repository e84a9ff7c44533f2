//! Appointment repository.

use std::future::Future;

use diesel::dsl::{AsSelect, SqlTypeOf};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::{AsyncConnection, RunQueryDsl};

use super::SequenceRepository;
use crate::model::{Appointment, NewAppointment, UpdateAppointment};
use crate::types::{AppointmentFilter, SequenceCode};
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for appointments.
///
/// The window columns can only be written through the models, which take an
/// already resolved [`AppointmentWindow`]. The `appointments_stop_after_start`
/// check backs that up in the database.
///
/// [`AppointmentWindow`]: crate::types::AppointmentWindow
pub trait AppointmentRepository {
    /// Books an appointment, drawing a serial when none was supplied.
    fn create_appointment(
        &mut self,
        new_appointment: NewAppointment,
    ) -> impl Future<Output = PgResult<Appointment>> + Send;

    /// Finds an appointment by its ID.
    fn find_appointment_by_id(
        &mut self,
        appointment_id: i64,
    ) -> impl Future<Output = PgResult<Option<Appointment>>> + Send;

    /// Locks an appointment row for the rest of the transaction.
    fn find_appointment_for_update(
        &mut self,
        appointment_id: i64,
    ) -> impl Future<Output = PgResult<Option<Appointment>>> + Send;

    /// Lists appointments matching `filter`, latest start first.
    fn list_appointments(
        &mut self,
        filter: AppointmentFilter,
    ) -> impl Future<Output = PgResult<Vec<Appointment>>> + Send;

    /// Updates an appointment, returning `None` when it does not exist.
    fn update_appointment(
        &mut self,
        appointment_id: i64,
        updates: UpdateAppointment,
    ) -> impl Future<Output = PgResult<Option<Appointment>>> + Send;

    /// Deletes an appointment together with its lines and prescriptions.
    fn delete_appointment(
        &mut self,
        appointment_id: i64,
    ) -> impl Future<Output = PgResult<bool>> + Send;
}

type AppointmentListing =
    schema::appointments::BoxedQuery<'static, Pg, SqlTypeOf<AsSelect<Appointment, Pg>>>;

/// Builds the listing query: start within `[start_from, start_before)`,
/// newest first.
fn filtered_appointments(filter: AppointmentFilter) -> AppointmentListing {
    use schema::appointments::{self, dsl};

    let mut query = appointments::table
        .select(Appointment::as_select())
        .order((dsl::start_at.desc(), dsl::id.desc()))
        .into_boxed();

    if let Some(start_from) = filter.start_from {
        query = query.filter(dsl::start_at.ge(jiff_diesel::Timestamp::from(start_from)));
    }

    if let Some(start_before) = filter.start_before {
        query = query.filter(dsl::start_at.lt(jiff_diesel::Timestamp::from(start_before)));
    }

    if let Some(patient_id) = filter.patient_id {
        query = query.filter(dsl::patient_id.eq(patient_id));
    }

    query
}

impl AppointmentRepository for PgConnection {
    async fn create_appointment(
        &mut self,
        mut new_appointment: NewAppointment,
    ) -> PgResult<Appointment> {
        use schema::appointments;

        self.transaction(|conn| {
            Box::pin(async move {
                if new_appointment.needs_serial() {
                    let serial = conn.next_by_code(SequenceCode::Appointment).await?;
                    new_appointment.appointment_serial = Some(serial);
                }

                diesel::insert_into(appointments::table)
                    .values(&new_appointment)
                    .returning(Appointment::as_returning())
                    .get_result(conn)
                    .await
                    .map_err(PgError::from)
            })
        })
        .await
    }

    async fn find_appointment_by_id(
        &mut self,
        appointment_id: i64,
    ) -> PgResult<Option<Appointment>> {
        use schema::appointments::{self, dsl};

        appointments::table
            .filter(dsl::id.eq(appointment_id))
            .select(Appointment::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn find_appointment_for_update(
        &mut self,
        appointment_id: i64,
    ) -> PgResult<Option<Appointment>> {
        use schema::appointments::{self, dsl};

        appointments::table
            .filter(dsl::id.eq(appointment_id))
            .select(Appointment::as_select())
            .for_update()
            .get_result(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn list_appointments(&mut self, filter: AppointmentFilter) -> PgResult<Vec<Appointment>> {
        filtered_appointments(filter)
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn update_appointment(
        &mut self,
        appointment_id: i64,
        mut updates: UpdateAppointment,
    ) -> PgResult<Option<Appointment>> {
        use schema::appointments::{self, dsl};

        updates.updated_at = Some(jiff::Timestamp::now().into());

        diesel::update(appointments::table.filter(dsl::id.eq(appointment_id)))
            .set(&updates)
            .returning(Appointment::as_returning())
            .get_result(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn delete_appointment(&mut self, appointment_id: i64) -> PgResult<bool> {
        use schema::appointments::{self, dsl};

        let rows_affected =
            diesel::delete(appointments::table.filter(dsl::id.eq(appointment_id)))
                .execute(self)
                .await
                .map_err(PgError::from)?;

        Ok(rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn listing_sql(filter: AppointmentFilter) -> String {
        diesel::debug_query::<Pg, _>(&filtered_appointments(filter)).to_string()
    }

    #[test]
    fn listing_bounds_start_by_whole_days() {
        let filter =
            AppointmentFilter::from_dates(Some(date(2024, 1, 1)), Some(date(2024, 1, 31)), Some(9))
                .unwrap();
        let sql = listing_sql(filter);

        assert!(sql.contains(r#""appointments"."start_at" >= $1"#), "{sql}");
        assert!(sql.contains(r#""appointments"."start_at" < $2"#), "{sql}");
        assert!(sql.contains(r#""appointments"."patient_id" = $3"#), "{sql}");
        assert!(sql.contains(r#"ORDER BY "appointments"."start_at" DESC"#), "{sql}");
    }

    #[test]
    fn unfiltered_listing_has_no_conditions() {
        let sql = listing_sql(AppointmentFilter::default());
        assert!(!sql.contains("WHERE"), "{sql}");
    }
}
