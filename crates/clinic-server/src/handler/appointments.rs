//! Appointment scheduling handlers.
//!
//! Every write resolves the appointment window before it is stored: the
//! stop is derived from the start and duration, and a stop earlier than the
//! start is rejected with `validation_error`. The caller that books an
//! appointment is recorded as its assistant.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::http::StatusCode;
use clinic_postgres::PgConnection;
use clinic_postgres::model;
use clinic_postgres::query::AppointmentRepository;

use crate::extract::{AuthState, Json, Path, PgPool, Query, ValidateJson};
use crate::handler::request::{
    AppointmentFilters, AppointmentPathParams, CreateAppointment, UpdateAppointment,
};
use crate::handler::response::{
    Appointment, AppointmentCreated, Data, ErrorEnvelope, List, Message,
};
use crate::handler::{Error, ErrorKind, PgResultExt, Result};
use crate::service::ServiceState;

/// Tracing target for appointment operations.
const TRACING_TARGET: &str = "clinic_server::handler::appointments";

fn appointment_not_found() -> Error<'static> {
    ErrorKind::NotFound
        .with_message("Appointment not found")
        .with_resource("appointment")
}

/// Lists appointments, latest start first.
#[tracing::instrument(skip_all, fields(account_id = auth_state.account_id))]
async fn list_appointments(
    PgPool(mut conn): PgPool,
    AuthState(auth_state): AuthState,
    Query(filters): Query<AppointmentFilters>,
) -> Result<(StatusCode, Json<List<Appointment>>)> {
    tracing::debug!(
        target: TRACING_TARGET,
        date_from = ?filters.date_from,
        date_to = ?filters.date_to,
        patient_id = ?filters.patient_id,
        "Listing appointments"
    );

    let filter = filters.into_filter()?;
    let appointments = conn
        .list_appointments(filter)
        .await
        .on_failure(ErrorKind::FetchError)?;

    tracing::debug!(
        target: TRACING_TARGET,
        appointment_count = appointments.len(),
        "Appointments listed",
    );

    let appointments: List<Appointment> = appointments.into_iter().map(Into::into).collect();
    Ok((StatusCode::OK, Json(appointments)))
}

fn list_appointments_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List appointments")
        .description(
            "Returns appointments ordered by start, latest first. `date_from` and `date_to` are \
             inclusive days matched against the start; `patient_id` limits the list to one \
             patient.",
        )
        .response::<200, Json<List<Appointment>>>()
        .response::<400, Json<ErrorEnvelope<'static>>>()
        .response::<401, Json<ErrorEnvelope<'static>>>()
        .response::<500, Json<ErrorEnvelope<'static>>>()
}

/// Retrieves an appointment.
#[tracing::instrument(
    skip_all,
    fields(
        account_id = auth_state.account_id,
        appointment_id = path_params.appointment_id,
    )
)]
async fn read_appointment(
    PgPool(mut conn): PgPool,
    AuthState(auth_state): AuthState,
    Path(path_params): Path<AppointmentPathParams>,
) -> Result<(StatusCode, Json<Data<Appointment>>)> {
    tracing::debug!(target: TRACING_TARGET, "Reading appointment");

    let appointment = conn
        .find_appointment_by_id(path_params.appointment_id)
        .await
        .on_failure(ErrorKind::FetchError)?
        .ok_or_else(appointment_not_found)?;

    Ok((StatusCode::OK, Json(Data::new(appointment.into()))))
}

fn read_appointment_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get appointment")
        .description("Returns an appointment with its derived stop and duration.")
        .response::<200, Json<Data<Appointment>>>()
        .response::<401, Json<ErrorEnvelope<'static>>>()
        .response::<404, Json<ErrorEnvelope<'static>>>()
        .response::<500, Json<ErrorEnvelope<'static>>>()
}

/// Books an appointment.
#[tracing::instrument(skip_all, fields(account_id = auth_state.account_id))]
async fn create_appointment(
    PgPool(mut conn): PgPool,
    AuthState(auth_state): AuthState,
    ValidateJson(request): ValidateJson<CreateAppointment>,
) -> Result<(StatusCode, Json<Data<AppointmentCreated>>)> {
    tracing::debug!(
        target: TRACING_TARGET,
        patient_id = request.patient_id,
        "Creating appointment"
    );

    let new_appointment = request.into_model(auth_state.account_id)?;
    let appointment = conn
        .create_appointment(new_appointment)
        .await
        .on_failure(ErrorKind::CreateError)?;

    tracing::info!(
        target: TRACING_TARGET,
        appointment_id = appointment.id,
        appointment_serial = %appointment.appointment_serial,
        duration_hours = appointment.duration_hours,
        "Appointment created",
    );

    let created = AppointmentCreated::from(&appointment);
    Ok((StatusCode::CREATED, Json(Data::new(created))))
}

fn create_appointment_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Create appointment")
        .description(
            "Books an appointment. `patient_id` and `start` are required. A non-zero `duration` \
             (hours) decides the stop; otherwise an explicit `stop` is kept and the duration \
             derived from it; with neither the appointment lasts one hour. All-day \
             appointments stop one second early.",
        )
        .response::<201, Json<Data<AppointmentCreated>>>()
        .response::<400, Json<ErrorEnvelope<'static>>>()
        .response::<401, Json<ErrorEnvelope<'static>>>()
        .response::<500, Json<ErrorEnvelope<'static>>>()
}

/// Updates an appointment, rederiving its window.
#[tracing::instrument(
    skip_all,
    fields(
        account_id = auth_state.account_id,
        appointment_id = path_params.appointment_id,
    )
)]
async fn update_appointment(
    PgPool(mut conn): PgPool,
    AuthState(auth_state): AuthState,
    Path(path_params): Path<AppointmentPathParams>,
    ValidateJson(request): ValidateJson<UpdateAppointment>,
) -> Result<(StatusCode, Json<Message>)> {
    tracing::debug!(target: TRACING_TARGET, "Updating appointment");

    let appointment_id = path_params.appointment_id;
    let appointment = conn
        .transaction(|conn| {
            Box::pin(async move {
                let current = conn
                    .find_appointment_for_update(appointment_id)
                    .await
                    .on_failure(ErrorKind::UpdateError)?
                    .ok_or_else(appointment_not_found)?;

                let changes = request.into_model(&current)?;
                conn.update_appointment(appointment_id, changes)
                    .await
                    .on_failure(ErrorKind::UpdateError)?
                    .ok_or_else(appointment_not_found)
            })
        })
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        status = %appointment.appointment_status,
        stop = ?appointment.stop(),
        "Appointment updated",
    );

    Ok((StatusCode::OK, Json(Message::new("Appointment updated successfully"))))
}

fn update_appointment_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Update appointment")
        .description(
            "Updates the given fields of an appointment. Changing `start`, `stop`, `duration` \
             or `allday` rederives the window. `state` accepts any status.",
        )
        .response::<200, Json<Message>>()
        .response::<400, Json<ErrorEnvelope<'static>>>()
        .response::<401, Json<ErrorEnvelope<'static>>>()
        .response::<404, Json<ErrorEnvelope<'static>>>()
        .response::<500, Json<ErrorEnvelope<'static>>>()
}

/// Deletes an appointment.
#[tracing::instrument(
    skip_all,
    fields(
        account_id = auth_state.account_id,
        appointment_id = path_params.appointment_id,
    )
)]
async fn delete_appointment(
    PgPool(mut conn): PgPool,
    AuthState(auth_state): AuthState,
    Path(path_params): Path<AppointmentPathParams>,
) -> Result<(StatusCode, Json<Message>)> {
    tracing::debug!(target: TRACING_TARGET, "Deleting appointment");

    let deleted = conn
        .delete_appointment(path_params.appointment_id)
        .await
        .on_failure(ErrorKind::DeleteError)?;

    if !deleted {
        return Err(appointment_not_found());
    }

    tracing::info!(target: TRACING_TARGET, "Appointment deleted");

    Ok((StatusCode::OK, Json(Message::new("Appointment deleted successfully"))))
}

fn delete_appointment_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Delete appointment")
        .description("Deletes an appointment with its prescriptions, procedures and attachments.")
        .response::<200, Json<Message>>()
        .response::<401, Json<ErrorEnvelope<'static>>>()
        .response::<404, Json<ErrorEnvelope<'static>>>()
        .response::<500, Json<ErrorEnvelope<'static>>>()
}

/// Finds an appointment that records are attached to.
pub(crate) async fn find_appointment(
    conn: &mut PgConnection,
    appointment_id: i64,
    failure: ErrorKind,
) -> Result<model::Appointment> {
    conn.find_appointment_by_id(appointment_id)
        .await
        .on_failure(failure)?
        .ok_or_else(appointment_not_found)
}

/// Returns routes for appointment scheduling.
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route(
            "/api/appointments",
            get_with(list_appointments, list_appointments_docs)
                .post_with(create_appointment, create_appointment_docs),
        )
        .api_route(
            "/api/appointments/{appointment_id}",
            get_with(read_appointment, read_appointment_docs)
                .put_with(update_appointment, update_appointment_docs)
                .delete_with(delete_appointment, delete_appointment_docs),
        )
        .with_path_items(|item| item.tag("Appointments"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::test::create_test_server_with_router;
    use crate::middleware::RouterAuthExt;

    #[tokio::test]
    async fn appointments_require_a_token() -> anyhow::Result<()> {
        let server =
            create_test_server_with_router(|state| routes().with_authentication(state))?;

        let response = server
            .post("/api/appointments")
            .json(&serde_json::json!({ "patient_id": 1, "start": "2024-01-01 09:00:00" }))
            .await;
        response.assert_status_unauthorized();

        let body: serde_json::Value = response.json();
        assert_eq!(body["error"]["code"], "access_token_not_found");
        Ok(())
    }

    #[tokio::test]
    async fn blank_token_is_missing() -> anyhow::Result<()> {
        let server =
            create_test_server_with_router(|state| routes().with_authentication(state))?;

        let response = server
            .get("/api/appointments/1")
            .add_header("access_token", "   ")
            .await;
        response.assert_status_unauthorized();

        let body: serde_json::Value = response.json();
        assert_eq!(body["error"]["code"], "access_token_not_found");
        Ok(())
    }
}
