//! Prescription handlers.
//!
//! A prescription belongs to an appointment and is written with all of its
//! medicine lines at once; a prescription without lines is rejected.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::http::StatusCode;
use clinic_postgres::query::PrescriptionRepository;

use crate::extract::{AuthState, Json, Path, PgPool, ValidateJson};
use crate::handler::appointments::find_appointment;
use crate::handler::request::{AppointmentPathParams, CreatePrescription, PrescriptionPathParams};
use crate::handler::response::{Data, ErrorEnvelope, List, Prescription};
use crate::handler::{ErrorKind, PgResultExt, Result};
use crate::service::ServiceState;

/// Tracing target for prescription operations.
const TRACING_TARGET: &str = "clinic_server::handler::prescriptions";

/// Lists the prescriptions of an appointment, newest first.
#[tracing::instrument(
    skip_all,
    fields(
        account_id = auth_state.account_id,
        appointment_id = path_params.appointment_id,
    )
)]
async fn list_prescriptions(
    PgPool(mut conn): PgPool,
    AuthState(auth_state): AuthState,
    Path(path_params): Path<AppointmentPathParams>,
) -> Result<(StatusCode, Json<List<Prescription>>)> {
    tracing::debug!(target: TRACING_TARGET, "Listing prescriptions");

    find_appointment(&mut conn, path_params.appointment_id, ErrorKind::FetchError).await?;

    let prescriptions = conn
        .list_prescriptions_by_appointment(path_params.appointment_id)
        .await
        .on_failure(ErrorKind::FetchError)?;

    let prescription_ids: Vec<i64> = prescriptions.iter().map(|p| p.id).collect();
    let lines = conn
        .list_prescription_lines(&prescription_ids)
        .await
        .on_failure(ErrorKind::FetchError)?;

    let prescriptions = Prescription::from_models(prescriptions, lines);
    Ok((StatusCode::OK, Json(List::new(prescriptions))))
}

fn list_prescriptions_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List prescriptions")
        .description("Returns the prescriptions of an appointment with their medicine lines.")
        .response::<200, Json<List<Prescription>>>()
        .response::<401, Json<ErrorEnvelope<'static>>>()
        .response::<404, Json<ErrorEnvelope<'static>>>()
        .response::<500, Json<ErrorEnvelope<'static>>>()
}

/// Writes a prescription for an appointment.
#[tracing::instrument(
    skip_all,
    fields(
        account_id = auth_state.account_id,
        appointment_id = path_params.appointment_id,
    )
)]
async fn create_prescription(
    PgPool(mut conn): PgPool,
    AuthState(auth_state): AuthState,
    Path(path_params): Path<AppointmentPathParams>,
    ValidateJson(request): ValidateJson<CreatePrescription>,
) -> Result<(StatusCode, Json<Data<Prescription>>)> {
    tracing::debug!(
        target: TRACING_TARGET,
        line_count = request.lines.len(),
        "Creating prescription"
    );

    let draft = request.into_draft(path_params.appointment_id)?;
    let Some((prescription, lines)) = conn
        .create_prescription(draft)
        .await
        .on_failure(ErrorKind::CreateError)?
    else {
        return Err(ErrorKind::NotFound
            .with_message("Appointment not found")
            .with_resource("appointment"));
    };

    tracing::info!(
        target: TRACING_TARGET,
        prescription_id = prescription.id,
        prescription_serial = %prescription.prescription_serial,
        "Prescription created",
    );

    let prescription = Prescription::from_model(prescription, lines);
    Ok((StatusCode::CREATED, Json(Data::new(prescription))))
}

fn create_prescription_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Create prescription")
        .description(
            "Writes a prescription for the appointment's patient. `lines` must contain at least \
             one medicine; the serial is drawn from the prescription sequence.",
        )
        .response::<201, Json<Data<Prescription>>>()
        .response::<400, Json<ErrorEnvelope<'static>>>()
        .response::<401, Json<ErrorEnvelope<'static>>>()
        .response::<404, Json<ErrorEnvelope<'static>>>()
        .response::<500, Json<ErrorEnvelope<'static>>>()
}

/// Retrieves a prescription of an appointment.
#[tracing::instrument(
    skip_all,
    fields(
        account_id = auth_state.account_id,
        prescription_id = path_params.prescription_id,
    )
)]
async fn read_prescription(
    PgPool(mut conn): PgPool,
    AuthState(auth_state): AuthState,
    Path(path_params): Path<PrescriptionPathParams>,
) -> Result<(StatusCode, Json<Data<Prescription>>)> {
    let prescription = conn
        .find_prescription_by_id(path_params.prescription_id)
        .await
        .on_failure(ErrorKind::FetchError)?
        .filter(|prescription| prescription.appointment_id == path_params.appointment_id)
        .ok_or_else(|| {
            ErrorKind::NotFound
                .with_message("Prescription not found")
                .with_resource("prescription")
        })?;

    let lines = conn
        .list_prescription_lines(&[prescription.id])
        .await
        .on_failure(ErrorKind::FetchError)?;

    let prescription = Prescription::from_model(prescription, lines);
    Ok((StatusCode::OK, Json(Data::new(prescription))))
}

fn read_prescription_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get prescription")
        .response::<200, Json<Data<Prescription>>>()
        .response::<401, Json<ErrorEnvelope<'static>>>()
        .response::<404, Json<ErrorEnvelope<'static>>>()
        .response::<500, Json<ErrorEnvelope<'static>>>()
}

/// Returns routes for prescriptions.
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route(
            "/api/appointments/{appointment_id}/prescriptions",
            get_with(list_prescriptions, list_prescriptions_docs)
                .post_with(create_prescription, create_prescription_docs),
        )
        .api_route(
            "/api/appointments/{appointment_id}/prescriptions/{prescription_id}",
            get_with(read_prescription, read_prescription_docs),
        )
        .with_path_items(|item| item.tag("Prescriptions"))
}
