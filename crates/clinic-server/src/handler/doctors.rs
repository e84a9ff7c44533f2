//! Doctor directory handlers.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::http::StatusCode;
use clinic_postgres::query::DoctorRepository;

use crate::extract::{AuthState, Json, Path, PgPool, Query, ValidateJson};
use crate::handler::request::{CreateDoctor, DoctorFilters, DoctorPathParams, UpdateDoctor};
use crate::handler::response::{Data, Doctor, ErrorEnvelope, List, Message};
use crate::handler::{Error, ErrorKind, PgResultExt, Result};
use crate::service::ServiceState;

/// Tracing target for doctor operations.
const TRACING_TARGET: &str = "clinic_server::handler::doctors";

fn doctor_not_found() -> Error<'static> {
    ErrorKind::NotFound
        .with_message("Doctor not found")
        .with_resource("doctor")
}

/// Lists doctors by name.
#[tracing::instrument(skip_all, fields(account_id = auth_state.account_id))]
async fn list_doctors(
    PgPool(mut conn): PgPool,
    AuthState(auth_state): AuthState,
    Query(filters): Query<DoctorFilters>,
) -> Result<(StatusCode, Json<List<Doctor>>)> {
    tracing::debug!(target: TRACING_TARGET, "Listing doctors");

    let doctors = conn
        .list_doctors(filters.include_inactive)
        .await
        .on_failure(ErrorKind::FetchError)?;

    let doctors: List<Doctor> = doctors.into_iter().map(Into::into).collect();
    Ok((StatusCode::OK, Json(doctors)))
}

fn list_doctors_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List doctors")
        .description("Returns active doctors ordered by name; `include_inactive` lists all.")
        .response::<200, Json<List<Doctor>>>()
        .response::<401, Json<ErrorEnvelope<'static>>>()
        .response::<500, Json<ErrorEnvelope<'static>>>()
}

/// Adds a doctor.
#[tracing::instrument(skip_all, fields(account_id = auth_state.account_id))]
async fn create_doctor(
    PgPool(mut conn): PgPool,
    AuthState(auth_state): AuthState,
    ValidateJson(request): ValidateJson<CreateDoctor>,
) -> Result<(StatusCode, Json<Data<Doctor>>)> {
    tracing::debug!(target: TRACING_TARGET, "Creating doctor");

    let doctor = conn
        .create_doctor(request.into_model())
        .await
        .on_failure(ErrorKind::CreateError)?;

    tracing::info!(target: TRACING_TARGET, doctor_id = doctor.id, "Doctor created");

    Ok((StatusCode::CREATED, Json(Data::new(doctor.into()))))
}

fn create_doctor_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Create doctor")
        .description("Adds a doctor to the directory. `doctor_name` is required.")
        .response::<201, Json<Data<Doctor>>>()
        .response::<400, Json<ErrorEnvelope<'static>>>()
        .response::<401, Json<ErrorEnvelope<'static>>>()
        .response::<500, Json<ErrorEnvelope<'static>>>()
}

/// Retrieves a doctor.
#[tracing::instrument(
    skip_all,
    fields(
        account_id = auth_state.account_id,
        doctor_id = path_params.doctor_id,
    )
)]
async fn read_doctor(
    PgPool(mut conn): PgPool,
    AuthState(auth_state): AuthState,
    Path(path_params): Path<DoctorPathParams>,
) -> Result<(StatusCode, Json<Data<Doctor>>)> {
    let doctor = conn
        .find_doctor_by_id(path_params.doctor_id)
        .await
        .on_failure(ErrorKind::FetchError)?
        .ok_or_else(doctor_not_found)?;

    Ok((StatusCode::OK, Json(Data::new(doctor.into()))))
}

fn read_doctor_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get doctor")
        .response::<200, Json<Data<Doctor>>>()
        .response::<401, Json<ErrorEnvelope<'static>>>()
        .response::<404, Json<ErrorEnvelope<'static>>>()
}

/// Updates a doctor.
#[tracing::instrument(
    skip_all,
    fields(
        account_id = auth_state.account_id,
        doctor_id = path_params.doctor_id,
    )
)]
async fn update_doctor(
    PgPool(mut conn): PgPool,
    AuthState(auth_state): AuthState,
    Path(path_params): Path<DoctorPathParams>,
    ValidateJson(request): ValidateJson<UpdateDoctor>,
) -> Result<(StatusCode, Json<Message>)> {
    tracing::debug!(target: TRACING_TARGET, "Updating doctor");

    let doctor = conn
        .update_doctor(path_params.doctor_id, request.into_model())
        .await
        .on_failure(ErrorKind::UpdateError)?
        .ok_or_else(doctor_not_found)?;

    tracing::info!(
        target: TRACING_TARGET,
        is_active = doctor.is_active,
        "Doctor updated"
    );

    Ok((StatusCode::OK, Json(Message::new("Doctor updated successfully"))))
}

fn update_doctor_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Update doctor")
        .description("Updates a doctor. Set `is_active` to `false` to retire a doctor.")
        .response::<200, Json<Message>>()
        .response::<400, Json<ErrorEnvelope<'static>>>()
        .response::<401, Json<ErrorEnvelope<'static>>>()
        .response::<404, Json<ErrorEnvelope<'static>>>()
}

/// Returns routes for the doctor directory.
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route(
            "/api/doctors",
            get_with(list_doctors, list_doctors_docs).post_with(create_doctor, create_doctor_docs),
        )
        .api_route(
            "/api/doctors/{doctor_id}",
            get_with(read_doctor, read_doctor_docs).put_with(update_doctor, update_doctor_docs),
        )
        .with_path_items(|item| item.tag("Doctors"))
}
