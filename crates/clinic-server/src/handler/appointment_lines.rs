//! Handlers for the procedures and attachments of an appointment.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::http::StatusCode;
use clinic_postgres::query::AppointmentLineRepository;

use crate::extract::{AuthState, Json, Path, PgPool, ValidateJson};
use crate::handler::appointments::find_appointment;
use crate::handler::request::{AppointmentPathParams, CreateAttachment, CreateProcedure};
use crate::handler::response::{Attachment, Data, ErrorEnvelope, List, Procedure};
use crate::handler::{ErrorKind, PgResultExt, Result};
use crate::service::ServiceState;

/// Tracing target for appointment line operations.
const TRACING_TARGET: &str = "clinic_server::handler::appointment_lines";

/// Lists the procedures of an appointment.
#[tracing::instrument(
    skip_all,
    fields(
        account_id = auth_state.account_id,
        appointment_id = path_params.appointment_id,
    )
)]
async fn list_procedures(
    PgPool(mut conn): PgPool,
    AuthState(auth_state): AuthState,
    Path(path_params): Path<AppointmentPathParams>,
) -> Result<(StatusCode, Json<List<Procedure>>)> {
    find_appointment(&mut conn, path_params.appointment_id, ErrorKind::FetchError).await?;

    let procedures = conn
        .list_appointment_procedures(path_params.appointment_id)
        .await
        .on_failure(ErrorKind::FetchError)?;

    let procedures: List<Procedure> = procedures.into_iter().map(Into::into).collect();
    Ok((StatusCode::OK, Json(procedures)))
}

fn list_procedures_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List procedures")
        .description("Returns the procedures of an appointment in the order they were recorded.")
        .response::<200, Json<List<Procedure>>>()
        .response::<401, Json<ErrorEnvelope<'static>>>()
        .response::<404, Json<ErrorEnvelope<'static>>>()
        .response::<500, Json<ErrorEnvelope<'static>>>()
}

/// Records a procedure performed during an appointment.
#[tracing::instrument(
    skip_all,
    fields(
        account_id = auth_state.account_id,
        appointment_id = path_params.appointment_id,
    )
)]
async fn create_procedure(
    PgPool(mut conn): PgPool,
    AuthState(auth_state): AuthState,
    Path(path_params): Path<AppointmentPathParams>,
    ValidateJson(request): ValidateJson<CreateProcedure>,
) -> Result<(StatusCode, Json<Data<Procedure>>)> {
    tracing::debug!(target: TRACING_TARGET, "Creating procedure");

    let new_procedure = request.into_model(path_params.appointment_id)?;
    let procedure = conn
        .create_appointment_procedure(new_procedure)
        .await
        .on_failure(ErrorKind::CreateError)?;

    tracing::info!(
        target: TRACING_TARGET,
        procedure_id = procedure.id,
        tooth_no = ?procedure.tooth_no,
        "Procedure created",
    );

    Ok((StatusCode::CREATED, Json(Data::new(procedure.into()))))
}

fn create_procedure_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Create procedure")
        .description(
            "Records a procedure. `procedure_name` is required, `tooth_no` must be between 1 \
             and 32 and `cost` cannot be negative.",
        )
        .response::<201, Json<Data<Procedure>>>()
        .response::<400, Json<ErrorEnvelope<'static>>>()
        .response::<401, Json<ErrorEnvelope<'static>>>()
        .response::<500, Json<ErrorEnvelope<'static>>>()
}

/// Lists the attachments of an appointment without their content.
#[tracing::instrument(
    skip_all,
    fields(
        account_id = auth_state.account_id,
        appointment_id = path_params.appointment_id,
    )
)]
async fn list_attachments(
    PgPool(mut conn): PgPool,
    AuthState(auth_state): AuthState,
    Path(path_params): Path<AppointmentPathParams>,
) -> Result<(StatusCode, Json<List<Attachment>>)> {
    find_appointment(&mut conn, path_params.appointment_id, ErrorKind::FetchError).await?;

    let attachments = conn
        .list_appointment_attachments(path_params.appointment_id)
        .await
        .on_failure(ErrorKind::FetchError)?;

    let attachments: List<Attachment> = attachments.into_iter().map(Into::into).collect();
    Ok((StatusCode::OK, Json(attachments)))
}

fn list_attachments_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List attachments")
        .description("Returns attachment metadata, latest deposition first.")
        .response::<200, Json<List<Attachment>>>()
        .response::<401, Json<ErrorEnvelope<'static>>>()
        .response::<404, Json<ErrorEnvelope<'static>>>()
        .response::<500, Json<ErrorEnvelope<'static>>>()
}

/// Uploads an attachment to an appointment.
#[tracing::instrument(
    skip_all,
    fields(
        account_id = auth_state.account_id,
        appointment_id = path_params.appointment_id,
    )
)]
async fn create_attachment(
    PgPool(mut conn): PgPool,
    AuthState(auth_state): AuthState,
    Path(path_params): Path<AppointmentPathParams>,
    ValidateJson(request): ValidateJson<CreateAttachment>,
) -> Result<(StatusCode, Json<Data<Attachment>>)> {
    tracing::debug!(target: TRACING_TARGET, "Uploading attachment");

    let new_attachment = request.into_model(path_params.appointment_id)?;
    let file_size = new_attachment.file_data.len();

    let attachment = conn
        .create_appointment_attachment(new_attachment)
        .await
        .on_failure(ErrorKind::CreateError)?;

    tracing::info!(
        target: TRACING_TARGET,
        attachment_id = attachment.id,
        file_size,
        "Attachment uploaded",
    );

    Ok((StatusCode::CREATED, Json(Data::new(attachment.into()))))
}

fn create_attachment_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Upload attachment")
        .description(
            "Stores a file for the appointment. The content is sent base64 encoded in \
             `content_base64` and may not exceed 10 MB once decoded.",
        )
        .response::<201, Json<Data<Attachment>>>()
        .response::<400, Json<ErrorEnvelope<'static>>>()
        .response::<401, Json<ErrorEnvelope<'static>>>()
        .response::<500, Json<ErrorEnvelope<'static>>>()
}

/// Returns routes for procedures and attachments.
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route(
            "/api/appointments/{appointment_id}/procedures",
            get_with(list_procedures, list_procedures_docs)
                .post_with(create_procedure, create_procedure_docs),
        )
        .api_route(
            "/api/appointments/{appointment_id}/attachments",
            get_with(list_attachments, list_attachments_docs)
                .post_with(create_attachment, create_attachment_docs),
        )
        .with_path_items(|item| item.tag("Appointment records"))
}
