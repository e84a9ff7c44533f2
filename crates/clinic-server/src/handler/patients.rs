//! Patient registry handlers.
//!
//! Patients are unique by name and date of birth; a duplicate registration
//! is answered with `conflict`. The `age` of a patient is derived from the
//! date of birth on every read.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::http::StatusCode;
use clinic_postgres::query::PatientRepository;
use clinic_postgres::types::OffsetPagination;

use crate::extract::{AuthState, Json, Path, PgPool, Query, ValidateJson};
use crate::handler::request::{CreatePatient, Pagination, PatientPathParams, UpdatePatient};
use crate::handler::response::{Data, ErrorEnvelope, List, Message, Patient, PatientCreated};
use crate::handler::{Error, ErrorKind, PgResultExt, Result};
use crate::service::ServiceState;

/// Tracing target for patient operations.
const TRACING_TARGET: &str = "clinic_server::handler::patients";

fn patient_not_found() -> Error<'static> {
    ErrorKind::NotFound
        .with_message("Patient not found")
        .with_resource("patient")
}

/// Lists patients, newest first.
#[tracing::instrument(skip_all, fields(account_id = auth_state.account_id))]
async fn list_patients(
    PgPool(mut conn): PgPool,
    AuthState(auth_state): AuthState,
    Query(pagination): Query<Pagination>,
) -> Result<(StatusCode, Json<List<Patient>>)> {
    tracing::debug!(target: TRACING_TARGET, "Listing patients");

    let pagination = OffsetPagination::from(pagination);
    let page = conn
        .offset_list_patients(pagination)
        .await
        .on_failure(ErrorKind::FetchError)?;

    tracing::debug!(
        target: TRACING_TARGET,
        patient_count = page.items.len(),
        total = page.total,
        "Patients listed",
    );

    let total = page.total;
    let patients: List<Patient> = page.items.into_iter().map(Patient::from_model).collect();
    Ok((StatusCode::OK, Json(patients.with_total(total))))
}

fn list_patients_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List patients")
        .description(
            "Returns patients, most recently registered first. `limit` defaults to 100 and \
             `offset` to 0; `total` counts every patient.",
        )
        .response::<200, Json<List<Patient>>>()
        .response::<401, Json<ErrorEnvelope<'static>>>()
        .response::<500, Json<ErrorEnvelope<'static>>>()
}

/// Retrieves a patient.
#[tracing::instrument(
    skip_all,
    fields(
        account_id = auth_state.account_id,
        patient_id = path_params.patient_id,
    )
)]
async fn read_patient(
    PgPool(mut conn): PgPool,
    AuthState(auth_state): AuthState,
    Path(path_params): Path<PatientPathParams>,
) -> Result<(StatusCode, Json<Data<Patient>>)> {
    tracing::debug!(target: TRACING_TARGET, "Reading patient");

    let patient = conn
        .find_patient_by_id(path_params.patient_id)
        .await
        .on_failure(ErrorKind::FetchError)?
        .ok_or_else(patient_not_found)?;

    Ok((StatusCode::OK, Json(Data::new(Patient::from_model(patient)))))
}

fn read_patient_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get patient")
        .description("Returns a patient with the age derived from the date of birth.")
        .response::<200, Json<Data<Patient>>>()
        .response::<401, Json<ErrorEnvelope<'static>>>()
        .response::<404, Json<ErrorEnvelope<'static>>>()
        .response::<500, Json<ErrorEnvelope<'static>>>()
}

/// Registers a patient.
#[tracing::instrument(skip_all, fields(account_id = auth_state.account_id))]
async fn create_patient(
    PgPool(mut conn): PgPool,
    AuthState(auth_state): AuthState,
    ValidateJson(request): ValidateJson<CreatePatient>,
) -> Result<(StatusCode, Json<Data<PatientCreated>>)> {
    tracing::debug!(target: TRACING_TARGET, "Creating patient");

    let patient = conn
        .create_patient(request.into_model())
        .await
        .on_failure(ErrorKind::CreateError)?;

    tracing::info!(
        target: TRACING_TARGET,
        patient_id = patient.id,
        patient_serial = %patient.patient_serial,
        "Patient created",
    );

    let created = PatientCreated::from_model(&patient);
    Ok((StatusCode::CREATED, Json(Data::new(created))))
}

fn create_patient_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Create patient")
        .description(
            "Registers a patient. `patient_name` and `contact_number` are required; the serial \
             is assigned from the patient sequence when omitted.",
        )
        .response::<201, Json<Data<PatientCreated>>>()
        .response::<400, Json<ErrorEnvelope<'static>>>()
        .response::<401, Json<ErrorEnvelope<'static>>>()
        .response::<409, Json<ErrorEnvelope<'static>>>()
        .response::<500, Json<ErrorEnvelope<'static>>>()
}

/// Updates a patient.
#[tracing::instrument(
    skip_all,
    fields(
        account_id = auth_state.account_id,
        patient_id = path_params.patient_id,
    )
)]
async fn update_patient(
    PgPool(mut conn): PgPool,
    AuthState(auth_state): AuthState,
    Path(path_params): Path<PatientPathParams>,
    ValidateJson(request): ValidateJson<UpdatePatient>,
) -> Result<(StatusCode, Json<Message>)> {
    tracing::debug!(target: TRACING_TARGET, "Updating patient");

    let changes = request.into_model();
    if changes.is_empty() {
        conn.find_patient_by_id(path_params.patient_id)
            .await
            .on_failure(ErrorKind::UpdateError)?
            .ok_or_else(patient_not_found)?;

        return Ok((StatusCode::OK, Json(Message::new("Patient updated successfully"))));
    }

    let patient = conn
        .update_patient(path_params.patient_id, changes)
        .await
        .on_failure(ErrorKind::UpdateError)?
        .ok_or_else(patient_not_found)?;

    tracing::info!(target: TRACING_TARGET, patient_id = patient.id, "Patient updated");

    Ok((StatusCode::OK, Json(Message::new("Patient updated successfully"))))
}

fn update_patient_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Update patient")
        .description("Updates the given fields of a patient. Omitted fields are unchanged.")
        .response::<200, Json<Message>>()
        .response::<400, Json<ErrorEnvelope<'static>>>()
        .response::<401, Json<ErrorEnvelope<'static>>>()
        .response::<404, Json<ErrorEnvelope<'static>>>()
        .response::<409, Json<ErrorEnvelope<'static>>>()
        .response::<500, Json<ErrorEnvelope<'static>>>()
}

/// Deletes a patient.
#[tracing::instrument(
    skip_all,
    fields(
        account_id = auth_state.account_id,
        patient_id = path_params.patient_id,
    )
)]
async fn delete_patient(
    PgPool(mut conn): PgPool,
    AuthState(auth_state): AuthState,
    Path(path_params): Path<PatientPathParams>,
) -> Result<(StatusCode, Json<Message>)> {
    tracing::debug!(target: TRACING_TARGET, "Deleting patient");

    let deleted = conn
        .delete_patient(path_params.patient_id)
        .await
        .on_failure(ErrorKind::DeleteError)?;

    if !deleted {
        return Err(patient_not_found());
    }

    tracing::info!(target: TRACING_TARGET, "Patient deleted");

    Ok((StatusCode::OK, Json(Message::new("Patient deleted successfully"))))
}

fn delete_patient_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Delete patient")
        .description("Deletes a patient together with their appointments.")
        .response::<200, Json<Message>>()
        .response::<401, Json<ErrorEnvelope<'static>>>()
        .response::<404, Json<ErrorEnvelope<'static>>>()
        .response::<500, Json<ErrorEnvelope<'static>>>()
}

/// Returns routes for the patient registry.
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route(
            "/api/patients",
            get_with(list_patients, list_patients_docs)
                .post_with(create_patient, create_patient_docs),
        )
        .api_route(
            "/api/patients/{patient_id}",
            get_with(read_patient, read_patient_docs)
                .put_with(update_patient, update_patient_docs)
                .delete_with(delete_patient, delete_patient_docs),
        )
        .with_path_items(|item| item.tag("Patients"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::test::create_test_server_with_router;
    use crate::middleware::RouterAuthExt;

    #[tokio::test]
    async fn patients_require_a_token() -> anyhow::Result<()> {
        let server =
            create_test_server_with_router(|state| routes().with_authentication(state))?;

        let response = server.get("/api/patients").await;
        response.assert_status_unauthorized();

        let body: serde_json::Value = response.json();
        assert_eq!(body["error"]["code"], "access_token_not_found");
        assert_eq!(body["status"], 401);
        Ok(())
    }

    #[test]
    fn unknown_patient_is_not_found() {
        let error = patient_not_found();
        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert_eq!(error.message(), Some("Patient not found"));
    }
}
