//! Path parameter types for HTTP handlers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Path parameters for patient operations.
#[must_use]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
pub struct PatientPathParams {
    /// Unique identifier of the patient.
    pub patient_id: i64,
}

/// Path parameters for appointment operations, including the records
/// attached to an appointment.
#[must_use]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
pub struct AppointmentPathParams {
    /// Unique identifier of the appointment.
    pub appointment_id: i64,
}

/// Path parameters for doctor operations.
#[must_use]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
pub struct DoctorPathParams {
    /// Unique identifier of the doctor.
    pub doctor_id: i64,
}

/// Path parameters for a single prescription.
#[must_use]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
pub struct PrescriptionPathParams {
    /// Unique identifier of the appointment.
    pub appointment_id: i64,
    /// Unique identifier of the prescription.
    pub prescription_id: i64,
}
