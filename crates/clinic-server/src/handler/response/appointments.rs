//! Appointment response types.

use clinic_postgres::model;
use clinic_postgres::types::{AppointmentStatus, AppointmentType};
use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Appointment response.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Appointment {
    pub id: i64,
    pub appointment_serial: String,
    pub patient_id: i64,
    pub doctor_id: Option<i64>,
    /// Account that booked the appointment.
    pub assistant_id: Option<i64>,
    pub name: Option<String>,
    /// Workflow status.
    pub state: AppointmentStatus,
    pub appointment_type: Option<AppointmentType>,
    pub contact_number: Option<String>,
    pub chief_complaints: Option<String>,
    pub start: Timestamp,
    /// Derived from `start` and `duration`.
    pub stop: Timestamp,
    /// Length in hours, rounded to two decimals.
    pub duration: f64,
    pub allday: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<model::Appointment> for Appointment {
    fn from(appointment: model::Appointment) -> Self {
        Self {
            start: appointment.start(),
            stop: appointment.stop(),
            id: appointment.id,
            appointment_serial: appointment.appointment_serial,
            patient_id: appointment.patient_id,
            doctor_id: appointment.doctor_id,
            assistant_id: appointment.assistant_id,
            name: appointment.name,
            state: appointment.appointment_status,
            appointment_type: appointment.appointment_type,
            contact_number: appointment.contact_number,
            chief_complaints: appointment.chief_complaints,
            duration: appointment.duration_hours,
            allday: appointment.is_all_day,
            created_at: appointment.created_at.into(),
            updated_at: appointment.updated_at.into(),
        }
    }
}

/// Payload returned after booking an appointment.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AppointmentCreated {
    pub id: i64,
    pub appointment_serial: String,
    pub message: String,
}

impl From<&model::Appointment> for AppointmentCreated {
    fn from(appointment: &model::Appointment) -> Self {
        Self {
            id: appointment.id,
            appointment_serial: appointment.appointment_serial.clone(),
            message: "Appointment created successfully".to_owned(),
        }
    }
}
