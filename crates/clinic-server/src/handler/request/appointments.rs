//! Appointment request types.
//!
//! The appointment window (`start`, `stop`, `duration`, `allday`) is never
//! copied verbatim: it is resolved into a consistent window first, so a
//! stored stop always matches the stored start and duration.

use clinic_postgres::model::{
    Appointment, DEFAULT_APPOINTMENT_NAME, NewAppointment,
    UpdateAppointment as UpdateAppointmentModel,
};
use clinic_postgres::types::{
    AppointmentFilter, AppointmentStatus, AppointmentType, AppointmentWindow, ValidationError,
};
use jiff::Timestamp;
use jiff::civil::Date;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request payload for booking an appointment.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema, Validate)]
pub struct CreateAppointment {
    /// Patient the appointment is booked for.
    pub patient_id: i64,
    /// Start of the appointment.
    #[serde(deserialize_with = "super::datetimes::timestamp")]
    #[schemars(with = "String")]
    pub start: Timestamp,
    /// End of the appointment. Derived from `duration` when both are given.
    #[serde(default, deserialize_with = "super::datetimes::option_timestamp")]
    #[schemars(with = "Option<String>")]
    pub stop: Option<Timestamp>,
    /// Length in hours. Defaults to one hour.
    #[validate(range(min = 0.0))]
    pub duration: Option<f64>,
    /// Whether the appointment takes the whole day.
    #[serde(default)]
    pub allday: bool,
    pub doctor_id: Option<i64>,
    pub chief_complaints: Option<String>,
    /// Title of the appointment. Defaults to "New Appointment".
    pub name: Option<String>,
    pub appointment_type: Option<AppointmentType>,
    pub contact_number: Option<String>,
}

impl CreateAppointment {
    /// Converts this request into a [`NewAppointment`] booked by
    /// `assistant_id`.
    pub fn into_model(self, assistant_id: i64) -> Result<NewAppointment, ValidationError> {
        let window = AppointmentWindow::resolve(self.start, self.duration, self.stop, self.allday)?;
        let name = self
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_APPOINTMENT_NAME.to_owned());

        let mut appointment = NewAppointment::new(self.patient_id, window);
        appointment.name = Some(name);
        appointment.doctor_id = self.doctor_id;
        appointment.chief_complaints = self.chief_complaints;
        appointment.appointment_type = self.appointment_type;
        appointment.contact_number = self.contact_number;
        appointment.assistant_id = Some(assistant_id);
        Ok(appointment)
    }
}

/// Request payload for updating an appointment. Omitted fields are
/// unchanged.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema, Validate)]
pub struct UpdateAppointment {
    #[serde(default, deserialize_with = "super::datetimes::option_timestamp")]
    #[schemars(with = "Option<String>")]
    pub start: Option<Timestamp>,
    #[serde(default, deserialize_with = "super::datetimes::option_timestamp")]
    #[schemars(with = "Option<String>")]
    pub stop: Option<Timestamp>,
    #[validate(range(min = 0.0))]
    pub duration: Option<f64>,
    pub allday: Option<bool>,
    pub doctor_id: Option<i64>,
    pub chief_complaints: Option<String>,
    pub name: Option<String>,
    pub appointment_type: Option<AppointmentType>,
    pub contact_number: Option<String>,
    /// Workflow status. Any status may be written.
    pub state: Option<AppointmentStatus>,
}

impl UpdateAppointment {
    /// Converts this request into an [`UpdateAppointmentModel`], rederiving
    /// the window of `current` when any window field changes.
    pub fn into_model(
        self,
        current: &Appointment,
    ) -> Result<UpdateAppointmentModel, ValidationError> {
        let window = current.reschedule(self.start, self.duration, self.stop, self.allday)?;

        let mut changes = UpdateAppointmentModel::new(
            self.contact_number,
            self.state,
            self.appointment_type,
            self.doctor_id,
            self.chief_complaints,
            self.name,
        );

        if let Some(window) = window {
            changes = changes.with_window(window);
        }

        Ok(changes)
    }
}

/// Query parameters for listing appointments.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, JsonSchema)]
pub struct AppointmentFilters {
    /// First day to include, on the start date.
    pub date_from: Option<Date>,
    /// Last day to include, on the start date.
    pub date_to: Option<Date>,
    /// Only appointments of this patient.
    pub patient_id: Option<i64>,
}

impl AppointmentFilters {
    /// Converts the filters into an [`AppointmentFilter`].
    pub fn into_filter(self) -> Result<AppointmentFilter, ValidationError> {
        AppointmentFilter::from_dates(self.date_from, self.date_to, self.patient_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(value: &str) -> Timestamp {
        value.parse().unwrap()
    }

    #[test]
    fn start_without_duration_books_one_hour() {
        let request: CreateAppointment = serde_json::from_value(serde_json::json!({
            "patient_id": 4,
            "start": "2024-01-01 09:00:00",
        }))
        .unwrap();

        let appointment = request.into_model(2).unwrap();
        assert_eq!(appointment.stop(), ts("2024-01-01T10:00:00Z"));
        assert_eq!(appointment.duration_hours(), 1.0);
        assert_eq!(appointment.assistant_id, Some(2));
        assert_eq!(appointment.name.as_deref(), Some(DEFAULT_APPOINTMENT_NAME));
    }

    #[test]
    fn explicit_stop_derives_the_duration() {
        let request: CreateAppointment = serde_json::from_value(serde_json::json!({
            "patient_id": 4,
            "start": "2024-01-01T09:00:00Z",
            "stop": "2024-01-01T09:45:00Z",
            "name": "Checkup",
        }))
        .unwrap();

        let appointment = request.into_model(2).unwrap();
        assert_eq!(appointment.duration_hours(), 0.75);
        assert_eq!(appointment.name.as_deref(), Some("Checkup"));
    }

    #[test]
    fn stop_before_start_is_rejected() {
        let request: CreateAppointment = serde_json::from_value(serde_json::json!({
            "patient_id": 4,
            "start": "2024-01-01T09:00:00Z",
            "stop": "2024-01-01T08:00:00Z",
        }))
        .unwrap();

        assert_eq!(
            request.into_model(2).unwrap_err(),
            ValidationError::StopBeforeStart
        );
    }

    #[test]
    fn multi_day_all_day_booking_is_valid() {
        let request: CreateAppointment = serde_json::from_value(serde_json::json!({
            "patient_id": 4,
            "start": "2024-01-01T00:00:00Z",
            "duration": 48.0,
            "allday": true,
        }))
        .unwrap();

        assert!(request.validate().is_ok());
        let appointment = request.into_model(2).unwrap();
        assert_eq!(appointment.stop(), ts("2024-01-02T23:59:59Z"));
        assert_eq!(appointment.duration_hours(), 48.0);
    }

    #[test]
    fn negative_duration_fails_validation() {
        let request: UpdateAppointment =
            serde_json::from_value(serde_json::json!({ "duration": -2.0 })).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn malformed_start_fails_to_parse() {
        let result = serde_json::from_value::<CreateAppointment>(serde_json::json!({
            "patient_id": 4,
            "start": "tomorrow",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn status_is_written_as_given() {
        let request: UpdateAppointment =
            serde_json::from_value(serde_json::json!({ "state": "cancelled" })).unwrap();
        assert_eq!(request.state, Some(AppointmentStatus::Cancelled));
        assert!(request.start.is_none());
    }

    #[test]
    fn filters_default_to_everything() {
        let filter = AppointmentFilters::default().into_filter().unwrap();
        assert_eq!(filter, AppointmentFilter::default());
    }
}
