//! Appointment model for PostgreSQL database operations.
//!
//! The start, stop and duration columns are written only through an
//! [`AppointmentWindow`], so a row can never hold a stop time that was set
//! independently of its start and duration.

use diesel::prelude::*;
use jiff_diesel::Timestamp;

use crate::schema::appointments;
use crate::types::{
    AppointmentStatus, AppointmentType, AppointmentWindow, SequenceCode, ValidationError,
};

/// Name given to appointments created without one.
pub const DEFAULT_APPOINTMENT_NAME: &str = "New Appointment";

/// An appointment of a patient, optionally with a doctor.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = appointments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Appointment {
    /// Unique appointment identifier.
    pub id: i64,
    /// Human readable serial, unique across appointments.
    pub appointment_serial: String,
    /// Patient the appointment belongs to.
    pub patient_id: i64,
    /// Phone number to reach the patient for this visit.
    pub contact_number: Option<String>,
    /// Workflow state; any value may be written.
    pub appointment_status: AppointmentStatus,
    pub appointment_type: Option<AppointmentType>,
    pub doctor_id: Option<i64>,
    pub chief_complaints: Option<String>,
    pub name: Option<String>,
    /// Timestamp the appointment starts.
    pub start_at: Timestamp,
    /// Derived end time, never earlier than `start_at`.
    pub stop_at: Timestamp,
    pub is_all_day: bool,
    /// Length in hours, rounded to two decimals when derived from the stop.
    pub duration_hours: f64,
    /// Account that booked the appointment.
    pub assistant_id: Option<i64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Data for booking a new appointment.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = appointments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewAppointment {
    /// Assigned from the appointment sequence when left empty.
    pub appointment_serial: Option<String>,
    pub patient_id: i64,
    pub contact_number: Option<String>,
    pub appointment_status: Option<AppointmentStatus>,
    pub appointment_type: Option<AppointmentType>,
    pub doctor_id: Option<i64>,
    pub chief_complaints: Option<String>,
    pub name: Option<String>,
    pub assistant_id: Option<i64>,
    start_at: Timestamp,
    stop_at: Timestamp,
    is_all_day: bool,
    duration_hours: f64,
}

/// Data for updating an appointment. `None` leaves a column unchanged.
#[derive(Debug, Default, Clone, AsChangeset)]
#[diesel(table_name = appointments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateAppointment {
    pub contact_number: Option<String>,
    pub appointment_status: Option<AppointmentStatus>,
    pub appointment_type: Option<AppointmentType>,
    pub doctor_id: Option<i64>,
    pub chief_complaints: Option<String>,
    pub name: Option<String>,
    pub updated_at: Option<Timestamp>,
    start_at: Option<Timestamp>,
    stop_at: Option<Timestamp>,
    is_all_day: Option<bool>,
    duration_hours: Option<f64>,
}

impl Appointment {
    #[inline]
    pub fn start(&self) -> jiff::Timestamp {
        self.start_at.into()
    }

    #[inline]
    pub fn stop(&self) -> jiff::Timestamp {
        self.stop_at.into()
    }

    /// Re-derives the window after some of its inputs changed.
    ///
    /// A new duration takes precedence, then a new stop time. When only the
    /// start or the all-day flag changed, the stored duration is kept and the
    /// stop recomputed. Returns `None` when nothing changed.
    pub fn reschedule(
        &self,
        start: Option<jiff::Timestamp>,
        duration: Option<f64>,
        stop: Option<jiff::Timestamp>,
        all_day: Option<bool>,
    ) -> Result<Option<AppointmentWindow>, ValidationError> {
        if start.is_none() && duration.is_none() && stop.is_none() && all_day.is_none() {
            return Ok(None);
        }

        let start = start.unwrap_or_else(|| self.start());
        let all_day = all_day.unwrap_or(self.is_all_day);

        let window = match (duration, stop) {
            (Some(duration), stop) => {
                AppointmentWindow::resolve(start, Some(duration), stop, all_day)?
            }
            (None, Some(stop)) => AppointmentWindow::resolve(start, None, Some(stop), all_day)?,
            (None, None) => {
                AppointmentWindow::resolve(start, Some(self.duration_hours), None, all_day)?
            }
        };

        Ok(Some(window))
    }
}

impl NewAppointment {
    /// Creates a draft appointment for `patient_id` over `window`.
    pub fn new(patient_id: i64, window: AppointmentWindow) -> Self {
        Self {
            appointment_serial: None,
            patient_id,
            contact_number: None,
            appointment_status: None,
            appointment_type: None,
            doctor_id: None,
            chief_complaints: None,
            name: Some(DEFAULT_APPOINTMENT_NAME.to_owned()),
            assistant_id: None,
            start_at: window.start().into(),
            stop_at: window.stop().into(),
            is_all_day: window.is_all_day(),
            duration_hours: window.duration_hours(),
        }
    }

    /// Returns the window the appointment will be booked over.
    #[inline]
    pub fn start(&self) -> jiff::Timestamp {
        self.start_at.into()
    }

    #[inline]
    pub fn stop(&self) -> jiff::Timestamp {
        self.stop_at.into()
    }

    #[inline]
    pub fn duration_hours(&self) -> f64 {
        self.duration_hours
    }

    /// Returns whether a serial still has to be drawn from the sequence.
    pub fn needs_serial(&self) -> bool {
        SequenceCode::Appointment.is_unassigned(self.appointment_serial.as_deref())
    }
}

impl UpdateAppointment {
    /// Creates a changeset that leaves the window untouched.
    pub fn new(
        contact_number: Option<String>,
        appointment_status: Option<AppointmentStatus>,
        appointment_type: Option<AppointmentType>,
        doctor_id: Option<i64>,
        chief_complaints: Option<String>,
        name: Option<String>,
    ) -> Self {
        Self {
            contact_number,
            appointment_status,
            appointment_type,
            doctor_id,
            chief_complaints,
            name,
            ..Self::default()
        }
    }

    /// Writes a re-derived window along with the other changes.
    pub fn with_window(mut self, window: AppointmentWindow) -> Self {
        self.start_at = Some(window.start().into());
        self.stop_at = Some(window.stop().into());
        self.is_all_day = Some(window.is_all_day());
        self.duration_hours = Some(window.duration_hours());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(value: &str) -> jiff::Timestamp {
        value.parse().unwrap()
    }

    fn booked() -> Appointment {
        let window =
            AppointmentWindow::resolve(ts("2024-01-01T09:00:00Z"), Some(1.5), None, false)
                .unwrap();
        let new = NewAppointment::new(3, window);

        Appointment {
            id: 1,
            appointment_serial: "APT00001".to_owned(),
            patient_id: new.patient_id,
            contact_number: None,
            appointment_status: AppointmentStatus::default(),
            appointment_type: None,
            doctor_id: None,
            chief_complaints: None,
            name: new.name.clone(),
            start_at: new.start_at,
            stop_at: new.stop_at,
            is_all_day: false,
            duration_hours: new.duration_hours,
            assistant_id: None,
            created_at: jiff::Timestamp::now().into(),
            updated_at: jiff::Timestamp::now().into(),
        }
    }

    #[test]
    fn new_appointment_carries_the_window() {
        let window =
            AppointmentWindow::resolve(ts("2024-01-01T09:00:00Z"), None, None, false).unwrap();
        let new = NewAppointment::new(3, window);

        assert_eq!(new.stop(), ts("2024-01-01T10:00:00Z"));
        assert_eq!(new.duration_hours(), 1.0);
        assert_eq!(new.name.as_deref(), Some(DEFAULT_APPOINTMENT_NAME));
        assert!(new.needs_serial());
    }

    #[test]
    fn placeholder_serial_is_replaced() {
        let window =
            AppointmentWindow::resolve(ts("2024-01-01T09:00:00Z"), None, None, false).unwrap();
        let mut new = NewAppointment::new(3, window);

        new.appointment_serial = Some(DEFAULT_APPOINTMENT_NAME.to_owned());
        assert!(new.needs_serial());

        new.appointment_serial = Some("APT00031".to_owned());
        assert!(!new.needs_serial());
    }

    #[test]
    fn status_changes_leave_the_window_alone() {
        let update = UpdateAppointment::new(
            None,
            Some(AppointmentStatus::Cancelled),
            None,
            None,
            None,
            None,
        );

        assert_eq!(update.appointment_status, Some(AppointmentStatus::Cancelled));
        assert!(update.start_at.is_none());
        assert!(update.stop_at.is_none());
        assert!(update.duration_hours.is_none());
    }

    #[test]
    fn unchanged_window_is_not_rescheduled() {
        assert_eq!(booked().reschedule(None, None, None, None), Ok(None));
    }

    #[test]
    fn moving_start_keeps_the_duration() {
        let window = booked()
            .reschedule(Some(ts("2024-01-02T13:00:00Z")), None, None, None)
            .unwrap()
            .unwrap();

        assert_eq!(window.stop(), ts("2024-01-02T14:30:00Z"));
        assert_eq!(window.duration_hours(), 1.5);
    }

    #[test]
    fn new_stop_rederives_the_duration() {
        let window = booked()
            .reschedule(None, None, Some(ts("2024-01-01T12:00:00Z")), None)
            .unwrap()
            .unwrap();

        assert_eq!(window.start(), ts("2024-01-01T09:00:00Z"));
        assert_eq!(window.duration_hours(), 3.0);
    }

    #[test]
    fn stop_before_stored_start_is_rejected() {
        let result = booked().reschedule(None, None, Some(ts("2024-01-01T08:00:00Z")), None);
        assert_eq!(result, Err(ValidationError::StopBeforeStart));
    }

    #[test]
    fn changeset_writes_the_whole_window() {
        let window = booked()
            .reschedule(None, None, None, Some(true))
            .unwrap()
            .unwrap();
        let update = UpdateAppointment::default().with_window(window);

        assert_eq!(update.start_at.map(jiff::Timestamp::from), Some(window.start()));
        assert_eq!(update.is_all_day, Some(true));
        assert_eq!(
            update.stop_at.map(jiff::Timestamp::from),
            Some(ts("2024-01-01T10:29:59Z"))
        );
    }
}
