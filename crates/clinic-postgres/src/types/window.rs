//! Appointment time window derivation.
//!
//! An appointment stores its start, stop and duration together. The stop and
//! duration are never set independently: every write goes through
//! [`AppointmentWindow::resolve`], which derives one from the other and
//! refuses windows that end before they begin.

use jiff::{SignedDuration, Timestamp};

use super::ValidationError;

/// Duration applied when neither a duration nor a stop time is known.
pub const DEFAULT_DURATION_HOURS: f64 = 1.0;

/// A validated appointment window where `stop >= start`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppointmentWindow {
    start: Timestamp,
    stop: Timestamp,
    duration_hours: f64,
    all_day: bool,
}

impl AppointmentWindow {
    /// Resolves the window from whatever the caller supplied.
    ///
    /// A non-zero `duration` wins and the stop is recomputed from it. An
    /// explicit `stop` without a duration derives the duration; all-day
    /// windows then recompute the stop from that duration. With neither, the window lasts [`DEFAULT_DURATION_HOURS`].
    pub fn resolve(
        start: Timestamp,
        duration: Option<f64>,
        stop: Option<Timestamp>,
        all_day: bool,
    ) -> Result<Self, ValidationError> {
        let duration = duration.filter(|hours| *hours != 0.0);

        let (stop, duration_hours) = match (duration, stop) {
            (Some(hours), _) => (Self::compute_stop(start, Some(hours), all_day)?, hours),
            (None, Some(stop)) if stop < start => return Err(ValidationError::StopBeforeStart),
            (None, Some(stop)) if all_day => {
                let hours = Self::compute_duration(Some(start), Some(stop));
                let hours = if hours == 0.0 { DEFAULT_DURATION_HOURS } else { hours };
                (Self::compute_stop(start, Some(hours), true)?, hours)
            }
            (None, Some(stop)) => (stop, Self::compute_duration(Some(start), Some(stop))),
            (None, None) => (
                Self::compute_stop(start, None, all_day)?,
                DEFAULT_DURATION_HOURS,
            ),
        };

        if stop < start {
            return Err(ValidationError::StopBeforeStart);
        }

        Ok(Self {
            start,
            stop,
            duration_hours,
            all_day,
        })
    }

    /// Returns `start + duration`, rounded to the minute.
    ///
    /// An unset or zero duration counts as one hour. All-day appointments
    /// end one second earlier so they stay within their last day.
    pub fn compute_stop(
        start: Timestamp,
        duration: Option<f64>,
        all_day: bool,
    ) -> Result<Timestamp, ValidationError> {
        let hours = duration
            .filter(|hours| *hours != 0.0)
            .unwrap_or(DEFAULT_DURATION_HOURS);
        if !hours.is_finite() {
            return Err(ValidationError::InvalidDuration);
        }

        let minutes = (hours * 60.0).round();
        let span = SignedDuration::try_from_secs_f64(minutes * 60.0)
            .map_err(|_| ValidationError::TimeOutOfRange)?;
        let mut stop = start
            .checked_add(span)
            .map_err(|_| ValidationError::TimeOutOfRange)?;

        if all_day {
            stop = stop
                .checked_sub(SignedDuration::from_secs(1))
                .map_err(|_| ValidationError::TimeOutOfRange)?;
        }

        Ok(stop)
    }

    /// Returns the hours between `start` and `stop`, rounded to two decimals.
    ///
    /// Zero when either end is missing.
    pub fn compute_duration(start: Option<Timestamp>, stop: Option<Timestamp>) -> f64 {
        let (Some(start), Some(stop)) = (start, stop) else {
            return 0.0;
        };

        let hours = stop.duration_since(start).as_secs_f64() / 3600.0;
        (hours * 100.0).round() / 100.0
    }

    #[inline]
    pub fn start(&self) -> Timestamp {
        self.start
    }

    #[inline]
    pub fn stop(&self) -> Timestamp {
        self.stop
    }

    #[inline]
    pub fn duration_hours(&self) -> f64 {
        self.duration_hours
    }

    #[inline]
    pub fn is_all_day(&self) -> bool {
        self.all_day
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(value: &str) -> Timestamp {
        value.parse().unwrap()
    }

    #[test]
    fn missing_duration_defaults_to_one_hour() {
        let window = AppointmentWindow::resolve(ts("2024-01-01T09:00:00Z"), None, None, false)
            .unwrap();

        assert_eq!(window.stop(), ts("2024-01-01T10:00:00Z"));
        assert_eq!(window.duration_hours(), 1.0);
    }

    #[test]
    fn zero_duration_is_treated_as_unset() {
        let window =
            AppointmentWindow::resolve(ts("2024-01-01T09:00:00Z"), Some(0.0), None, false)
                .unwrap();
        assert_eq!(window.stop(), ts("2024-01-01T10:00:00Z"));
    }

    #[test]
    fn duration_wins_over_stop() {
        let window = AppointmentWindow::resolve(
            ts("2024-01-01T09:00:00Z"),
            Some(2.5),
            Some(ts("2024-01-01T09:30:00Z")),
            false,
        )
        .unwrap();

        assert_eq!(window.stop(), ts("2024-01-01T11:30:00Z"));
        assert_eq!(window.duration_hours(), 2.5);
    }

    #[test]
    fn explicit_stop_derives_duration() {
        let window = AppointmentWindow::resolve(
            ts("2024-01-01T09:00:00Z"),
            None,
            Some(ts("2024-01-01T09:20:00Z")),
            false,
        )
        .unwrap();

        assert_eq!(window.stop(), ts("2024-01-01T09:20:00Z"));
        assert_eq!(window.duration_hours(), 0.33);
    }

    #[test]
    fn all_day_ends_one_second_early() {
        let window =
            AppointmentWindow::resolve(ts("2024-01-01T00:00:00Z"), Some(24.0), None, true)
                .unwrap();

        assert_eq!(window.stop(), ts("2024-01-01T23:59:59Z"));
        assert!(window.is_all_day());
    }

    #[test]
    fn all_day_stop_is_rederived_from_its_duration() {
        let start = ts("2024-01-01T00:00:00Z");
        let window =
            AppointmentWindow::resolve(start, None, Some(ts("2024-01-02T00:00:00Z")), true)
                .unwrap();

        assert_eq!(window.duration_hours(), 24.0);
        assert_eq!(window.stop(), ts("2024-01-01T23:59:59Z"));
        assert_eq!(
            AppointmentWindow::compute_stop(start, Some(window.duration_hours()), true),
            Ok(window.stop())
        );
    }

    #[test]
    fn all_day_stop_at_start_falls_back_to_one_hour() {
        let start = ts("2024-01-01T00:00:00Z");
        let window = AppointmentWindow::resolve(start, None, Some(start), true).unwrap();

        assert_eq!(window.duration_hours(), DEFAULT_DURATION_HOURS);
        assert_eq!(window.stop(), ts("2024-01-01T00:59:59Z"));
    }

    #[test]
    fn multi_day_durations_are_accepted() {
        let window =
            AppointmentWindow::resolve(ts("2024-01-01T00:00:00Z"), Some(48.0), None, true)
                .unwrap();
        assert_eq!(window.stop(), ts("2024-01-02T23:59:59Z"));
    }

    #[test]
    fn huge_duration_is_out_of_range() {
        let start = ts("2024-01-01T00:00:00Z");
        assert_eq!(
            AppointmentWindow::compute_stop(start, Some(1e300), false),
            Err(ValidationError::TimeOutOfRange)
        );
        assert_eq!(
            AppointmentWindow::compute_stop(start, Some(1e9), false),
            Err(ValidationError::TimeOutOfRange)
        );
    }

    #[test]
    fn stop_before_start_is_rejected() {
        let result = AppointmentWindow::resolve(
            ts("2024-01-01T09:00:00Z"),
            None,
            Some(ts("2024-01-01T08:00:00Z")),
            false,
        );
        assert_eq!(result, Err(ValidationError::StopBeforeStart));

        let result = AppointmentWindow::resolve(
            ts("2024-01-01T09:00:00Z"),
            None,
            Some(ts("2024-01-01T08:00:00Z")),
            true,
        );
        assert_eq!(result, Err(ValidationError::StopBeforeStart));

        let result =
            AppointmentWindow::resolve(ts("2024-01-01T09:00:00Z"), Some(-1.0), None, false);
        assert_eq!(result, Err(ValidationError::StopBeforeStart));
    }

    #[test]
    fn stop_equal_to_start_is_allowed() {
        let start = ts("2024-01-01T09:00:00Z");
        let window = AppointmentWindow::resolve(start, None, Some(start), false).unwrap();
        assert_eq!(window.stop(), start);
        assert_eq!(window.duration_hours(), 0.0);
    }

    #[test]
    fn non_finite_duration_is_rejected() {
        let result =
            AppointmentWindow::resolve(ts("2024-01-01T09:00:00Z"), Some(f64::NAN), None, false);
        assert_eq!(result, Err(ValidationError::InvalidDuration));
    }

    #[test]
    fn duration_and_stop_round_trip() {
        let start = ts("2024-03-10T14:15:00Z");
        for stop in [
            "2024-03-10T14:15:00Z",
            "2024-03-10T15:00:00Z",
            "2024-03-10T16:45:00Z",
            "2024-03-11T02:15:00Z",
        ] {
            let stop = ts(stop);
            let duration = AppointmentWindow::compute_duration(Some(start), Some(stop));
            let recomputed =
                AppointmentWindow::compute_stop(start, Some(duration), false).unwrap();
            let drift = recomputed.duration_since(stop).as_secs().abs();
            assert!(drift <= 60, "drifted by {drift}s for {stop}");
        }
    }

    #[test]
    fn duration_is_zero_without_both_ends() {
        let start = ts("2024-01-01T09:00:00Z");
        assert_eq!(AppointmentWindow::compute_duration(Some(start), None), 0.0);
        assert_eq!(AppointmentWindow::compute_duration(None, Some(start)), 0.0);
    }
}
