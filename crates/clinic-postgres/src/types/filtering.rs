//! Filters accepted by the appointment listing.

use jiff::Timestamp;
use jiff::civil::Date;
use jiff::tz::TimeZone;

use super::ValidationError;

/// Narrows an appointment listing by start time and patient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppointmentFilter {
    /// Earliest start time, inclusive.
    pub start_from: Option<Timestamp>,
    /// Latest start time, exclusive.
    pub start_before: Option<Timestamp>,
    pub patient_id: Option<i64>,
}

impl AppointmentFilter {
    /// Builds a filter from calendar days, both ends inclusive, in UTC.
    pub fn from_dates(
        date_from: Option<Date>,
        date_to: Option<Date>,
        patient_id: Option<i64>,
    ) -> Result<Self, ValidationError> {
        let start_from = date_from.map(start_of_day).transpose()?;
        let start_before = date_to
            .map(|date| {
                let next = date.tomorrow().map_err(|_| ValidationError::TimeOutOfRange)?;
                start_of_day(next)
            })
            .transpose()?;

        Ok(Self {
            start_from,
            start_before,
            patient_id,
        })
    }
}

fn start_of_day(date: Date) -> Result<Timestamp, ValidationError> {
    date.to_zoned(TimeZone::UTC)
        .map(|zoned| zoned.timestamp())
        .map_err(|_| ValidationError::TimeOutOfRange)
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn ts(value: &str) -> Timestamp {
        value.parse().unwrap()
    }

    #[test]
    fn date_range_covers_whole_days() {
        let filter =
            AppointmentFilter::from_dates(Some(date(2024, 1, 1)), Some(date(2024, 1, 31)), None)
                .unwrap();

        assert_eq!(filter.start_from, Some(ts("2024-01-01T00:00:00Z")));
        assert_eq!(filter.start_before, Some(ts("2024-02-01T00:00:00Z")));
    }

    #[test]
    fn single_day_range() {
        let day = date(2024, 2, 29);
        let filter = AppointmentFilter::from_dates(Some(day), Some(day), None).unwrap();

        assert_eq!(filter.start_from, Some(ts("2024-02-29T00:00:00Z")));
        assert_eq!(filter.start_before, Some(ts("2024-03-01T00:00:00Z")));
    }

    #[test]
    fn empty_filter_has_no_bounds() {
        let filter = AppointmentFilter::from_dates(None, None, Some(7)).unwrap();
        assert_eq!(filter.patient_id, Some(7));
        assert_eq!(filter.start_from, None);
        assert_eq!(filter.start_before, None);
    }

    #[test]
    fn last_representable_day_is_out_of_range() {
        let result = AppointmentFilter::from_dates(None, Some(jiff::civil::Date::MAX), None);
        assert_eq!(result, Err(ValidationError::TimeOutOfRange));
    }
}
