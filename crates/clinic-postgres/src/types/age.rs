//! Patient age derived from the date of birth.

use jiff::civil::Date;

const DAYS_PER_YEAR: f64 = 365.2425;

/// Returns the age in whole years on `today`, or `None` without a date of birth.
///
/// Dates of birth in the future count as zero years.
pub fn patient_age(date_of_birth: Option<Date>, today: Date) -> Option<i64> {
    let date_of_birth = date_of_birth?;
    let days = today.duration_since(date_of_birth).as_secs() / 86_400;
    let years = (days as f64 / DAYS_PER_YEAR).floor() as i64;
    Some(years.max(0))
}

/// Renders the age the way it is shown on patient records, e.g. `"24 Years Old"`.
///
/// Empty when the date of birth is unknown.
pub fn describe_age(date_of_birth: Option<Date>, today: Date) -> String {
    patient_age(date_of_birth, today)
        .map(|years| format!("{years} Years Old"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn age_counts_completed_years() {
        let today = date(2024, 6, 15);
        assert_eq!(patient_age(Some(date(2000, 1, 1)), today), Some(24));
        assert_eq!(patient_age(Some(date(2000, 6, 16)), today), Some(23));
        assert_eq!(describe_age(Some(date(2000, 1, 1)), today), "24 Years Old");
    }

    #[test]
    fn newborn_is_zero_years_old() {
        let today = date(2024, 6, 15);
        assert_eq!(describe_age(Some(today), today), "0 Years Old");
        assert_eq!(describe_age(Some(date(2025, 1, 1)), today), "0 Years Old");
    }

    #[test]
    fn missing_date_of_birth_is_empty() {
        assert_eq!(describe_age(None, date(2024, 6, 15)), "");
        assert_eq!(patient_age(None, date(2024, 6, 15)), None);
    }
}
