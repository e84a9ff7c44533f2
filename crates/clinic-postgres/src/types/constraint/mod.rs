//! Database constraint violations organized by table.

mod accounts;
mod appointments;
mod doctors;
mod patients;
mod prescriptions;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use self::accounts::{AccessTokenConstraints, AccountConstraints, CompanyConstraints};
pub use self::appointments::{
    AppointmentAttachmentConstraints, AppointmentConstraints, AppointmentProcedureConstraints,
};
pub use self::doctors::DoctorConstraints;
pub use self::patients::PatientConstraints;
pub use self::prescriptions::PrescriptionConstraints;

/// Implements `String` conversions backing the `serde(into, try_from)` attributes.
macro_rules! impl_string_conversions {
    ($($constraint:ident),+ $(,)?) => {
        $(
            impl From<$constraint> for String {
                #[inline]
                fn from(val: $constraint) -> Self {
                    val.to_string()
                }
            }

            impl TryFrom<String> for $constraint {
                type Error = strum::ParseError;

                #[inline]
                fn try_from(value: String) -> Result<Self, Self::Error> {
                    value.parse()
                }
            }
        )+
    };
}

pub(crate) use impl_string_conversions;

/// Any known constraint of the clinic schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ConstraintViolation {
    Company(CompanyConstraints),
    Account(AccountConstraints),
    AccessToken(AccessTokenConstraints),
    Doctor(DoctorConstraints),
    Patient(PatientConstraints),
    Appointment(AppointmentConstraints),
    AppointmentAttachment(AppointmentAttachmentConstraints),
    AppointmentProcedure(AppointmentProcedureConstraints),
    Prescription(PrescriptionConstraints),
}

/// Categories of database constraint violations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintCategory {
    /// Format, length, or range checks.
    Validation,
    /// Ordering between timestamps.
    Chronological,
    /// Domain rules such as references to other records.
    BusinessLogic,
    /// Primary keys and unique indexes.
    Uniqueness,
}

impl ConstraintViolation {
    /// Parses a Postgres constraint name.
    ///
    /// ```
    /// use clinic_postgres::types::ConstraintViolation;
    ///
    /// assert!(ConstraintViolation::new("patients_name_dob_unique").is_some());
    /// assert!(ConstraintViolation::new("unknown_constraint").is_none());
    /// ```
    pub fn new(constraint: &str) -> Option<Self> {
        macro_rules! try_parse {
            ($($parser:expr => $variant:ident),+ $(,)?) => {
                None$(.or_else(|| $parser(constraint).map(Self::$variant)))+
            };
        }

        let table = constraint.split('_').next()?;
        match table {
            "companies" => try_parse!(CompanyConstraints::new => Company),
            "accounts" => try_parse!(AccountConstraints::new => Account),
            "access" => try_parse!(AccessTokenConstraints::new => AccessToken),
            "doctors" => try_parse!(DoctorConstraints::new => Doctor),
            "patients" => try_parse!(PatientConstraints::new => Patient),
            "appointments" => try_parse!(AppointmentConstraints::new => Appointment),
            "appointment" => try_parse! {
                AppointmentAttachmentConstraints::new => AppointmentAttachment,
                AppointmentProcedureConstraints::new => AppointmentProcedure,
            },
            "prescriptions" | "prescription" => {
                try_parse!(PrescriptionConstraints::new => Prescription)
            }
            _ => None,
        }
    }

    /// Returns the table the constraint belongs to.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConstraintViolation::Company(_) => "companies",
            ConstraintViolation::Account(_) => "accounts",
            ConstraintViolation::AccessToken(_) => "access_tokens",
            ConstraintViolation::Doctor(_) => "doctors",
            ConstraintViolation::Patient(_) => "patients",
            ConstraintViolation::Appointment(_) => "appointments",
            ConstraintViolation::AppointmentAttachment(_) => "appointment_attachments",
            ConstraintViolation::AppointmentProcedure(_) => "appointment_procedures",
            ConstraintViolation::Prescription(_) => "prescriptions",
        }
    }

    /// Returns the category of the violated constraint.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            ConstraintViolation::Company(c) => c.categorize(),
            ConstraintViolation::Account(c) => c.categorize(),
            ConstraintViolation::AccessToken(c) => c.categorize(),
            ConstraintViolation::Doctor(c) => c.categorize(),
            ConstraintViolation::Patient(c) => c.categorize(),
            ConstraintViolation::Appointment(c) => c.categorize(),
            ConstraintViolation::AppointmentAttachment(c) => c.categorize(),
            ConstraintViolation::AppointmentProcedure(c) => c.categorize(),
            ConstraintViolation::Prescription(c) => c.categorize(),
        }
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintViolation::Company(c) => c.fmt(f),
            ConstraintViolation::Account(c) => c.fmt(f),
            ConstraintViolation::AccessToken(c) => c.fmt(f),
            ConstraintViolation::Doctor(c) => c.fmt(f),
            ConstraintViolation::Patient(c) => c.fmt(f),
            ConstraintViolation::Appointment(c) => c.fmt(f),
            ConstraintViolation::AppointmentAttachment(c) => c.fmt(f),
            ConstraintViolation::AppointmentProcedure(c) => c.fmt(f),
            ConstraintViolation::Prescription(c) => c.fmt(f),
        }
    }
}

impl From<ConstraintViolation> for String {
    #[inline]
    fn from(val: ConstraintViolation) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for ConstraintViolation {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ConstraintViolation::new(&value).ok_or_else(|| format!("unknown constraint: {value}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_constraints_to_their_table() {
        let violation = ConstraintViolation::new("appointments_stop_after_start");
        assert_eq!(
            violation,
            Some(ConstraintViolation::Appointment(
                AppointmentConstraints::StopAfterStart
            ))
        );

        let violation = ConstraintViolation::new("appointment_procedures_tooth_no_range");
        assert_eq!(
            violation,
            Some(ConstraintViolation::AppointmentProcedure(
                AppointmentProcedureConstraints::ToothNumberRange
            ))
        );

        let violation = ConstraintViolation::new("prescription_lines_medicine_not_empty");
        assert_eq!(
            violation.map(|v| v.table_name()),
            Some("prescriptions")
        );
    }

    #[test]
    fn categorizes_constraints() {
        let unique = ConstraintViolation::new("patients_name_dob_unique");
        assert_eq!(
            unique.map(|v| v.categorize()),
            Some(ConstraintCategory::Uniqueness)
        );

        let token = ConstraintViolation::new("access_tokens_token_unique_idx");
        assert_eq!(
            token.map(|v| v.categorize()),
            Some(ConstraintCategory::Uniqueness)
        );
    }

    #[test]
    fn display_matches_constraint_name() {
        let name = "appointments_patient_id_fkey";
        let violation = ConstraintViolation::new(name);
        assert_eq!(violation.map(|v| v.to_string()), Some(name.to_owned()));
    }

    #[test]
    fn unknown_constraints_are_rejected() {
        assert!(ConstraintViolation::new("").is_none());
        assert!(ConstraintViolation::new("patients_made_up").is_none());
        assert!(ConstraintViolation::new("invoices_total_positive").is_none());
    }
}
