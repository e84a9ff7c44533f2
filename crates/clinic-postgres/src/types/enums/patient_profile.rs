//! Patient demographic and questionnaire enumerations.

use diesel_derive_enum::DbEnum;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Corresponds to the `PATIENT_GENDER` PostgreSQL enum.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[ExistingTypePath = "crate::schema::sql_types::PatientGender"]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PatientGender {
    #[db_rename = "male"]
    Male,
    #[db_rename = "female"]
    Female,
}

/// Corresponds to the `MARITAL_STATUS` PostgreSQL enum.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[ExistingTypePath = "crate::schema::sql_types::MaritalStatus"]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MaritalStatus {
    #[db_rename = "single"]
    Single,
    #[db_rename = "married"]
    Married,
    #[db_rename = "divorced"]
    Divorced,
}

/// ABO group with Rh factor, as recorded at intake.
///
/// Corresponds to the `BLOOD_TYPE` PostgreSQL enum.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[ExistingTypePath = "crate::schema::sql_types::BloodType"]
pub enum BloodType {
    #[db_rename = "a-"]
    #[serde(rename = "a-")]
    #[strum(serialize = "a-")]
    ANegative,
    #[db_rename = "a+"]
    #[serde(rename = "a+")]
    #[strum(serialize = "a+")]
    APositive,
    #[db_rename = "b-"]
    #[serde(rename = "b-")]
    #[strum(serialize = "b-")]
    BNegative,
    #[db_rename = "b+"]
    #[serde(rename = "b+")]
    #[strum(serialize = "b+")]
    BPositive,
}

/// Answer to a medical-history question.
///
/// Corresponds to the `YES_NO_ANSWER` PostgreSQL enum.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[ExistingTypePath = "crate::schema::sql_types::YesNoAnswer"]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum YesNoAnswer {
    #[db_rename = "yes"]
    Yes,
    #[db_rename = "no"]
    No,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blood_type_uses_symbolic_names() {
        let value: BloodType = serde_json::from_str("\"b+\"").unwrap();
        assert_eq!(value, BloodType::BPositive);
        assert_eq!(BloodType::ANegative.to_string(), "a-");
    }

    #[test]
    fn snake_case_enums_round_trip_through_strings() {
        assert_eq!("married".parse::<MaritalStatus>().unwrap(), MaritalStatus::Married);
        assert_eq!(PatientGender::Female.to_string(), "female");
        assert!("maybe".parse::<YesNoAnswer>().is_err());
    }
}
