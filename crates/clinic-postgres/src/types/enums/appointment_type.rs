//! How an appointment was booked.

use diesel_derive_enum::DbEnum;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Corresponds to the `APPOINTMENT_TYPE` PostgreSQL enum.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[ExistingTypePath = "crate::schema::sql_types::AppointmentType"]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AppointmentType {
    /// Booked ahead of time.
    #[db_rename = "reserve"]
    Reserve,

    /// Walk-in visit.
    #[db_rename = "in_person"]
    InPerson,
}
