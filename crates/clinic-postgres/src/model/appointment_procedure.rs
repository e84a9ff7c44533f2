use bigdecimal::BigDecimal;
use diesel::prelude::*;
use jiff_diesel::Timestamp;

use crate::schema::appointment_procedures;

/// A procedure performed on a tooth during an appointment.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = appointment_procedures)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AppointmentProcedure {
    pub id: i64,
    pub appointment_id: i64,
    /// Tooth number between 1 and 32.
    pub tooth_no: Option<i16>,
    pub procedure_name: String,
    /// Non-negative cost with two decimal places.
    pub cost: BigDecimal,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = appointment_procedures)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewAppointmentProcedure {
    pub appointment_id: i64,
    pub tooth_no: Option<i16>,
    pub procedure_name: String,
    pub cost: Option<BigDecimal>,
}
