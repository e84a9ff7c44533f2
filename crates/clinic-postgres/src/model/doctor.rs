use diesel::prelude::*;
use jiff_diesel::Timestamp;

use crate::schema::doctors;

/// A practitioner appointments can be assigned to.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = doctors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Doctor {
    pub id: i64,
    pub doctor_name: String,
    pub specialty: Option<String>,
    pub license_number: Option<String>,
    /// Inactive doctors are hidden from the default listing.
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = doctors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewDoctor {
    pub doctor_name: String,
    pub specialty: Option<String>,
    pub license_number: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Default, Clone, AsChangeset)]
#[diesel(table_name = doctors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateDoctor {
    pub doctor_name: Option<String>,
    pub specialty: Option<String>,
    pub license_number: Option<String>,
    pub is_active: Option<bool>,
    pub updated_at: Option<Timestamp>,
}
