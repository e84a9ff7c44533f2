use diesel::prelude::*;
use jiff_diesel::Timestamp;

use crate::schema::companies;

/// A company owning the accounts that sign in to the API.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = companies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = companies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewCompany {
    pub name: String,
}
