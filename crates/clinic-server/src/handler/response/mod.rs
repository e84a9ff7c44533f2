//! Response types for HTTP handlers.
//!
//! Every successful body carries `"success": true`. Reads and creates put
//! their payload under `data`; updates and deletes answer with a message.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

mod appointment_lines;
mod appointments;
mod authentications;
mod doctors;
mod errors;
mod patients;
mod prescriptions;

pub use appointment_lines::*;
pub use appointments::*;
pub use authentications::*;
pub use doctors::*;
pub use errors::*;
pub use patients::*;
pub use prescriptions::*;

/// Successful response carrying a payload.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[schemars(rename = "{T}Response")]
pub struct Data<T> {
    /// Always `true`.
    pub success: bool,
    pub data: T,
}

impl<T> Data<T> {
    /// Wraps `data` in a successful response.
    #[inline]
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Successful response carrying a list of records.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[schemars(rename = "{T}List")]
pub struct List<T> {
    /// Always `true`.
    pub success: bool,
    pub data: Vec<T>,
    /// Number of records matching the query, regardless of pagination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
}

impl<T> List<T> {
    /// Wraps `data` in a successful response without a total.
    #[inline]
    pub fn new(data: Vec<T>) -> Self {
        Self {
            success: true,
            data,
            total: None,
        }
    }

    /// Attaches the total number of matching records.
    #[inline]
    pub fn with_total(mut self, total: i64) -> Self {
        self.total = Some(total);
        self
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Successful response carrying only a message.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Message {
    /// Always `true`.
    pub success: bool,
    pub message: String,
}

impl Message {
    /// Creates a successful response with `message`.
    #[inline]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_omits_missing_total() {
        let list: List<i64> = [1, 2].into_iter().collect();
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true, "data": [1, 2] }));

        let json = serde_json::to_value(list.with_total(9)).unwrap();
        assert_eq!(json["total"], 9);
    }

    #[test]
    fn message_shape() {
        let json = serde_json::to_value(Message::new("Patient deleted successfully")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "success": true, "message": "Patient deleted successfully" })
        );
    }
}
