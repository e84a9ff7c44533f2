//! Offset pagination accepted by list endpoints.

use clinic_postgres::types::OffsetPagination;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Query parameters for offset pagination.
///
/// Out of range values are clamped rather than rejected.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, JsonSchema)]
pub struct Pagination {
    /// Maximum number of records to return. Defaults to 100.
    pub limit: Option<i64>,
    /// Number of records to skip. Defaults to 0.
    pub offset: Option<i64>,
}

impl Pagination {
    /// Returns a new [`Pagination`].
    #[inline]
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
        }
    }
}

impl From<Pagination> for OffsetPagination {
    fn from(pagination: Pagination) -> Self {
        let defaults = OffsetPagination::default();
        OffsetPagination::new(
            pagination.limit.unwrap_or(defaults.limit),
            pagination.offset.unwrap_or(defaults.offset),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_use_defaults() {
        let pagination = OffsetPagination::from(Pagination::default());
        assert_eq!(pagination, OffsetPagination::new(100, 0));
    }

    #[test]
    fn explicit_values_are_clamped() {
        let pagination = OffsetPagination::from(Pagination::new(0, -3));
        assert_eq!(pagination.limit, 1);
        assert_eq!(pagination.offset, 0);
    }
}
