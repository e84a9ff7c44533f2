//! Offset-based pagination for list queries.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Maximum number of items per page.
pub const MAX_LIMIT: i64 = 1000;

/// Offset-based pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct OffsetPagination {
    /// Maximum number of records to return.
    pub limit: i64,
    /// Number of records to skip.
    pub offset: i64,
}

impl OffsetPagination {
    /// Creates a pagination, clamping the limit to `1..=MAX_LIMIT` and the offset to zero or more.
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit: limit.clamp(1, MAX_LIMIT),
            offset: offset.max(0),
        }
    }
}

impl Default for OffsetPagination {
    fn default() -> Self {
        Self {
            limit: 100,
            offset: 0,
        }
    }
}

/// One page of results together with the unpaginated total.
#[derive(Debug, Clone)]
pub struct OffsetPage<T> {
    pub items: Vec<T>,
    pub total: i64,
}

impl<T> OffsetPage<T> {
    pub fn new(items: Vec<T>, total: i64) -> Self {
        Self { items, total }
    }

    /// Maps the items to a different type.
    pub fn map<U, F>(self, f: F) -> OffsetPage<U>
    where
        F: FnMut(T) -> U,
    {
        OffsetPage {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }

    /// Returns whether rows remain after this page.
    pub fn has_more(&self, pagination: &OffsetPagination) -> bool {
        pagination.offset + (self.items.len() as i64) < self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_lists_one_hundred_rows() {
        let pagination = OffsetPagination::default();
        assert_eq!(pagination.limit, 100);
        assert_eq!(pagination.offset, 0);
    }

    #[test]
    fn bounds_are_clamped() {
        assert_eq!(OffsetPagination::new(0, 10).limit, 1);
        assert_eq!(OffsetPagination::new(5000, 10).limit, MAX_LIMIT);
        assert_eq!(OffsetPagination::new(10, -5).offset, 0);
    }

    #[test]
    fn page_reports_remaining_rows() {
        let pagination = OffsetPagination::new(2, 0);
        let page = OffsetPage::new(vec![1, 2], 5);
        assert!(page.has_more(&pagination));

        let pagination = OffsetPagination::new(2, 4);
        let page = OffsetPage::new(vec![5], 5).map(|n| n * 10);
        assert_eq!(page.items, vec![50]);
        assert!(!page.has_more(&pagination));
    }
}
