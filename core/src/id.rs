//! Identity types for tables and exports.
//!
//! A `TableId` names a live table handle independently of any ticket that
//! may currently designate it. Ids are process-unique and never reused.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TABLE_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a live table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableId(pub u64);

impl TableId {
    /// Create a new TableId from a raw value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Allocate a fresh, process-unique id.
    pub fn fresh() -> Self {
        Self(NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Identifier of a session export, carried inside export tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExportId(pub i32);

impl ExportId {
    /// Create a new ExportId from a raw value.
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Get the raw value.
    pub fn raw(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for ExportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_ids_are_unique() {
        // GIVEN
        let a = TableId::fresh();
        let b = TableId::fresh();

        // THEN
        assert_ne!(a, b);
        assert!(b.raw() > a.raw());
    }

    #[test]
    fn test_display() {
        assert_eq!(TableId::new(7).to_string(), "t7");
        assert_eq!(ExportId::new(-3).to_string(), "-3");
    }
}
