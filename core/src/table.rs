//! Live tables as seen through a resolved ticket.
//!
//! The surrounding engine owns table storage; this crate only needs the
//! read-side surface: identity, schema, row count and a full read.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::{Row, Schema, TableError, TableId, TableResult};

/// A live table.
pub trait Table: Send + Sync + fmt::Debug {
    /// Identity of the table, independent of any ticket.
    fn id(&self) -> TableId;

    /// Column schema.
    fn schema(&self) -> &Schema;

    /// Current number of rows.
    fn row_count(&self) -> usize;

    /// Whether the table accepts add/delete mutations.
    fn is_mutable(&self) -> bool {
        false
    }

    /// Read every row, in iteration order. May block on upstream data and
    /// may fail if the table is invalidated mid-read.
    fn read_rows(&self) -> TableResult<Vec<Row>>;
}

/// Shared handle to a live table.
pub type TableHandle = Arc<dyn Table>;

/// A static in-memory table, used for data tables built from client uploads.
#[derive(Debug)]
pub struct MemoryTable {
    id: TableId,
    schema: Schema,
    rows: Vec<Row>,
    invalidated: AtomicBool,
}

impl MemoryTable {
    /// Create a table. Rows are not checked against the schema here.
    pub fn new(schema: Schema, rows: Vec<Row>) -> Self {
        Self {
            id: TableId::fresh(),
            schema,
            rows,
            invalidated: AtomicBool::new(false),
        }
    }

    /// Create a table and wrap it as a handle.
    pub fn handle(schema: Schema, rows: Vec<Row>) -> Arc<Self> {
        Arc::new(Self::new(schema, rows))
    }

    /// Mark the table as destroyed by its owner; later reads fail.
    pub fn invalidate(&self) {
        self.invalidated.store(true, Ordering::Release);
    }

    pub fn is_invalidated(&self) -> bool {
        self.invalidated.load(Ordering::Acquire)
    }
}

impl Table for MemoryTable {
    fn id(&self) -> TableId {
        self.id
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn read_rows(&self) -> TableResult<Vec<Row>> {
        if self.is_invalidated() {
            return Err(TableError::Invalidated(self.id));
        }
        Ok(self.rows.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{row, ColumnType};

    #[test]
    fn test_memory_table_reads_in_order() {
        // GIVEN
        let schema = Schema::new().column("id", ColumnType::Int);
        let table = MemoryTable::new(schema, vec![row![2], row![1]]);

        // THEN
        assert_eq!(table.row_count(), 2);
        assert!(!table.is_mutable());
        assert_eq!(table.read_rows(), Ok(vec![row![2], row![1]]));
    }

    #[test]
    fn test_invalidated_table_fails_reads() {
        // GIVEN
        let table = MemoryTable::new(Schema::new(), vec![]);

        // WHEN
        table.invalidate();

        // THEN
        assert_eq!(table.read_rows(), Err(TableError::Invalidated(table.id())));
    }
}
