//! Exclusive mutation access to one input table.

use std::sync::Arc;

use intab_core::{Row, Schema, Table, TableId};
use parking_lot::{ArcMutexGuard, RawMutex};

use crate::input_table::InputTable;

/// Exclusive right to mutate one input table.
///
/// Held for the duration of a single add or delete; dropping it releases the
/// table to the next waiter on every exit path.
pub struct MutationLock {
    table: Arc<InputTable>,
    _guard: ArcMutexGuard<RawMutex, ()>,
}

impl MutationLock {
    pub(crate) fn new(table: Arc<InputTable>, guard: ArcMutexGuard<RawMutex, ()>) -> Self {
        Self {
            table,
            _guard: guard,
        }
    }

    pub fn table_id(&self) -> TableId {
        self.table.id()
    }

    pub fn schema(&self) -> &Schema {
        self.table.schema()
    }

    pub fn key_columns(&self) -> &[usize] {
        self.table.key_columns()
    }

    pub fn table(&self) -> &Arc<InputTable> {
        &self.table
    }

    /// The rows as of lock acquisition (or the last publish under this lock).
    pub fn rows(&self) -> Arc<Vec<Row>> {
        self.table.snapshot()
    }

    /// Atomically replace the table's rows with a fully staged row set.
    pub fn publish(&mut self, rows: Vec<Row>) {
        self.table.publish(rows);
    }
}

impl std::fmt::Debug for MutationLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MutationLock")
            .field("table", &self.table.id())
            .finish()
    }
}
