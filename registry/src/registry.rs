//! The InputTableRegistry - which tables are mutable, and their locks.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use intab_core::{Schema, Table, TableId};
use parking_lot::RwLock;
use tracing::{info, trace};

use crate::error::{RegistryError, RegistryResult};
use crate::input_table::InputTable;
use crate::lock::MutationLock;

/// Registry of input tables, keyed by table identity.
///
/// Registration state is owned by the surrounding engine; mutation requests
/// only read it.
#[derive(Debug, Default)]
pub struct InputTableRegistry {
    tables: RwLock<HashMap<TableId, Arc<InputTable>>>,
    /// Successful lock acquisitions since construction.
    lock_acquisitions: AtomicU64,
}

impl InputTableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Registration ====================

    /// Register an input table built elsewhere.
    pub fn register(&self, table: InputTable) -> RegistryResult<Arc<InputTable>> {
        let id = table.id();
        let mut tables = self.tables.write();
        if tables.contains_key(&id) {
            return Err(RegistryError::AlreadyRegistered(id));
        }
        let table = Arc::new(table);
        tables.insert(id, table.clone());
        info!(
            table = %id,
            kind = ?table.kind(),
            schema = %table.schema(),
            "registered input table"
        );
        Ok(table)
    }

    /// Create and register an empty keyed input table.
    pub fn create_keyed(
        &self,
        schema: Schema,
        keys: &[&str],
    ) -> RegistryResult<Arc<InputTable>> {
        self.register(InputTable::keyed(schema, keys)?)
    }

    /// Create and register an empty append-only input table.
    pub fn create_append_only(&self, schema: Schema) -> RegistryResult<Arc<InputTable>> {
        self.register(InputTable::append_only(schema))
    }

    /// Remove a table from the registry. A mutation already holding its lock
    /// completes; later requests fail with `NotAnInputTable`.
    pub fn deregister(&self, id: TableId) -> Option<Arc<InputTable>> {
        let removed = self.tables.write().remove(&id);
        if removed.is_some() {
            info!(table = %id, "deregistered input table");
        }
        removed
    }

    pub fn is_registered(&self, id: TableId) -> bool {
        self.tables.read().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.tables.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.read().is_empty()
    }

    // ==================== Lookup & Locking ====================

    /// Find the input table behind a resolved handle.
    pub fn lookup(&self, handle: &dyn Table) -> RegistryResult<Arc<InputTable>> {
        self.tables
            .read()
            .get(&handle.id())
            .cloned()
            .ok_or_else(|| RegistryError::not_an_input_table(handle.id()))
    }

    /// Acquire the mutation lock for a handle, blocking while another
    /// mutation against the same table is in flight.
    pub fn lock_for(&self, handle: &dyn Table) -> RegistryResult<MutationLock> {
        let table = self.lookup(handle)?;
        trace!(table = %table.id(), "waiting for mutation lock");
        let guard = table.mutation.lock_arc();
        Ok(self.acquired(table, guard))
    }

    /// Like `lock_for`, but gives up after `timeout`.
    pub fn try_lock_for(
        &self,
        handle: &dyn Table,
        timeout: Duration,
    ) -> RegistryResult<MutationLock> {
        let table = self.lookup(handle)?;
        trace!(table = %table.id(), ?timeout, "waiting for mutation lock");
        let waited_ms = timeout.as_millis() as u64;
        let guard = table
            .mutation
            .try_lock_arc_for(timeout)
            .ok_or_else(|| RegistryError::lock_timeout(table.id(), waited_ms))?;
        Ok(self.acquired(table, guard))
    }

    fn acquired(
        &self,
        table: Arc<InputTable>,
        guard: parking_lot::ArcMutexGuard<parking_lot::RawMutex, ()>,
    ) -> MutationLock {
        self.lock_acquisitions.fetch_add(1, Ordering::Relaxed);
        trace!(table = %table.id(), "mutation lock acquired");
        MutationLock::new(table, guard)
    }

    /// Number of mutation locks handed out so far.
    pub fn lock_acquisitions(&self) -> u64 {
        self.lock_acquisitions.load(Ordering::Relaxed)
    }
}
