//! Mutation executor - coordinates mutation operations.
//!
//! The executor delegates to specialized operation modules in `ops/`:
//! - `ops/add.rs` - ADD (append rows)
//! - `ops/delete.rs` - DELETE (remove rows by key)
//!
//! It can only be built from a held `MutationLock`, so every change to an
//! input table's rows happens under that table's lock.

use intab_core::Table;
use intab_registry::MutationLock;
use tracing::debug;

use crate::error::MutationResult;
use crate::ops;
use crate::result::MutationOutcome;

/// Mutation executor.
pub struct MutationExecutor<'l> {
    lock: &'l mut MutationLock,
}

impl<'l> MutationExecutor<'l> {
    /// Create a new executor over a locked input table.
    pub fn new(lock: &'l mut MutationLock) -> Self {
        Self { lock }
    }

    /// Append every row of `data` to the input table.
    pub fn add(&mut self, data: &dyn Table) -> MutationResult<MutationOutcome> {
        let outcome = ops::execute_add(self.lock, data)?;
        debug!(
            input_table = %self.lock.table_id(),
            data_table = %data.id(),
            rows = outcome.rows_affected(),
            "added rows"
        );
        Ok(outcome)
    }

    /// Remove every input-table row whose key matches a row of `data`.
    pub fn delete(&mut self, data: &dyn Table) -> MutationResult<MutationOutcome> {
        let outcome = ops::execute_delete(self.lock, data)?;
        if let MutationOutcome::Deleted { rows, unmatched } = outcome {
            debug!(
                input_table = %self.lock.table_id(),
                data_table = %data.id(),
                rows,
                unmatched,
                "deleted rows"
            );
        }
        Ok(outcome)
    }
}
