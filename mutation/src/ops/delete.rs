//! DELETE operation - removes input-table rows whose key appears in the data table.

use std::collections::HashSet;

use intab_core::{Table, Value};
use intab_registry::MutationLock;

use crate::error::{MutationError, MutationResult};
use crate::result::MutationOutcome;
use crate::validation::read_checked;

/// Remove every row whose key columns equal those of some data-table row.
///
/// The data table needs only the key columns (matched by name and type);
/// other columns are ignored. Keys with no match are ignored, so repeating a
/// delete is a no-op. Remaining rows keep their order.
pub fn execute_delete(
    lock: &mut MutationLock,
    data: &dyn Table,
) -> MutationResult<MutationOutcome> {
    let data_positions = lock
        .schema()
        .locate_in(lock.key_columns(), data.schema())
        .map_err(|mismatch| {
            MutationError::schema_mismatch(lock.table_id(), data.id(), mismatch)
        })?;

    let incoming = read_checked(data)?;
    let keys: HashSet<Vec<Value>> = incoming
        .iter()
        .map(|row| row.project(&data_positions))
        .collect();
    if keys.is_empty() {
        return Ok(MutationOutcome::Deleted {
            rows: 0,
            unmatched: 0,
        });
    }

    let current = lock.rows();
    let key_columns = lock.key_columns();
    let mut matched = HashSet::new();
    let mut staged = Vec::with_capacity(current.len());
    for row in current.iter() {
        let key = row.project(key_columns);
        if keys.contains(&key) {
            matched.insert(key);
        } else {
            staged.push(row.clone());
        }
    }

    let removed = current.len() - staged.len();
    let unmatched = keys.len() - matched.len();
    if removed > 0 {
        lock.publish(staged);
    }

    Ok(MutationOutcome::Deleted {
        rows: removed,
        unmatched,
    })
}
