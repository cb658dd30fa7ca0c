//! ADD operation - appends every data-table row to the input table.

use intab_core::Table;
use intab_registry::MutationLock;

use crate::error::{MutationError, MutationResult};
use crate::result::MutationOutcome;
use crate::validation::read_checked;

/// Append the rows of `data`, in its iteration order, after the existing rows.
pub fn execute_add(
    lock: &mut MutationLock,
    data: &dyn Table,
) -> MutationResult<MutationOutcome> {
    if let Some(mismatch) = lock.schema().compare(data.schema()) {
        return Err(MutationError::schema_mismatch(
            lock.table_id(),
            data.id(),
            mismatch,
        ));
    }

    // Read fully before staging; a failed read leaves nothing to undo.
    let incoming = read_checked(data)?;
    if incoming.is_empty() {
        return Ok(MutationOutcome::Added { rows: 0 });
    }

    let current = lock.rows();
    let added = incoming.len();
    let mut staged = Vec::with_capacity(current.len() + added);
    staged.extend(current.iter().cloned());
    staged.extend(incoming);
    lock.publish(staged);

    Ok(MutationOutcome::Added { rows: added })
}
