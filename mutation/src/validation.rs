//! Data-table read and schema helpers shared by the operations.

use intab_core::{Row, Table};

use crate::error::MutationResult;

/// Read every row of a data table and check each against its declared
/// schema. Fails without side effects if the read is incomplete.
pub fn read_checked(data: &dyn Table) -> MutationResult<Vec<Row>> {
    let rows = data.read_rows()?;
    let schema = data.schema();
    for (index, row) in rows.iter().enumerate() {
        schema.check_row(index, row)?;
    }
    Ok(rows)
}
