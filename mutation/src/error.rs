//! Mutation error types.

use intab_core::{ColumnMismatch, TableError, TableId};
use thiserror::Error;

/// Result type for mutation operations.
pub type MutationResult<T> = Result<T, MutationError>;

/// Errors that can occur during mutation execution.
///
/// Every error leaves the input table exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MutationError {
    #[error("schema mismatch between input table {input_table} and data table {data_table}: {mismatch}")]
    SchemaMismatch {
        input_table: TableId,
        data_table: TableId,
        mismatch: ColumnMismatch,
    },

    #[error("failed to read data table: {0}")]
    ReadFailure(#[from] TableError),
}

impl MutationError {
    pub fn schema_mismatch(
        input_table: TableId,
        data_table: TableId,
        mismatch: ColumnMismatch,
    ) -> Self {
        Self::SchemaMismatch {
            input_table,
            data_table,
            mismatch,
        }
    }
}
