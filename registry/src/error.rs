//! Registry error types.

use intab_core::TableId;
use thiserror::Error;

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors that can occur in the input table registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("table {table} is not a registered input table")]
    NotAnInputTable { table: TableId },

    #[error("table {0} is already registered")]
    AlreadyRegistered(TableId),

    #[error("unknown key column: {column}")]
    UnknownKeyColumn { column: String },

    #[error("duplicate key column: {column}")]
    DuplicateKeyColumn { column: String },

    #[error("timed out after {waited_ms}ms waiting for the mutation lock on {table}")]
    LockTimeout { table: TableId, waited_ms: u64 },
}

impl RegistryError {
    pub fn not_an_input_table(table: TableId) -> Self {
        Self::NotAnInputTable { table }
    }

    pub fn unknown_key_column(column: impl Into<String>) -> Self {
        Self::UnknownKeyColumn {
            column: column.into(),
        }
    }

    pub fn duplicate_key_column(column: impl Into<String>) -> Self {
        Self::DuplicateKeyColumn {
            column: column.into(),
        }
    }

    pub fn lock_timeout(table: TableId, waited_ms: u64) -> Self {
        Self::LockTimeout { table, waited_ms }
    }
}
