//! Core error types.

use crate::{ColumnType, TableId};
use thiserror::Error;

/// Result type for reading a table.
pub type TableResult<T> = Result<T, TableError>;

/// Errors raised while reading rows out of a live table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    #[error("table {0} has been invalidated")]
    Invalidated(TableId),

    #[error("read failed on table {table}: {message}")]
    ReadFailed { table: TableId, message: String },

    #[error("row {row} has {actual} values but the schema has {expected} columns")]
    RowArity {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("row {row}, column {column}: expected {expected}, got {actual}")]
    ValueType {
        row: usize,
        column: String,
        expected: ColumnType,
        actual: String,
    },
}

impl TableError {
    pub fn read_failed(table: TableId, message: impl Into<String>) -> Self {
        Self::ReadFailed {
            table,
            message: message.into(),
        }
    }

    pub fn row_arity(row: usize, expected: usize, actual: usize) -> Self {
        Self::RowArity {
            row,
            expected,
            actual,
        }
    }

    pub fn value_type(
        row: usize,
        column: impl Into<String>,
        expected: ColumnType,
        actual: impl Into<String>,
    ) -> Self {
        Self::ValueType {
            row,
            column: column.into(),
            expected,
            actual: actual.into(),
        }
    }
}

/// Result type for ticket decoding.
pub type TicketResult<T> = Result<T, TicketError>;

/// Errors raised while decoding a ticket payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TicketError {
    #[error("ticket is empty")]
    Empty,

    #[error("unknown ticket route: {0:#04x}")]
    UnknownRoute(u8),

    #[error("malformed {route} ticket: {message}")]
    Malformed { route: &'static str, message: String },
}

impl TicketError {
    pub fn malformed(route: &'static str, message: impl Into<String>) -> Self {
        Self::Malformed {
            route,
            message: message.into(),
        }
    }
}
