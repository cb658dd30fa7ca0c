//! Request and response types for the two input table operations.

use std::fmt;

use intab_core::Ticket;

use crate::error::{ServiceError, ServiceResult};

/// Append the rows of `table_to_add` to `input_table`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddTableRequest {
    pub input_table: Option<Ticket>,
    pub table_to_add: Option<Ticket>,
}

impl AddTableRequest {
    pub fn new(input_table: Ticket, table_to_add: Ticket) -> Self {
        Self {
            input_table: Some(input_table),
            table_to_add: Some(table_to_add),
        }
    }
}

/// Empty acknowledgment of a successful add.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddTableResponse;

/// Remove the rows keyed by `table_to_remove` from `input_table`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteTableRequest {
    pub input_table: Option<Ticket>,
    pub table_to_remove: Option<Ticket>,
}

impl DeleteTableRequest {
    pub fn new(input_table: Ticket, table_to_remove: Ticket) -> Self {
        Self {
            input_table: Some(input_table),
            table_to_remove: Some(table_to_remove),
        }
    }
}

/// Empty acknowledgment of a successful delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteTableResponse;

/// Which mutation a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Add,
    Delete,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationKind::Add => f.write_str("add"),
            MutationKind::Delete => f.write_str("delete"),
        }
    }
}

/// Where a request is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStage {
    Received,
    Validating,
    Resolving,
    LockAcquired,
    Executing,
    Acknowledged,
    Failed,
}

impl fmt::Display for RequestStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RequestStage::Received => "received",
            RequestStage::Validating => "validating",
            RequestStage::Resolving => "resolving",
            RequestStage::LockAcquired => "lock acquired",
            RequestStage::Executing => "executing",
            RequestStage::Acknowledged => "acknowledged",
            RequestStage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// A validated mutation request: two distinct, present tickets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRequest {
    pub kind: MutationKind,
    pub input_table: Ticket,
    pub data_table: Ticket,
}

impl MutationRequest {
    /// Validate the shape of a request.
    ///
    /// Rejects missing or empty tickets, and a data table reference identical
    /// to the input table reference.
    pub fn new(
        kind: MutationKind,
        input_table: Option<Ticket>,
        data_table: Option<Ticket>,
        data_field: &'static str,
    ) -> ServiceResult<Self> {
        let input_table = present(input_table, "input_table")?;
        let data_table = present(data_table, data_field)?;
        if input_table == data_table {
            return Err(ServiceError::invalid_argument(format!(
                "input_table and {} reference the same ticket {}",
                data_field,
                input_table.log_name()
            )));
        }
        Ok(Self {
            kind,
            input_table,
            data_table,
        })
    }
}

fn present(ticket: Option<Ticket>, field: &str) -> ServiceResult<Ticket> {
    match ticket {
        Some(ticket) if !ticket.is_empty() => Ok(ticket),
        _ => Err(ServiceError::invalid_argument(format!(
            "no {} ticket supplied",
            field
        ))),
    }
}

impl TryFrom<AddTableRequest> for MutationRequest {
    type Error = ServiceError;

    fn try_from(request: AddTableRequest) -> ServiceResult<Self> {
        Self::new(
            MutationKind::Add,
            request.input_table,
            request.table_to_add,
            "table_to_add",
        )
    }
}

impl TryFrom<DeleteTableRequest> for MutationRequest {
    type Error = ServiceError;

    fn try_from(request: DeleteTableRequest) -> ServiceResult<Self> {
        Self::new(
            MutationKind::Delete,
            request.input_table,
            request.table_to_remove,
            "table_to_remove",
        )
    }
}
