//! Intab Service
//!
//! The request/response boundary for mutating input tables by ticket.
//!
//! Two operations are exposed:
//! - `add_table_to_input_table` appends every row of a data table
//! - `delete_table_from_input_table` removes rows by key
//!
//! Each request moves through `Received -> Validating -> Resolving ->
//! LockAcquired -> Executing` and ends `Acknowledged` or `Failed`. Validation
//! and resolution happen outside the input table's lock; only the executor
//! call runs inside it.
//!
//! # Cancellation
//!
//! A request cancelled before its lock is acquired has no effect. Once the
//! executor has started, the mutation runs to completion and is published in
//! one swap, so the table is never torn. A caller whose RPC is cancelled
//! while that happens cannot tell whether the mutation applied; it must
//! re-read the table rather than assume either outcome.

mod cancel;
mod config;
mod error;
pub mod logging;
mod request;
mod service;

pub use cancel::CancelToken;
pub use config::{ConfigError, ServiceConfig};
pub use error::{ErrorKind, ServiceError, ServiceResult};
pub use request::{
    AddTableRequest, AddTableResponse, DeleteTableRequest, DeleteTableResponse, MutationKind,
    MutationRequest, RequestStage,
};
pub use service::InputTableService;

pub use intab_mutation::MutationOutcome;
