//! Intab Mutation
//!
//! Execute row-level writes (ADD/DELETE) against an input table.
//!
//! Responsibilities:
//! - Check the data table's columns against the input table's schema
//! - Read the data table completely before touching the input table
//! - Stage the new row set and publish it in one swap
//!
//! # Module Structure
//!
//! - `executor` - Main MutationExecutor, bound to a held mutation lock
//! - `ops/` - Individual operation implementations (add, delete)
//! - `validation` - Shared data-table read and schema checks
//! - `error` - Error types for mutation failures
//! - `result` - Result types for mutation outcomes

mod error;
mod executor;
mod ops;
mod result;
mod validation;

pub use error::{MutationError, MutationResult};
pub use executor::MutationExecutor;
pub use result::MutationOutcome;
