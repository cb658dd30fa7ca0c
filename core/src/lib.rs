//! Intab Core Types
//!
//! This crate provides the foundational types shared by every input table component:
//! - Identity types (TableId, ExportId)
//! - Tickets (opaque, session-scoped references) and their routes
//! - Value types and rows
//! - Column schemas and compatibility checks
//! - The `Table` trait that the surrounding engine implements for live tables
//! - Common error types

mod error;
mod id;
mod schema;
mod table;
mod ticket;
mod value;

pub use error::*;
pub use id::*;
pub use schema::*;
pub use table::*;
pub use ticket::*;
pub use value::*;
