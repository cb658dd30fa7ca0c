//! Intab Registry
//!
//! Track which live tables are mutable input tables and serialize the
//! mutations applied to each of them.
//!
//! Responsibilities:
//! - Build keyed and append-only input tables with a fixed schema
//! - Register and deregister them by table identity
//! - Hand out one exclusive `MutationLock` per input table at a time
//!
//! Locks are per table: mutations against different input tables never
//! contend. The registry map itself is only held for the lookup.

mod error;
mod input_table;
mod lock;
mod registry;

pub use error::{RegistryError, RegistryResult};
pub use input_table::{InputTable, InputTableKind};
pub use lock::MutationLock;
pub use registry::InputTableRegistry;
