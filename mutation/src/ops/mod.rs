//! Mutation operation implementations.
//!
//! Each operation (ADD, DELETE) is implemented in its own module. Both run
//! under a held `MutationLock` and publish their result in a single swap.

mod add;
mod delete;

pub use add::execute_add;
pub use delete::execute_delete;
