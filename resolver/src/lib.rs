//! Intab Resolver
//!
//! Turn opaque tickets into live table handles.
//!
//! Responsibilities:
//! - Define the `TicketResolver` seam the mutation service consumes
//! - Provide `SessionTickets`, a session-scoped export table that mints,
//!   expires and releases tickets
//!
//! Resolution failures (malformed, unknown, expired, wrong type) all surface
//! as `ResolveError` and are never retried by the core.

mod error;
mod resolver;
mod session;

pub use error::{ResolveError, ResolveResult};
pub use resolver::TicketResolver;
pub use session::{SessionId, SessionTickets};
