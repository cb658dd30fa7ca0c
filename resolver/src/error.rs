//! Ticket resolution errors.

use intab_core::TicketError;
use thiserror::Error;

/// Result type for ticket resolution.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Errors that can occur while resolving a ticket.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    #[error("malformed ticket: {0}")]
    Malformed(#[from] TicketError),

    #[error("unknown ticket: {ticket}")]
    Unknown { ticket: String },

    #[error("ticket has expired: {ticket}")]
    Expired { ticket: String },

    #[error("ticket {ticket} references a {kind}, not a table")]
    NotATable { ticket: String, kind: String },

    #[error("session {session} is closed")]
    SessionClosed { session: u64 },
}

impl ResolveError {
    pub fn unknown(ticket: impl Into<String>) -> Self {
        Self::Unknown {
            ticket: ticket.into(),
        }
    }

    pub fn expired(ticket: impl Into<String>) -> Self {
        Self::Expired {
            ticket: ticket.into(),
        }
    }

    pub fn not_a_table(ticket: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::NotATable {
            ticket: ticket.into(),
            kind: kind.into(),
        }
    }

    pub fn session_closed(session: u64) -> Self {
        Self::SessionClosed { session }
    }
}
