//! Tickets - opaque, session-scoped references to resources.
//!
//! A ticket is a byte string. Its first byte selects a route:
//! - `'e'` export ticket, followed by a 4-byte little-endian export id
//! - `'s'` scope ticket, `s/<name>` where name is a UTF-8 variable name
//!
//! Tickets carry no information about the shape of the table they designate,
//! and are meaningless outside the session that issued them.

use std::fmt;

use crate::{ExportId, TicketError, TicketResult};

const EXPORT_PREFIX: u8 = b'e';
const SCOPE_PREFIX: u8 = b's';

/// An opaque reference to a resource held by a session.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Ticket(Vec<u8>);

/// The decoded destination of a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TicketRoute {
    /// A session export.
    Export(ExportId),
    /// A named variable in the session scope.
    Scope(String),
}

impl Ticket {
    /// Wrap raw ticket bytes as received from a client.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Build an export ticket.
    pub fn export(id: ExportId) -> Self {
        let mut bytes = Vec::with_capacity(5);
        bytes.push(EXPORT_PREFIX);
        bytes.extend_from_slice(&id.raw().to_le_bytes());
        Self(bytes)
    }

    /// Build a scope ticket for a named variable.
    pub fn scope(name: &str) -> Self {
        let mut bytes = Vec::with_capacity(2 + name.len());
        bytes.push(SCOPE_PREFIX);
        bytes.push(b'/');
        bytes.extend_from_slice(name.as_bytes());
        Self(bytes)
    }

    /// The raw payload.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns true if the ticket carries no payload.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decode the route this ticket designates.
    pub fn route(&self) -> TicketResult<TicketRoute> {
        let (&prefix, rest) = self.0.split_first().ok_or(TicketError::Empty)?;
        match prefix {
            EXPORT_PREFIX => {
                let raw: [u8; 4] = rest.try_into().map_err(|_| {
                    TicketError::malformed(
                        "export",
                        format!("expected 4 id bytes, found {}", rest.len()),
                    )
                })?;
                Ok(TicketRoute::Export(ExportId::new(i32::from_le_bytes(raw))))
            }
            SCOPE_PREFIX => {
                let name = rest
                    .strip_prefix(b"/")
                    .ok_or_else(|| TicketError::malformed("scope", "missing '/' separator"))?;
                if name.is_empty() {
                    return Err(TicketError::malformed("scope", "empty variable name"));
                }
                let name = std::str::from_utf8(name)
                    .map_err(|e| TicketError::malformed("scope", e.to_string()))?;
                Ok(TicketRoute::Scope(name.to_string()))
            }
            other => Err(TicketError::UnknownRoute(other)),
        }
    }

    /// Human-readable name for logs and error messages.
    pub fn log_name(&self) -> String {
        match self.route() {
            Ok(TicketRoute::Export(id)) => format!("export/{}", id),
            Ok(TicketRoute::Scope(name)) => format!("scope/{}", name),
            Err(_) => format!("invalid({} bytes)", self.0.len()),
        }
    }
}

impl fmt::Debug for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ticket({})", self.log_name())
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.log_name())
    }
}
