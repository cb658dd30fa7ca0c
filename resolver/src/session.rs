//! Session-scoped tickets.
//!
//! `SessionTickets` is the export table of one client session. It hands out
//! export tickets for live tables, binds scope names, and resolves tickets
//! back into handles while the session is open. Closing the session
//! invalidates every ticket it issued.

use std::collections::HashMap;
use std::time::Instant;

use intab_core::{ExportId, TableHandle, Ticket, TicketRoute};
use parking_lot::RwLock;
use tracing::debug;

use crate::error::{ResolveError, ResolveResult};
use crate::resolver::TicketResolver;

/// Session ID type.
pub type SessionId = u64;

/// What an export holds.
#[derive(Debug, Clone)]
enum Exported {
    Table(TableHandle),
    /// A non-table object, known only by its kind name.
    Opaque(String),
}

#[derive(Debug, Clone)]
struct Export {
    object: Exported,
    /// Resolving at or after this instant fails.
    deadline: Option<Instant>,
}

impl Export {
    fn is_expired(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|d| now >= d)
    }
}

#[derive(Debug, Default)]
struct State {
    closed: bool,
    next_export: i32,
    exports: HashMap<ExportId, Export>,
    scope: HashMap<String, TableHandle>,
}

/// The tickets issued by one session.
#[derive(Debug)]
pub struct SessionTickets {
    id: SessionId,
    state: RwLock<State>,
}

impl SessionTickets {
    /// Create an open session with no exports.
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            state: RwLock::new(State {
                next_export: 1,
                ..State::default()
            }),
        }
    }

    /// Get the session ID.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Export a table and return a ticket for it.
    pub fn export(&self, table: TableHandle) -> Ticket {
        self.insert(Exported::Table(table), None)
    }

    /// Export a table whose ticket stops resolving at `deadline`.
    pub fn export_until(&self, table: TableHandle, deadline: Instant) -> Ticket {
        self.insert(Exported::Table(table), Some(deadline))
    }

    /// Export a non-table object. Its ticket resolves to a type error.
    pub fn export_opaque(&self, kind: impl Into<String>) -> Ticket {
        self.insert(Exported::Opaque(kind.into()), None)
    }

    fn insert(&self, object: Exported, deadline: Option<Instant>) -> Ticket {
        let mut state = self.state.write();
        let id = ExportId::new(state.next_export);
        state.next_export = state.next_export.wrapping_add(1);
        state.exports.insert(id, Export { object, deadline });
        debug!(session = self.id, export = %id, "exported object");
        Ticket::export(id)
    }

    /// Bind a scope variable to a table, replacing any previous binding.
    pub fn bind(&self, name: &str, table: TableHandle) -> Ticket {
        self.state.write().scope.insert(name.to_string(), table);
        Ticket::scope(name)
    }

    /// Force an export to expire now.
    pub fn expire(&self, ticket: &Ticket) -> bool {
        let Ok(TicketRoute::Export(id)) = ticket.route() else {
            return false;
        };
        match self.state.write().exports.get_mut(&id) {
            Some(export) => {
                export.deadline = Some(Instant::now());
                true
            }
            None => false,
        }
    }

    /// Release a ticket. Returns false if it designated nothing.
    pub fn release(&self, ticket: &Ticket) -> bool {
        let released = match ticket.route() {
            Ok(TicketRoute::Export(id)) => self.state.write().exports.remove(&id).is_some(),
            Ok(TicketRoute::Scope(name)) => self.state.write().scope.remove(&name).is_some(),
            Err(_) => false,
        };
        if released {
            debug!(session = self.id, ticket = %ticket, "released ticket");
        }
        released
    }

    /// Close the session, dropping every export and binding.
    pub fn close(&self) {
        let mut state = self.state.write();
        state.closed = true;
        state.exports.clear();
        state.scope.clear();
        debug!(session = self.id, "session closed");
    }

    pub fn is_closed(&self) -> bool {
        self.state.read().closed
    }

    /// Number of live exports.
    pub fn export_count(&self) -> usize {
        self.state.read().exports.len()
    }
}

impl TicketResolver for SessionTickets {
    fn resolve(&self, ticket: &Ticket) -> ResolveResult<TableHandle> {
        let route = ticket.route()?;
        let state = self.state.read();
        if state.closed {
            return Err(ResolveError::session_closed(self.id));
        }
        match route {
            TicketRoute::Export(id) => {
                let export = state
                    .exports
                    .get(&id)
                    .ok_or_else(|| ResolveError::unknown(ticket.log_name()))?;
                if export.is_expired(Instant::now()) {
                    return Err(ResolveError::expired(ticket.log_name()));
                }
                match &export.object {
                    Exported::Table(table) => Ok(table.clone()),
                    Exported::Opaque(kind) => {
                        Err(ResolveError::not_a_table(ticket.log_name(), kind.clone()))
                    }
                }
            }
            TicketRoute::Scope(name) => state
                .scope
                .get(&name)
                .cloned()
                .ok_or_else(|| ResolveError::unknown(ticket.log_name())),
        }
    }
}
