//! The resolver seam.

use intab_core::{TableHandle, Ticket};

use crate::error::ResolveResult;

/// Resolves a ticket into the live table it currently designates.
///
/// Resolution may consult live session state and may block; callers must not
/// assume it is side-effect free.
pub trait TicketResolver: Send + Sync {
    fn resolve(&self, ticket: &Ticket) -> ResolveResult<TableHandle>;
}

impl<F> TicketResolver for F
where
    F: Fn(&Ticket) -> ResolveResult<TableHandle> + Send + Sync,
{
    fn resolve(&self, ticket: &Ticket) -> ResolveResult<TableHandle> {
        self(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ResolveError;
    use intab_core::{MemoryTable, Schema};

    #[test]
    fn test_closure_resolver() {
        // GIVEN
        let table: TableHandle = MemoryTable::handle(Schema::new(), vec![]);
        let known = Ticket::scope("t");
        let resolver = move |ticket: &Ticket| {
            if *ticket == known {
                Ok(table.clone())
            } else {
                Err(ResolveError::unknown(ticket.log_name()))
            }
        };

        // THEN
        assert!(resolver.resolve(&Ticket::scope("t")).is_ok());
        assert_eq!(
            resolver.resolve(&Ticket::scope("u")).err(),
            Some(ResolveError::unknown("scope/u"))
        );
    }
}
