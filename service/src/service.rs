//! The input table mutation service.

use std::sync::Arc;

use intab_core::{Table, TableHandle, Ticket};
use intab_mutation::{MutationExecutor, MutationOutcome};
use intab_registry::{InputTableRegistry, MutationLock};
use intab_resolver::TicketResolver;
use tracing::{debug, info, warn};

use crate::cancel::CancelToken;
use crate::config::ServiceConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::request::{
    AddTableRequest, AddTableResponse, DeleteTableRequest, DeleteTableResponse, MutationKind,
    MutationRequest, RequestStage,
};

/// Applies ticket-addressed add/delete requests to input tables.
///
/// Holds no per-request state; one instance serves concurrent requests from
/// many threads. The only shared mutable state is the registry and its
/// per-table locks.
pub struct InputTableService<R> {
    resolver: R,
    registry: Arc<InputTableRegistry>,
    config: ServiceConfig,
}

impl<R: TicketResolver> InputTableService<R> {
    /// Create a service with the default configuration.
    pub fn new(resolver: R, registry: Arc<InputTableRegistry>) -> Self {
        Self {
            resolver,
            registry,
            config: ServiceConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ServiceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<InputTableRegistry> {
        &self.registry
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    // ==================== RPC surface ====================

    /// Append every row of `table_to_add` to `input_table`.
    pub fn add_table_to_input_table(
        &self,
        request: AddTableRequest,
    ) -> ServiceResult<AddTableResponse> {
        self.add_table_to_input_table_cancellable(request, &CancelToken::new())
    }

    pub fn add_table_to_input_table_cancellable(
        &self,
        request: AddTableRequest,
        cancel: &CancelToken,
    ) -> ServiceResult<AddTableResponse> {
        self.handle(MutationRequest::try_from(request), cancel)
            .map(|_| AddTableResponse)
    }

    /// Remove the rows keyed by `table_to_remove` from `input_table`.
    pub fn delete_table_from_input_table(
        &self,
        request: DeleteTableRequest,
    ) -> ServiceResult<DeleteTableResponse> {
        self.delete_table_from_input_table_cancellable(request, &CancelToken::new())
    }

    pub fn delete_table_from_input_table_cancellable(
        &self,
        request: DeleteTableRequest,
        cancel: &CancelToken,
    ) -> ServiceResult<DeleteTableResponse> {
        self.handle(MutationRequest::try_from(request), cancel)
            .map(|_| DeleteTableResponse)
    }

    // ==================== Request lifecycle ====================

    fn handle(
        &self,
        validated: ServiceResult<MutationRequest>,
        cancel: &CancelToken,
    ) -> ServiceResult<MutationOutcome> {
        let request = match validated {
            Ok(request) => request,
            Err(e) => {
                warn!(stage = %RequestStage::Validating, error = %e, "request rejected");
                return Err(e);
            }
        };
        self.execute(&request, cancel)
    }

    /// Run a validated request to a single terminal outcome.
    pub fn execute(
        &self,
        request: &MutationRequest,
        cancel: &CancelToken,
    ) -> ServiceResult<MutationOutcome> {
        debug!(
            stage = %RequestStage::Received,
            kind = %request.kind,
            input_table = %request.input_table,
            data_table = %request.data_table,
            "mutation request"
        );

        let mut stage = RequestStage::Resolving;
        let result = self.run(request, cancel, &mut stage);
        match &result {
            Ok(outcome) => info!(
                stage = %RequestStage::Acknowledged,
                kind = %request.kind,
                input_table = %request.input_table,
                data_table = %request.data_table,
                rows = outcome.rows_affected(),
                "mutation applied"
            ),
            Err(e) => warn!(
                stage = %RequestStage::Failed,
                failed_while = %stage,
                kind = %request.kind,
                input_table = %request.input_table,
                data_table = %request.data_table,
                error_kind = %e.kind(),
                error = %e,
                "mutation failed"
            ),
        }
        result
    }

    fn run(
        &self,
        request: &MutationRequest,
        cancel: &CancelToken,
        stage: &mut RequestStage,
    ) -> ServiceResult<MutationOutcome> {
        let input = self.resolve(&request.input_table, "input_table")?;
        let data = self.resolve(&request.data_table, data_field(request.kind))?;
        self.check_size(&*data)?;
        if cancel.is_cancelled() {
            return Err(ServiceError::cancelled(*stage));
        }

        let mut lock = self.acquire(&*input)?;
        *stage = RequestStage::LockAcquired;
        if cancel.is_cancelled() {
            return Err(ServiceError::cancelled(*stage));
        }

        // From here the mutation runs to completion; cancellation is ignored.
        *stage = RequestStage::Executing;
        let mut executor = MutationExecutor::new(&mut lock);
        let outcome = match request.kind {
            MutationKind::Add => executor.add(&*data)?,
            MutationKind::Delete => executor.delete(&*data)?,
        };
        Ok(outcome)
    }

    fn resolve(&self, ticket: &Ticket, field: &'static str) -> ServiceResult<TableHandle> {
        self.resolver
            .resolve(ticket)
            .map_err(|e| ServiceError::unresolvable(field, e))
    }

    fn check_size(&self, data: &dyn Table) -> ServiceResult<()> {
        match self.config.max_rows_per_request {
            Some(max) if data.row_count() > max => Err(ServiceError::invalid_argument(format!(
                "data table has {} rows, limit is {}",
                data.row_count(),
                max
            ))),
            _ => Ok(()),
        }
    }

    fn acquire(&self, input: &dyn Table) -> ServiceResult<MutationLock> {
        let lock = match self.config.lock_timeout() {
            Some(timeout) => self.registry.try_lock_for(input, timeout)?,
            None => self.registry.lock_for(input)?,
        };
        Ok(lock)
    }
}

fn data_field(kind: MutationKind) -> &'static str {
    match kind {
        MutationKind::Add => "table_to_add",
        MutationKind::Delete => "table_to_remove",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use intab_core::{row, ColumnType, MemoryTable, Schema};
    use intab_resolver::SessionTickets;

    fn id_val() -> Schema {
        Schema::new()
            .column("id", ColumnType::Int)
            .column("val", ColumnType::String)
    }

    fn service() -> InputTableService<SessionTickets> {
        InputTableService::new(SessionTickets::new(1), Arc::new(InputTableRegistry::new()))
    }

    #[test]
    fn test_add_acknowledged() {
        // GIVEN
        let service = service();
        let input = service.registry().create_keyed(id_val(), &["id"]).unwrap();
        let input_ticket = service.resolver().export(input.clone());
        let data_ticket = service
            .resolver()
            .export(MemoryTable::handle(id_val(), vec![row![1, "a"]]));

        // WHEN
        let response =
            service.add_table_to_input_table(AddTableRequest::new(input_ticket, data_ticket));

        // THEN
        assert_eq!(response.unwrap(), AddTableResponse);
        assert_eq!(input.row_count(), 1);
    }

    #[test]
    fn test_oversized_data_table_rejected_before_lock() {
        // GIVEN
        let service = service().with_config(ServiceConfig::new().with_max_rows_per_request(1));
        let input = service.registry().create_keyed(id_val(), &["id"]).unwrap();
        let input_ticket = service.resolver().export(input.clone());
        let data_ticket = service.resolver().export(MemoryTable::handle(
            id_val(),
            vec![row![1, "a"], row![2, "b"]],
        ));

        // WHEN
        let err = service
            .add_table_to_input_table(AddTableRequest::new(input_ticket, data_ticket))
            .unwrap_err();

        // THEN
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(service.registry().lock_acquisitions(), 0);
        assert_eq!(input.row_count(), 0);
    }

    #[test]
    fn test_cancelled_before_lock_has_no_effect() {
        // GIVEN
        let service = service();
        let input = service.registry().create_keyed(id_val(), &["id"]).unwrap();
        let input_ticket = service.resolver().export(input.clone());
        let data_ticket = service
            .resolver()
            .export(MemoryTable::handle(id_val(), vec![row![1, "a"]]));
        let cancel = CancelToken::new();
        cancel.cancel();

        // WHEN
        let err = service
            .add_table_to_input_table_cancellable(
                AddTableRequest::new(input_ticket, data_ticket),
                &cancel,
            )
            .unwrap_err();

        // THEN
        assert!(matches!(
            err,
            ServiceError::Cancelled {
                stage: RequestStage::Resolving
            }
        ));
        assert!(err.kind().is_retryable());
        assert_eq!(service.registry().lock_acquisitions(), 0);
        assert_eq!(input.row_count(), 0);
    }
}
