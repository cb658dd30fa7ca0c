//! End-to-end add/delete scenarios through the service boundary.

use std::sync::Arc;

use intab_core::{row, ColumnType, MemoryTable, Row, Schema, Table, Ticket};
use intab_registry::{InputTable, InputTableRegistry};
use intab_resolver::{ResolveError, ResolveResult, SessionTickets};
use intab_service::{
    AddTableRequest, DeleteTableRequest, ErrorKind, InputTableService, ServiceError,
};
use pretty_assertions::assert_eq;

fn id_val() -> Schema {
    Schema::new()
        .column("id", ColumnType::Int)
        .column("val", ColumnType::String)
}

struct Fixture {
    service: InputTableService<SessionTickets>,
    input: Arc<InputTable>,
    input_ticket: Ticket,
}

impl Fixture {
    fn keyed() -> Self {
        let service =
            InputTableService::new(SessionTickets::new(1), Arc::new(InputTableRegistry::new()));
        let input = service.registry().create_keyed(id_val(), &["id"]).unwrap();
        let input_ticket = service.resolver().export(input.clone());
        Self {
            service,
            input,
            input_ticket,
        }
    }

    fn data(&self, schema: Schema, rows: Vec<Row>) -> Ticket {
        self.service
            .resolver()
            .export(MemoryTable::handle(schema, rows))
    }

    fn add(&self, data: Ticket) -> Result<(), ServiceError> {
        self.service
            .add_table_to_input_table(AddTableRequest::new(self.input_ticket.clone(), data))
            .map(|_| ())
    }

    fn delete(&self, data: Ticket) -> Result<(), ServiceError> {
        self.service
            .delete_table_from_input_table(DeleteTableRequest::new(
                self.input_ticket.clone(),
                data,
            ))
            .map(|_| ())
    }

    fn rows(&self) -> Vec<Row> {
        self.input.read_rows().unwrap()
    }
}

#[test]
fn add_then_delete_then_repeat_delete() {
    // GIVEN
    let fx = Fixture::keyed();
    let added = fx.data(id_val(), vec![row![1, "a"], row![2, "b"]]);

    // WHEN
    fx.add(added).unwrap();

    // THEN
    assert_eq!(fx.rows(), vec![row![1, "a"], row![2, "b"]]);

    // WHEN
    let removed = fx.data(id_val(), vec![row![1, "a"]]);
    fx.delete(removed.clone()).unwrap();

    // THEN
    assert_eq!(fx.rows(), vec![row![2, "b"]]);

    // WHEN
    fx.delete(removed).unwrap();

    // THEN
    assert_eq!(fx.rows(), vec![row![2, "b"]]);
}

#[test]
fn add_grows_row_count_by_data_row_count() {
    // GIVEN
    let fx = Fixture::keyed();
    fx.add(fx.data(id_val(), vec![row![7, "x"]])).unwrap();
    let before = fx.input.row_count();
    let data_rows = vec![row![3, "c"], row![4, "d"], row![3, "c"]];

    // WHEN
    fx.add(fx.data(id_val(), data_rows.clone())).unwrap();

    // THEN
    assert_eq!(fx.input.row_count(), before + data_rows.len());
    assert_eq!(fx.rows()[before..].to_vec(), data_rows);
}

#[test]
fn add_with_mistyped_column_is_schema_mismatch() {
    // GIVEN
    let fx = Fixture::keyed();
    let wrong = Schema::new()
        .column("id", ColumnType::Int)
        .column("val", ColumnType::Int);

    // WHEN
    let err = fx.add(fx.data(wrong, vec![row![1, 1]])).unwrap_err();

    // THEN
    assert_eq!(err.kind(), ErrorKind::SchemaMismatch);
    assert!(fx.rows().is_empty());
}

#[test]
fn add_from_invalidated_table_is_read_failure() {
    // GIVEN
    let fx = Fixture::keyed();
    let source = MemoryTable::handle(id_val(), vec![row![1, "a"]]);
    let ticket = fx.service.resolver().export(source.clone());
    source.invalidate();

    // WHEN
    let err = fx.add(ticket).unwrap_err();

    // THEN
    assert_eq!(err.kind(), ErrorKind::ReadFailure);
    assert!(err.kind().is_retryable());
    assert!(fx.rows().is_empty());
}

#[test]
fn expired_input_ticket_never_takes_the_lock() {
    // GIVEN
    let fx = Fixture::keyed();
    let data = fx.data(id_val(), vec![row![1, "a"]]);
    fx.service.resolver().expire(&fx.input_ticket);

    // WHEN
    let err = fx.add(data).unwrap_err();

    // THEN
    assert_eq!(err.kind(), ErrorKind::UnresolvableReference);
    assert!(matches!(
        err,
        ServiceError::Unresolvable {
            field: "input_table",
            source: ResolveError::Expired { .. },
        }
    ));
    assert_eq!(fx.service.registry().lock_acquisitions(), 0);
}

#[test]
fn unknown_data_ticket_is_unresolvable() {
    let fx = Fixture::keyed();
    let err = fx.delete(Ticket::scope("nothing-here")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnresolvableReference);
    assert_eq!(fx.service.registry().lock_acquisitions(), 0);
}

#[test]
fn plain_table_is_not_an_input_table() {
    // GIVEN
    let fx = Fixture::keyed();
    let plain = fx.data(id_val(), vec![]);
    let data = fx.data(id_val(), vec![row![1, "a"]]);

    // WHEN
    let err = fx
        .service
        .add_table_to_input_table(AddTableRequest::new(plain, data))
        .unwrap_err();

    // THEN
    assert_eq!(err.kind(), ErrorKind::NotAnInputTable);
}

#[test]
fn self_referential_request_is_invalid() {
    let fx = Fixture::keyed();
    let err = fx.add(fx.input_ticket.clone()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(fx.service.registry().lock_acquisitions(), 0);
}

#[test]
fn missing_ticket_is_invalid() {
    let fx = Fixture::keyed();
    let err = fx
        .service
        .delete_table_from_input_table(DeleteTableRequest {
            input_table: None,
            table_to_remove: Some(Ticket::scope("x")),
        })
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn delete_with_missing_key_column_is_schema_mismatch() {
    // GIVEN
    let fx = Fixture::keyed();
    fx.add(fx.data(id_val(), vec![row![1, "a"]])).unwrap();

    // WHEN
    let err = fx
        .delete(fx.data(
            Schema::new().column("val", ColumnType::String),
            vec![row!["a"]],
        ))
        .unwrap_err();

    // THEN
    assert_eq!(err.kind(), ErrorKind::SchemaMismatch);
    assert_eq!(fx.rows(), vec![row![1, "a"]]);
}

#[test]
fn second_ticket_for_the_input_table_may_be_the_data_table() {
    // GIVEN
    let fx = Fixture::keyed();
    fx.add(fx.data(id_val(), vec![row![1, "a"]])).unwrap();
    let alias = fx.service.resolver().bind("alias", fx.input.clone());

    // WHEN
    fx.add(alias).unwrap();

    // THEN
    assert_eq!(fx.rows(), vec![row![1, "a"], row![1, "a"]]);
}

#[test]
fn closure_resolver_is_injectable() {
    // GIVEN
    let registry = Arc::new(InputTableRegistry::new());
    let input = registry.create_append_only(id_val()).unwrap();
    let data = MemoryTable::handle(id_val(), vec![row![5, "e"]]);
    let input_handle: Arc<dyn Table> = input.clone();
    let data_handle: Arc<dyn Table> = data;
    let resolver = move |ticket: &Ticket| -> ResolveResult<Arc<dyn Table>> {
        match ticket.as_bytes() {
            b"s/in" => Ok(input_handle.clone()),
            b"s/data" => Ok(data_handle.clone()),
            _ => Err(ResolveError::unknown(ticket.log_name())),
        }
    };
    let service = InputTableService::new(resolver, registry);

    // WHEN
    service
        .add_table_to_input_table(AddTableRequest::new(
            Ticket::scope("in"),
            Ticket::scope("data"),
        ))
        .unwrap();

    // THEN
    assert_eq!(input.read_rows().unwrap(), vec![row![5, "e"]]);
}
