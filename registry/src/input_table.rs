//! Input tables - tables whose rows are appended and removed by request.
//!
//! Rows are held as an immutable snapshot behind a shared reference. A
//! mutation stages a complete new row set and publishes it with a single
//! swap, so readers only ever see the state before or after a mutation.

use std::collections::HashSet;
use std::sync::Arc;

use intab_core::{Row, Schema, Table, TableId, TableResult};
use parking_lot::{Mutex, RwLock};

use crate::error::{RegistryError, RegistryResult};

/// How rows of an input table are identified for deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTableKind {
    /// Rows are matched on a declared subset of the columns.
    Keyed,
    /// No key columns are declared; rows are matched on every column.
    AppendOnly,
}

/// A mutable input table.
#[derive(Debug)]
pub struct InputTable {
    id: TableId,
    schema: Schema,
    kind: InputTableKind,
    /// Positions of the columns used to match rows on delete.
    key_columns: Vec<usize>,
    rows: RwLock<Arc<Vec<Row>>>,
    pub(crate) mutation: Arc<Mutex<()>>,
}

impl InputTable {
    /// Create an empty keyed input table. `keys` name columns of `schema`.
    pub fn keyed(schema: Schema, keys: &[&str]) -> RegistryResult<Self> {
        if keys.is_empty() {
            return Ok(Self::append_only(schema));
        }
        let mut seen = HashSet::new();
        let mut key_columns = Vec::with_capacity(keys.len());
        for &key in keys {
            let position = schema
                .position(key)
                .ok_or_else(|| RegistryError::unknown_key_column(key))?;
            if !seen.insert(position) {
                return Err(RegistryError::duplicate_key_column(key));
            }
            key_columns.push(position);
        }
        Ok(Self::build(schema, InputTableKind::Keyed, key_columns))
    }

    /// Create an empty append-only input table.
    pub fn append_only(schema: Schema) -> Self {
        let key_columns = (0..schema.len()).collect();
        Self::build(schema, InputTableKind::AppendOnly, key_columns)
    }

    fn build(schema: Schema, kind: InputTableKind, key_columns: Vec<usize>) -> Self {
        Self {
            id: TableId::fresh(),
            schema,
            kind,
            key_columns,
            rows: RwLock::new(Arc::new(Vec::new())),
            mutation: Arc::new(Mutex::new(())),
        }
    }

    pub fn kind(&self) -> InputTableKind {
        self.kind
    }

    /// Positions of the key columns within the schema.
    pub fn key_columns(&self) -> &[usize] {
        &self.key_columns
    }

    /// Names of the key columns, in key order.
    pub fn key_names(&self) -> Vec<&str> {
        self.key_columns
            .iter()
            .map(|&i| self.schema.columns()[i].name.as_str())
            .collect()
    }

    /// The currently published rows. Never blocks on the mutation lock.
    pub fn snapshot(&self) -> Arc<Vec<Row>> {
        self.rows.read().clone()
    }

    /// Replace the published rows. Only reachable through a held `MutationLock`.
    pub(crate) fn publish(&self, rows: Vec<Row>) {
        *self.rows.write() = Arc::new(rows);
    }
}

impl Table for InputTable {
    fn id(&self) -> TableId {
        self.id
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn row_count(&self) -> usize {
        self.rows.read().len()
    }

    fn is_mutable(&self) -> bool {
        true
    }

    fn read_rows(&self) -> TableResult<Vec<Row>> {
        Ok((*self.snapshot()).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intab_core::ColumnType;

    fn schema() -> Schema {
        Schema::new()
            .column("id", ColumnType::Int)
            .column("val", ColumnType::String)
    }

    #[test]
    fn test_keyed_table() {
        // GIVEN
        let table = InputTable::keyed(schema(), &["id"]).unwrap();

        // THEN
        assert_eq!(table.kind(), InputTableKind::Keyed);
        assert_eq!(table.key_columns(), &[0]);
        assert_eq!(table.key_names(), vec!["id"]);
        assert_eq!(table.row_count(), 0);
        assert!(table.is_mutable());
    }

    #[test]
    fn test_append_only_keys_on_every_column() {
        let table = InputTable::append_only(schema());
        assert_eq!(table.kind(), InputTableKind::AppendOnly);
        assert_eq!(table.key_columns(), &[0, 1]);
    }

    #[test]
    fn test_invalid_key_columns() {
        assert_eq!(
            InputTable::keyed(schema(), &["nope"]).err(),
            Some(RegistryError::unknown_key_column("nope"))
        );
        assert_eq!(
            InputTable::keyed(schema(), &["id", "id"]).err(),
            Some(RegistryError::duplicate_key_column("id"))
        );
    }
}
