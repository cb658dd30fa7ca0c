//! Column schemas and structural compatibility.

use std::fmt;

use crate::{Row, TableError, TableResult};

/// The type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Bool,
    Int,
    Float,
    String,
    Timestamp,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Bool => "bool",
            ColumnType::Int => "int",
            ColumnType::Float => "float",
            ColumnType::String => "string",
            ColumnType::Timestamp => "timestamp",
        };
        f.write_str(name)
    }
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnDef {
    pub name: String,
    pub column_type: ColumnType,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

impl fmt::Display for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.column_type)
    }
}

/// The first structural difference found between two schemas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnMismatch {
    /// The schemas have a different number of columns.
    Count { expected: usize, actual: usize },
    /// A column at the same position has a different name.
    Name {
        position: usize,
        expected: String,
        actual: String,
    },
    /// A column has the right name but a different type.
    Type {
        column: String,
        expected: ColumnType,
        actual: ColumnType,
    },
    /// A required column is absent.
    Missing { column: String },
}

impl fmt::Display for ColumnMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnMismatch::Count { expected, actual } => {
                write!(f, "expected {} columns, found {}", expected, actual)
            }
            ColumnMismatch::Name {
                position,
                expected,
                actual,
            } => write!(
                f,
                "column {} is named '{}', expected '{}'",
                position, actual, expected
            ),
            ColumnMismatch::Type {
                column,
                expected,
                actual,
            } => write!(
                f,
                "column '{}' has type {}, expected {}",
                column, actual, expected
            ),
            ColumnMismatch::Missing { column } => write!(f, "missing column '{}'", column),
        }
    }
}

/// Ordered sequence of columns describing a table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Schema {
    columns: Vec<ColumnDef>,
}

impl Schema {
    /// Create an empty schema (add columns with `column`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column.
    pub fn column(mut self, name: impl Into<String>, column_type: ColumnType) -> Self {
        self.columns.push(ColumnDef::new(name, column_type));
        self
    }

    pub fn from_columns(columns: Vec<ColumnDef>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of a column by name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Get a column definition by name.
    pub fn get(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Compare column by column against `other`, which must have the same
    /// names and types in the same order. Returns the first difference.
    pub fn compare(&self, other: &Schema) -> Option<ColumnMismatch> {
        if self.columns.len() != other.columns.len() {
            return Some(ColumnMismatch::Count {
                expected: self.columns.len(),
                actual: other.columns.len(),
            });
        }
        for (position, (mine, theirs)) in self.columns.iter().zip(&other.columns).enumerate() {
            if mine.name != theirs.name {
                return Some(ColumnMismatch::Name {
                    position,
                    expected: mine.name.clone(),
                    actual: theirs.name.clone(),
                });
            }
            if mine.column_type != theirs.column_type {
                return Some(ColumnMismatch::Type {
                    column: mine.name.clone(),
                    expected: mine.column_type,
                    actual: theirs.column_type,
                });
            }
        }
        None
    }

    /// Returns true if `other` has the same column name/type sequence.
    pub fn is_compatible_with(&self, other: &Schema) -> bool {
        self.compare(other).is_none()
    }

    /// Locate each of `columns` in `other` by name, checking types.
    /// Returns the positions in `other`, in the order of `columns`.
    pub fn locate_in(
        &self,
        columns: &[usize],
        other: &Schema,
    ) -> Result<Vec<usize>, ColumnMismatch> {
        columns
            .iter()
            .map(|&i| {
                let wanted = &self.columns[i];
                let position = other
                    .position(&wanted.name)
                    .ok_or_else(|| ColumnMismatch::Missing {
                        column: wanted.name.clone(),
                    })?;
                let found = &other.columns[position];
                if found.column_type != wanted.column_type {
                    return Err(ColumnMismatch::Type {
                        column: wanted.name.clone(),
                        expected: wanted.column_type,
                        actual: found.column_type,
                    });
                }
                Ok(position)
            })
            .collect()
    }

    /// Check that a row conforms to this schema. `index` is the row's
    /// position in its table, used for error reporting.
    pub fn check_row(&self, index: usize, row: &Row) -> TableResult<()> {
        if row.len() != self.columns.len() {
            return Err(TableError::row_arity(index, self.columns.len(), row.len()));
        }
        for (column, value) in self.columns.iter().zip(row.values()) {
            if !value.fits(column.column_type) {
                return Err(TableError::value_type(
                    index,
                    &column.name,
                    column.column_type,
                    value.type_name(),
                ));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", column)?;
        }
        write!(f, "}}")
    }
}
