use std::collections::HashMap;
use std::sync::Arc;

use super::error::{EngineError, EngineResult};

// ---------------------------------------------------------------------------
// Schema – ordered column names with a name → index lookup
// ---------------------------------------------------------------------------

/// Column layout shared by every record of a [`RecordSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<String>,
    index: HashMap<String, usize>,
}

impl Schema {
    /// Build a schema, rejecting empty and duplicate names.
    pub fn new<I, S>(columns: I) -> EngineResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let mut index = HashMap::with_capacity(columns.len());
        for (i, name) in columns.iter().enumerate() {
            if name.is_empty() {
                return Err(EngineError::EmptyColumnName(i));
            }
            if index.insert(name.clone(), i).is_some() {
                return Err(EngineError::DuplicateColumn(name.clone()));
            }
        }
        Ok(Schema { columns, index })
    }

    /// Column names in declaration order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Like [`Schema::index_of`], but an absent column is an
    /// [`EngineError::UnknownColumn`].
    pub fn resolve(&self, name: &str) -> EngineResult<usize> {
        self.index_of(name)
            .ok_or_else(|| EngineError::UnknownColumn(name.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Record – one row of string values
// ---------------------------------------------------------------------------

/// A single row. Values are positional; names come from the owning schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    values: Vec<String>,
}

impl Record {
    /// Value at a schema index. Indices come from [`Schema::resolve`], so an
    /// out-of-range index is a bug in the caller.
    pub fn get(&self, index: usize) -> &str {
        &self.values[index]
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

// ---------------------------------------------------------------------------
// RecordSet – the table handed between loader, engine and writer
// ---------------------------------------------------------------------------

/// An ordered, immutable table of string records sharing one [`Schema`].
///
/// Transformations never mutate a `RecordSet`; they build a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSet {
    schema: Arc<Schema>,
    rows: Vec<Record>,
}

impl RecordSet {
    /// Build a table from column names and row values.
    pub fn new<I, S>(columns: I, rows: Vec<Vec<String>>) -> EngineResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_schema(Arc::new(Schema::new(columns)?), rows)
    }

    /// Build a table over an existing schema. Every row must have exactly
    /// one value per column.
    pub fn with_schema(schema: Arc<Schema>, rows: Vec<Vec<String>>) -> EngineResult<Self> {
        let expected = schema.len();
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(row, values)| {
                if values.len() != expected {
                    return Err(EngineError::RowWidthMismatch {
                        row,
                        expected,
                        found: values.len(),
                    });
                }
                Ok(Record { values })
            })
            .collect::<EngineResult<Vec<_>>>()?;
        Ok(RecordSet { schema, rows })
    }

    /// A zero-row table with the given schema.
    pub fn empty(schema: Arc<Schema>) -> Self {
        RecordSet {
            schema,
            rows: Vec::new(),
        }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn columns(&self) -> &[String] {
        self.schema.columns()
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has zero rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Look up a cell by row position and column name.
    #[cfg(test)]
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.schema.index_of(column)?;
        self.rows.get(row).map(|r| r.get(col))
    }

    /// The rows for which `keep` returns true, in their original order.
    /// The result shares this table's schema.
    pub fn filter<F>(&self, mut keep: F) -> RecordSet
    where
        F: FnMut(&Record) -> bool,
    {
        RecordSet {
            schema: Arc::clone(&self.schema),
            rows: self.rows.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }
}
