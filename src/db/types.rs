//! Query result types for the sandbox.
//!
//! Results are schema-less until execution: every query discovers its own
//! ordered column list, and cells are typed `Value`s.

use serde::Serialize;
use std::fmt;
use std::mem;
use std::time::Duration;

/// Represents the materialized result of executing a SQL query.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QueryResult {
    /// Column metadata for the result set.
    pub columns: Vec<ColumnInfo>,

    /// Rows of data, in the order the engine produced them.
    pub rows: Vec<Row>,

    /// Time taken to execute the query.
    #[serde(serialize_with = "duration_serde::serialize")]
    pub execution_time: Duration,

    /// Number of rows in the result.
    pub row_count: usize,
}

impl QueryResult {
    /// Creates a new empty query result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a query result with the given columns and rows.
    pub fn with_data(columns: Vec<ColumnInfo>, rows: Vec<Row>) -> Self {
        let row_count = rows.len();
        Self {
            columns,
            rows,
            execution_time: Duration::ZERO,
            row_count,
        }
    }

    /// Sets the execution time.
    pub fn with_execution_time(mut self, duration: Duration) -> Self {
        self.execution_time = duration;
        self
    }

    /// Returns true if the result set is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the column names in projection order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Returns the index of the named column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Returns every value of the named column, top to bottom.
    pub fn column_values(&self, name: &str) -> Option<Vec<&Value>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().filter_map(|row| row.get(index)).collect())
    }

    /// Returns true if both results have the same columns and rows,
    /// ignoring timing.
    pub fn same_data(&self, other: &QueryResult) -> bool {
        self.columns == other.columns && self.rows == other.rows
    }

    /// Computes the display statistics for this result.
    pub fn stats(&self) -> ResultStats {
        ResultStats {
            row_count: self.rows.len(),
            column_count: self.columns.len(),
            approx_bytes: self.approx_size_bytes(),
        }
    }

    /// Approximates the in-memory footprint of the materialized result:
    /// inline cell storage plus heap-allocated text and blobs.
    fn approx_size_bytes(&self) -> usize {
        let header: usize = self
            .columns
            .iter()
            .map(|c| mem::size_of::<ColumnInfo>() + c.name.len() + c.data_type.len())
            .sum();

        let cells: usize = self
            .rows
            .iter()
            .map(|row| {
                mem::size_of::<Row>()
                    + row
                        .iter()
                        .map(|v| mem::size_of::<Value>() + v.heap_size())
                        .sum::<usize>()
            })
            .sum();

        header + cells
    }
}

/// Reporting statistics for a materialized result.
///
/// These values are for display only and carry no correctness guarantees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResultStats {
    pub row_count: usize,
    pub column_count: usize,
    pub approx_bytes: usize,
}

impl ResultStats {
    /// Returns the approximate size in kilobytes.
    pub fn approx_kb(&self) -> f64 {
        self.approx_bytes as f64 / 1024.0
    }
}

impl fmt::Display for ResultStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rows: {} | Columns: {} | Memory: {:.2} KB",
            self.row_count,
            self.column_count,
            self.approx_kb()
        )
    }
}

/// Metadata about a column in a result set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    /// Column name as projected by the query.
    pub name: String,

    /// Column data type, declared or inferred from the values.
    pub data_type: String,
}

impl ColumnInfo {
    /// Creates a new column info with the given name and type.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

/// A row of data from a query result.
pub type Row = Vec<Value>;

/// Represents a single value from the engine.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Value {
    /// NULL value.
    #[default]
    Null,

    /// Signed integer (up to i64).
    Int(i64),

    /// Floating point number.
    Float(f64),

    /// Text/string value.
    String(String),

    /// Binary data.
    Bytes(Vec<u8>),
}

impl Value {
    /// Returns true if this value is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the integer payload, if this is an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the numeric payload as a float, for integers and floats.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the text payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the storage class name SQLite would report for this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Int(_) => "INTEGER",
            Value::Float(_) => "REAL",
            Value::String(_) => "TEXT",
            Value::Bytes(_) => "BLOB",
        }
    }

    /// Bytes held on the heap by this value.
    fn heap_size(&self) -> usize {
        match self {
            Value::String(s) => s.capacity(),
            Value::Bytes(b) => b.capacity(),
            _ => 0,
        }
    }

    /// Attempts to convert the value to a string representation.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::String(s) => s.clone(),
            Value::Bytes(b) => format!("<{} bytes>", b.len()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display_string())
    }
}

// Conversion implementations for common types
impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

/// Serializes a Duration as whole nanoseconds.
mod duration_serde {
    use serde::{Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_nanos().serialize(serializer)
    }
}
