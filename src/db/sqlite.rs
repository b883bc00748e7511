//! In-memory SQLite sandbox store.
//!
//! Provides the `SandboxStore`, which owns a private in-memory SQLite engine
//! loaded with the sample dataset, and the `ConnectionHandle` that implements
//! `QueryEngine` on top of it.

use crate::dataset::{self, Dataset, DatasetTable};
use crate::db::{ColumnInfo, QueryEngine, QueryResult, Row, Value};
use crate::error::{LabError, Result};
use async_trait::async_trait;
use futures::TryStreamExt;
use serde::Serialize;
use sqlparser::dialect::SQLiteDialect;
use sqlparser::parser::Parser;
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{
    Column as SqlxColumn, ConnectOptions, Connection, Either, Executor, Row as SqlxRow, TypeInfo,
    ValueRef,
};
use std::str::FromStr;
use std::time::Instant;
use tracing::{debug, info};

/// Connection string for a private, unnamed in-memory database.
const MEMORY_URL: &str = "sqlite::memory:";

/// Schema and size of one loaded table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    pub name: String,
    pub columns: Vec<ColumnInfo>,
    pub row_count: usize,
}

/// Owns the session's engine instance and the four loaded tables.
///
/// Tables are written only while opening; afterwards the engine runs in
/// query-only mode. Dropping the store releases the engine.
#[derive(Debug)]
pub struct SandboxStore {
    conn: SqliteConnection,
    tables: Vec<TableSummary>,
}

impl SandboxStore {
    /// Opens a fresh store loaded with the provisioned sample dataset.
    pub async fn open() -> Result<Self> {
        let dataset = dataset::provision()?;
        Self::open_with(&dataset).await
    }

    /// Opens a fresh store loaded with the given dataset.
    pub async fn open_with(dataset: &Dataset) -> Result<Self> {
        let mut conn = Self::connect().await?;

        load_dataset(&mut conn, dataset).await?;

        // Reads only from here on
        sqlx::query("PRAGMA query_only = ON")
            .execute(&mut conn)
            .await
            .map_err(|e| LabError::internal(format!("Failed to enable query-only mode: {e}")))?;

        let mut tables = Vec::with_capacity(4);
        for table in dataset.tables() {
            verify_row_count(&mut conn, table).await?;
            tables.push(TableSummary {
                name: table.name.to_string(),
                columns: table
                    .columns
                    .iter()
                    .map(|c| ColumnInfo::new(c.name, c.sql_type))
                    .collect(),
                row_count: table.row_count(),
            });
        }

        info!(
            "Sandbox store opened with {} tables ({})",
            tables.len(),
            tables
                .iter()
                .map(|t| format!("{}: {}", t.name, t.row_count))
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(Self { conn, tables })
    }

    /// Creates the private in-memory engine.
    async fn connect() -> Result<SqliteConnection> {
        SqliteConnectOptions::from_str(MEMORY_URL)
            .map_err(|e| LabError::internal(format!("Invalid sandbox database URL: {e}")))?
            .connect()
            .await
            .map_err(|e| LabError::internal(format!("Failed to open sandbox engine: {e}")))
    }

    /// Returns the single live handle for this session.
    pub fn handle(&mut self) -> ConnectionHandle<'_> {
        ConnectionHandle {
            conn: &mut self.conn,
        }
    }

    /// Returns the loaded tables in load order.
    pub fn tables(&self) -> &[TableSummary] {
        &self.tables
    }

    /// Returns the names of the loaded tables in load order.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }

    /// Looks up a loaded table by name (case-insensitive).
    pub fn table(&self, name: &str) -> Option<&TableSummary> {
        self.tables
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Closes the engine.
    pub async fn close(self) -> Result<()> {
        self.conn
            .close()
            .await
            .map_err(|e| LabError::internal(format!("Failed to close sandbox engine: {e}")))?;
        debug!("Sandbox store closed");
        Ok(())
    }
}

/// Creates and fills every table inside one transaction.
async fn load_dataset(conn: &mut SqliteConnection, dataset: &Dataset) -> Result<()> {
    let mut tx = conn
        .begin()
        .await
        .map_err(|e| LabError::internal(format!("Failed to begin load transaction: {e}")))?;

    for table in dataset.tables() {
        sqlx::query(&table.create_sql())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                LabError::provisioning(format!("Failed to create table '{}': {e}", table.name))
            })?;

        let insert_sql = table.insert_sql();
        for (i, row) in table.rows.iter().enumerate() {
            row.iter()
                .fold(sqlx::query(&insert_sql), bind_value)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    LabError::provisioning(format!(
                        "Failed to load row {i} into '{}': {e}",
                        table.name
                    ))
                })?;
        }
        debug!("Loaded {} rows into {}", table.row_count(), table.name);
    }

    tx.commit()
        .await
        .map_err(|e| LabError::provisioning(format!("Failed to commit sample data: {e}")))
}

/// Checks that the engine holds exactly the rows the generator produced.
async fn verify_row_count(conn: &mut SqliteConnection, table: &DatasetTable) -> Result<()> {
    let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table.name))
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| LabError::provisioning(format!("Failed to count '{}': {e}", table.name)))?;

    if count as usize != table.row_count() {
        return Err(LabError::provisioning(format!(
            "table '{}' loaded {} rows, expected {}",
            table.name,
            count,
            table.row_count()
        )));
    }
    Ok(())
}

fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: &'q Value,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        Value::Null => query.bind(None::<i64>),
        Value::Int(i) => query.bind(*i),
        Value::Float(f) => query.bind(*f),
        Value::String(s) => query.bind(s.as_str()),
        Value::Bytes(b) => query.bind(b.as_slice()),
    }
}

/// Mutable borrow of the store's engine, used for every query in a session.
#[derive(Debug)]
pub struct ConnectionHandle<'a> {
    conn: &'a mut SqliteConnection,
}

#[async_trait]
impl QueryEngine for ConnectionHandle<'_> {
    async fn execute_query(&mut self, sql: &str) -> Result<QueryResult> {
        let start = Instant::now();

        // Statements run in order; keep the rows of the last one that produced any
        let mut current: Vec<SqliteRow> = Vec::new();
        let mut last: Vec<SqliteRow> = Vec::new();
        {
            let mut stream = sqlx::raw_sql(sql).fetch_many(&mut *self.conn);
            while let Some(item) = stream
                .try_next()
                .await
                .map_err(|e| LabError::query(engine_message(&e)))?
            {
                match item {
                    Either::Left(_) => {
                        if !current.is_empty() {
                            last = std::mem::take(&mut current);
                        }
                    }
                    Either::Right(row) => current.push(row),
                }
            }
        }
        if !current.is_empty() {
            last = current;
        }

        let execution_time = start.elapsed();

        let rows: Vec<Row> = last.iter().map(convert_row).collect();

        let columns = match last.first() {
            Some(first) => column_info(first.columns(), &rows),
            // Empty result: the prepared statement still knows its projection
            None => match projected_statement(sql) {
                Some(statement) => match (&mut *self.conn).describe(&statement).await {
                    Ok(describe) => column_info(describe.columns(), &rows),
                    Err(_) => Vec::new(),
                },
                None => Vec::new(),
            },
        };

        debug!(
            "Query returned {} rows x {} columns in {:?}",
            rows.len(),
            columns.len(),
            execution_time
        );

        Ok(QueryResult::with_data(columns, rows).with_execution_time(execution_time))
    }
}

/// Returns the statement whose projection describes an empty result.
///
/// Describing multi-statement text would merge every statement's columns, so
/// only the last statement is described. `None` when it cannot be isolated.
fn projected_statement(sql: &str) -> Option<String> {
    match Parser::parse_sql(&SQLiteDialect {}, sql) {
        Ok(statements) if statements.len() > 1 => statements.last().map(|s| s.to_string()),
        Ok(_) => Some(sql.to_string()),
        Err(_) => None,
    }
}

/// Builds column metadata, inferring a type from the values when the engine
/// has no declared type (expressions, window functions).
fn column_info<C: SqlxColumn>(columns: &[C], rows: &[Row]) -> Vec<ColumnInfo> {
    columns
        .iter()
        .enumerate()
        .map(|(i, col)| {
            let declared = col.type_info().name();
            let data_type = if declared == "NULL" {
                rows.iter()
                    .filter_map(|row| row.get(i))
                    .find(|v| !v.is_null())
                    .map(Value::type_name)
                    .unwrap_or("NULL")
            } else {
                declared
            };
            ColumnInfo::new(col.name(), data_type)
        })
        .collect()
}

/// Converts a sqlx SqliteRow to our Row type.
fn convert_row(row: &SqliteRow) -> Row {
    (0..row.columns().len())
        .map(|i| convert_value(row, i))
        .collect()
}

/// Converts one cell using its runtime storage class.
fn convert_value(row: &SqliteRow, index: usize) -> Value {
    let storage_class = match row.try_get_raw(index) {
        Ok(raw) if !raw.is_null() => raw.type_info().name().to_string(),
        _ => return Value::Null,
    };

    match storage_class.as_str() {
        "INTEGER" => row
            .try_get_unchecked::<i64, _>(index)
            .map(Value::Int)
            .unwrap_or(Value::Null),
        "REAL" => row
            .try_get_unchecked::<f64, _>(index)
            .map(Value::Float)
            .unwrap_or(Value::Null),
        "BLOB" => row
            .try_get_unchecked::<Vec<u8>, _>(index)
            .map(Value::Bytes)
            .unwrap_or(Value::Null),
        _ => row
            .try_get_unchecked::<String, _>(index)
            .map(Value::String)
            .unwrap_or(Value::Null),
    }
}

/// Returns the engine's diagnostic text without sqlx's wrapping.
fn engine_message(error: &sqlx::Error) -> String {
    match error.as_database_error() {
        Some(db_error) => db_error.message().to_string(),
        None => error.to_string(),
    }
}
