//! Sample dataset for the sandbox.
//!
//! Builds the four synthetic tables (`employees`, `sales`, `orders`,
//! `performance`) that every example query runs against. Generation is
//! deterministic: identical output on every call, no clock, no randomness.

mod generator;

use crate::db::{Row, Value};
use crate::error::{LabError, Result};
use serde::Serialize;
use std::collections::HashSet;

/// Declared column of a dataset table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnDef {
    pub name: &'static str,
    pub sql_type: &'static str,
}

impl ColumnDef {
    pub const fn new(name: &'static str, sql_type: &'static str) -> Self {
        Self { name, sql_type }
    }
}

/// One generated table with its schema and rows in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetTable {
    pub name: &'static str,
    pub columns: Vec<ColumnDef>,
    pub rows: Vec<Row>,
}

impl DatasetTable {
    /// Returns the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the `CREATE TABLE` statement for this table.
    ///
    /// No primary or foreign keys are declared; uniqueness of id columns is
    /// a property of the generator.
    pub fn create_sql(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(|c| format!("{} {}", c.name, c.sql_type))
            .collect::<Vec<_>>()
            .join(", ");
        format!("CREATE TABLE {} ({})", self.name, columns)
    }

    /// Returns the parameterized `INSERT` statement for one row.
    pub fn insert_sql(&self) -> String {
        let names = self
            .columns
            .iter()
            .map(|c| c.name)
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = vec!["?"; self.columns.len()].join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.name, names, placeholders
        )
    }

    /// Checks that every row matches the column list and, if given, that the
    /// named column holds distinct values.
    fn validate(&self, expected_rows: usize, unique_column: Option<&str>) -> Result<()> {
        if self.rows.len() != expected_rows {
            return Err(LabError::provisioning(format!(
                "table '{}' expected {} rows, got {}",
                self.name,
                expected_rows,
                self.rows.len()
            )));
        }

        if let Some((i, row)) = self
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != self.columns.len())
        {
            return Err(LabError::provisioning(format!(
                "table '{}' row {} has {} values for {} columns",
                self.name,
                i,
                row.len(),
                self.columns.len()
            )));
        }

        if let Some(column) = unique_column {
            let index = self
                .columns
                .iter()
                .position(|c| c.name == column)
                .ok_or_else(|| {
                    LabError::provisioning(format!(
                        "table '{}' has no column '{}'",
                        self.name, column
                    ))
                })?;

            let mut seen = HashSet::new();
            for row in &self.rows {
                let id = row[index].as_int().ok_or_else(|| {
                    LabError::provisioning(format!(
                        "table '{}' column '{}' must be an integer",
                        self.name, column
                    ))
                })?;
                if !seen.insert(id) {
                    return Err(LabError::provisioning(format!(
                        "table '{}' has duplicate {} {}",
                        self.name, column, id
                    )));
                }
            }
        }

        Ok(())
    }
}

/// The complete sample dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub employees: DatasetTable,
    pub sales: DatasetTable,
    pub orders: DatasetTable,
    pub performance: DatasetTable,
}

/// Expected row counts, in load order.
pub const EMPLOYEE_ROWS: usize = 10;
pub const SALES_ROWS: usize = 20;
pub const ORDER_ROWS: usize = 20;
pub const PERFORMANCE_ROWS: usize = 10;

impl Dataset {
    /// Returns all tables in load order.
    pub fn tables(&self) -> [&DatasetTable; 4] {
        [&self.employees, &self.sales, &self.orders, &self.performance]
    }

    /// Looks up a table by name (case-insensitive).
    pub fn table(&self, name: &str) -> Option<&DatasetTable> {
        self.tables()
            .into_iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    fn validate(&self) -> Result<()> {
        self.employees.validate(EMPLOYEE_ROWS, Some("employee_id"))?;
        self.sales.validate(SALES_ROWS, Some("sale_id"))?;
        self.orders.validate(ORDER_ROWS, Some("order_id"))?;
        self.performance.validate(PERFORMANCE_ROWS, None)?;
        Ok(())
    }
}

/// Builds the sample dataset.
///
/// Fails only if the generator breaks its own invariants, which is a bug,
/// not a runtime condition.
pub fn provision() -> Result<Dataset> {
    let dataset = Dataset {
        employees: generator::employees(),
        sales: generator::sales()?,
        orders: generator::orders()?,
        performance: generator::performance(),
    };
    dataset.validate()?;
    Ok(dataset)
}

/// Convenience for building a row from anything convertible to `Value`.
pub(crate) fn row<const N: usize>(values: [Value; N]) -> Row {
    values.into_iter().collect()
}
