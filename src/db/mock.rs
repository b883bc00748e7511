//! Mock engines for testing.
//!
//! Provide canned results or canned failures so the executor can be tested
//! without the real store.

use super::{ColumnInfo, QueryEngine, QueryResult, Value};
use crate::error::{LabError, Result};
use async_trait::async_trait;
use std::time::Duration;

/// A mock engine that echoes the SQL it was given.
#[derive(Debug, Default)]
pub struct MockEngine {
    executed: Vec<String>,
}

impl MockEngine {
    /// Creates a new mock engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every SQL text this engine has received, in order.
    pub fn executed(&self) -> &[String] {
        &self.executed
    }
}

#[async_trait]
impl QueryEngine for MockEngine {
    async fn execute_query(&mut self, sql: &str) -> Result<QueryResult> {
        self.executed.push(sql.to_string());

        let columns = vec![ColumnInfo::new("result", "TEXT")];
        let rows = vec![vec![Value::String(format!("Mock result for: {}", sql))]];

        Ok(QueryResult::with_data(columns, rows).with_execution_time(Duration::from_millis(1)))
    }
}

/// A mock engine whose every query fails with the given diagnostic.
#[derive(Debug)]
pub struct FailingEngine {
    message: String,
}

impl FailingEngine {
    /// Creates an engine that fails with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl QueryEngine for FailingEngine {
    async fn execute_query(&mut self, _sql: &str) -> Result<QueryResult> {
        Err(LabError::query(self.message.clone()))
    }
}
