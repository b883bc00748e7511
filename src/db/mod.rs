//! Engine abstraction for the sandbox.
//!
//! Provides a trait-based interface for running SQL text, so the executor can
//! be exercised against the real in-memory SQLite store or against mocks.

mod mock;
mod sqlite;
mod types;

pub use mock::{FailingEngine, MockEngine};
pub use sqlite::{ConnectionHandle, SandboxStore, TableSummary};
pub use types::{ColumnInfo, QueryResult, ResultStats, Row, Value};

use crate::error::Result;
use async_trait::async_trait;

/// Trait defining the query surface of a relational engine.
///
/// Takes `&mut self`: an engine runs one query to completion before the next
/// begins, and a handle is never shared between callers.
#[async_trait]
pub trait QueryEngine: Send {
    /// Executes SQL text and returns the materialized result of the last
    /// statement that produced rows. Errors carry the engine diagnostic.
    async fn execute_query(&mut self, sql: &str) -> Result<QueryResult>;
}
