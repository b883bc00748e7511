//! Query execution with read-only classification.
//!
//! Provides isolated query execution that can be tested against mock engines
//! independently of the real sandbox store.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::catalog::CatalogEntry;
use crate::db::{QueryEngine, QueryResult, ResultStats};
use crate::error::{LabError, Result};
use crate::safety::{ClassificationResult, SafetyLevel, SqlClassifier};

/// Query executor that classifies SQL text and runs what the sandbox allows.
#[derive(Debug, Default)]
pub struct QueryExecutor {
    classifier: SqlClassifier,
}

impl QueryExecutor {
    /// Creates a new query executor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifies and executes SQL text against `engine`.
    ///
    /// Mutating and destructive text is rejected with a `Query` error and
    /// never reaches the engine. Everything else is executed; engine failures
    /// come back as `Query` errors carrying the diagnostic verbatim.
    pub async fn execute(&self, sql: &str, engine: &mut dyn QueryEngine) -> Result<QueryOutcome> {
        let classification = self.classifier.classify(sql);

        if classification.is_rejected() {
            warn!(
                "Rejected {} statement ({})",
                classification.statement_type, classification.level
            );
            return Err(LabError::query(classification.rejection_message()));
        }

        if classification.level == SafetyLevel::Unparsed {
            debug!("Classifier could not parse query, deferring to engine");
        }

        let start = Instant::now();
        let result = engine.execute_query(sql).await;
        let execution_time = start.elapsed();

        match result {
            Ok(result) => {
                let stats = result.stats();
                debug!("Query succeeded in {:?}: {}", execution_time, stats);
                Ok(QueryOutcome {
                    result,
                    stats,
                    execution_time,
                    classification,
                })
            }
            Err(e) => {
                debug!("Query failed after {:?}: {}", execution_time, e);
                match e {
                    LabError::Query(msg) => Err(LabError::Query(msg)),
                    other => Err(LabError::query(other.message())),
                }
            }
        }
    }

    /// Executes the SQL text of a catalog entry.
    pub async fn run_entry(
        &self,
        entry: &CatalogEntry,
        engine: &mut dyn QueryEngine,
    ) -> Result<QueryOutcome> {
        debug!("Running catalog entry {}", entry.id);
        self.execute(entry.sql, engine).await
    }
}

/// Successful query execution outcome.
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    /// The materialized result.
    pub result: QueryResult,
    /// Row count, column count and approximate size of the result.
    pub stats: ResultStats,
    /// Wall-clock time spent in the engine.
    pub execution_time: Duration,
    /// How the text was classified before it ran.
    pub classification: ClassificationResult,
}
