//! Shared helpers for the integration tests.

use sql_windowlab::db::{QueryResult, Value};
use sql_windowlab::query::QueryOutcome;
use sql_windowlab::session::Session;

/// Starts a fresh session with its own sandbox.
pub async fn session() -> Session {
    Session::start().await.expect("session should start")
}

/// Runs SQL that is expected to succeed.
pub async fn query(session: &mut Session, sql: &str) -> QueryOutcome {
    match session.run_sql(sql).await {
        Ok(outcome) => outcome,
        Err(e) => panic!("query failed: {e}\n{sql}"),
    }
}

/// Returns one column of a result by name.
pub fn column(result: &QueryResult, name: &str) -> Vec<Value> {
    result
        .column_values(name)
        .unwrap_or_else(|| panic!("no column {name}"))
        .into_iter()
        .cloned()
        .collect()
}

/// Returns an integer column of a result by name.
pub fn ints(result: &QueryResult, name: &str) -> Vec<i64> {
    column(result, name)
        .iter()
        .map(|v| v.as_int().unwrap_or_else(|| panic!("{name} holds {v:?}")))
        .collect()
}

/// Counts the rows of a sample table.
pub async fn count(session: &mut Session, table: &str) -> i64 {
    let outcome = query(session, &format!("SELECT COUNT(*) AS n FROM {table}")).await;
    ints(&outcome.result, "n")[0]
}
