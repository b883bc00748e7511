//! Sandbox behaviour: read-only guarantees, error reporting and result shape.

use super::common::{count, ints, query, session};
use pretty_assertions::assert_eq;
use sql_windowlab::dataset;
use sql_windowlab::db::{ColumnInfo, Value};
use sql_windowlab::error::LabError;
use sql_windowlab::session::Session;

async fn counts(session: &mut Session) -> Vec<i64> {
    let mut counts = Vec::new();
    for table in ["employees", "sales", "orders", "performance"] {
        counts.push(count(session, table).await);
    }
    counts
}

#[tokio::test]
async fn test_session_tables() {
    let session = session().await;
    let names: Vec<&str> = session.tables().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["employees", "sales", "orders", "performance"]);

    let sales = &session.tables()[1];
    assert_eq!(sales.row_count, 20);
    assert_eq!(sales.columns[1], ColumnInfo::new("sale_date", "TIMESTAMP"));
}

#[tokio::test]
async fn test_syntax_error_leaves_tables_unchanged() {
    let mut session = session().await;

    let err = session.run_sql("SELEC * FROM employees").await.unwrap_err();
    assert_eq!(err.category(), "Query Error");
    assert!(err.message().contains("syntax error"), "{}", err.message());

    assert_eq!(counts(&mut session).await, vec![10, 20, 20, 10]);
}

#[tokio::test]
async fn test_unknown_table_message_is_verbatim() {
    let mut session = session().await;
    let err = session
        .run_sql("SELECT * FROM nonexistent_table")
        .await
        .unwrap_err();
    assert_eq!(err, LabError::query("no such table: nonexistent_table"));
}

#[tokio::test]
async fn test_writes_are_rejected() {
    let mut session = session().await;

    for sql in [
        "DELETE FROM employees",
        "UPDATE employees SET salary = 0",
        "INSERT INTO sales (sale_id) VALUES (99)",
        "DROP TABLE orders",
        "CREATE TABLE scratch (id INTEGER)",
        "PRAGMA query_only = OFF",
        "SELECT 1; DELETE FROM performance",
    ] {
        let err = session.run_sql(sql).await.unwrap_err();
        assert!(
            err.message().contains("not allowed"),
            "{sql}: {}",
            err.message()
        );
    }

    assert_eq!(counts(&mut session).await, vec![10, 20, 20, 10]);
    let salaries = query(&mut session, "SELECT SUM(salary) AS total FROM employees").await;
    assert_eq!(ints(&salaries.result, "total"), vec![720000]);
}

#[tokio::test]
async fn test_empty_result_keeps_columns() {
    let mut session = session().await;
    let outcome = query(&mut session, "SELECT * FROM employees WHERE 1 = 0").await;

    assert_eq!(outcome.result.row_count, 0);
    assert_eq!(
        outcome.result.column_names(),
        vec!["employee_id", "employee_name", "department", "salary", "hire_date"]
    );
    assert_eq!(outcome.stats.column_count, 5);
}

#[tokio::test]
async fn test_multi_statement_returns_last_rows() {
    let mut session = session().await;
    let outcome = query(
        &mut session,
        "SELECT 1 AS first; SELECT employee_name AS second FROM employees WHERE employee_id = 2",
    )
    .await;

    assert_eq!(outcome.result.column_names(), vec!["second"]);
    assert_eq!(outcome.result.rows, vec![vec![Value::from("Bob")]]);
}

#[tokio::test]
async fn test_empty_multi_statement_keeps_last_columns() {
    let mut session = session().await;
    let outcome = query(&mut session, "SELECT 1 AS a WHERE 0; SELECT 2 AS b WHERE 0").await;

    assert_eq!(outcome.result.row_count, 0);
    assert_eq!(outcome.result.column_names(), vec!["b"]);
    assert_eq!(outcome.stats.column_count, 1);
}

#[tokio::test]
async fn test_stats_match_result() {
    let mut session = session().await;
    let outcome = query(&mut session, "SELECT * FROM sales").await;

    assert_eq!(outcome.stats.row_count, 20);
    assert_eq!(outcome.stats.column_count, 5);
    assert!(outcome.stats.approx_bytes > 0);
    assert_eq!(outcome.stats, outcome.result.stats());
}

#[tokio::test]
async fn test_dataset_matches_loaded_rows() {
    let dataset = dataset::provision().unwrap();
    let mut session = session().await;
    let outcome = query(&mut session, "SELECT * FROM orders ORDER BY order_id").await;

    assert_eq!(outcome.result.rows, dataset.orders.rows);
}
