//! Catalog entries executed against a real sandbox.

use super::common::{count, ints, session};
use pretty_assertions::assert_eq;
use sql_windowlab::catalog::{Catalog, Category, Variant};

const FAILING_ENTRY: &str = "reference.window_in_group_by";

#[tokio::test]
async fn test_every_entry_runs() {
    let mut session = session().await;

    for entry in Catalog::builtin().list(None) {
        let outcome = session.run_sql(entry.sql).await;
        if entry.id == FAILING_ENTRY {
            assert!(outcome.is_err(), "{} should fail", entry.id);
        } else {
            let outcome = outcome.unwrap_or_else(|e| panic!("{} failed: {e}", entry.id));
            assert!(outcome.result.row_count > 0, "{} returned no rows", entry.id);
        }
    }

    for table in ["employees", "sales", "orders", "performance"] {
        assert!(count(&mut session, table).await > 0);
    }
}

#[tokio::test]
async fn test_rerunning_an_entry_is_identical() {
    let mut session = session().await;
    let entry = Catalog::builtin().get("aggregate.department_summary").unwrap();

    let first = session.run_sql(entry.sql).await.unwrap();
    let second = session.run_sql(entry.sql).await.unwrap();

    assert!(first.result.same_data(&second.result));
    assert_eq!(first.result.columns, second.result.columns);
}

#[tokio::test]
async fn test_reprovisioned_sessions_agree() {
    let catalog = Catalog::builtin();
    let mut first = session().await;
    let mut second = session().await;

    for entry in catalog.list(Some(Category::Ranking)) {
        let a = first.run_sql(entry.sql).await.unwrap();
        let b = second.run_sql(entry.sql).await.unwrap();
        assert!(a.result.same_data(&b.result), "{} differs", entry.id);
    }

    first.close().await.unwrap();
    second.close().await.unwrap();
}

#[tokio::test]
async fn test_quartile_entry() {
    let mut session = session().await;
    let entry = Catalog::builtin().get("ranking.ntile_quartiles").unwrap();
    let outcome = session.run_sql(entry.sql).await.unwrap();

    assert_eq!(
        ints(&outcome.result, "quartile"),
        vec![1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 3, 3, 3, 3, 3, 4, 4, 4, 4, 4]
    );
    assert_eq!(ints(&outcome.result, "order_amount")[0], 300);
}

#[tokio::test]
async fn test_run_example_runs_both_sides_of_a_pair() {
    let mut session = session().await;
    let run = session
        .run_example(Catalog::builtin(), "reference.last_value_full_frame")
        .await
        .unwrap();

    assert_eq!(run.entry.variant, Variant::Fix);
    assert!(run.outcome.is_ok());
    let (anti, outcome) = run.pair.unwrap();
    assert_eq!(anti.variant, Variant::AntiPattern);
    assert_eq!(outcome.unwrap().result.row_count, 10);
}

#[tokio::test]
async fn test_run_example_without_pair() {
    let mut session = session().await;
    let run = session
        .run_example(Catalog::builtin(), "reference.target_attainment")
        .await
        .unwrap();

    assert!(run.pair.is_none());
    let outcome = run.outcome.unwrap();
    assert_eq!(outcome.result.row_count, 10);
    // "Feb 2024" sorts first; January has a tie at +500
    assert_eq!(
        ints(&outcome.result, "month_rank"),
        vec![1, 2, 3, 4, 5, 1, 2, 2, 4, 5]
    );
}

#[tokio::test]
async fn test_named_window_matches_inline_windows() {
    let mut session = session().await;
    let entry = Catalog::builtin().get("reference.named_window").unwrap();
    let named = session.run_sql(entry.sql).await.unwrap();

    assert_eq!(named.result.row_count, 10);
    assert_eq!(
        ints(&named.result, "rn"),
        vec![1, 2, 1, 2, 1, 2, 3, 1, 2, 3]
    );
    // No salary ties, so RANK agrees with ROW_NUMBER
    assert_eq!(ints(&named.result, "rank"), ints(&named.result, "rn"));

    let inline = session
        .run_sql(
            "SELECT *,
                ROW_NUMBER() OVER (PARTITION BY department ORDER BY salary DESC) AS rn,
                RANK() OVER (PARTITION BY department ORDER BY salary DESC) AS rank
             FROM employees
             ORDER BY department, rn",
        )
        .await
        .unwrap();
    assert_eq!(named.result.rows, inline.result.rows);
}
