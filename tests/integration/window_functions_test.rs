//! Window-function semantics against the sample tables.

use super::common::{column, count, ints, query, session};
use pretty_assertions::assert_eq;
use sql_windowlab::catalog::Catalog;
use sql_windowlab::db::Value;
use std::collections::HashMap;

#[tokio::test]
async fn test_running_total_ends_at_department_sum() {
    let mut session = session().await;
    let entry = Catalog::builtin().get("aggregate.running_total").unwrap();
    let outcome = query(&mut session, entry.sql).await;

    let departments = column(&outcome.result, "department");
    let salaries = ints(&outcome.result, "salary");
    let running = ints(&outcome.result, "running_total");

    let mut last_total: HashMap<String, i64> = HashMap::new();
    let mut sums: HashMap<String, i64> = HashMap::new();
    for ((dept, salary), total) in departments.iter().zip(&salaries).zip(&running) {
        let dept = dept.as_str().unwrap().to_string();
        *sums.entry(dept.clone()).or_default() += salary;
        last_total.insert(dept, *total);
    }

    assert_eq!(last_total, sums);
    assert_eq!(sums["Sales"], 190000);
    assert_eq!(sums["IT"], 255000);
    assert_eq!(sums["HR"], 135000);
    assert_eq!(sums["Finance"], 140000);
}

#[tokio::test]
async fn test_missing_order_by_gives_partition_total() {
    let mut session = session().await;
    let catalog = Catalog::builtin();
    let (wrong, fix) = catalog.pairs_for("reference.missing_order_by").unwrap();

    let wrong = query(&mut session, wrong.sql).await;
    let fix = query(&mut session, fix.sql).await;

    // Finance rows come first: Iris 72000 then Jack 68000
    assert_eq!(&ints(&wrong.result, "running_total")[..2], &[140000, 140000]);
    assert_eq!(&ints(&fix.result, "running_total")[..2], &[72000, 140000]);
}

#[tokio::test]
async fn test_rank_and_dense_rank_ties() {
    let mut session = session().await;
    let outcome = query(
        &mut session,
        "SELECT amount,
                RANK() OVER (ORDER BY amount DESC) AS r,
                DENSE_RANK() OVER (ORDER BY amount DESC) AS d
         FROM sales
         WHERE region = 'South'
         ORDER BY amount DESC, sale_id",
    )
    .await;

    assert_eq!(
        ints(&outcome.result, "amount"),
        vec![210, 210, 200, 160, 150, 150]
    );
    assert_eq!(ints(&outcome.result, "r"), vec![1, 1, 3, 4, 5, 5]);
    assert_eq!(ints(&outcome.result, "d"), vec![1, 1, 2, 3, 4, 4]);
}

#[tokio::test]
async fn test_row_number_is_unique_within_partition() {
    let mut session = session().await;
    let entry = Catalog::builtin().get("ranking.top_performers").unwrap();
    let outcome = query(&mut session, entry.sql).await;

    // Finance 2, HR 2, IT 3, Sales 3
    assert_eq!(
        ints(&outcome.result, "rank"),
        vec![1, 2, 1, 2, 1, 2, 3, 1, 2, 3]
    );
}

#[tokio::test]
async fn test_ntile_bucket_sizes() {
    let mut session = session().await;

    let orders = query(
        &mut session,
        "SELECT NTILE(4) OVER (ORDER BY order_id) AS q FROM orders ORDER BY order_id",
    )
    .await;
    let buckets = ints(&orders.result, "q");
    for bucket in 1..=4 {
        assert_eq!(buckets.iter().filter(|&&b| b == bucket).count(), 5);
    }

    let employees = query(
        &mut session,
        "SELECT NTILE(4) OVER (ORDER BY employee_id) AS q FROM employees ORDER BY employee_id",
    )
    .await;
    assert_eq!(
        ints(&employees.result, "q"),
        vec![1, 1, 1, 2, 2, 2, 3, 3, 4, 4]
    );
}

#[tokio::test]
async fn test_percent_rank() {
    let mut session = session().await;
    let outcome = query(
        &mut session,
        "SELECT salary, PERCENT_RANK() OVER (ORDER BY salary) AS p
         FROM employees
         WHERE department = 'Sales'
         ORDER BY salary",
    )
    .await;
    assert_eq!(
        column(&outcome.result, "p"),
        vec![Value::Float(0.0), Value::Float(0.5), Value::Float(1.0)]
    );

    let single = query(
        &mut session,
        "SELECT PERCENT_RANK() OVER (PARTITION BY employee_id ORDER BY salary) AS p
         FROM employees",
    )
    .await;
    assert!(column(&single.result, "p")
        .iter()
        .all(|v| *v == Value::Float(0.0)));
}

#[tokio::test]
async fn test_lag_defaults_to_null_at_partition_start() {
    let mut session = session().await;
    let entry = Catalog::builtin().get("analytical.order_over_order").unwrap();
    let outcome = query(&mut session, entry.sql).await;

    let prev = column(&outcome.result, "prev_order");
    assert_eq!(prev.len(), 20);
    // One partition per customer
    assert_eq!(prev.iter().filter(|v| v.is_null()).count(), 9);
    assert!(prev[0].is_null());
    assert_eq!(prev[1], Value::Int(100));
}

#[tokio::test]
async fn test_lead_reaches_next_row_in_partition() {
    let mut session = session().await;
    let entry = Catalog::builtin().get("analytical.next_sale").unwrap();
    let outcome = query(&mut session, entry.sql).await;

    // Product A sales in sale_id order: 1, 3, 6, 9, 12, 15, 18
    let next = column(&outcome.result, "next_amount");
    assert_eq!(next[0], Value::Int(120));
    assert!(next[6].is_null());

    let next_date = column(&outcome.result, "next_date");
    assert_eq!(next_date[0], Value::from("2024-01-05 00:00:00"));
}

#[tokio::test]
async fn test_last_value_default_frame_vs_full_frame() {
    let mut session = session().await;
    let catalog = Catalog::builtin();
    let (wrong, fix) = catalog
        .pairs_for("reference.last_value_default_frame")
        .unwrap();

    let wrong = query(&mut session, wrong.sql).await;
    assert_eq!(
        ints(&wrong.result, "last_salary"),
        ints(&wrong.result, "salary")
    );

    let fix = query(&mut session, fix.sql).await;
    assert_eq!(
        ints(&fix.result, "last_salary"),
        vec![68000, 68000, 70000, 70000, 80000, 80000, 80000, 55000, 55000, 55000]
    );
}

#[tokio::test]
async fn test_nth_value_second_highest_salary() {
    let mut session = session().await;
    let entry = Catalog::builtin()
        .get("analytical.second_highest_salary")
        .unwrap();
    let outcome = query(&mut session, entry.sql).await;

    assert_eq!(
        column(&outcome.result, "second_highest_emp"),
        vec![
            Value::from("Jack"),
            Value::from("Grace"),
            Value::from("Diana"),
            Value::from("Alice"),
        ]
    );
    assert_eq!(
        ints(&outcome.result, "second_highest_salary"),
        vec![68000, 65000, 85000, 60000]
    );
}

#[tokio::test]
async fn test_window_function_in_group_by_is_an_engine_error() {
    let mut session = session().await;
    let entry = Catalog::builtin()
        .get("reference.window_in_group_by")
        .unwrap();

    let err = session.run_sql(entry.sql).await.unwrap_err();
    assert!(err.is_recoverable());
    assert!(!err.message().is_empty());

    // The session keeps working after the failure
    assert_eq!(count(&mut session, "employees").await, 10);
}
