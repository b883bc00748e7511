//! Fixed generator data for the sample tables.

use super::{row, ColumnDef, DatasetTable};
use crate::db::Value;
use crate::error::{LabError, Result};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

/// Anchor for `sales.sale_date` and `orders.order_date`.
const ANCHOR: (i32, u32, u32) = (2024, 1, 1);

/// Days between consecutive sales and orders.
const STEP_DAYS: i64 = 2;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const EMPLOYEE_NAMES: [&str; 10] = [
    "Alice", "Bob", "Charlie", "Diana", "Eve", "Frank", "Grace", "Henry", "Iris", "Jack",
];
const DEPARTMENTS: [&str; 10] = [
    "Sales", "Sales", "Sales", "IT", "IT", "IT", "HR", "HR", "Finance", "Finance",
];
const SALARIES: [i64; 10] = [
    60000, 75000, 55000, 85000, 90000, 80000, 65000, 70000, 72000, 68000,
];
const HIRE_DATES: [&str; 10] = [
    "2020-01-15",
    "2019-03-20",
    "2021-06-10",
    "2018-02-01",
    "2017-08-15",
    "2019-11-30",
    "2020-05-10",
    "2021-02-20",
    "2019-04-15",
    "2022-01-10",
];

const PRODUCTS: [&str; 20] = [
    "A", "B", "A", "C", "B", "A", "C", "B", "A", "C", "B", "A", "C", "B", "A", "C", "B", "A", "C",
    "B",
];
const SALE_AMOUNTS: [i64; 20] = [
    100, 150, 120, 200, 180, 140, 220, 160, 130, 210, 190, 150, 230, 170, 140, 250, 200, 160, 240,
    210,
];
const REGIONS: [&str; 20] = [
    "North", "South", "North", "South", "East", "West", "East", "West", "North", "South", "North",
    "South", "East", "West", "East", "West", "North", "South", "North", "South",
];

const CUSTOMER_IDS: [i64; 20] = [1, 1, 1, 2, 2, 2, 3, 3, 4, 4, 5, 5, 5, 6, 6, 7, 7, 8, 8, 9];
const CUSTOMER_NAMES: [&str; 9] = [
    "John", "Jane", "Mike", "Sarah", "Tom", "Alice", "Bob", "Carol", "David",
];
const ORDER_AMOUNTS: [i64; 20] = [
    100, 250, 150, 200, 300, 250, 120, 180, 90, 140, 250, 200, 180, 160, 220, 140, 190, 230, 200,
    150,
];

const MONTHS: [&str; 10] = [
    "Jan 2024", "Jan 2024", "Jan 2024", "Jan 2024", "Jan 2024", "Feb 2024", "Feb 2024", "Feb 2024",
    "Feb 2024", "Feb 2024",
];
const REVENUES: [i64; 10] = [5000, 7500, 4500, 8500, 9000, 6000, 8000, 5500, 9500, 7000];
const TARGETS: [i64; 10] = [5000, 6000, 5000, 8000, 8500, 5000, 6000, 5000, 8000, 8500];

pub(super) fn employees() -> DatasetTable {
    let rows = (0..EMPLOYEE_NAMES.len())
        .map(|i| {
            row([
                Value::Int(i as i64 + 1),
                Value::from(EMPLOYEE_NAMES[i]),
                Value::from(DEPARTMENTS[i]),
                Value::Int(SALARIES[i]),
                Value::from(HIRE_DATES[i]),
            ])
        })
        .collect();

    DatasetTable {
        name: "employees",
        columns: vec![
            ColumnDef::new("employee_id", "INTEGER"),
            ColumnDef::new("employee_name", "TEXT"),
            ColumnDef::new("department", "TEXT"),
            ColumnDef::new("salary", "INTEGER"),
            ColumnDef::new("hire_date", "TEXT"),
        ],
        rows,
    }
}

pub(super) fn sales() -> Result<DatasetTable> {
    let rows = (0..PRODUCTS.len())
        .map(|i| {
            Ok(row([
                Value::Int(i as i64 + 1),
                Value::from(offset_datetime(i)?),
                Value::from(PRODUCTS[i]),
                Value::Int(SALE_AMOUNTS[i]),
                Value::from(REGIONS[i]),
            ]))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(DatasetTable {
        name: "sales",
        columns: vec![
            ColumnDef::new("sale_id", "INTEGER"),
            ColumnDef::new("sale_date", "TIMESTAMP"),
            ColumnDef::new("product", "TEXT"),
            ColumnDef::new("amount", "INTEGER"),
            ColumnDef::new("region", "TEXT"),
        ],
        rows,
    })
}

pub(super) fn orders() -> Result<DatasetTable> {
    let rows = (0..CUSTOMER_IDS.len())
        .map(|i| {
            let customer_id = CUSTOMER_IDS[i];
            let name = CUSTOMER_NAMES
                .get((customer_id - 1) as usize)
                .ok_or_else(|| {
                    LabError::provisioning(format!("no name for customer_id {customer_id}"))
                })?;
            Ok(row([
                Value::Int(i as i64 + 1),
                Value::Int(customer_id),
                Value::from(*name),
                Value::from(offset_datetime(i)?),
                Value::Int(ORDER_AMOUNTS[i]),
            ]))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(DatasetTable {
        name: "orders",
        columns: vec![
            ColumnDef::new("order_id", "INTEGER"),
            ColumnDef::new("customer_id", "INTEGER"),
            ColumnDef::new("customer_name", "TEXT"),
            ColumnDef::new("order_date", "TIMESTAMP"),
            ColumnDef::new("order_amount", "INTEGER"),
        ],
        rows,
    })
}

pub(super) fn performance() -> DatasetTable {
    let rows = (0..MONTHS.len())
        .map(|i| {
            row([
                Value::Int(i as i64 + 1),
                Value::from(MONTHS[i]),
                Value::Int(REVENUES[i]),
                Value::Int(TARGETS[i]),
            ])
        })
        .collect();

    DatasetTable {
        name: "performance",
        columns: vec![
            ColumnDef::new("employee_id", "INTEGER"),
            ColumnDef::new("month", "TEXT"),
            ColumnDef::new("revenue", "INTEGER"),
            ColumnDef::new("target", "INTEGER"),
        ],
        rows,
    }
}

/// Returns the anchor plus `index * STEP_DAYS` days, formatted as text.
fn offset_datetime(index: usize) -> Result<String> {
    let (year, month, day) = ANCHOR;
    let anchor: NaiveDateTime = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| LabError::provisioning("invalid anchor date"))?;

    let offset = TimeDelta::try_days(index as i64 * STEP_DAYS)
        .ok_or_else(|| LabError::provisioning(format!("day offset {index} out of range")))?;

    anchor
        .checked_add_signed(offset)
        .map(|dt| dt.format(DATETIME_FORMAT).to_string())
        .ok_or_else(|| LabError::provisioning(format!("date overflow at index {index}")))
}
