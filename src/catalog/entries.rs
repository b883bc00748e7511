//! Built-in catalog entries.

use super::{Category, CatalogEntry, UseCase};

pub(super) fn builtin() -> Vec<CatalogEntry> {
    let mut entries = Vec::new();
    entries.extend(aggregate());
    entries.extend(ranking());
    entries.extend(analytical());
    entries.extend(reference());
    entries
}

fn aggregate() -> Vec<CatalogEntry> {
    use Category::Aggregate;
    vec![
        CatalogEntry::example(
            "aggregate.running_total",
            Aggregate,
            "Running Total by Department",
            r"SELECT
    employee_id,
    employee_name,
    department,
    salary,
    SUM(salary) OVER (
        PARTITION BY department
        ORDER BY employee_id
        ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW
    ) AS running_total
FROM employees
ORDER BY department, employee_id;",
        ),
        CatalogEntry::example(
            "aggregate.department_total",
            Aggregate,
            "Total Department Salary",
            r"SELECT
    employee_name,
    department,
    salary,
    SUM(salary) OVER (PARTITION BY department) AS dept_total
FROM employees
ORDER BY department, salary DESC;",
        ),
        CatalogEntry::example(
            "aggregate.department_average",
            Aggregate,
            "Compare to Department Average",
            r"SELECT
    employee_name,
    department,
    salary,
    ROUND(AVG(salary) OVER (PARTITION BY department), 2) AS dept_avg,
    ROUND(salary - AVG(salary) OVER (PARTITION BY department), 2) AS diff_from_avg
FROM employees
ORDER BY department, salary DESC;",
        ),
        CatalogEntry::example(
            "aggregate.orders_per_customer",
            Aggregate,
            "Orders per Customer",
            r"SELECT
    customer_id,
    customer_name,
    order_date,
    order_amount,
    COUNT(*) OVER (PARTITION BY customer_id) AS customer_order_count,
    ROUND(AVG(order_amount) OVER (PARTITION BY customer_id), 2) AS avg_order_amount
FROM orders
ORDER BY customer_id, order_date;",
        ),
        CatalogEntry::example(
            "aggregate.salary_range",
            Aggregate,
            "Salary Range by Department",
            r"SELECT
    employee_name,
    department,
    salary,
    MAX(salary) OVER (PARTITION BY department) AS max_salary,
    MIN(salary) OVER (PARTITION BY department) AS min_salary,
    MAX(salary) OVER (PARTITION BY department) - salary AS gap_to_max
FROM employees
ORDER BY department, salary DESC;",
        ),
        CatalogEntry::example(
            "aggregate.department_summary",
            Aggregate,
            "Department Summary",
            r"SELECT
    employee_name,
    department,
    salary,
    COUNT(*) OVER (PARTITION BY department) AS emp_count,
    SUM(salary) OVER (PARTITION BY department) AS total_salary,
    ROUND(AVG(salary) OVER (PARTITION BY department), 2) AS avg_salary,
    MAX(salary) OVER (PARTITION BY department) AS max_salary,
    MIN(salary) OVER (PARTITION BY department) AS min_salary
FROM employees
ORDER BY department, salary DESC;",
        ),
    ]
}

fn ranking() -> Vec<CatalogEntry> {
    use Category::Ranking;
    vec![
        CatalogEntry::example(
            "ranking.top_performers",
            Ranking,
            "Top Performers per Department",
            r"SELECT
    ROW_NUMBER() OVER (PARTITION BY department ORDER BY salary DESC) AS rank,
    employee_name,
    department,
    salary
FROM employees
ORDER BY department, rank;",
        ),
        CatalogEntry::example(
            "ranking.sales_by_region",
            Ranking,
            "Sales Amount Ranking by Region",
            r"SELECT
    RANK() OVER (PARTITION BY region ORDER BY amount DESC) AS rank,
    product,
    region,
    amount
FROM sales
ORDER BY region, rank;",
        ),
        CatalogEntry::example(
            "ranking.dense_by_product",
            Ranking,
            "Dense Ranking by Product",
            r"SELECT
    DENSE_RANK() OVER (PARTITION BY product ORDER BY amount DESC) AS rank,
    product,
    region,
    amount
FROM sales
ORDER BY product, rank;",
        ),
        CatalogEntry::example(
            "ranking.ntile_quartiles",
            Ranking,
            "Quartile Analysis",
            r"SELECT
    NTILE(4) OVER (ORDER BY order_amount DESC, order_id) AS quartile,
    customer_name,
    order_amount
FROM orders
ORDER BY quartile, order_amount DESC;",
        ),
        CatalogEntry::example(
            "ranking.salary_percentile",
            Ranking,
            "Salary Percentile by Department",
            r"SELECT
    employee_name,
    department,
    salary,
    ROUND(PERCENT_RANK() OVER (PARTITION BY department ORDER BY salary), 4) AS pct_rank,
    ROUND(PERCENT_RANK() OVER (PARTITION BY department ORDER BY salary) * 100, 2) AS pct
FROM employees
ORDER BY department, salary;",
        ),
    ]
}

fn analytical() -> Vec<CatalogEntry> {
    use Category::Analytical;
    vec![
        CatalogEntry::example(
            "analytical.order_over_order",
            Analytical,
            "Order-over-Order Comparison",
            r"SELECT
    order_id,
    customer_name,
    order_amount,
    LAG(order_amount) OVER (PARTITION BY customer_id ORDER BY order_id) AS prev_order,
    order_amount - LAG(order_amount) OVER (PARTITION BY customer_id ORDER BY order_id) AS change
FROM orders
ORDER BY customer_id, order_id;",
        ),
        CatalogEntry::example(
            "analytical.next_sale",
            Analytical,
            "Next Sale by Product",
            r"SELECT
    sale_id,
    product,
    amount,
    LEAD(amount) OVER (PARTITION BY product ORDER BY sale_id) AS next_amount,
    LEAD(sale_date) OVER (PARTITION BY product ORDER BY sale_id) AS next_date
FROM sales
ORDER BY product, sale_id;",
        ),
        CatalogEntry::example(
            "analytical.first_order_growth",
            Analytical,
            "Compare to First Order",
            r"SELECT
    order_id,
    customer_name,
    order_amount,
    FIRST_VALUE(order_amount) OVER (
        PARTITION BY customer_id
        ORDER BY order_id
    ) AS first_order,
    order_amount - FIRST_VALUE(order_amount) OVER (
        PARTITION BY customer_id
        ORDER BY order_id
    ) AS growth
FROM orders
ORDER BY customer_id, order_id;",
        ),
        CatalogEntry::example(
            "analytical.latest_order",
            Analytical,
            "Latest Order Amount",
            r"SELECT
    order_id,
    customer_name,
    order_amount,
    LAST_VALUE(order_amount) OVER (
        PARTITION BY customer_id
        ORDER BY order_id
        ROWS BETWEEN UNBOUNDED PRECEDING AND UNBOUNDED FOLLOWING
    ) AS latest_order,
    LAST_VALUE(order_id) OVER (
        PARTITION BY customer_id
        ORDER BY order_id
        ROWS BETWEEN UNBOUNDED PRECEDING AND UNBOUNDED FOLLOWING
    ) AS latest_order_id
FROM orders
ORDER BY customer_id, order_id;",
        ),
        CatalogEntry::example(
            "analytical.second_highest_salary",
            Analytical,
            "Second Highest Salary per Department",
            r"WITH ranked_employees AS (
    SELECT
        department,
        employee_name,
        salary,
        NTH_VALUE(salary, 2) OVER (
            PARTITION BY department
            ORDER BY salary DESC
            ROWS BETWEEN UNBOUNDED PRECEDING AND UNBOUNDED FOLLOWING
        ) AS second_highest_salary,
        NTH_VALUE(employee_name, 2) OVER (
            PARTITION BY department
            ORDER BY salary DESC
            ROWS BETWEEN UNBOUNDED PRECEDING AND UNBOUNDED FOLLOWING
        ) AS second_highest_emp
    FROM employees
)
SELECT DISTINCT
    department,
    second_highest_salary,
    second_highest_emp
FROM ranked_employees
WHERE second_highest_salary IS NOT NULL
ORDER BY department;",
        ),
    ]
}

fn reference() -> Vec<CatalogEntry> {
    use Category::Reference;
    vec![
        CatalogEntry::example(
            "reference.running_total",
            Reference,
            "Running Total Pattern",
            r"SELECT
    sale_id,
    sale_date,
    amount,
    SUM(amount) OVER (
        ORDER BY sale_date
        ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW
    ) AS running_total
FROM sales
ORDER BY sale_date;",
        ),
        CatalogEntry::example(
            "reference.top_n_per_group",
            Reference,
            "Top-N per Group Pattern",
            r"SELECT * FROM (
    SELECT
        region,
        product,
        amount,
        ROW_NUMBER() OVER (PARTITION BY region ORDER BY amount DESC, sale_id) AS rn
    FROM sales
)
WHERE rn <= 3
ORDER BY region, rn;",
        ),
        CatalogEntry::example(
            "reference.group_average",
            Reference,
            "Compare to Group Average Pattern",
            r"SELECT
    product,
    region,
    amount,
    ROUND(AVG(amount) OVER (PARTITION BY product), 2) AS product_avg,
    ROUND(amount - AVG(amount) OVER (PARTITION BY product), 2) AS diff
FROM sales
ORDER BY product, sale_id;",
        ),
        CatalogEntry::example(
            "reference.period_over_period",
            Reference,
            "Period-over-Period Change Pattern",
            r"SELECT
    sale_date,
    amount,
    LAG(amount) OVER (ORDER BY sale_date) AS prev_amount,
    amount - LAG(amount) OVER (ORDER BY sale_date) AS change,
    ROUND(100.0 * (amount - LAG(amount) OVER (ORDER BY sale_date))
        / LAG(amount) OVER (ORDER BY sale_date), 2) AS pct_change
FROM sales
ORDER BY sale_date;",
        ),
        CatalogEntry::example(
            "reference.moving_average",
            Reference,
            "Moving Average Pattern",
            r"SELECT
    sale_id,
    amount,
    ROUND(AVG(amount) OVER (
        ORDER BY sale_id
        ROWS BETWEEN 2 PRECEDING AND CURRENT ROW
    ), 2) AS moving_avg_3
FROM sales
ORDER BY sale_id;",
        ),
        CatalogEntry::example(
            "reference.target_attainment",
            Reference,
            "Revenue against Target by Month",
            r"SELECT
    month,
    employee_id,
    revenue,
    target,
    revenue - target AS over_target,
    RANK() OVER (PARTITION BY month ORDER BY revenue - target DESC) AS month_rank
FROM performance
ORDER BY month, month_rank, employee_id;",
        ),
        CatalogEntry::example(
            "reference.named_window",
            Reference,
            "Reusing a Named Window",
            r"SELECT *,
    ROW_NUMBER() OVER w AS rn,
    RANK() OVER w AS rank
FROM employees
WINDOW w AS (PARTITION BY department ORDER BY salary DESC)
ORDER BY department, rn;",
        ),
        CatalogEntry::anti_pattern(
            "reference.missing_order_by",
            "reference.running_total_fix",
            "Mistake: Missing ORDER BY",
            r"SELECT
    employee_id,
    department,
    salary,
    SUM(salary) OVER (
        PARTITION BY department
    ) AS running_total
FROM employees
ORDER BY department, employee_id;",
        ),
        CatalogEntry::fix(
            "reference.running_total_fix",
            "reference.missing_order_by",
            "Fix: Order the Window",
            r"SELECT
    employee_id,
    department,
    salary,
    SUM(salary) OVER (
        PARTITION BY department
        ORDER BY employee_id
        ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW
    ) AS running_total
FROM employees
ORDER BY department, employee_id;",
        ),
        CatalogEntry::anti_pattern(
            "reference.last_value_default_frame",
            "reference.last_value_full_frame",
            "Mistake: LAST_VALUE with the Default Frame",
            r"SELECT
    employee_id,
    department,
    salary,
    LAST_VALUE(salary) OVER (
        PARTITION BY department
        ORDER BY employee_id
    ) AS last_salary
FROM employees
ORDER BY department, employee_id;",
        ),
        CatalogEntry::fix(
            "reference.last_value_full_frame",
            "reference.last_value_default_frame",
            "Fix: Widen the Frame",
            r"SELECT
    employee_id,
    department,
    salary,
    LAST_VALUE(salary) OVER (
        PARTITION BY department
        ORDER BY employee_id
        ROWS BETWEEN UNBOUNDED PRECEDING AND UNBOUNDED FOLLOWING
    ) AS last_salary
FROM employees
ORDER BY department, employee_id;",
        ),
        CatalogEntry::anti_pattern(
            "reference.window_in_group_by",
            "reference.window_in_cte",
            "Mistake: Window Function in GROUP BY",
            r"SELECT
    department,
    ROW_NUMBER() OVER (PARTITION BY department ORDER BY salary DESC) AS num
FROM employees
GROUP BY department, num;",
        ),
        CatalogEntry::fix(
            "reference.window_in_cte",
            "reference.window_in_group_by",
            "Fix: Rank in a CTE First",
            r"WITH ranked AS (
    SELECT
        department,
        employee_name,
        salary,
        ROW_NUMBER() OVER (PARTITION BY department ORDER BY salary DESC) AS num
    FROM employees
)
SELECT department, employee_name, salary
FROM ranked
WHERE num = 1
ORDER BY department;",
        ),
    ]
}

/// Which function to reach for, with the entry that demonstrates it.
pub(super) const USE_CASES: &[UseCase] = &[
    UseCase::new("Get running total", "SUM + ORDER BY + ROWS", "reference.running_total"),
    UseCase::new("Top N per group", "ROW_NUMBER + PARTITION BY", "reference.top_n_per_group"),
    UseCase::new("Compare individuals to group", "AVG + PARTITION BY", "reference.group_average"),
    UseCase::new("Date-over-date change", "LAG or LEAD", "reference.period_over_period"),
    UseCase::new("Rank with gaps on ties", "RANK()", "ranking.sales_by_region"),
    UseCase::new("Rank without gaps", "DENSE_RANK()", "ranking.dense_by_product"),
    UseCase::new("Divide into quartiles", "NTILE(4)", "ranking.ntile_quartiles"),
    UseCase::new("Get previous row value", "LAG()", "analytical.order_over_order"),
    UseCase::new("Access first value", "FIRST_VALUE()", "analytical.first_order_growth"),
    UseCase::new("Complex relative position", "NTH_VALUE()", "analytical.second_highest_salary"),
    UseCase::new("Several functions over one window", "WINDOW w AS (...)", "reference.named_window"),
];
