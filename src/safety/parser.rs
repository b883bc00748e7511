//! SQL parsing and classification logic.
//!
//! Uses sqlparser-rs with the SQLite dialect to parse SQL and classify
//! statements by their safety level.

use std::sync::OnceLock;

use regex::Regex;
use sqlparser::ast::{Query, Select, SetExpr, Statement, TableFactor, TableWithJoins};
use sqlparser::dialect::SQLiteDialect;
use sqlparser::parser::Parser;
use tracing::debug;

use super::{ClassificationResult, SafetyLevel, StatementType};

/// Engine-control keywords that must never reach the engine, even in text
/// the classifier cannot parse: they could switch off query-only mode.
fn engine_control_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)\b(pragma|attach|detach)\b").expect("engine control pattern is valid")
    })
}

/// SQL classifier that parses and classifies SQL text.
#[derive(Debug)]
pub struct SqlClassifier {
    dialect: SQLiteDialect,
}

impl Default for SqlClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlClassifier {
    /// Creates a new SQL classifier.
    pub fn new() -> Self {
        Self {
            dialect: SQLiteDialect {},
        }
    }

    /// Classifies SQL text and returns the classification result.
    ///
    /// Text that cannot be parsed is `Unparsed` unless it mentions an
    /// engine-control keyword, in which case it is destructive.
    pub fn classify(&self, sql: &str) -> ClassificationResult {
        let statements = match Parser::parse_sql(&self.dialect, sql) {
            Ok(statements) => statements,
            Err(e) => {
                debug!("Classifier could not parse SQL: {e}");
                if engine_control_pattern().is_match(sql) {
                    return ClassificationResult {
                        level: SafetyLevel::Destructive,
                        statement_type: StatementType::Pragma,
                        statement_count: 0,
                    };
                }
                return ClassificationResult::unparsed();
            }
        };

        match statements.as_slice() {
            [] => ClassificationResult::unparsed(),
            [single] => {
                let (level, stmt_type) = classify_statement(single);
                ClassificationResult::new(level, stmt_type)
            }
            many => {
                // Multiple statements: use the most dangerous classification
                let mut max_level = SafetyLevel::Safe;
                let mut max_stmt_type = StatementType::Select;

                for stmt in many {
                    let (level, stmt_type) = classify_statement(stmt);
                    if level.priority() > max_level.priority() {
                        max_level = level;
                        max_stmt_type = stmt_type;
                    }
                }

                ClassificationResult {
                    level: max_level,
                    statement_type: StatementType::Multiple(Box::new(max_stmt_type)),
                    statement_count: many.len(),
                }
            }
        }
    }
}

/// Convenience function to classify SQL without creating a classifier instance.
pub fn classify_sql(sql: &str) -> ClassificationResult {
    SqlClassifier::new().classify(sql)
}

/// Returns the more dangerous of two classifications, preferring the first on ties.
fn most_dangerous(
    a: (SafetyLevel, StatementType),
    b: (SafetyLevel, StatementType),
) -> (SafetyLevel, StatementType) {
    if b.0.priority() > a.0.priority() {
        b
    } else {
        a
    }
}

/// Classifies a single parsed statement.
fn classify_statement(statement: &Statement) -> (SafetyLevel, StatementType) {
    match statement {
        // Query: may contain data-modifying CTEs, so recurse
        Statement::Query(query) => classify_query(query),
        // EXPLAIN only reports the plan in SQLite; it never runs the statement
        Statement::Explain { .. } | Statement::ExplainTable { .. } => {
            (SafetyLevel::Safe, StatementType::Explain)
        }

        // Mutating: data modification
        Statement::Insert { .. } => (SafetyLevel::Mutating, StatementType::Insert),
        Statement::Update { .. } => (SafetyLevel::Mutating, StatementType::Update),

        // Destructive: data loss, schema changes, engine control
        Statement::Delete { .. } => (SafetyLevel::Destructive, StatementType::Delete),
        Statement::Drop { .. } => (SafetyLevel::Destructive, StatementType::Drop),
        Statement::AlterTable { .. }
        | Statement::AlterIndex { .. }
        | Statement::AlterView { .. } => (SafetyLevel::Destructive, StatementType::Alter),
        Statement::CreateTable { .. }
        | Statement::CreateIndex { .. }
        | Statement::CreateView { .. }
        | Statement::CreateVirtualTable { .. } => {
            (SafetyLevel::Destructive, StatementType::Create)
        }
        Statement::Pragma { .. } => (SafetyLevel::Destructive, StatementType::Pragma),

        // Conservative default: treat unknown statements as destructive
        _ => (SafetyLevel::Destructive, StatementType::Unknown),
    }
}

/// Classifies a Query by recursively inspecting for data-modifying operations.
fn classify_query(query: &Query) -> (SafetyLevel, StatementType) {
    let mut max = (SafetyLevel::Safe, StatementType::Select);

    if let Some(with) = &query.with {
        for cte in &with.cte_tables {
            max = most_dangerous(max, classify_query(&cte.query));
        }
    }

    most_dangerous(max, classify_set_expr(&query.body))
}

/// Classifies a SetExpr, detecting mutations and recursing into nested queries.
fn classify_set_expr(set_expr: &SetExpr) -> (SafetyLevel, StatementType) {
    #[allow(unreachable_patterns)]
    match set_expr {
        // Direct mutations in CTE bodies (wrapped as Statement)
        SetExpr::Insert(stmt) | SetExpr::Update(stmt) => classify_statement(stmt),

        SetExpr::Query(query) => classify_query(query),
        SetExpr::Select(select) => classify_select(select),

        // UNION, INTERSECT, EXCEPT: check both sides
        SetExpr::SetOperation { left, right, .. } => {
            most_dangerous(classify_set_expr(left), classify_set_expr(right))
        }

        SetExpr::Values(_) | SetExpr::Table(_) => (SafetyLevel::Safe, StatementType::Select),

        // Any other body kind may carry a mutation
        _ => (SafetyLevel::Destructive, StatementType::Unknown),
    }
}

/// Classifies a Select by checking its FROM clause for subqueries.
fn classify_select(select: &Select) -> (SafetyLevel, StatementType) {
    select.from.iter().fold(
        (SafetyLevel::Safe, StatementType::Select),
        |max, twj| most_dangerous(max, classify_table_with_joins(twj)),
    )
}

/// Classifies a TableWithJoins, checking the main relation and all joins.
fn classify_table_with_joins(twj: &TableWithJoins) -> (SafetyLevel, StatementType) {
    twj.joins.iter().fold(
        classify_table_factor(&twj.relation),
        |max, join| most_dangerous(max, classify_table_factor(&join.relation)),
    )
}

/// Classifies a TableFactor, recursing into derived tables (subqueries).
fn classify_table_factor(factor: &TableFactor) -> (SafetyLevel, StatementType) {
    match factor {
        TableFactor::Derived { subquery, .. } => classify_query(subquery),
        TableFactor::NestedJoin {
            table_with_joins, ..
        } => classify_table_with_joins(table_with_joins),
        _ => (SafetyLevel::Safe, StatementType::Select),
    }
}
