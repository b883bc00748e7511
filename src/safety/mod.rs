//! Read-only guard for sandbox queries.
//!
//! Parses SQL and classifies it as safe, mutating, or destructive. The
//! executor only lets safe (or unparseable, engine-checked) text through, so
//! the sample tables can never be changed by a query.

mod parser;

pub use parser::{classify_sql, SqlClassifier};

use std::fmt;

/// Safety level classification for SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SafetyLevel {
    /// Read-only queries (SELECT, WITH ... SELECT, VALUES, EXPLAIN).
    Safe,
    /// The classifier could not parse the text. The engine decides; it runs
    /// in query-only mode, so a write still fails there.
    Unparsed,
    /// Data modification (INSERT, UPDATE, REPLACE).
    Mutating,
    /// Data loss, schema changes or engine control (DELETE, DROP, ALTER,
    /// CREATE, PRAGMA, ATTACH).
    Destructive,
}

impl SafetyLevel {
    /// Returns true if the sandbox refuses to run text at this level.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Mutating | Self::Destructive)
    }

    /// Returns a priority value (higher = more dangerous).
    pub(crate) fn priority(&self) -> u8 {
        match self {
            Self::Safe => 0,
            Self::Unparsed => 1,
            Self::Mutating => 2,
            Self::Destructive => 3,
        }
    }
}

impl fmt::Display for SafetyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Safe => write!(f, "Safe"),
            Self::Unparsed => write!(f, "Unparsed"),
            Self::Mutating => write!(f, "Mutating"),
            Self::Destructive => write!(f, "Destructive"),
        }
    }
}

/// The type of SQL statement detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementType {
    Select,
    Insert,
    Update,
    Delete,
    Drop,
    Alter,
    Create,
    Explain,
    Pragma,
    /// Multiple statements detected; contains the most dangerous type.
    Multiple(Box<StatementType>),
    /// Statement type could not be determined.
    Unknown,
}

impl fmt::Display for StatementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select => write!(f, "SELECT"),
            Self::Insert => write!(f, "INSERT"),
            Self::Update => write!(f, "UPDATE"),
            Self::Delete => write!(f, "DELETE"),
            Self::Drop => write!(f, "DROP"),
            Self::Alter => write!(f, "ALTER"),
            Self::Create => write!(f, "CREATE"),
            Self::Explain => write!(f, "EXPLAIN"),
            Self::Pragma => write!(f, "PRAGMA"),
            Self::Multiple(inner) => write!(f, "Multiple ({})", inner),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Result of classifying SQL text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    /// The determined safety level.
    pub level: SafetyLevel,
    /// The type of statement(s) detected.
    pub statement_type: StatementType,
    /// Number of statements the classifier saw (0 when unparsed).
    pub statement_count: usize,
}

impl ClassificationResult {
    /// Creates a new classification result for a single statement.
    pub fn new(level: SafetyLevel, statement_type: StatementType) -> Self {
        Self {
            level,
            statement_type,
            statement_count: 1,
        }
    }

    /// Creates a result for text the classifier could not parse.
    pub fn unparsed() -> Self {
        Self {
            level: SafetyLevel::Unparsed,
            statement_type: StatementType::Unknown,
            statement_count: 0,
        }
    }

    /// Returns true if the sandbox refuses to run this text.
    pub fn is_rejected(&self) -> bool {
        self.level.is_rejected()
    }

    /// Message reported to the user when the text is rejected.
    pub fn rejection_message(&self) -> String {
        format!(
            "{} statements are not allowed: the sandbox tables are read-only",
            self.statement_type
        )
    }
}
