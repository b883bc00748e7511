//! One logical user session.
//!
//! A session owns a private sandbox store, the executor, and the reaction
//! state. Sessions never share an engine, so isolation needs no locking.

use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

use crate::catalog::{Catalog, CatalogEntry};
use crate::db::{SandboxStore, TableSummary};
use crate::error::{LabError, Result};
use crate::query::{QueryExecutor, QueryOutcome};

/// A reaction a user can leave once per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Reaction {
    Love,
    Like,
    Smile,
}

impl Reaction {
    /// Parses a reaction from a string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "love" => Some(Self::Love),
            "like" => Some(Self::Like),
            "smile" => Some(Self::Smile),
            _ => None,
        }
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Love => write!(f, "love"),
            Self::Like => write!(f, "like"),
            Self::Smile => write!(f, "smile"),
        }
    }
}

/// Reaction state: nothing selected yet, or exactly one choice made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ReactionState {
    #[default]
    NoneSelected,
    Selected(Reaction),
}

impl ReactionState {
    /// Returns the state after choosing `choice`.
    ///
    /// Only valid from `NoneSelected`; a second choice returns `None`.
    pub fn select(self, choice: Reaction) -> Option<Self> {
        match self {
            Self::NoneSelected => Some(Self::Selected(choice)),
            Self::Selected(_) => None,
        }
    }

    /// Returns the chosen reaction, if any.
    pub fn selected(&self) -> Option<Reaction> {
        match self {
            Self::NoneSelected => None,
            Self::Selected(choice) => Some(*choice),
        }
    }

    /// Counters derived from the state.
    pub fn counts(&self) -> ReactionCounts {
        let is = |r: Reaction| u32::from(self.selected() == Some(r));
        ReactionCounts {
            loves: is(Reaction::Love),
            likes: is(Reaction::Like),
            smiles: is(Reaction::Smile),
        }
    }
}

/// Per-session reaction counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ReactionCounts {
    pub loves: u32,
    pub likes: u32,
    pub smiles: u32,
}

/// Result of running a catalog entry, with its paired entry when it has one.
#[derive(Debug)]
pub struct ExampleRun<'c> {
    pub entry: &'c CatalogEntry,
    pub outcome: Result<QueryOutcome>,
    pub pair: Option<(&'c CatalogEntry, Result<QueryOutcome>)>,
}

/// A single user's sandbox session.
pub struct Session {
    store: SandboxStore,
    executor: QueryExecutor,
    reaction: ReactionState,
}

impl Session {
    /// Provisions the dataset and opens a private store.
    ///
    /// Fails with a `Provisioning` error if the dataset is invalid, or an
    /// `Internal` error if the engine cannot be opened.
    pub async fn start() -> Result<Self> {
        let store = SandboxStore::open().await?;
        info!("Session started");
        Ok(Self::with_store(store))
    }

    /// Wraps an already opened store.
    pub fn with_store(store: SandboxStore) -> Self {
        Self {
            store,
            executor: QueryExecutor::new(),
            reaction: ReactionState::default(),
        }
    }

    /// Runs free-text SQL.
    pub async fn run_sql(&mut self, sql: &str) -> Result<QueryOutcome> {
        let mut handle = self.store.handle();
        self.executor.execute(sql, &mut handle).await
    }

    /// Runs a catalog entry by id. For an anti-pattern or fix, the paired
    /// entry is run too so both results can be compared.
    ///
    /// An unknown id is a `Query` error. Failures of the entries themselves
    /// are reported inside the returned run.
    pub async fn run_example<'c>(
        &mut self,
        catalog: &'c Catalog,
        id: &str,
    ) -> Result<ExampleRun<'c>> {
        let entry = catalog
            .get(id)
            .ok_or_else(|| LabError::query(format!("Unknown example '{}'", id)))?;

        let outcome = self.run_entry(entry).await;

        let pair = match entry.paired_with.and_then(|other| catalog.get(other)) {
            Some(other) => Some((other, self.run_entry(other).await)),
            None => None,
        };

        Ok(ExampleRun {
            entry,
            outcome,
            pair,
        })
    }

    async fn run_entry(&mut self, entry: &CatalogEntry) -> Result<QueryOutcome> {
        let mut handle = self.store.handle();
        self.executor.run_entry(entry, &mut handle).await
    }

    /// Records a reaction. Returns `false` if one was already recorded.
    pub fn react(&mut self, choice: Reaction) -> bool {
        match self.reaction.select(choice) {
            Some(next) => {
                debug!("Reaction recorded: {}", choice);
                self.reaction = next;
                true
            }
            None => false,
        }
    }

    /// Returns the current reaction state.
    pub fn reaction(&self) -> ReactionState {
        self.reaction
    }

    /// Returns the schema and size of each loaded table.
    pub fn tables(&self) -> &[TableSummary] {
        self.store.tables()
    }

    /// Ends the session and releases the engine.
    pub async fn close(self) -> Result<()> {
        self.store.close().await?;
        info!("Session closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaction_select_once() {
        let state = ReactionState::NoneSelected;
        let state = state.select(Reaction::Love).unwrap();
        assert_eq!(state.selected(), Some(Reaction::Love));
        assert!(state.select(Reaction::Like).is_none());
    }

    #[test]
    fn test_reaction_counts() {
        assert_eq!(ReactionState::NoneSelected.counts(), ReactionCounts::default());
        let counts = ReactionState::Selected(Reaction::Smile).counts();
        assert_eq!(
            counts,
            ReactionCounts {
                loves: 0,
                likes: 0,
                smiles: 1
            }
        );
    }

    #[test]
    fn test_reaction_parse() {
        assert_eq!(Reaction::parse("LIKE"), Some(Reaction::Like));
        assert_eq!(Reaction::parse("wave"), None);
    }

    #[tokio::test]
    async fn test_session_react_once() {
        let mut session = Session::start().await.unwrap();
        assert!(session.react(Reaction::Like));
        assert!(!session.react(Reaction::Love));
        assert_eq!(session.reaction(), ReactionState::Selected(Reaction::Like));
        session.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_session_run_sql() {
        let mut session = Session::start().await.unwrap();
        let outcome = session
            .run_sql("SELECT COUNT(*) AS n FROM orders")
            .await
            .unwrap();
        assert_eq!(outcome.result.rows[0][0].as_int(), Some(20));
        session.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_session_run_example_with_pair() {
        let mut session = Session::start().await.unwrap();
        let run = session
            .run_example(Catalog::builtin(), "reference.window_in_group_by")
            .await
            .unwrap();

        assert!(run.outcome.is_err());
        let (fix, fix_outcome) = run.pair.unwrap();
        assert_eq!(fix.id, "reference.window_in_cte");
        assert_eq!(fix_outcome.unwrap().result.row_count, 4);
    }

    #[tokio::test]
    async fn test_session_run_unknown_example() {
        let mut session = Session::start().await.unwrap();
        let err = session
            .run_example(Catalog::builtin(), "ranking.nope")
            .await
            .unwrap_err();
        assert_eq!(err, LabError::query("Unknown example 'ranking.nope'"));
    }
}
