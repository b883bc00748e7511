//! Example query catalog.
//!
//! A static, immutable registry of named window-function examples grouped by
//! category, including paired anti-pattern/fix entries that a front end can
//! show side by side. The catalog never executes anything itself.

mod entries;

use crate::error::{LabError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::OnceLock;

/// Catalog category, in display order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Aggregate,
    Ranking,
    Analytical,
    Reference,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 4] = [
        Category::Aggregate,
        Category::Ranking,
        Category::Analytical,
        Category::Reference,
    ];

    /// Returns the category as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aggregate => "aggregate",
            Self::Ranking => "ranking",
            Self::Analytical => "analytical",
            Self::Reference => "reference",
        }
    }

    /// Parses a category from a string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "aggregate" => Some(Self::Aggregate),
            "ranking" => Some(Self::Ranking),
            "analytical" => Some(Self::Analytical),
            "reference" => Some(Self::Reference),
            _ => None,
        }
    }

    /// The window functions this category demonstrates.
    pub fn functions(&self) -> &'static [&'static str] {
        match self {
            Self::Aggregate => &["SUM", "AVG", "COUNT", "MIN", "MAX"],
            Self::Ranking => &["ROW_NUMBER", "RANK", "DENSE_RANK", "NTILE", "PERCENT_RANK"],
            Self::Analytical => &["LAG", "LEAD", "FIRST_VALUE", "LAST_VALUE", "NTH_VALUE"],
            Self::Reference => &[],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aggregate => write!(f, "Aggregate"),
            Self::Ranking => write!(f, "Ranking"),
            Self::Analytical => write!(f, "Analytical"),
            Self::Reference => write!(f, "Reference"),
        }
    }
}

/// Role of an entry: a plain example, or one side of a wrong/correct pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Example,
    AntiPattern,
    Fix,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Example => write!(f, "example"),
            Self::AntiPattern => write!(f, "anti-pattern"),
            Self::Fix => write!(f, "fix"),
        }
    }
}

/// One named example query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub category: Category,
    pub title: &'static str,
    pub sql: &'static str,
    pub variant: Variant,
    pub paired_with: Option<&'static str>,
}

impl CatalogEntry {
    pub(crate) const fn example(
        id: &'static str,
        category: Category,
        title: &'static str,
        sql: &'static str,
    ) -> Self {
        Self {
            id,
            category,
            title,
            sql,
            variant: Variant::Example,
            paired_with: None,
        }
    }

    pub(crate) const fn anti_pattern(
        id: &'static str,
        fix_id: &'static str,
        title: &'static str,
        sql: &'static str,
    ) -> Self {
        Self {
            id,
            category: Category::Reference,
            title,
            sql,
            variant: Variant::AntiPattern,
            paired_with: Some(fix_id),
        }
    }

    pub(crate) const fn fix(
        id: &'static str,
        anti_pattern_id: &'static str,
        title: &'static str,
        sql: &'static str,
    ) -> Self {
        Self {
            id,
            category: Category::Reference,
            title,
            sql,
            variant: Variant::Fix,
            paired_with: Some(anti_pattern_id),
        }
    }

    /// Returns true if this entry is one side of an anti-pattern/fix pair.
    pub fn is_paired(&self) -> bool {
        self.paired_with.is_some()
    }
}

/// A task and the window function that solves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UseCase {
    pub task: &'static str,
    pub function: &'static str,
    /// Id of the catalog entry that demonstrates it.
    pub example: &'static str,
}

impl UseCase {
    pub(crate) const fn new(
        task: &'static str,
        function: &'static str,
        example: &'static str,
    ) -> Self {
        Self {
            task,
            function,
            example,
        }
    }
}

/// Immutable, ordered collection of catalog entries.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<&'static str, usize>,
}

impl Catalog {
    /// Builds a catalog, validating ids and pairings.
    ///
    /// Entries are ordered by category, then by declaration order.
    pub fn new(mut entries: Vec<CatalogEntry>) -> Result<Self> {
        entries.sort_by_key(|e| e.category);
        let catalog = Self::from_sorted(entries);
        catalog.validate()?;
        Ok(catalog)
    }

    /// Returns the built-in catalog.
    pub fn builtin() -> &'static Catalog {
        static CATALOG: OnceLock<Catalog> = OnceLock::new();
        CATALOG.get_or_init(|| {
            let mut entries = entries::builtin();
            entries.sort_by_key(|e| e.category);
            Self::from_sorted(entries)
        })
    }

    fn from_sorted(entries: Vec<CatalogEntry>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id, i))
            .collect();
        Self { entries, index }
    }

    /// Checks that ids are unique and every pairing is symmetric and joins an
    /// anti-pattern with a fix.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for entry in &self.entries {
            if !seen.insert(entry.id) {
                return Err(LabError::internal(format!(
                    "duplicate catalog id '{}'",
                    entry.id
                )));
            }
        }

        for entry in &self.entries {
            match (entry.variant, entry.paired_with) {
                (Variant::Example, None) => {}
                (Variant::Example, Some(_)) => {
                    return Err(LabError::internal(format!(
                        "example '{}' must not be paired",
                        entry.id
                    )));
                }
                (_, None) => {
                    return Err(LabError::internal(format!(
                        "{} '{}' has no pair",
                        entry.variant, entry.id
                    )));
                }
                (variant, Some(other_id)) => {
                    let other = self.get(other_id).ok_or_else(|| {
                        LabError::internal(format!(
                            "'{}' is paired with unknown entry '{}'",
                            entry.id, other_id
                        ))
                    })?;
                    let expected = match variant {
                        Variant::AntiPattern => Variant::Fix,
                        _ => Variant::AntiPattern,
                    };
                    if other.paired_with != Some(entry.id) || other.variant != expected {
                        return Err(LabError::internal(format!(
                            "pairing between '{}' and '{}' is not symmetric",
                            entry.id, other_id
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    /// Lists entries in display order, optionally restricted to one category.
    pub fn list(&self, category: Option<Category>) -> Vec<&CatalogEntry> {
        self.entries
            .iter()
            .filter(|e| category.map_or(true, |c| e.category == c))
            .collect()
    }

    /// Returns the categories that have at least one entry, in display order.
    pub fn categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| self.entries.iter().any(|e| e.category == *c))
            .collect()
    }

    /// Looks up an entry by id.
    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    /// Returns `(anti_pattern, fix)` for either member of a pair.
    pub fn pairs_for(&self, id: &str) -> Option<(&CatalogEntry, &CatalogEntry)> {
        let entry = self.get(id)?;
        let other = self.get(entry.paired_with?)?;
        match entry.variant {
            Variant::AntiPattern => Some((entry, other)),
            Variant::Fix => Some((other, entry)),
            Variant::Example => None,
        }
    }

    /// Returns every anti-pattern/fix pair in display order.
    pub fn pairs(&self) -> Vec<(&CatalogEntry, &CatalogEntry)> {
        self.entries
            .iter()
            .filter(|e| e.variant == Variant::AntiPattern)
            .filter_map(|e| self.pairs_for(e.id))
            .collect()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the "when to use which function" guide.
    pub fn use_cases(&self) -> &'static [UseCase] {
        entries::USE_CASES
    }
}
