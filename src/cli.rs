//! Command-line argument parsing for the window lab.
//!
//! Uses clap derive for the subcommands and the global flags.

use clap::{Parser, Subcommand};
use sql_windowlab::catalog::Category;
use sql_windowlab::config::Config;
use sql_windowlab::output::OutputFormat;
use std::path::PathBuf;

/// An interactive sandbox for learning SQL window functions.
#[derive(Parser, Debug)]
#[command(name = "windowlab")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(long, value_name = "PATH", env = "WINDOWLAB_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format: text or json (overrides config)
    #[arg(long, value_name = "FORMAT", global = true)]
    pub format: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// List catalog entries
    Catalog {
        /// Only list entries of this category (aggregate, ranking, analytical, reference)
        #[arg(long, value_name = "CATEGORY")]
        category: Option<String>,
    },

    /// Print an entry's SQL, and its pair for anti-pattern/fix entries
    Show {
        /// Catalog entry id (e.g. ranking.ntile_quartiles)
        id: String,
    },

    /// Show which window function fits which task
    Guide,

    /// Execute a catalog entry, and its pair for anti-pattern/fix entries
    Run {
        /// Catalog entry id
        id: String,
    },

    /// Run free-text SQL (reads stdin when omitted)
    Query {
        /// SQL text
        sql: Option<String>,
    },

    /// Print the sample tables
    Tables {
        /// Only print this table
        name: Option<String>,
    },
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    /// Parses the --format argument, if given.
    pub fn parse_output_format(&self) -> std::result::Result<Option<OutputFormat>, String> {
        self.format.as_deref().map(str::parse).transpose()
    }
}

/// Parses a --category value.
pub fn parse_category(s: &str) -> std::result::Result<Category, String> {
    Category::parse(s).ok_or_else(|| {
        format!(
            "Invalid category: {s}. Expected one of: {}",
            Category::ALL
                .iter()
                .map(Category::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_args(args: &[&str]) -> Cli {
        Cli::parse_from(args)
    }

    #[test]
    fn test_parse_catalog() {
        let cli = parse_args(&["windowlab", "catalog"]);
        assert_eq!(cli.command, Command::Catalog { category: None });

        let cli = parse_args(&["windowlab", "catalog", "--category", "ranking"]);
        assert_eq!(
            cli.command,
            Command::Catalog {
                category: Some("ranking".to_string())
            }
        );
    }

    #[test]
    fn test_parse_run_and_show() {
        let cli = parse_args(&["windowlab", "run", "ranking.ntile_quartiles"]);
        assert_eq!(
            cli.command,
            Command::Run {
                id: "ranking.ntile_quartiles".to_string()
            }
        );

        let cli = parse_args(&["windowlab", "show", "reference.missing_order_by"]);
        assert_eq!(
            cli.command,
            Command::Show {
                id: "reference.missing_order_by".to_string()
            }
        );
    }

    #[test]
    fn test_parse_query_with_and_without_sql() {
        let cli = parse_args(&["windowlab", "query", "SELECT 1"]);
        assert_eq!(
            cli.command,
            Command::Query {
                sql: Some("SELECT 1".to_string())
            }
        );

        let cli = parse_args(&["windowlab", "query"]);
        assert_eq!(cli.command, Command::Query { sql: None });
    }

    #[test]
    fn test_parse_guide() {
        let cli = parse_args(&["windowlab", "guide", "--format", "json"]);
        assert_eq!(cli.command, Command::Guide);
        assert_eq!(cli.format.as_deref(), Some("json"));
    }

    #[test]
    fn test_parse_tables() {
        let cli = parse_args(&["windowlab", "tables", "sales"]);
        assert_eq!(
            cli.command,
            Command::Tables {
                name: Some("sales".to_string())
            }
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse_args(&[
            "windowlab",
            "tables",
            "--format",
            "json",
            "--config",
            "/path/to/config.toml",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/config.toml")));
        assert_eq!(cli.parse_output_format().unwrap(), Some(OutputFormat::Json));
        assert_eq!(cli.config_path(), PathBuf::from("/path/to/config.toml"));
    }

    #[test]
    fn test_parse_output_format() {
        let cli = parse_args(&["windowlab", "catalog"]);
        assert_eq!(cli.parse_output_format().unwrap(), None);

        let cli = parse_args(&["windowlab", "--format", "xml", "catalog"]);
        assert!(cli.parse_output_format().is_err());
    }

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category("Analytical"), Ok(Category::Analytical));
        let err = parse_category("window").unwrap_err();
        assert!(err.contains("aggregate, ranking, analytical, reference"));
    }

    #[test]
    fn test_missing_subcommand_is_error() {
        assert!(Cli::try_parse_from(["windowlab"]).is_err());
    }
}
