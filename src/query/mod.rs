//! Query execution for the sandbox.
//!
//! Isolates read-only classification and execution from the session and the
//! command-line front end.

pub mod executor;

pub use executor::{QueryExecutor, QueryOutcome};
