//! sql-windowlab - An interactive sandbox for learning SQL window functions.
//!
//! This library exposes the core modules to the `windowlab` binary and to
//! integration tests.

pub mod catalog;
pub mod config;
pub mod dataset;
pub mod db;
pub mod error;
pub mod logging;
pub mod output;
pub mod query;
pub mod safety;
pub mod session;
