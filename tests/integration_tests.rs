//! Integration tests for sql-windowlab.
//!
//! These tests run against a real in-memory SQLite sandbox; no external
//! database is needed.
//!
//! Run with: `cargo test --test integration_tests`

mod integration;
