//! Integration tests for sql-windowlab.

pub mod catalog_test;
pub mod common;
pub mod sandbox_test;
pub mod window_functions_test;
