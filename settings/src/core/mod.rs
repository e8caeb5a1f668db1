//! Deterministic, pure logic for the settings store.
//!
//! Core modules are free of I/O side effects. They operate on values and line
//! lists in memory and return deterministic outputs suitable for tests.

pub mod comments;
pub mod format;
pub mod table;
pub mod value;
