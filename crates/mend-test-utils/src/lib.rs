//! Shared helpers for mend's test suites.

pub mod fixtures;

pub use fixtures::{assert_golden, bless_enabled, extract_cursor, extract_range, CURSOR_MARKER};
