//! Utility functions for string formatting.

pub mod format;

pub use format::{or_placeholder, truncate_string, PLACEHOLDER};
