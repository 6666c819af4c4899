//! Utility functions.
//!
//! This module provides string sanitization for error messages that end up
//! in diagnostic output.

pub mod sanitize;

pub use sanitize::{sanitize_and_truncate_error_message, sanitize_error_message};
