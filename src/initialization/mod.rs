//! Application initialization.
//!
//! This module provides logger setup for the binary and for embedding
//! applications that want the same log layout.

mod logger;

// Re-export public API
pub use logger::init_logger_with;
