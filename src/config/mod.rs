//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (proxy address, timeouts, defaults)
//! - HTTP header name constants
//! - Client configuration and CLI option types

mod constants;
mod headers;
mod types;

// Re-export all constants
pub use constants::*;
pub use headers::*;
pub use types::{split_host_port, ClientConfig, LogFormat, LogLevel, Opt};
