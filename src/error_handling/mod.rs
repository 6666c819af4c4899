//! Error handling.
//!
//! This module provides the typed errors of every stage of a request:
//! - **Validation**: bad request shape or onion address, caught before I/O
//! - **Transport construction**: bad proxy configuration, fatal to that attempt
//! - **Send-time**: raw transport failures, returned undiagnosed
//! - **Probe**: proxy reachability failures
//!
//! Diagnosis of these errors lives in [`crate::diagnostics`].

mod types;

// Re-export public API
pub use types::{
    AuthError, ConfigValidationError, CredentialError, InitializationError, ProbeError, SendError,
    TransportBuildError, TransportError, ValidationError,
};
