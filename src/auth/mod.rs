//! Authentication.
//!
//! This module provides:
//! - [`AuthConfig`]: the scheme (none, api-key, bearer, basic, custom) and its credentials
//! - Application of a configuration onto a [`crate::RequestDescriptor`]
//! - Validation and construction from form-style input
//! - Masked copies for display and logging
//! - The [`CredentialStore`] seam for an external secret store

mod apply;
mod credentials;
mod mask;
mod types;

pub use apply::parse_header_lines;
pub use credentials::{CredentialStore, CredentialVault, MemoryCredentialStore};
pub use mask::mask_secret;
pub use types::{ApiKeyLocation, AuthConfig, AuthType};
