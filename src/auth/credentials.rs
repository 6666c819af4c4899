//! Credential storage seam.
//!
//! The OS keyring (or any other secret store) is reached through
//! [`CredentialStore`]. [`CredentialVault`] namespaces every service
//! identifier before delegating, so entries written by this client never
//! collide with other applications' entries in a shared store.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::config::CREDENTIAL_SERVICE_PREFIX;
use crate::error_handling::CredentialError;

/// Secret store keyed by service identifier and username.
pub trait CredentialStore: Send + Sync {
    /// Stores `secret`, replacing any previous value.
    fn store(&self, service: &str, username: &str, secret: &str) -> Result<(), CredentialError>;

    /// Retrieves the stored secret.
    fn get(&self, service: &str, username: &str) -> Result<String, CredentialError>;

    /// Removes the stored secret.
    fn delete(&self, service: &str, username: &str) -> Result<(), CredentialError>;
}

/// Process-local [`CredentialStore`], for tests and keyring-less setups.
#[derive(Default)]
pub struct MemoryCredentialStore {
    entries: Mutex<HashMap<(String, String), String>>,
}

impl MemoryCredentialStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn key(service: &str, username: &str) -> (String, String) {
        (service.to_string(), username.to_string())
    }

    fn not_found(service: &str, username: &str) -> CredentialError {
        CredentialError::NotFound {
            service: service.to_string(),
            username: username.to_string(),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn store(&self, service: &str, username: &str, secret: &str) -> Result<(), CredentialError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(Self::key(service, username), secret.to_string());
        Ok(())
    }

    fn get(&self, service: &str, username: &str) -> Result<String, CredentialError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(&Self::key(service, username))
            .cloned()
            .ok_or_else(|| Self::not_found(service, username))
    }

    fn delete(&self, service: &str, username: &str) -> Result<(), CredentialError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries
            .remove(&Self::key(service, username))
            .map(|_| ())
            .ok_or_else(|| Self::not_found(service, username))
    }
}

/// Prefixes service identifiers with `onioncli-` before delegating to a
/// [`CredentialStore`].
#[derive(Debug)]
pub struct CredentialVault<S> {
    store: S,
}

impl<S: CredentialStore> CredentialVault<S> {
    /// Wraps `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Identifier under which `service` is stored.
    pub fn service_id(service: &str) -> String {
        format!("{CREDENTIAL_SERVICE_PREFIX}-{service}")
    }

    /// Stores a secret for `username` under `service`.
    pub fn store_credentials(
        &self,
        service: &str,
        username: &str,
        secret: &str,
    ) -> Result<(), CredentialError> {
        log::debug!("Storing credential for {} in {}", username, Self::service_id(service));
        self.store.store(&Self::service_id(service), username, secret)
    }

    /// Retrieves the secret for `username` under `service`.
    pub fn get_credentials(&self, service: &str, username: &str) -> Result<String, CredentialError> {
        self.store.get(&Self::service_id(service), username)
    }

    /// Deletes the secret for `username` under `service`.
    pub fn delete_credentials(&self, service: &str, username: &str) -> Result<(), CredentialError> {
        self.store.delete(&Self::service_id(service), username)
    }

    /// The wrapped store.
    pub fn inner(&self) -> &S {
        &self.store
    }
}
