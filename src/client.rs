//! Request dispatcher.
//!
//! [`Client`] validates a request, gates hidden-service targets on the
//! proxy being enabled, and hands the exchange to the current transport.
//! Failures come back undiagnosed as [`SendError`]; callers that want a
//! typed diagnosis pass them to [`crate::ErrorClassifier`].

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;

use chrono::Utc;

use crate::address::{is_hidden_service_address, validate_hidden_service_address};
use crate::config::{ClientConfig, PROXY_PROBE_TIMEOUT};
use crate::error_handling::{ProbeError, SendError, TransportBuildError};
use crate::request::RequestDescriptor;
use crate::response::ResponseDescriptor;
use crate::transport::{build_transport, check_proxy_reachable, Transport};

struct State {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

/// HTTP client that routes `.onion` traffic through a SOCKS5 proxy.
///
/// Sends may run concurrently on a shared `&Client`. Reconfiguration
/// replaces the transport wholesale; sends already in flight finish on the
/// transport they started with.
pub struct Client {
    state: RwLock<State>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("Client")
            .field("config", &state.config)
            .field("proxied", &state.transport.is_proxied())
            .finish()
    }
}

impl Client {
    /// Creates a client with a live transport built from `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportBuildError`] if the configuration is invalid or
    /// the transport cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, TransportBuildError> {
        let transport = build_transport(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Creates a client that sends through `transport`.
    ///
    /// `config` still decides onion gating and what [`Client::set_proxy_enabled`]
    /// rebuilds.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            state: RwLock::new(State { config, transport }),
        }
    }

    /// Returns a copy of the current configuration.
    pub fn config(&self) -> ClientConfig {
        self.read_state().config.clone()
    }

    /// Whether requests are currently routed through the proxy.
    pub fn is_proxy_enabled(&self) -> bool {
        self.read_state().config.proxy_enabled
    }

    /// Sends `request` and returns the materialized response.
    ///
    /// A hidden-service target fails before any network I/O when proxying
    /// is disabled or when the address is malformed. Nothing is retried.
    ///
    /// # Errors
    ///
    /// Returns the raw [`SendError`] for the failing stage.
    pub async fn send(&self, request: &RequestDescriptor) -> Result<ResponseDescriptor, SendError> {
        request.validate()?;

        let (proxy_enabled, transport) = {
            let state = self.read_state();
            (state.config.proxy_enabled, Arc::clone(&state.transport))
        };

        if is_hidden_service_address(&request.url) {
            if !proxy_enabled {
                return Err(SendError::OnionRequiresProxy);
            }
            validate_hidden_service_address(&request.url).map_err(SendError::InvalidOnion)?;
        }

        let start = Instant::now();
        let raw = transport.execute(request).await?;
        let duration = start.elapsed();

        let mut headers = HashMap::with_capacity(raw.headers.len());
        for (name, value) in raw.headers {
            headers.entry(name).or_insert(value);
        }

        Ok(ResponseDescriptor::new(
            raw.status_code,
            raw.status,
            headers,
            raw.body,
            duration,
            Utc::now(),
        ))
    }

    /// Enables or disables proxying, rebuilding the transport.
    ///
    /// A no-op when the state is unchanged. Not meant to race with itself;
    /// concurrent sends are unaffected.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportBuildError`] if the new transport cannot be
    /// built; the previous configuration and transport stay in place.
    pub fn set_proxy_enabled(&self, enabled: bool) -> Result<(), TransportBuildError> {
        let mut config = self.config();
        if config.proxy_enabled == enabled {
            return Ok(());
        }
        config.proxy_enabled = enabled;

        let transport = build_transport(&config)?;

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.config = config;
        state.transport = Arc::new(transport);
        log::debug!(
            "Proxy {}; transport replaced",
            if enabled { "enabled" } else { "disabled" }
        );
        Ok(())
    }

    /// Probes the configured proxy with a bare TCP connect.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::ProxyDisabled`] when proxying is off, otherwise
    /// whatever [`check_proxy_reachable`] reports.
    pub async fn test_proxy_connection(&self) -> Result<(), ProbeError> {
        let (enabled, addr) = {
            let state = self.read_state();
            (state.config.proxy_enabled, state.config.proxy_addr.clone())
        };
        if !enabled {
            return Err(ProbeError::ProxyDisabled);
        }
        log::debug!("Probing proxy at {}", addr);
        check_proxy_reachable(&addr, PROXY_PROBE_TIMEOUT).await
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }
}
