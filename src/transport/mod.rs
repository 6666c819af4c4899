//! Transport selection.
//!
//! A [`Transport`] performs one HTTP exchange for a [`RequestDescriptor`].
//! The live implementation is [`ReqwestTransport`], built by
//! [`build_transport`] either as a direct client or as a client whose every
//! TCP dial goes through the configured SOCKS5 proxy.
//!
//! Transports are read-only once constructed. Reconfiguration builds a new
//! one and swaps it in; requests already running keep the instance they
//! started with.

mod probe;
mod reqwest_transport;

use async_trait::async_trait;

use crate::error_handling::TransportError;
use crate::request::RequestDescriptor;

pub use probe::check_proxy_reachable;
pub use reqwest_transport::{build_transport, ReqwestTransport};

/// Response head and body as delivered by a transport, before the
/// dispatcher flattens headers and stamps timing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponse {
    /// Numeric status code
    pub status_code: u16,
    /// Status line text, e.g. `200 OK`
    pub status: String,
    /// Headers in wire order; a name may repeat
    pub headers: Vec<(String, String)>,
    /// Full body text
    pub body: String,
}

/// Performs HTTP exchanges.
///
/// Implementations must be safe to share between concurrent sends and must
/// not retry on their own.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` and returns the full response.
    async fn execute(&self, request: &RequestDescriptor) -> Result<RawResponse, TransportError>;

    /// True when connections are tunneled through a proxy.
    fn is_proxied(&self) -> bool;
}
