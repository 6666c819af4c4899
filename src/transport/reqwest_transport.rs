//! reqwest-backed transport.
//!
//! This module provides the function that turns a [`ClientConfig`] into a
//! configured `reqwest::Client`, plus the [`Transport`] impl on top of it.

use async_trait::async_trait;
use reqwest::redirect::Policy;
use reqwest::{ClientBuilder, Method, Proxy};

use crate::config::{ClientConfig, SOCKS_SCHEME};
use crate::error_handling::{TransportBuildError, TransportError};
use crate::request::RequestDescriptor;
use crate::transport::{RawResponse, Transport};

/// Transport backed by a `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    proxy_addr: Option<String>,
}

impl ReqwestTransport {
    /// Proxy address every connection dials through, if any.
    pub fn proxy_addr(&self) -> Option<&str> {
        self.proxy_addr.as_deref()
    }
}

/// Builds the transport described by `config`.
///
/// Creates a `reqwest::Client` configured with:
/// - Timeout and User-Agent from the configuration
/// - Redirect policy (limited to `max_redirects`, or disabled)
/// - TLS certificate verification unless `verify_tls` is off
///
/// With proxying enabled every connection is dialed through
/// `socks5h://<proxy_addr>`, so host names (including `.onion`) are resolved
/// by the proxy, and idle connections are never pooled. With proxying
/// disabled the client ignores environment proxy settings and connects
/// directly.
///
/// # Errors
///
/// Returns a [`TransportBuildError`] if the configuration does not validate,
/// the proxy URL is rejected, or the client cannot be built. A failed
/// proxied build never degrades to a direct client.
pub fn build_transport(config: &ClientConfig) -> Result<ReqwestTransport, TransportBuildError> {
    config.validate()?;

    let redirect = if config.follow_redirects {
        Policy::limited(config.max_redirects)
    } else {
        Policy::none()
    };

    let mut builder = ClientBuilder::new()
        .timeout(config.timeout)
        .user_agent(config.user_agent.clone())
        .redirect(redirect)
        .danger_accept_invalid_certs(!config.verify_tls);

    let proxy_addr = if config.proxy_enabled {
        let proxy_url = format!("{}://{}", SOCKS_SCHEME, config.proxy_addr.trim());
        let proxy = Proxy::all(&proxy_url).map_err(|source| TransportBuildError::Proxy {
            addr: config.proxy_addr.clone(),
            source,
        })?;
        // Tor circuits rotate; pooled keep-alive connections would outlive them
        builder = builder.proxy(proxy).pool_max_idle_per_host(0);
        Some(config.proxy_addr.trim().to_string())
    } else {
        builder = builder.no_proxy();
        None
    };

    let client = builder.build()?;

    match &proxy_addr {
        Some(addr) => log::debug!(
            "Built SOCKS5 transport via {} (timeout {:?}, keep-alive disabled)",
            addr,
            config.timeout
        ),
        None => log::debug!("Built direct transport (timeout {:?})", config.timeout),
    }

    Ok(ReqwestTransport { client, proxy_addr })
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: &RequestDescriptor) -> Result<RawResponse, TransportError> {
        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|_| TransportError::InvalidMethod(request.method.clone()))?;

        let mut builder = self.client.request(method, request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;

        let status = response.status();
        let status_line = match status.canonical_reason() {
            Some(reason) => format!("{} {}", status.as_u16(), reason),
            None => status.as_u16().to_string(),
        };
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        let body = response.text().await.map_err(TransportError::Body)?;

        Ok(RawResponse {
            status_code: status.as_u16(),
            status: status_line,
            headers,
            body,
        })
    }

    fn is_proxied(&self) -> bool {
        self.proxy_addr.is_some()
    }
}
