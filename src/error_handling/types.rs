//! Error type definitions.
//!
//! Every failure the core can produce before diagnosis. Diagnosed errors live
//! in [`crate::diagnostics`].

use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// A configuration value that failed validation.
///
/// `field` names the offending setting so the caller can point the user at
/// the exact flag or config key to fix.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {field}: {message}")]
pub struct ConfigValidationError {
    /// Name of the offending setting
    pub field: &'static str,
    /// What is wrong and what is expected
    pub message: String,
}

impl ConfigValidationError {
    pub(crate) fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// A request or target address rejected before any network I/O.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The request has an empty URL.
    #[error("URL is required")]
    MissingUrl,

    /// The request has an empty method.
    #[error("HTTP method is required")]
    MissingMethod,

    /// The body was declared as JSON but does not parse.
    #[error("invalid JSON body: {0}")]
    InvalidJsonBody(String),

    /// The URL could not be parsed.
    #[error("invalid URL format: {0}")]
    InvalidUrl(String),

    /// The URL scheme is neither `http` nor `https`.
    #[error("unsupported scheme: {0} (use http or https)")]
    UnsupportedScheme(String),

    /// The host is not a hidden-service address.
    #[error("not a valid .onion address: {0}")]
    NotOnionAddress(String),
}

/// An authentication configuration that is missing required fields or
/// cannot be applied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// API-key auth without a key.
    #[error("API key is required")]
    MissingApiKey,

    /// Bearer auth without a token.
    #[error("bearer token is required")]
    MissingToken,

    /// Basic auth without a username.
    #[error("username is required for basic auth")]
    MissingUsername,

    /// Custom auth without any header.
    #[error("custom headers are required")]
    MissingCustomHeaders,

    /// API-key location other than `header` or `query`.
    #[error("API key location must be 'header' or 'query', got '{0}'")]
    InvalidLocation(String),

    /// Unknown authentication type name.
    #[error("unsupported authentication type: {0}")]
    UnsupportedType(String),

    /// Query placement on a request whose URL does not parse.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Failure to construct a transport from a [`crate::ClientConfig`].
///
/// Fatal to that configuration attempt; there is no fallback to a direct
/// connection when the proxied transport cannot be built.
#[derive(Error, Debug)]
pub enum TransportBuildError {
    /// The configuration did not validate.
    #[error(transparent)]
    InvalidConfig(#[from] ConfigValidationError),

    /// reqwest rejected the SOCKS5 proxy URL.
    #[error("failed to create SOCKS5 proxy for {addr}")]
    Proxy {
        /// Configured proxy address
        addr: String,
        /// Underlying reqwest error
        #[source]
        source: reqwest::Error,
    },

    /// reqwest could not build the HTTP client.
    #[error("failed to build HTTP client")]
    Client(#[from] reqwest::Error),
}

/// Failure reported by a transport while performing an exchange.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The HTTP exchange failed (connect, proxy handshake, TLS, timeout, ...).
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The response head arrived but the body could not be read.
    #[error("failed to read response body")]
    Body(#[source] reqwest::Error),

    /// The request method is not a valid HTTP token.
    #[error("invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// Failure reported by a non-reqwest transport.
    #[error("{0}")]
    Custom(String),
}

/// Raw, undiagnosed failure of [`crate::Client::send`].
///
/// Pass it to [`crate::ErrorClassifier::classify`] to get a typed diagnosis
/// with remediation suggestions.
#[derive(Error, Debug)]
pub enum SendError {
    /// The request failed validation.
    #[error("request validation failed")]
    Validation(#[from] ValidationError),

    /// A hidden-service target was requested while proxying is disabled.
    #[error(".onion URLs require Tor to be enabled")]
    OnionRequiresProxy,

    /// A hidden-service target failed the strict format check.
    #[error("invalid .onion URL")]
    InvalidOnion(#[source] ValidationError),

    /// The transport failed to perform the exchange.
    #[error("failed to send request")]
    Transport(#[from] TransportError),
}

/// Failure of the bare TCP reachability probe against the proxy.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// Proxying is disabled on the client, so there is nothing to probe.
    #[error("Tor is not enabled")]
    ProxyDisabled,

    /// The TCP connect failed.
    #[error("cannot connect to Tor proxy at {addr} (is Tor running?)")]
    Unreachable {
        /// Probed proxy address
        addr: String,
        /// Underlying connect error
        #[source]
        source: std::io::Error,
    },

    /// The TCP connect did not complete within the probe timeout.
    #[error("timed out connecting to Tor proxy at {addr} after {secs}s (is Tor running?)", secs = .timeout.as_secs())]
    Timeout {
        /// Probed proxy address
        addr: String,
        /// Probe timeout
        timeout: std::time::Duration,
    },
}

/// Failure of a [`crate::auth::CredentialStore`] operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// Nothing is stored under the service and username.
    #[error("no credential stored for {username} in {service}")]
    NotFound {
        /// Namespaced service identifier
        service: String,
        /// Account name
        username: String,
    },

    /// The backing secret store failed.
    #[error("credential store error: {0}")]
    Backend(String),
}
