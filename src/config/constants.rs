//! Configuration constants.
//!
//! Defaults for the client configuration, the proxy probe, and the
//! authentication helpers.

use std::time::Duration;

/// Default Tor SOCKS5 proxy address (host:port).
pub const DEFAULT_PROXY_ADDR: &str = "127.0.0.1:9050";

/// Default Tor SOCKS port, used in remediation hints.
pub const DEFAULT_PROXY_PORT: u16 = 9050;

/// Default per-request timeout in seconds.
///
/// Tor circuits to hidden services are slow to build, so this is
/// deliberately longer than a typical clearnet client timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Timeout for the bare TCP reachability probe against the proxy.
pub const PROXY_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Default User-Agent string for outgoing requests.
pub const DEFAULT_USER_AGENT: &str = "OnionCLI/1.0";

/// Maximum number of redirects followed when redirect following is enabled.
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// Header used for API-key authentication when no key name is given.
pub const DEFAULT_API_KEY_HEADER: &str = "X-API-Key";

/// Prefix applied to every credential-store service identifier.
pub const CREDENTIAL_SERVICE_PREFIX: &str = "onioncli";

/// Maximum diagnostic message length in characters.
/// Longer messages are truncated with a note about the original length.
pub const MAX_ERROR_MESSAGE_LENGTH: usize = 2000;

/// Proxy URL scheme. `socks5h` resolves host names at the proxy, which is
/// required for `.onion` targets.
pub const SOCKS_SCHEME: &str = "socks5h";
