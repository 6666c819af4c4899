//! Configuration types and CLI options.
//!
//! This module defines the client configuration owned by a [`crate::Client`],
//! the logging enums, and the command-line options of the binary.

use std::collections::HashMap;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::auth::{AuthConfig, AuthType};
use crate::config::constants::{
    DEFAULT_MAX_REDIRECTS, DEFAULT_PROXY_ADDR, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use crate::error_handling::{AuthError, ConfigValidationError};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Configuration for a [`crate::Client`] and the transport it builds.
///
/// Owned exclusively by the client instance. Changing `proxy_enabled` through
/// [`crate::Client::set_proxy_enabled`] rebuilds the transport from this
/// configuration rather than mutating the live one.
///
/// # Examples
///
/// ```
/// use onion_client::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig {
///     proxy_enabled: false,
///     timeout: Duration::from_secs(5),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// SOCKS5 proxy address as `host:port`
    pub proxy_addr: String,

    /// Route every request through the proxy
    pub proxy_enabled: bool,

    /// Per-request timeout (connect + exchange + body)
    pub timeout: Duration,

    /// User-Agent sent with every request
    pub user_agent: String,

    /// Follow HTTP redirects
    pub follow_redirects: bool,

    /// Redirect cap when `follow_redirects` is set
    pub max_redirects: usize,

    /// Verify TLS certificates
    pub verify_tls: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            proxy_addr: DEFAULT_PROXY_ADDR.to_string(),
            proxy_enabled: true,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            follow_redirects: true,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            verify_tls: true,
        }
    }
}

impl ClientConfig {
    /// Validates the configuration before a transport is built from it.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigValidationError`] naming the offending field when
    /// the timeout is zero, or when proxying is enabled and the proxy address
    /// is not `host:port`.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.timeout.is_zero() {
            return Err(ConfigValidationError::new(
                "timeout",
                "must be greater than 0 seconds",
            ));
        }

        if self.proxy_enabled && split_host_port(&self.proxy_addr).is_none() {
            return Err(ConfigValidationError::new(
                "proxy_addr",
                format!(
                    "'{}' is not a valid proxy address (expected host:port, e.g. {})",
                    self.proxy_addr, DEFAULT_PROXY_ADDR
                ),
            ));
        }

        Ok(())
    }
}

/// Splits a `host:port` proxy address.
///
/// Returns `None` when the host is empty or the port is missing, zero or not
/// a number. Bracketed IPv6 hosts (`[::1]:9050`) are accepted.
pub fn split_host_port(addr: &str) -> Option<(&str, u16)> {
    let (host, port) = addr.trim().rsplit_once(':')?;
    if host.is_empty() || host.contains('/') {
        return None;
    }
    if host.contains(':') && !(host.starts_with('[') && host.ends_with(']')) {
        return None;
    }
    match port.parse::<u16>() {
        Ok(0) | Err(_) => None,
        Ok(port) => Some((host, port)),
    }
}

/// Command-line options for the `onion_client` binary.
///
/// # Examples
///
/// ```bash
/// # GET a hidden service through the local Tor daemon
/// onion_client http://duckduckgogg42xjoc72x3sjasowoarfbgcmvfimaftt6twagswzczad.onion
///
/// # POST JSON with a bearer token and a longer timeout
/// onion_client -X POST --json -d '{"q":1}' --bearer TOKEN --timeout-seconds 90 https://api.example.onion/search
///
/// # Only check whether Tor is listening
/// onion_client --check-tor
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "onion_client",
    version,
    about = "Sends HTTP requests to .onion services through Tor and diagnoses failures."
)]
pub struct Opt {
    /// Target URL (http:// or https://)
    #[arg(required_unless_present = "check_tor")]
    pub url: Option<String>,

    /// HTTP method
    #[arg(short = 'X', long, default_value = "GET")]
    pub method: String,

    /// Request header as `Name: Value` (repeatable)
    #[arg(short = 'H', long = "header")]
    pub headers: Vec<String>,

    /// Request body
    #[arg(short = 'd', long = "data")]
    pub body: Option<String>,

    /// Mark the body as JSON (sets Content-Type: application/json)
    #[arg(long)]
    pub json: bool,

    /// Tor SOCKS5 proxy address (host:port)
    #[arg(long, default_value = DEFAULT_PROXY_ADDR)]
    pub proxy: String,

    /// Connect directly instead of through the Tor proxy
    #[arg(long)]
    pub no_tor: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Do not follow redirects
    #[arg(long)]
    pub no_redirects: bool,

    /// Accept invalid TLS certificates (common on self-signed .onion sites)
    #[arg(long)]
    pub insecure: bool,

    /// Bearer token
    #[arg(long, conflicts_with_all = ["api_key", "basic", "auth_header"])]
    pub bearer: Option<String>,

    /// API key
    #[arg(long, conflicts_with_all = ["basic", "auth_header"])]
    pub api_key: Option<String>,

    /// Header or query parameter name for the API key (default: X-API-Key)
    #[arg(long, requires = "api_key")]
    pub api_key_name: Option<String>,

    /// Where to put the API key: header|query
    #[arg(long, requires = "api_key")]
    pub api_key_location: Option<String>,

    /// Basic credentials as `user[:password]`
    #[arg(long, conflicts_with = "auth_header")]
    pub basic: Option<String>,

    /// Custom authentication header as `Name: Value` (repeatable)
    #[arg(long)]
    pub auth_header: Vec<String>,

    /// Only probe the Tor proxy and exit
    #[arg(long)]
    pub check_tor: bool,

    /// Print the full diagnostic report when a request fails
    #[arg(long)]
    pub diagnose: bool,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Opt {
    /// Builds the client configuration described by these options.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            proxy_addr: self.proxy.clone(),
            proxy_enabled: !self.no_tor,
            timeout: Duration::from_secs(self.timeout_seconds),
            user_agent: self.user_agent.clone(),
            follow_redirects: !self.no_redirects,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            verify_tls: !self.insecure,
        }
    }

    /// Builds the authentication configuration selected by the auth flags.
    ///
    /// `--basic` splits on the first colon; a missing password is empty.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] when the selected scheme fails validation.
    pub fn auth_config(&self) -> Result<AuthConfig, AuthError> {
        let mut inputs = HashMap::new();

        let auth_type = if let Some(token) = &self.bearer {
            inputs.insert("token".to_string(), token.clone());
            AuthType::Bearer
        } else if let Some(key) = &self.api_key {
            inputs.insert("api_key".to_string(), key.clone());
            if let Some(name) = &self.api_key_name {
                inputs.insert("key_name".to_string(), name.clone());
            }
            if let Some(location) = &self.api_key_location {
                inputs.insert("location".to_string(), location.clone());
            }
            AuthType::ApiKey
        } else if let Some(credentials) = &self.basic {
            let (username, password) = credentials
                .split_once(':')
                .unwrap_or((credentials.as_str(), ""));
            inputs.insert("username".to_string(), username.to_string());
            inputs.insert("password".to_string(), password.to_string());
            AuthType::Basic
        } else if !self.auth_header.is_empty() {
            inputs.insert("headers".to_string(), self.auth_header.join("\n"));
            AuthType::Custom
        } else {
            AuthType::None
        };

        AuthConfig::from_input(auth_type, &inputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.proxy_addr, "127.0.0.1:9050");
        assert!(config.proxy_enabled);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.user_agent, "OnionCLI/1.0");
        assert!(config.follow_redirects);
        assert!(config.verify_tls);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = ClientConfig {
            timeout: Duration::ZERO,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.field, "timeout");
        assert!(err.message.contains("greater than 0"));
    }

    #[test]
    fn test_validate_rejects_malformed_proxy_addr() {
        for addr in ["", "127.0.0.1", "127.0.0.1:", ":9050", "localhost:notaport", "host:0"] {
            let config = ClientConfig {
                proxy_addr: addr.to_string(),
                ..Default::default()
            };
            let err = config.validate().unwrap_err();
            assert_eq!(err.field, "proxy_addr", "address {:?}", addr);
        }
    }

    #[test]
    fn test_validate_ignores_proxy_addr_when_direct() {
        let config = ClientConfig {
            proxy_addr: "not an address".to_string(),
            proxy_enabled: false,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_split_host_port() {
        assert_eq!(split_host_port("127.0.0.1:9050"), Some(("127.0.0.1", 9050)));
        assert_eq!(split_host_port("tor-proxy:9150"), Some(("tor-proxy", 9150)));
        assert_eq!(split_host_port("[::1]:9050"), Some(("[::1]", 9050)));
        assert_eq!(split_host_port("::1:9050"), None);
        assert_eq!(split_host_port("socks5://127.0.0.1:9050"), None);
        assert_eq!(split_host_port("127.0.0.1:70000"), None);
    }

    #[test]
    fn test_opt_maps_to_client_config() {
        let opt = Opt::parse_from([
            "onion_client",
            "--no-tor",
            "--timeout-seconds",
            "5",
            "--insecure",
            "https://example.com",
        ]);
        let config = opt.client_config();
        assert!(!config.proxy_enabled);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(!config.verify_tls);
        assert!(config.follow_redirects);
        assert_eq!(opt.url.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_opt_check_tor_without_url() {
        let opt = Opt::try_parse_from(["onion_client", "--check-tor"]).unwrap();
        assert!(opt.check_tor);
        assert!(opt.url.is_none());
        assert!(Opt::try_parse_from(["onion_client"]).is_err());
    }

    #[test]
    fn test_opt_auth_config() {
        let parse = |args: &[&str]| {
            let mut argv = vec!["onion_client"];
            argv.extend_from_slice(args);
            argv.push("http://example.com");
            Opt::parse_from(argv).auth_config()
        };

        assert_eq!(parse(&[]).unwrap(), AuthConfig::None);
        assert_eq!(
            parse(&["--bearer", "tok"]).unwrap(),
            AuthConfig::Bearer {
                token: "tok".to_string()
            }
        );
        assert_eq!(
            parse(&["--basic", "alice:pa:ss"]).unwrap(),
            AuthConfig::Basic {
                username: "alice".to_string(),
                password: "pa:ss".to_string()
            }
        );
        assert_eq!(
            parse(&["--basic", "bob"]).unwrap(),
            AuthConfig::Basic {
                username: "bob".to_string(),
                password: String::new()
            }
        );
        assert_eq!(
            parse(&["--api-key", "k", "--api-key-location", "body"]).unwrap_err(),
            AuthError::InvalidLocation("body".to_string())
        );
        assert_eq!(parse(&["--bearer", ""]).unwrap_err(), AuthError::MissingToken);

        let custom = parse(&["--auth-header", "X-Token: 1", "--auth-header", "X-Team: a"]).unwrap();
        assert_eq!(custom.auth_type(), AuthType::Custom);
    }

    #[test]
    fn test_opt_conflicting_auth_flags() {
        let result = Opt::try_parse_from([
            "onion_client",
            "--bearer",
            "abc",
            "--api-key",
            "def",
            "http://example.com",
        ]);
        assert!(result.is_err());
    }
}
