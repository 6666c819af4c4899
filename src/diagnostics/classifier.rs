//! Error classification.
//!
//! Classification looks at two things:
//! - Typed signals found by walking the error chain: reqwest timeout flags,
//!   `std::io::ErrorKind`, and this crate's pre-network errors
//! - Keyword matches against the lower-cased, chain-joined error text
//!
//! The first category that matches wins, in this order: validation, Tor,
//! network, timeout, DNS, auth, unknown.

use std::io::ErrorKind;

use crate::address::is_hidden_service_address;
use crate::config::{split_host_port, DEFAULT_PROXY_ADDR, DEFAULT_PROXY_PORT};
use crate::diagnostics::keywords::KeywordTables;
use crate::diagnostics::types::{DiagnosticError, ErrorType};
use crate::error_handling::{AuthError, ProbeError, ValidationError};
use crate::response::ResponseDescriptor;

/// Typed facts gathered from an error chain.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct ChainSignals {
    timeout: bool,
    transient: bool,
    pre_network: bool,
}

fn inspect_chain(error: &anyhow::Error) -> ChainSignals {
    let mut signals = ChainSignals::default();

    for cause in error.chain() {
        if let Some(e) = cause.downcast_ref::<reqwest::Error>() {
            signals.timeout |= e.is_timeout();
        }
        if let Some(e) = cause.downcast_ref::<std::io::Error>() {
            match e.kind() {
                ErrorKind::TimedOut => signals.timeout = true,
                ErrorKind::ConnectionReset
                | ErrorKind::ConnectionAborted
                | ErrorKind::BrokenPipe => signals.transient = true,
                _ => {}
            }
        }
        if let Some(ProbeError::Timeout { .. }) = cause.downcast_ref::<ProbeError>() {
            signals.timeout = true;
        }
        if cause.is::<ValidationError>() || cause.is::<AuthError>() {
            signals.pre_network = true;
        }
    }

    signals
}

/// Turns raw errors and failed responses into [`DiagnosticError`]s.
///
/// Stateless apart from its keyword tables; one instance can be shared.
#[derive(Debug, Clone)]
pub struct ErrorClassifier {
    keywords: KeywordTables,
    proxy_addr: String,
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self {
            keywords: KeywordTables::default(),
            proxy_addr: DEFAULT_PROXY_ADDR.to_string(),
        }
    }
}

impl ErrorClassifier {
    /// Classifier with the default keyword tables and proxy address.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the keyword tables.
    pub fn with_keywords(mut self, keywords: KeywordTables) -> Self {
        self.keywords = keywords;
        self
    }

    /// Uses `addr` as the proxy address in suggestions and treats its
    /// appearance in error text as a Tor failure.
    pub fn with_proxy_address(mut self, addr: &str) -> Self {
        self.keywords.add_tor_keyword(addr);
        self.proxy_addr = addr.trim().to_string();
        self
    }

    /// Current keyword tables.
    pub fn keywords(&self) -> &KeywordTables {
        &self.keywords
    }

    /// Classifies `error` raised while requesting `request_url`.
    ///
    /// Never fails; unmatched errors become [`ErrorType::Unknown`]. The
    /// error is kept as the diagnosis' cause.
    pub fn classify<E>(&self, error: E, request_url: &str) -> DiagnosticError
    where
        E: Into<anyhow::Error>,
    {
        let error = error.into();
        let text = format!("{:#}", error);
        let lower = text.to_lowercase();
        let signals = inspect_chain(&error);
        let is_onion = is_hidden_service_address(request_url);
        let kw = &self.keywords;

        let error_type = if signals.pre_network {
            ErrorType::Validation
        } else if KeywordTables::matches(&kw.tor, &lower)
            || (is_onion && KeywordTables::matches(&kw.tor_onion_context, &lower))
        {
            ErrorType::Tor
        } else if signals.transient || KeywordTables::matches(&kw.network, &lower) {
            ErrorType::Network
        } else if signals.timeout || KeywordTables::matches(&kw.timeout, &lower) {
            ErrorType::Timeout
        } else if KeywordTables::matches(&kw.dns, &lower) {
            ErrorType::Dns
        } else if KeywordTables::matches(&kw.auth, &lower) {
            ErrorType::Auth
        } else {
            ErrorType::Unknown
        };

        let (prefix, suggestions) = match error_type {
            ErrorType::Validation => ("Invalid request", validation_suggestions(is_onion)),
            ErrorType::Tor => ("Tor connection failed", self.tor_suggestions(&lower)),
            ErrorType::Network => ("Network error", network_suggestions(&lower, is_onion)),
            ErrorType::Timeout => ("Request timeout", timeout_suggestions(is_onion)),
            ErrorType::Dns => ("DNS resolution failed", dns_suggestions(is_onion)),
            ErrorType::Auth => ("Authentication failed", auth_suggestions()),
            ErrorType::Http | ErrorType::Unknown => ("Request failed", generic_suggestions()),
        };

        log::debug!("Classified error for {} as {}", request_url, error_type);

        DiagnosticError {
            error_type,
            message: format!("{}: {}", prefix, text),
            cause: Some(error),
            suggestions,
            url: (!request_url.is_empty()).then(|| request_url.to_string()),
            status_code: None,
        }
    }

    /// Diagnoses a received response whose status signals failure.
    ///
    /// 401 and 403 become [`ErrorType::Auth`], any other 4xx or 5xx becomes
    /// [`ErrorType::Http`]. Returns `None` for 1xx, 2xx and 3xx.
    pub fn classify_response(
        &self,
        response: &ResponseDescriptor,
        request_url: &str,
    ) -> Option<DiagnosticError> {
        let code = response.status_code();
        if code < 400 {
            return None;
        }

        let (error_type, message, suggestions) = match code {
            401 | 403 => (
                ErrorType::Auth,
                format!("Authentication failed: HTTP {}", response.status()),
                auth_suggestions(),
            ),
            _ => (
                ErrorType::Http,
                format!("HTTP error: {}", response.status()),
                http_suggestions(code),
            ),
        };

        Some(DiagnosticError {
            error_type,
            message,
            cause: None,
            suggestions,
            url: (!request_url.is_empty()).then(|| request_url.to_string()),
            status_code: Some(code),
        })
    }

    fn tor_suggestions(&self, lower: &str) -> Vec<String> {
        let port = split_host_port(&self.proxy_addr)
            .map(|(_, port)| port)
            .unwrap_or(DEFAULT_PROXY_PORT);

        let mut suggestions = vec![
            "Check if Tor is installed and running".to_string(),
            format!("Verify Tor is listening on port {port}: netstat -tlnp | grep {port}"),
            "Start the Tor service: sudo systemctl start tor (Linux) or brew services start tor (macOS)"
                .to_string(),
            "Check Tor configuration in /etc/tor/torrc".to_string(),
        ];

        if lower.contains("connection refused") {
            suggestions.push(format!(
                "Tor proxy is not running or not accessible on {}",
                self.proxy_addr
            ));
        }
        if lower.contains("general socks server failure") {
            suggestions.push("The .onion service might be down or unreachable".to_string());
            suggestions.push("Try a different .onion URL to test Tor connectivity".to_string());
        }
        if lower.contains("circuit") {
            suggestions.push("Tor circuits are rebuilt regularly; retrying may succeed".to_string());
        }

        suggestions
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn validation_suggestions(is_onion: bool) -> Vec<String> {
    let mut suggestions = strings(&[
        "Check that the URL and method are filled in",
        "Use an http:// or https:// URL",
        "Make sure a JSON body is valid JSON",
        "Fill in every required authentication field",
    ]);
    if is_onion {
        suggestions.push(
            "Onion addresses are 16 or 56 lowercase letters a-z and digits 2-7 followed by .onion"
                .to_string(),
        );
    }
    suggestions
}

fn network_suggestions(lower: &str, is_onion: bool) -> Vec<String> {
    let mut suggestions = strings(&[
        "Check your internet connection",
        "Verify the URL is correct and accessible",
    ]);
    if is_onion {
        suggestions.extend(strings(&[
            "Ensure Tor is running and properly configured",
            "Try accessing a regular website to test connectivity",
        ]));
    } else {
        suggestions.extend(strings(&[
            "Try accessing the URL in a web browser",
            "Check if the service is currently available",
        ]));
    }
    if lower.contains("connection refused") {
        suggestions
            .push("The server is not accepting connections on the specified port".to_string());
    }
    suggestions
}

fn timeout_suggestions(is_onion: bool) -> Vec<String> {
    let mut suggestions = strings(&[
        "Increase the request timeout",
        "Check your internet connection speed",
    ]);
    if is_onion {
        suggestions.extend(strings(&[
            "Tor requests typically take longer; consider a timeout of 60 seconds or more",
            "The .onion service might be slow or overloaded",
            "Try the request again, Tor circuits can be slow to build",
        ]));
    } else {
        suggestions.extend(strings(&[
            "The server might be overloaded or slow to respond",
            "Try the request again later",
        ]));
    }
    suggestions
}

fn dns_suggestions(is_onion: bool) -> Vec<String> {
    if is_onion {
        strings(&[
            "DNS errors for .onion URLs indicate a Tor configuration issue",
            "Ensure requests are routed through the Tor proxy",
            "Check that Tor is running and properly configured",
        ])
    } else {
        strings(&[
            "Check if the domain name is spelled correctly",
            "Try using a different DNS server (8.8.8.8, 1.1.1.1)",
            "Check your network's DNS configuration",
        ])
    }
}

fn auth_suggestions() -> Vec<String> {
    strings(&[
        "Check your authentication credentials",
        "Verify the authentication method is correct",
        "Ensure API keys or tokens are valid and not expired",
        "Check if the authentication headers are properly formatted",
    ])
}

fn http_suggestions(code: u16) -> Vec<String> {
    let mut suggestions = Vec::new();
    match code {
        404 => suggestions.push("Verify the endpoint path".to_string()),
        405 => suggestions.push("Check that the endpoint accepts this HTTP method".to_string()),
        429 => suggestions.push("The server is rate limiting requests; wait before retrying".to_string()),
        500..=599 => {
            suggestions.push("The server encountered an error; try again later".to_string())
        }
        _ => {}
    }
    if (400..500).contains(&code) {
        suggestions.push("Check the request URL, headers and body".to_string());
    }
    suggestions
}

fn generic_suggestions() -> Vec<String> {
    strings(&[
        "Check the error message for specific details",
        "Verify the request URL and parameters",
        "Try the request again",
    ])
}
