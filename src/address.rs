//! Hidden-service address classification.
//!
//! Two checks with different strictness:
//! - [`is_hidden_service_address`] is advisory: malformed input is simply
//!   "not onion".
//! - [`validate_hidden_service_address`] is the gate run before dispatch and
//!   reports why a target was rejected.
//!
//! A host counts as a hidden service only when it is exactly 16 (legacy v2)
//! or 56 (v3) lower-case base32 characters followed by `.onion`. Lookalike
//! domains, mixed case and other lengths are rejected.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::error_handling::ValidationError;

static ONION_HOST: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(?:[a-z2-7]{16}|[a-z2-7]{56})\.onion$").ok());

/// Returns true if the URL's host is a well-formed hidden-service address.
///
/// # Examples
///
/// ```
/// use onion_client::is_hidden_service_address;
///
/// assert!(is_hidden_service_address("http://3g2upl4pq6kufc4m.onion"));
/// assert!(!is_hidden_service_address("http://example.com"));
/// assert!(!is_hidden_service_address("not a url"));
/// ```
pub fn is_hidden_service_address(raw_url: &str) -> bool {
    if Url::parse(raw_url).is_err() {
        return false;
    }
    raw_host(raw_url).is_some_and(is_hidden_service_host)
}

/// Returns true if `host` alone is a well-formed hidden-service host name.
pub fn is_hidden_service_host(host: &str) -> bool {
    ONION_HOST.as_ref().is_some_and(|re| re.is_match(host))
}

/// Validates that a URL is an `http`/`https` URL whose host is a
/// hidden-service address.
///
/// # Errors
///
/// - [`ValidationError::InvalidUrl`] if the URL does not parse
/// - [`ValidationError::UnsupportedScheme`] for any scheme other than `http` or `https`
/// - [`ValidationError::NotOnionAddress`] if the host is not a hidden-service address
pub fn validate_hidden_service_address(raw_url: &str) -> Result<(), ValidationError> {
    let url = Url::parse(raw_url).map_err(|e| ValidationError::InvalidUrl(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(ValidationError::UnsupportedScheme(scheme.to_string())),
    }

    let host = raw_host(raw_url).unwrap_or_default();
    if !is_hidden_service_host(host) {
        return Err(ValidationError::NotOnionAddress(host.to_string()));
    }

    Ok(())
}

/// Extracts the host exactly as written in the URL.
///
/// `Url` lower-cases domain hosts while parsing, which would let a mixed-case
/// lookalike pass the pattern; the check must see the original spelling.
fn raw_host(raw_url: &str) -> Option<&str> {
    let (_, rest) = raw_url.split_once("://")?;
    let authority = rest
        .split(|c| matches!(c, '/' | '?' | '#'))
        .next()
        .unwrap_or_default();
    let host_port = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host_port)| host_port);

    if host_port.starts_with('[') {
        // IPv6 literal, never a hidden service
        return host_port.find(']').map(|end| &host_port[..=end]);
    }

    let host = host_port
        .rsplit_once(':')
        .map_or(host_port, |(host, _)| host);
    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}
