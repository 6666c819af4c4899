//! Response descriptor.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::{CONTENT_TYPE_JSON, HEADER_CONTENT_TYPE};

/// A completed HTTP exchange, immutable once constructed.
///
/// Repeated response headers are flattened to their first value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseDescriptor {
    status_code: u16,
    status: String,
    headers: HashMap<String, String>,
    body: String,
    duration: Duration,
    timestamp: DateTime<Utc>,
}

impl ResponseDescriptor {
    /// Creates a response from its materialized parts.
    pub fn new(
        status_code: u16,
        status: impl Into<String>,
        headers: HashMap<String, String>,
        body: impl Into<String>,
        duration: Duration,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            status_code,
            status: status.into(),
            headers,
            body: body.into(),
            duration,
            timestamp,
        }
    }

    /// Numeric status code.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Status line text, e.g. `200 OK`.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Flattened response headers.
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Looks up a header value, ignoring the case of the name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Response body as text.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Time from dispatch to fully read body.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// When the exchange completed.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// 4xx
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code)
    }

    /// 5xx
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code)
    }

    /// Returns the body re-indented when it is JSON.
    ///
    /// Bodies without a JSON content type, or that fail to parse, are
    /// returned unchanged.
    pub fn pretty_json(&self) -> String {
        let is_json = self
            .header(HEADER_CONTENT_TYPE)
            .is_some_and(|value| value.to_ascii_lowercase().contains(CONTENT_TYPE_JSON));
        if self.body.is_empty() || !is_json {
            return self.body.clone();
        }

        serde_json::from_str::<serde_json::Value>(&self.body)
            .ok()
            .and_then(|value| serde_json::to_string_pretty(&value).ok())
            .unwrap_or_else(|| self.body.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status_code: u16, content_type: Option<&str>, body: &str) -> ResponseDescriptor {
        let mut headers = HashMap::new();
        if let Some(ct) = content_type {
            headers.insert("content-type".to_string(), ct.to_string());
        }
        ResponseDescriptor::new(
            status_code,
            format!("{status_code}"),
            headers,
            body,
            Duration::from_millis(12),
            Utc::now(),
        )
    }

    #[test]
    fn test_status_predicates() {
        assert!(response(200, None, "").is_success());
        assert!(response(299, None, "").is_success());
        assert!(!response(300, None, "").is_success());
        assert!(response(404, None, "").is_client_error());
        assert!(!response(404, None, "").is_server_error());
        assert!(response(503, None, "").is_server_error());
        assert!(!response(199, None, "").is_success());
    }

    #[test]
    fn test_header_lookup_case_insensitive() {
        let resp = response(200, Some("text/html"), "");
        assert_eq!(resp.header("Content-Type"), Some("text/html"));
        assert_eq!(resp.header("X-Missing"), None);
    }

    #[test]
    fn test_pretty_json_indents() {
        let resp = response(200, Some("application/json"), r#"{"a":1,"b":[true]}"#);
        let pretty = resp.pretty_json();
        assert!(pretty.contains('\n'));
        assert!(pretty.contains("\"a\": 1"));
    }

    #[test]
    fn test_pretty_json_passthrough() {
        let resp = response(200, Some("text/plain"), r#"{"a":1}"#);
        assert_eq!(resp.pretty_json(), r#"{"a":1}"#);

        let resp = response(200, Some("application/json"), "not json");
        assert_eq!(resp.pretty_json(), "not json");

        let resp = response(200, None, r#"{"a":1}"#);
        assert_eq!(resp.pretty_json(), r#"{"a":1}"#);
    }
}
