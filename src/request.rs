//! Request descriptor.
//!
//! Plain data built by the caller and handed to [`crate::Client::send`].
//! Header names are stored exactly as given; lookups through
//! [`RequestDescriptor::header`] are case-insensitive. Setting two spellings
//! of the same header (`content-type` and `Content-Type`) keeps both entries,
//! and which one the transport sends last is unspecified.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::{CONTENT_TYPE_JSON, HEADER_CONTENT_TYPE};
use crate::error_handling::ValidationError;

/// An HTTP request described as plain data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    /// Upper-case HTTP method
    pub method: String,
    /// Absolute target URL
    pub url: String,
    /// Header name to value
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Optional raw body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl RequestDescriptor {
    /// Creates a request with an upper-cased method and no headers or body.
    pub fn new(method: &str, url: &str) -> Self {
        Self {
            method: method.trim().to_uppercase(),
            url: url.trim().to_string(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Sets a header, replacing a previous value stored under the same name.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
    }

    /// Looks up a header value, ignoring the case of the name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Sets the raw body. An empty string clears it.
    pub fn set_body(&mut self, body: impl Into<String>) {
        let body = body.into();
        self.body = if body.is_empty() { None } else { Some(body) };
    }

    /// Serializes `data` as the JSON body and sets the JSON content type.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if `data` cannot be serialized.
    pub fn set_json_body<T: Serialize + ?Sized>(&mut self, data: &T) -> Result<(), serde_json::Error> {
        let body = serde_json::to_string(data)?;
        self.body = Some(body);
        self.set_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON);
        Ok(())
    }

    /// Returns true if a `Content-Type` header declares JSON.
    pub fn declares_json(&self) -> bool {
        self.header(HEADER_CONTENT_TYPE)
            .is_some_and(|value| value.to_ascii_lowercase().contains(CONTENT_TYPE_JSON))
    }

    /// Checks the request shape before dispatch.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::MissingUrl`] / [`ValidationError::MissingMethod`] for empty fields
    /// - [`ValidationError::InvalidJsonBody`] when a JSON content type is declared
    ///   and the body does not parse
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.trim().is_empty() {
            return Err(ValidationError::MissingUrl);
        }

        if self.method.trim().is_empty() {
            return Err(ValidationError::MissingMethod);
        }

        if let Some(body) = self.body.as_deref().filter(|b| !b.is_empty()) {
            if self.declares_json() {
                serde_json::from_str::<serde::de::IgnoredAny>(body)
                    .map_err(|e| ValidationError::InvalidJsonBody(e.to_string()))?;
            }
        }

        Ok(())
    }
}
