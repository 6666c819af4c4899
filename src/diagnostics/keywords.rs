//! Keyword tables for error classification.
//!
//! All keywords are lower-case and matched as substrings of the lower-cased
//! error text.

use crate::config::DEFAULT_PROXY_ADDR;

/// Keyword lists consulted by [`crate::ErrorClassifier`], one per category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTables {
    /// Always mark a failure as Tor-related.
    pub tor: Vec<String>,
    /// Mark a failure as Tor-related only when the target is a
    /// hidden-service address.
    pub tor_onion_context: Vec<String>,
    /// Connection-level failures
    pub network: Vec<String>,
    /// Timeouts
    pub timeout: Vec<String>,
    /// Name resolution failures
    pub dns: Vec<String>,
    /// Credential rejections
    pub auth: Vec<String>,
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl Default for KeywordTables {
    fn default() -> Self {
        Self {
            tor: owned(&[
                "socks",
                "proxy",
                "tor",
                "general socks server failure",
                DEFAULT_PROXY_ADDR,
            ]),
            tor_onion_context: owned(&["connection refused"]),
            network: owned(&[
                "connection refused",
                "connection reset",
                "network unreachable",
                "host unreachable",
                "no route to host",
            ]),
            timeout: owned(&["timeout", "timed out", "deadline exceeded"]),
            dns: owned(&["no such host", "dns", "name resolution", "lookup"]),
            auth: owned(&[
                "unauthorized",
                "authentication",
                "401",
                "403",
                "forbidden",
                "invalid credentials",
            ]),
        }
    }
}

impl KeywordTables {
    /// Adds `keyword` (lower-cased) to the unconditional Tor list.
    pub fn add_tor_keyword(&mut self, keyword: &str) {
        let keyword = keyword.trim().to_lowercase();
        if !keyword.is_empty() && !self.tor.contains(&keyword) {
            self.tor.push(keyword);
        }
    }

    pub(crate) fn matches(words: &[String], text: &str) -> bool {
        words.iter().any(|w| text.contains(w.as_str()))
    }
}
