//! HTTP header name constants.
//!
//! Header names and values shared by the request model, the authentication
//! helpers and the response renderer.

/// Standard authorization header.
pub const HEADER_AUTHORIZATION: &str = "Authorization";
/// Content type header.
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
/// Media type that marks a body as JSON.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Substrings (lower-case) that mark a header name as secret-bearing.
///
/// Used when masking custom authentication headers for display. Matching is
/// a case-insensitive substring test, so `X-Upstream-Secret` is caught by
/// `secret`.
pub const SENSITIVE_HEADER_PATTERNS: &[&str] = &[
    "authorization",
    "x-api-key",
    "x-auth-token",
    "x-access-token",
    "api-key",
    "apikey",
    "auth-token",
    "access-token",
    "secret",
    "password",
    "cookie",
];

/// Returns true if `name` looks like a header that carries a credential.
pub fn is_sensitive_header(name: &str) -> bool {
    let lower = name.to_lowercase();
    SENSITIVE_HEADER_PATTERNS
        .iter()
        .any(|pattern| lower.contains(pattern))
}
