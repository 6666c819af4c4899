//! Display-safe copies of authentication configurations.

use crate::auth::types::AuthConfig;
use crate::config::is_sensitive_header;

const SHORT_MASK: &str = "****";
const PASSWORD_MASK: &str = "********";
const VISIBLE_CHARS: usize = 3;

/// Masks a secret, keeping the first and last three characters of values
/// longer than eight characters. Shorter values, empty ones included,
/// become a fixed mask so their length is not revealed.
pub fn mask_secret(secret: &str) -> String {
    let len = secret.chars().count();
    if len <= 8 {
        return SHORT_MASK.to_string();
    }
    let head: String = secret.chars().take(VISIBLE_CHARS).collect();
    let tail: String = secret.chars().skip(len - VISIBLE_CHARS).collect();
    format!("{head}{SHORT_MASK}{tail}")
}

impl AuthConfig {
    /// Returns a copy safe to display or log.
    ///
    /// Keys and tokens are partially masked, passwords fully masked, and
    /// custom header values masked only when the header name looks
    /// credential-bearing.
    pub fn masked(&self) -> AuthConfig {
        match self {
            AuthConfig::None => AuthConfig::None,
            AuthConfig::ApiKey {
                key,
                key_name,
                location,
            } => AuthConfig::ApiKey {
                key: mask_secret(key),
                key_name: key_name.clone(),
                location: *location,
            },
            AuthConfig::Bearer { token } => AuthConfig::Bearer {
                token: mask_secret(token),
            },
            AuthConfig::Basic { username, password } => AuthConfig::Basic {
                username: username.clone(),
                password: if password.is_empty() {
                    String::new()
                } else {
                    PASSWORD_MASK.to_string()
                },
            },
            AuthConfig::Custom { headers } => AuthConfig::Custom {
                headers: headers
                    .iter()
                    .map(|(name, value)| {
                        let shown = if is_sensitive_header(name) {
                            mask_secret(value)
                        } else {
                            value.clone()
                        };
                        (name.clone(), shown)
                    })
                    .collect(),
            },
        }
    }
}
