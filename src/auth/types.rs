//! Authentication configuration types.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterMacro, EnumString};

use crate::error_handling::AuthError;

/// Supported authentication schemes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIterMacro,
    Display,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AuthType {
    /// No credentials
    None,
    /// API key in a header or query parameter
    ApiKey,
    /// Bearer token
    Bearer,
    /// Username and password
    Basic,
    /// Arbitrary headers
    Custom,
}

impl AuthType {
    /// All schemes, in display order.
    pub fn all() -> Vec<AuthType> {
        AuthType::iter().collect()
    }

    /// Human-readable description for pickers and help text.
    pub fn description(&self) -> &'static str {
        match self {
            AuthType::None => "No authentication",
            AuthType::ApiKey => "API Key (header or query parameter)",
            AuthType::Bearer => "Bearer Token (Authorization header)",
            AuthType::Basic => "Basic Authentication (username/password)",
            AuthType::Custom => "Custom headers",
        }
    }

    /// Parses a scheme name such as `api_key`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UnsupportedType`] for unknown names.
    pub fn parse(name: &str) -> Result<Self, AuthError> {
        AuthType::from_str(name.trim()).map_err(|_| AuthError::UnsupportedType(name.to_string()))
    }
}

/// Where an API key is placed on the request.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, AsRefStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    /// Request header (default)
    #[default]
    Header,
    /// URL query parameter
    Query,
}

impl ApiKeyLocation {
    /// Parses a placement name. Empty input selects [`ApiKeyLocation::Header`].
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidLocation`] for anything other than
    /// `header` or `query`.
    pub fn parse(value: &str) -> Result<Self, AuthError> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(ApiKeyLocation::Header);
        }
        ApiKeyLocation::from_str(value).map_err(|_| AuthError::InvalidLocation(value.to_string()))
    }
}

/// Authentication scheme with the credentials it needs.
///
/// Created once per session and reused across sends. Run
/// [`AuthConfig::validate`] before committing user-entered values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthConfig {
    /// No credentials.
    #[default]
    None,

    /// API key in a header or query parameter.
    ApiKey {
        /// Secret key value
        key: String,
        /// Header or parameter name; [`crate::config::DEFAULT_API_KEY_HEADER`] when unset
        #[serde(default, skip_serializing_if = "Option::is_none")]
        key_name: Option<String>,
        /// Placement
        #[serde(default)]
        location: ApiKeyLocation,
    },

    /// `Authorization: Bearer <token>`.
    Bearer {
        /// Bearer token
        token: String,
    },

    /// `Authorization: Basic <base64(username:password)>`.
    Basic {
        /// Account name
        username: String,
        /// Password, may be empty
        #[serde(default)]
        password: String,
    },

    /// Arbitrary headers copied verbatim onto the request.
    Custom {
        /// Header name to value
        headers: HashMap<String, String>,
    },
}

impl AuthConfig {
    /// The scheme this configuration uses.
    pub fn auth_type(&self) -> AuthType {
        match self {
            AuthConfig::None => AuthType::None,
            AuthConfig::ApiKey { .. } => AuthType::ApiKey,
            AuthConfig::Bearer { .. } => AuthType::Bearer,
            AuthConfig::Basic { .. } => AuthType::Basic,
            AuthConfig::Custom { .. } => AuthType::Custom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_type_names() {
        let names: Vec<String> = AuthType::all().iter().map(|t| t.to_string()).collect();
        assert_eq!(names, vec!["none", "api_key", "bearer", "basic", "custom"]);
    }

    #[test]
    fn test_auth_type_parse() {
        assert_eq!(AuthType::parse("api_key").unwrap(), AuthType::ApiKey);
        assert_eq!(AuthType::parse(" bearer ").unwrap(), AuthType::Bearer);
        assert_eq!(
            AuthType::parse("oauth"),
            Err(AuthError::UnsupportedType("oauth".to_string()))
        );
    }

    #[test]
    fn test_every_auth_type_has_description() {
        for auth_type in AuthType::all() {
            assert!(!auth_type.description().is_empty());
        }
    }

    #[test]
    fn test_location_parse() {
        assert_eq!(ApiKeyLocation::parse("").unwrap(), ApiKeyLocation::Header);
        assert_eq!(ApiKeyLocation::parse("query").unwrap(), ApiKeyLocation::Query);
        assert_eq!(
            ApiKeyLocation::parse("cookie"),
            Err(AuthError::InvalidLocation("cookie".to_string()))
        );
        // exact match only
        assert!(ApiKeyLocation::parse("Header").is_err());
    }

    #[test]
    fn test_serde_tagging() {
        let config = AuthConfig::Bearer {
            token: "abc".to_string(),
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["type"], "bearer");
        assert_eq!(json["token"], "abc");

        let parsed: AuthConfig =
            serde_json::from_str(r#"{"type":"api_key","key":"k"}"#).unwrap();
        assert_eq!(
            parsed,
            AuthConfig::ApiKey {
                key: "k".to_string(),
                key_name: None,
                location: ApiKeyLocation::Header,
            }
        );
    }
}
