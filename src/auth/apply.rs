//! Applying, validating and building authentication configurations.

use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use url::Url;

use crate::auth::types::{ApiKeyLocation, AuthConfig, AuthType};
use crate::config::{DEFAULT_API_KEY_HEADER, HEADER_AUTHORIZATION};
use crate::error_handling::AuthError;
use crate::request::RequestDescriptor;

impl AuthConfig {
    /// Adds this configuration's credentials to `request`.
    ///
    /// Query placement re-serializes the URL, replacing any existing
    /// parameter with the same name and keeping every other parameter.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] when a required field is empty, or when the
    /// request URL cannot be parsed for query placement. The request is
    /// left untouched on error.
    pub fn apply(&self, request: &mut RequestDescriptor) -> Result<(), AuthError> {
        self.validate()?;
        log::debug!("Applying {} auth: {:?}", self.auth_type(), self.masked());

        match self {
            AuthConfig::None => {}
            AuthConfig::ApiKey {
                key,
                key_name,
                location,
            } => {
                let name = key_name
                    .as_deref()
                    .filter(|n| !n.is_empty())
                    .unwrap_or(DEFAULT_API_KEY_HEADER);
                match location {
                    ApiKeyLocation::Header => request.set_header(name, key.as_str()),
                    ApiKeyLocation::Query => {
                        request.url = with_query_param(&request.url, name, key)?;
                    }
                }
            }
            AuthConfig::Bearer { token } => {
                request.set_header(HEADER_AUTHORIZATION, format!("Bearer {token}"));
            }
            AuthConfig::Basic { username, password } => {
                let encoded = STANDARD.encode(format!("{username}:{password}"));
                request.set_header(HEADER_AUTHORIZATION, format!("Basic {encoded}"));
            }
            AuthConfig::Custom { headers } => {
                for (name, value) in headers {
                    request.set_header(name.as_str(), value.as_str());
                }
            }
        }
        Ok(())
    }

    /// Checks that the fields required by the scheme are populated.
    ///
    /// # Errors
    ///
    /// Returns the [`AuthError`] naming the first missing field.
    pub fn validate(&self) -> Result<(), AuthError> {
        match self {
            AuthConfig::None => Ok(()),
            AuthConfig::ApiKey { key, .. } if key.is_empty() => Err(AuthError::MissingApiKey),
            AuthConfig::Bearer { token } if token.is_empty() => Err(AuthError::MissingToken),
            AuthConfig::Basic { username, .. } if username.is_empty() => {
                Err(AuthError::MissingUsername)
            }
            AuthConfig::Custom { headers } if headers.is_empty() => {
                Err(AuthError::MissingCustomHeaders)
            }
            _ => Ok(()),
        }
    }

    /// Builds a configuration from form-style input and validates it.
    ///
    /// Recognized keys: `api_key`, `key_name`, `location` (api-key);
    /// `token` (bearer); `username`, `password` (basic); `headers`
    /// (custom, one `Name: Value` per line). Missing keys read as empty.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if the location is not `header` or `query`,
    /// or if the resulting configuration fails [`AuthConfig::validate`].
    pub fn from_input(
        auth_type: AuthType,
        inputs: &HashMap<String, String>,
    ) -> Result<Self, AuthError> {
        let input = |key: &str| inputs.get(key).cloned().unwrap_or_default();

        let config = match auth_type {
            AuthType::None => AuthConfig::None,
            AuthType::ApiKey => {
                let key_name = input("key_name");
                AuthConfig::ApiKey {
                    key: input("api_key"),
                    key_name: (!key_name.is_empty()).then_some(key_name),
                    location: ApiKeyLocation::parse(&input("location"))?,
                }
            }
            AuthType::Bearer => AuthConfig::Bearer {
                token: input("token"),
            },
            AuthType::Basic => AuthConfig::Basic {
                username: input("username"),
                password: input("password"),
            },
            AuthType::Custom => AuthConfig::Custom {
                headers: parse_header_lines(&input("headers")),
            },
        };

        config.validate()?;
        Ok(config)
    }
}

/// Parses `Name: Value` lines, splitting on the first colon.
///
/// Blank lines, lines without a colon, and entries with an empty name or
/// value are skipped.
pub fn parse_header_lines(block: &str) -> HashMap<String, String> {
    block
        .lines()
        .filter_map(|line| {
            let (name, value) = line.trim().split_once(':')?;
            let (name, value) = (name.trim(), value.trim());
            (!name.is_empty() && !value.is_empty()).then(|| (name.to_string(), value.to_string()))
        })
        .collect()
}

fn with_query_param(raw_url: &str, name: &str, value: &str) -> Result<String, AuthError> {
    let mut url = Url::parse(raw_url).map_err(|e| AuthError::InvalidUrl(e.to_string()))?;

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != name)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair(name, value);

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn query_pairs(raw: &str) -> Vec<(String, String)> {
        Url::parse(raw)
            .unwrap()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_api_key_header_default_name() {
        let mut request = RequestDescriptor::new("GET", "http://example.com/");
        AuthConfig::ApiKey {
            key: "secret".to_string(),
            key_name: None,
            location: ApiKeyLocation::Header,
        }
        .apply(&mut request)
        .unwrap();
        assert_eq!(request.header("X-API-Key"), Some("secret"));
    }

    #[test]
    fn test_api_key_query_preserves_existing_params() {
        let mut request = RequestDescriptor::new("GET", "http://example.com/search?q=tor&page=2");
        AuthConfig::ApiKey {
            key: "k123".to_string(),
            key_name: Some("api_key".to_string()),
            location: ApiKeyLocation::Query,
        }
        .apply(&mut request)
        .unwrap();

        let pairs = query_pairs(&request.url);
        assert!(pairs.contains(&("q".to_string(), "tor".to_string())));
        assert!(pairs.contains(&("page".to_string(), "2".to_string())));
        assert!(pairs.contains(&("api_key".to_string(), "k123".to_string())));
        assert!(request.headers.is_empty());
    }

    #[test]
    fn test_api_key_query_overwrites_existing_key() {
        let mut request = RequestDescriptor::new("GET", "http://example.com/?api_key=old&x=1");
        AuthConfig::ApiKey {
            key: "new".to_string(),
            key_name: Some("api_key".to_string()),
            location: ApiKeyLocation::Query,
        }
        .apply(&mut request)
        .unwrap();

        let pairs = query_pairs(&request.url);
        let keys: Vec<&(String, String)> = pairs.iter().filter(|(k, _)| k == "api_key").collect();
        assert_eq!(keys, vec![&("api_key".to_string(), "new".to_string())]);
        assert!(pairs.contains(&("x".to_string(), "1".to_string())));
    }

    #[test]
    fn test_api_key_query_bad_url() {
        let mut request = RequestDescriptor::new("GET", "not a url");
        let err = AuthConfig::ApiKey {
            key: "k".to_string(),
            key_name: None,
            location: ApiKeyLocation::Query,
        }
        .apply(&mut request)
        .unwrap_err();
        assert!(matches!(err, AuthError::InvalidUrl(_)));
        assert_eq!(request.url, "not a url");
    }

    #[test]
    fn test_bearer_header() {
        let mut request = RequestDescriptor::new("GET", "http://example.com/");
        AuthConfig::Bearer {
            token: "tok".to_string(),
        }
        .apply(&mut request)
        .unwrap();
        assert_eq!(request.header("authorization"), Some("Bearer tok"));
    }

    #[test]
    fn test_basic_header_with_empty_password() {
        let mut request = RequestDescriptor::new("GET", "http://example.com/");
        AuthConfig::Basic {
            username: "alice".to_string(),
            password: String::new(),
        }
        .apply(&mut request)
        .unwrap();
        // base64("alice:")
        assert_eq!(request.header("Authorization"), Some("Basic YWxpY2U6"));
    }

    #[test]
    fn test_custom_headers_copied_verbatim() {
        let mut request = RequestDescriptor::new("GET", "http://example.com/");
        let headers = inputs(&[("X-Session", "s1"), ("X-Trace", "t1")]);
        AuthConfig::Custom { headers }.apply(&mut request).unwrap();
        assert_eq!(request.header("X-Session"), Some("s1"));
        assert_eq!(request.header("X-Trace"), Some("t1"));
    }

    #[test]
    fn test_apply_missing_field_leaves_request() {
        let mut request = RequestDescriptor::new("GET", "http://example.com/");
        let err = AuthConfig::Bearer {
            token: String::new(),
        }
        .apply(&mut request)
        .unwrap_err();
        assert_eq!(err, AuthError::MissingToken);
        assert!(request.headers.is_empty());
    }

    #[test]
    fn test_validate_bearer() {
        let empty = AuthConfig::Bearer {
            token: String::new(),
        };
        assert_eq!(empty.validate(), Err(AuthError::MissingToken));

        let filled = AuthConfig::Bearer {
            token: "t".to_string(),
        };
        assert!(filled.validate().is_ok());
    }

    #[test]
    fn test_validate_required_fields() {
        assert!(AuthConfig::None.validate().is_ok());
        assert_eq!(
            AuthConfig::Basic {
                username: String::new(),
                password: "p".to_string()
            }
            .validate(),
            Err(AuthError::MissingUsername)
        );
        assert_eq!(
            AuthConfig::Custom {
                headers: HashMap::new()
            }
            .validate(),
            Err(AuthError::MissingCustomHeaders)
        );
        assert_eq!(
            AuthConfig::ApiKey {
                key: String::new(),
                key_name: None,
                location: ApiKeyLocation::Query
            }
            .validate(),
            Err(AuthError::MissingApiKey)
        );
    }

    #[test]
    fn test_from_input_api_key_defaults_to_header() {
        let config =
            AuthConfig::from_input(AuthType::ApiKey, &inputs(&[("api_key", "abc")])).unwrap();
        assert_eq!(
            config,
            AuthConfig::ApiKey {
                key: "abc".to_string(),
                key_name: None,
                location: ApiKeyLocation::Header,
            }
        );
    }

    #[test]
    fn test_from_input_rejects_bad_location() {
        let err = AuthConfig::from_input(
            AuthType::ApiKey,
            &inputs(&[("api_key", "abc"), ("location", "body")]),
        )
        .unwrap_err();
        assert_eq!(err, AuthError::InvalidLocation("body".to_string()));
    }

    #[test]
    fn test_from_input_runs_validation() {
        let err = AuthConfig::from_input(AuthType::Basic, &inputs(&[("password", "p")])).unwrap_err();
        assert_eq!(err, AuthError::MissingUsername);
    }

    #[test]
    fn test_from_input_custom_block() {
        let block = "X-Token: abc:def\n\n  no colon here\nX-Empty:   \n: orphan\n X-Team : core ";
        let config =
            AuthConfig::from_input(AuthType::Custom, &inputs(&[("headers", block)])).unwrap();
        let AuthConfig::Custom { headers } = config else {
            panic!("expected custom config");
        };
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("X-Token").map(String::as_str), Some("abc:def"));
        assert_eq!(headers.get("X-Team").map(String::as_str), Some("core"));
    }

    #[test]
    fn test_from_input_custom_empty_block_fails() {
        let err = AuthConfig::from_input(AuthType::Custom, &inputs(&[("headers", "\n\n")]))
            .unwrap_err();
        assert_eq!(err, AuthError::MissingCustomHeaders);
    }
}
