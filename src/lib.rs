//! onion_client library: HTTP over Tor with failure diagnosis
//!
//! This library sends HTTP requests either directly or through a Tor SOCKS5
//! proxy, refuses to send `.onion` requests without the proxy, applies
//! pluggable authentication, and turns failures into typed diagnoses with
//! remediation suggestions.
//!
//! # Example
//!
//! ```no_run
//! use onion_client::{AuthConfig, Client, ClientConfig, ErrorClassifier, RequestDescriptor};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new(ClientConfig::default())?;
//!
//! let mut request = RequestDescriptor::new(
//!     "GET",
//!     "http://pg6mmjiyjmcrsslvykfwnntlaru7p5svn6y2ymmju6nubxndf4pscryd.onion/",
//! );
//! AuthConfig::Bearer { token: "secret-token".into() }.apply(&mut request)?;
//!
//! match client.send(&request).await {
//!     Ok(response) => println!("{} in {:?}", response.status(), response.duration()),
//!     Err(e) => {
//!         let diagnosis = ErrorClassifier::default().classify(e, &request.url);
//!         eprintln!("{}", diagnosis.summary());
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! Sending requires a Tokio runtime. Proxied requests need a running Tor
//! daemon (by default on `127.0.0.1:9050`).

#![warn(missing_docs)]

mod address;
pub mod auth;
mod client;
pub mod config;
pub mod diagnostics;
mod error_handling;
pub mod initialization;
mod request;
mod response;
pub mod transport;
mod utils;

// Re-export public API
pub use address::{
    is_hidden_service_address, is_hidden_service_host, validate_hidden_service_address,
};
pub use auth::{ApiKeyLocation, AuthConfig, AuthType, CredentialStore, CredentialVault};
pub use client::Client;
pub use config::{ClientConfig, LogFormat, LogLevel};
pub use diagnostics::{DiagnosticError, ErrorClassifier, ErrorType, KeywordTables};
pub use error_handling::{
    AuthError, ConfigValidationError, CredentialError, InitializationError, ProbeError, SendError,
    TransportBuildError, TransportError, ValidationError,
};
pub use request::RequestDescriptor;
pub use response::ResponseDescriptor;
pub use utils::{sanitize_and_truncate_error_message, sanitize_error_message};
