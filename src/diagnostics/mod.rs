//! Failure diagnosis.
//!
//! [`ErrorClassifier`] turns a raw error (plus the URL it was raised for)
//! into a [`DiagnosticError`] carrying a category, the original error,
//! remediation suggestions and a retry verdict. Classification is a
//! best-effort keyword heuristic over heterogeneous error text; the
//! keyword lists live in [`KeywordTables`] so they can be extended without
//! touching callers.

mod classifier;
mod keywords;
mod types;

pub use classifier::ErrorClassifier;
pub use keywords::KeywordTables;
pub use types::{DiagnosticError, ErrorType};
