//! Error handling for the specgen metadata library.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. Classification failures for a
//! single parameter are reported as [`GenerateMetadataError`], which keeps
//! enough of the offending declaration around to point back at the source.
//!
//! # Examples
//!
//! ```
//! use specgen_core::error::{Error, Result};
//!
//! fn might_fail() -> Result<()> {
//!     Err(Error::type_resolution("unbalanced generic in 'Array<string'"))
//! }
//!
//! assert!(might_fail().is_err());
//! ```

use std::fmt;

use thiserror::Error;

use crate::declaration::{ParameterDeclaration, SourceSpan};

/// Result type for specgen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for specgen operations
#[derive(Debug, Error)]
pub enum Error {
    /// A parameter could not be classified or failed a binding rule
    #[error(transparent)]
    GenerateMetadata(#[from] GenerateMetadataError),

    /// The type resolver rejected a declared type expression
    #[error("Type resolution error: {0}")]
    TypeResolution(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Declaration manifest error
    #[error("Manifest error: {0}")]
    Manifest(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new manifest error
    pub fn manifest<S: Into<String>>(msg: S) -> Self {
        Self::Manifest(msg.into())
    }

    /// Create a new type resolution error
    pub fn type_resolution<S: Into<String>>(msg: S) -> Self {
        Self::TypeResolution(msg.into())
    }

    /// Returns the classification diagnostic, if this is one.
    pub fn as_generate_metadata(&self) -> Option<&GenerateMetadataError> {
        match self {
            Self::GenerateMetadata(err) => Some(err),
            _ => None,
        }
    }
}

/// Diagnostic raised when a parameter cannot be turned into a descriptor.
///
/// Carries the parameter identifier, its `Controller.method` location and the
/// source span (when the declaration had one) so callers can attribute the
/// failure without holding on to the declaration itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateMetadataError {
    /// Source identifier of the offending parameter
    pub parameter_name: String,
    /// `Controller.method` location of the enclosing function
    pub location: String,
    /// Where the declaration was found, if known
    pub span: Option<SourceSpan>,
    /// Human-readable explanation
    pub message: String,
}

impl GenerateMetadataError {
    /// Creates a diagnostic attributed to `parameter`.
    pub fn new<S: Into<String>>(parameter: &ParameterDeclaration, message: S) -> Self {
        Self {
            parameter_name: parameter.name.clone(),
            location: parameter.location(),
            span: parameter.span.clone(),
            message: message.into(),
        }
    }
}

impl fmt::Display for GenerateMetadataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.span {
            Some(span) => write!(f, "{span}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for GenerateMetadataError {}
