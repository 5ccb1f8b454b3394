//! Configuration management for specgen.
//!
//! This module defines the `Config` struct used to drive metadata extraction.
//! The configuration can be loaded from a YAML file, created programmatically,
//! or assembled from command-line arguments.
//!
//! # Examples
//!
//! ```no_run
//! use specgen_core::config::{Config, OutputFormat};
//!
//! # #[tokio::main]
//! # async fn main() -> specgen_core::Result<()> {
//! // Create a new config programmatically
//! let mut config = Config::new("pet-store", "declarations.yaml");
//! config.format = OutputFormat::Yaml;
//! config
//!     .type_aliases
//!     .insert("PetId".to_string(), "integer".to_string());
//!
//! // Or load from a config file
//! let config = Config::from_file("specgen.yaml").await?;
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use crate::generator::ParameterGenerator;
use crate::resolver::BuiltinTypeResolver;

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use tokio::fs;

/// Serialization format of the generated metadata
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(crate::Error::config(format!(
                "unknown output format '{other}' (expected json or yaml)"
            ))),
        }
    }
}

/// Configuration for specgen metadata extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Project name
    pub project_name: String,

    /// Path to the declaration manifest
    pub declarations_path: String,

    /// Where to write generated metadata; stdout when unset
    #[serde(default)]
    pub output_path: Option<String>,

    /// Output serialization format
    #[serde(default)]
    pub format: OutputFormat,

    /// Type aliases made available to the type resolver (name -> type expression)
    #[serde(default)]
    pub type_aliases: HashMap<String, String>,
}

impl Config {
    /// Create a new Config with default values
    pub fn new(project_name: impl Into<String>, declarations_path: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            declarations_path: declarations_path.into(),
            output_path: None,
            format: OutputFormat::default(),
            type_aliases: HashMap::new(),
        }
    }

    /// Load configuration from a file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Parameter generator wired with the built-in collaborators and this
    /// configuration's type aliases.
    pub fn parameter_generator(&self) -> ParameterGenerator {
        ParameterGenerator::default()
            .with_type_resolver(BuiltinTypeResolver::with_aliases(self.type_aliases.clone()))
    }
}
