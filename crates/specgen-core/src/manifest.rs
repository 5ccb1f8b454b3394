//! Declaration manifest format.
//!
//! The manifest is the hand-off from the source parser: a JSON or YAML file
//! listing controllers, their routed methods and each method's already-parsed
//! parameters.
//!
//! ```yaml
//! controllers:
//!   - name: PetController
//!     methods:
//!       - name: getPet
//!         method: get
//!         path: /pets/{petId}
//!         parameters:
//!           - name: petId
//!             type: integer
//!             markers: [Path]
//!             doc: The pet identifier
//! ```

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_value::Value as SerdeValue;
use tokio::fs;

use crate::declaration::{DisplayPart, EnclosingScope, Marker, ParameterDeclaration, SourceSpan};

/// Root of a declaration manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub controllers: Vec<ControllerEntry>,
}

/// A controller and its routed methods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerEntry {
    pub name: String,
    #[serde(default)]
    pub methods: Vec<MethodEntry>,
}

/// A routed controller method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodEntry {
    /// Method identifier
    pub name: String,
    /// HTTP method, e.g. `get`
    pub method: String,
    /// Route path template, e.g. `/pets/{petId}`
    pub path: String,
    #[serde(default)]
    pub parameters: Vec<ParameterEntry>,
}

/// One parameter as written in the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterEntry {
    pub name: String,

    /// Declared type expression
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_expr: Option<String>,

    #[serde(default)]
    pub optional: bool,

    /// Markers, either `"Query"` or `{ name: Query, arguments: [limit] }`
    #[serde(default, deserialize_with = "deserialize_markers")]
    pub markers: Vec<Marker>,

    /// Documentation comment, a string or a list of fragments
    #[serde(default, deserialize_with = "deserialize_doc")]
    pub doc: Vec<DisplayPart>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<SourceSpan>,
}

impl ParameterEntry {
    /// Builds the declaration for this parameter inside `scope`.
    pub fn to_declaration(&self, scope: EnclosingScope) -> ParameterDeclaration {
        ParameterDeclaration {
            name: self.name.clone(),
            optional: self.optional,
            type_expr: self.type_expr.clone(),
            markers: self.markers.clone(),
            documentation: self.doc.clone(),
            scope,
            span: self.span.clone(),
        }
    }
}

impl MethodEntry {
    /// Declarations for every parameter of this method, in order.
    pub fn declarations(&self, controller: &str) -> Vec<ParameterDeclaration> {
        self.parameters
            .iter()
            .map(|p| p.to_declaration(EnclosingScope::new(controller, &self.name)))
            .collect()
    }
}

impl Manifest {
    /// Load a manifest from a file (JSON or YAML).
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        Self::parse_content(&content).map_err(|e| {
            crate::Error::manifest(format!(
                "Failed to parse declaration manifest at {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Parse content as either JSON or YAML
    pub fn parse_content(content: &str) -> Result<Self, String> {
        if let Ok(manifest) = serde_json::from_str(content) {
            return Ok(manifest);
        }
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    }

    /// Total number of parameters across all controllers.
    pub fn parameter_count(&self) -> usize {
        self.controllers
            .iter()
            .flat_map(|c| &c.methods)
            .map(|m| m.parameters.len())
            .sum()
    }
}

/// Deserialize markers given as bare names or as `{ name, arguments }` maps
fn deserialize_markers<'de, D>(deserializer: D) -> Result<Vec<Marker>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = SerdeValue::deserialize(deserializer)?;

    let items = match value {
        SerdeValue::Seq(seq) => seq,
        SerdeValue::Unit | SerdeValue::Option(None) => return Ok(Vec::new()),
        single => vec![single],
    };

    let mut markers = Vec::with_capacity(items.len());
    for item in items {
        match item {
            SerdeValue::String(name) => markers.push(Marker::new(name)),
            map @ SerdeValue::Map(_) => {
                let marker = map
                    .deserialize_into::<Marker>()
                    .map_err(serde::de::Error::custom)?;
                markers.push(marker);
            }
            _ => {
                return Err(serde::de::Error::custom(
                    "Expected marker name or marker object",
                ))
            }
        }
    }
    Ok(markers)
}

/// Deserialize a documentation comment from a string or a list of strings/parts
fn deserialize_doc<'de, D>(deserializer: D) -> Result<Vec<DisplayPart>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = SerdeValue::deserialize(deserializer)?;

    match value {
        SerdeValue::String(s) => Ok(vec![DisplayPart::text(s)]),
        SerdeValue::Unit | SerdeValue::Option(None) => Ok(Vec::new()),
        SerdeValue::Seq(seq) => {
            let mut result = Vec::new();
            for item in seq {
                match item {
                    SerdeValue::String(s) => result.push(DisplayPart::text(s)),
                    map @ SerdeValue::Map(_) => result.push(
                        map.deserialize_into::<DisplayPart>()
                            .map_err(serde::de::Error::custom)?,
                    ),
                    _ => {
                        return Err(serde::de::Error::custom(
                            "Expected string or documentation part",
                        ))
                    }
                }
            }
            Ok(result)
        }
        _ => Err(serde::de::Error::custom(
            "Expected string or array of strings",
        )),
    }
}
