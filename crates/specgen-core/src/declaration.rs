//! Parameter declarations as handed over by the source parser.
//!
//! A [`ParameterDeclaration`] is the already-parsed view of one controller
//! method parameter: its identifier, whether it was declared optional, the
//! textual type expression, the markers (decorators) attached to it and the
//! controller/method it belongs to.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A marker attached to a parameter, e.g. `@Query('limit')`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Marker name as written in source, without the leading `@`
    pub name: String,
    /// Literal arguments passed to the marker
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<JsonValue>,
}

impl Marker {
    /// Creates a marker without arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    /// Creates a marker whose single argument is a text literal.
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: vec![JsonValue::String(text.into())],
        }
    }

    /// Appends a literal argument.
    pub fn arg(mut self, value: impl Into<JsonValue>) -> Self {
        self.arguments.push(value.into());
        self
    }

    /// The first argument, if it is a text literal.
    pub fn text_argument(&self) -> Option<&str> {
        self.arguments.first().and_then(JsonValue::as_str)
    }
}

/// The controller and method a parameter is declared in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnclosingScope {
    /// Name of the enclosing controller (class)
    pub controller: String,
    /// Name of the enclosing method
    pub method: String,
}

impl EnclosingScope {
    pub fn new(controller: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            controller: controller.into(),
            method: method.into(),
        }
    }
}

/// Position of a declaration in its source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpan {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// One fragment of a documentation comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayPart {
    pub text: String,
    #[serde(default = "default_part_kind")]
    pub kind: String,
}

impl DisplayPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: default_part_kind(),
        }
    }
}

fn default_part_kind() -> String {
    "text".to_string()
}

/// Joins documentation parts into a single string.
pub fn display_parts_to_string(parts: &[DisplayPart]) -> String {
    parts.iter().map(|p| p.text.as_str()).collect()
}

/// A single parsed parameter of a controller method.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDeclaration {
    /// Source identifier
    pub name: String,
    /// Declared with `?`
    pub optional: bool,
    /// Declared type expression, if one was written
    pub type_expr: Option<String>,
    /// Attached markers, in source order
    pub markers: Vec<Marker>,
    /// Documentation comment attached to the parameter
    pub documentation: Vec<DisplayPart>,
    /// Enclosing controller and method
    pub scope: EnclosingScope,
    /// Source position, when the parser reported one
    pub span: Option<SourceSpan>,
}

impl ParameterDeclaration {
    /// Creates a required, untyped, unmarked declaration.
    pub fn new(name: impl Into<String>, scope: EnclosingScope) -> Self {
        Self {
            name: name.into(),
            optional: false,
            type_expr: None,
            markers: Vec::new(),
            documentation: Vec::new(),
            scope,
            span: None,
        }
    }

    pub fn typed(mut self, type_expr: impl Into<String>) -> Self {
        self.type_expr = Some(type_expr.into());
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    pub fn documented(mut self, text: impl Into<String>) -> Self {
        self.documentation.push(DisplayPart::text(text));
        self
    }

    /// `Controller.method` string used in diagnostics.
    pub fn location(&self) -> String {
        format!("{}.{}", self.scope.controller, self.scope.method)
    }

    /// First attached marker whose name satisfies `predicate`.
    ///
    /// The predicate sees the name exactly as written; callers that want a
    /// case-insensitive match normalise inside the predicate.
    pub fn find_marker<P>(&self, predicate: P) -> Option<&Marker>
    where
        P: Fn(&str) -> bool,
    {
        self.markers.iter().find(|m| predicate(&m.name))
    }

    /// Text argument of the first marker whose name satisfies `predicate`.
    pub fn marker_text_argument<P>(&self, predicate: P) -> Option<&str>
    where
        P: Fn(&str) -> bool,
    {
        self.find_marker(predicate).and_then(Marker::text_argument)
    }
}
