//! Resolved type descriptors and parameter descriptors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::binding::ParameterLocation;

/// Type tags accepted for header, query, path and form-data bindings.
pub const SUPPORTED_PARAMETER_TYPES: [&str; 12] = [
    "string", "integer", "long", "float", "double", "date", "datetime", "buffer", "boolean",
    "enum", "file", "file[]",
];

/// Canonical description of a resolved type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDescriptor {
    /// Type tag, e.g. `string`, `enum`, `array`, `refObject`
    pub type_name: String,
    /// Allowed values for `enum`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enums: Option<Vec<JsonValue>>,
    /// Element type for `array`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_type: Option<Box<TypeDescriptor>>,
    /// Referenced type name for `refObject`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_name: Option<String>,
}

impl TypeDescriptor {
    pub fn named(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            enums: None,
            element_type: None,
            ref_name: None,
        }
    }

    pub fn enumeration(values: Vec<JsonValue>) -> Self {
        Self {
            enums: Some(values),
            ..Self::named("enum")
        }
    }

    pub fn array(element: TypeDescriptor) -> Self {
        Self {
            element_type: Some(Box::new(element)),
            ..Self::named("array")
        }
    }

    pub fn reference(name: impl Into<String>) -> Self {
        Self {
            ref_name: Some(name.into()),
            ..Self::named("refObject")
        }
    }

    /// Whether this type may be carried by a header, query, path or form-data parameter.
    pub fn is_supported_parameter_type(&self) -> bool {
        SUPPORTED_PARAMETER_TYPES.contains(&self.type_name.as_str())
    }
}

/// Configuration of one validation rule.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_msg: Option<String>,
}

/// Validation rules keyed by rule name.
pub type Validators = BTreeMap<String, RuleConfig>;

/// Canonical metadata for one controller method parameter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDescriptor {
    /// Flattened documentation comment, empty when there is none
    pub description: String,
    /// Request location
    #[serde(rename = "in")]
    pub in_: ParameterLocation,
    /// Public parameter name, after any marker override
    pub name: String,
    pub required: bool,
    #[serde(rename = "type")]
    pub type_: TypeDescriptor,
    /// Source identifier
    pub parameter_name: String,
    pub validators: Validators,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_supported_parameter_types() {
        assert!(TypeDescriptor::named("string").is_supported_parameter_type());
        assert!(TypeDescriptor::named("file[]").is_supported_parameter_type());
        assert!(TypeDescriptor::enumeration(vec![json!("a")]).is_supported_parameter_type());
        assert!(!TypeDescriptor::named("object").is_supported_parameter_type());
        assert!(!TypeDescriptor::array(TypeDescriptor::named("string")).is_supported_parameter_type());
        assert!(!TypeDescriptor::named("String").is_supported_parameter_type());
    }

    #[test]
    fn test_descriptor_serializes_camel_case() {
        let descriptor = ParameterDescriptor {
            description: String::new(),
            in_: ParameterLocation::FormData,
            name: "avatar".into(),
            required: true,
            type_: TypeDescriptor::named("file"),
            parameter_name: "upload".into(),
            validators: Validators::new(),
        };
        assert_eq!(
            serde_json::to_value(&descriptor).unwrap(),
            json!({
                "description": "",
                "in": "formData",
                "name": "avatar",
                "required": true,
                "type": {"typeName": "file"},
                "parameterName": "upload",
                "validators": {}
            })
        );
    }

    #[test]
    fn test_type_descriptor_nested_serialization() {
        let ty = TypeDescriptor::array(TypeDescriptor::reference("Pet"));
        assert_eq!(
            serde_json::to_value(&ty).unwrap(),
            json!({"typeName": "array", "elementType": {"typeName": "refObject", "refName": "Pet"}})
        );
    }
}
