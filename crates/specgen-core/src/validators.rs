//! Validation rules attached to parameters through markers.

use serde_json::Value as JsonValue;

use crate::declaration::{Marker, ParameterDeclaration};
use crate::types::{RuleConfig, Validators};

/// Extracts the validation rules that apply to a parameter.
pub trait ValidatorExtractor: Send + Sync {
    /// Rules for `declaration`, whose source identifier is `name`.
    ///
    /// Never fails; a parameter without validation markers yields an empty map.
    fn validators(&self, declaration: &ParameterDeclaration, name: &str) -> Validators;
}

/// How a validation marker's arguments are read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RuleShape {
    /// `@IsInt('message')`
    Flag,
    /// `@MinLength(3, 'message')`
    Value,
}

const RULES: [(&str, &str, RuleShape); 19] = [
    ("IsInt", "isInt", RuleShape::Flag),
    ("IsLong", "isLong", RuleShape::Flag),
    ("IsFloat", "isFloat", RuleShape::Flag),
    ("IsDouble", "isDouble", RuleShape::Flag),
    ("IsDate", "isDate", RuleShape::Flag),
    ("IsDateTime", "isDateTime", RuleShape::Flag),
    ("IsString", "isString", RuleShape::Flag),
    ("IsBoolean", "isBoolean", RuleShape::Flag),
    ("IsArray", "isArray", RuleShape::Flag),
    ("UniqueItems", "uniqueItems", RuleShape::Flag),
    ("MinLength", "minLength", RuleShape::Value),
    ("MaxLength", "maxLength", RuleShape::Value),
    ("Pattern", "pattern", RuleShape::Value),
    ("Minimum", "minimum", RuleShape::Value),
    ("Maximum", "maximum", RuleShape::Value),
    ("MinItems", "minItems", RuleShape::Value),
    ("MaxItems", "maxItems", RuleShape::Value),
    ("MinDate", "minDate", RuleShape::Value),
    ("MaxDate", "maxDate", RuleShape::Value),
];

/// Reads validation rules from the markers attached to a declaration.
///
/// Marker names match case-sensitively. A later marker for the same rule
/// replaces an earlier one.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerValidators;

impl MarkerValidators {
    fn rule_for(marker: &Marker) -> Option<(&'static str, RuleConfig)> {
        let &(_, rule, shape) = RULES.iter().find(|(name, _, _)| *name == marker.name)?;
        let config = match shape {
            RuleShape::Flag => RuleConfig {
                value: None,
                error_msg: marker.arguments.first().and_then(as_message),
            },
            RuleShape::Value => RuleConfig {
                value: marker.arguments.first().cloned(),
                error_msg: marker.arguments.get(1).and_then(as_message),
            },
        };
        Some((rule, config))
    }
}

impl ValidatorExtractor for MarkerValidators {
    fn validators(&self, declaration: &ParameterDeclaration, name: &str) -> Validators {
        let mut validators = Validators::new();
        for marker in &declaration.markers {
            if let Some((rule, config)) = Self::rule_for(marker) {
                log::trace!("validator {rule} on parameter {name}");
                validators.insert(rule.to_string(), config);
            }
        }
        validators
    }
}

fn as_message(value: &JsonValue) -> Option<String> {
    value.as_str().map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::EnclosingScope;
    use serde_json::json;

    fn declaration() -> ParameterDeclaration {
        ParameterDeclaration::new("name", EnclosingScope::new("UserController", "create"))
    }

    #[test]
    fn test_no_markers_yields_empty_map() {
        assert!(MarkerValidators.validators(&declaration(), "name").is_empty());
    }

    #[test]
    fn test_value_rules_take_value_and_message() {
        let decl = declaration()
            .marker(Marker::new("Query"))
            .marker(Marker::new("MinLength").arg(3).arg("too short"))
            .marker(Marker::with_text("Pattern", "^[a-z]+$"));
        let validators = MarkerValidators.validators(&decl, "name");

        assert_eq!(validators.len(), 2);
        assert_eq!(
            validators["minLength"],
            RuleConfig {
                value: Some(json!(3)),
                error_msg: Some("too short".into())
            }
        );
        assert_eq!(validators["pattern"].value, Some(json!("^[a-z]+$")));
        assert_eq!(validators["pattern"].error_msg, None);
    }

    #[test]
    fn test_flag_rules_take_optional_message() {
        let decl = declaration()
            .marker(Marker::with_text("IsInt", "must be an integer"))
            .marker(Marker::new("UniqueItems"));
        let validators = MarkerValidators.validators(&decl, "name");
        assert_eq!(validators["isInt"].value, None);
        assert_eq!(validators["isInt"].error_msg.as_deref(), Some("must be an integer"));
        assert_eq!(validators["uniqueItems"], RuleConfig::default());
    }

    #[test]
    fn test_marker_names_are_case_sensitive() {
        let decl = declaration().marker(Marker::new("minlength").arg(1));
        assert!(MarkerValidators.validators(&decl, "name").is_empty());
    }
}
