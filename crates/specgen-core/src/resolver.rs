//! Type resolution for declared parameter types.
//!
//! The generator only needs a [`TypeResolver`]; [`BuiltinTypeResolver`] is a
//! table-driven implementation that understands the type expressions commonly
//! written on controller parameters (primitives, arrays, literal unions,
//! `Promise<T>`, optional unions) plus user supplied aliases.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value as JsonValue;

use crate::types::TypeDescriptor;
use crate::{Error, Result};

/// Maps a type expression to a [`TypeDescriptor`].
pub trait TypeResolver: Send + Sync {
    fn resolve(&self, type_expr: &str) -> Result<TypeDescriptor>;
}

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][\w$]*(?:\.[A-Za-z_$][\w$]*)*$").unwrap());

static GENERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^([A-Za-z_$][\w$]*(?:\.[A-Za-z_$][\w$]*)*)\s*<(.*)>$").unwrap());

static STRING_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^(?:'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)")$"#).unwrap());

static ESCAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\\(.)").unwrap());

static NUMBER_LITERAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+(?:\.\d+)?$").unwrap());

const MAX_ALIAS_DEPTH: usize = 16;

/// Resolver backed by a fixed primitive table and optional aliases.
#[derive(Debug, Clone, Default)]
pub struct BuiltinTypeResolver {
    aliases: HashMap<String, String>,
}

impl BuiltinTypeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers aliases (`name -> type expression`) that are expanded before
    /// falling back to a named reference.
    pub fn with_aliases(aliases: HashMap<String, String>) -> Self {
        Self { aliases }
    }

    fn resolve_at(&self, expr: &str, depth: usize) -> Result<TypeDescriptor> {
        let expr = strip_parens(expr.trim())?;
        if expr.is_empty() {
            return Err(Error::type_resolution("empty type expression"));
        }

        let members = split_top_level(expr, '|')?;
        if members.len() > 1 {
            return self.resolve_union(expr, &members, depth);
        }

        if let Some(value) = literal_value(expr) {
            return Ok(TypeDescriptor::enumeration(vec![value]));
        }

        if let Some(element) = expr.strip_suffix("[]") {
            let element = self.resolve_at(element, depth)?;
            if element.type_name == "file" {
                return Ok(TypeDescriptor::named("file[]"));
            }
            return Ok(TypeDescriptor::array(element));
        }

        if expr.starts_with('{') && expr.ends_with('}') {
            return Ok(TypeDescriptor::named("object"));
        }

        if let Some(caps) = GENERIC.captures(expr) {
            let name = &caps[1];
            let args = &caps[2];
            return match name {
                "Array" | "ReadonlyArray" => {
                    let element = self.resolve_at(args, depth)?;
                    if element.type_name == "file" {
                        Ok(TypeDescriptor::named("file[]"))
                    } else {
                        Ok(TypeDescriptor::array(element))
                    }
                }
                "Promise" => self.resolve_at(args, depth),
                "Record" | "Map" | "Partial" => Ok(TypeDescriptor::named("object")),
                _ => Ok(TypeDescriptor::reference(name)),
            };
        }

        if IDENTIFIER.is_match(expr) {
            if let Some(primitive) = primitive(expr) {
                return Ok(TypeDescriptor::named(primitive));
            }
            if let Some(target) = self.aliases.get(expr) {
                if depth >= MAX_ALIAS_DEPTH {
                    return Err(Error::type_resolution(format!(
                        "alias '{expr}' expands too deeply"
                    )));
                }
                return self.resolve_at(target, depth + 1);
            }
            return Ok(TypeDescriptor::reference(expr));
        }

        Err(Error::type_resolution(format!(
            "unrecognised type expression '{expr}'"
        )))
    }

    fn resolve_union(&self, expr: &str, members: &[&str], depth: usize) -> Result<TypeDescriptor> {
        let members: Vec<&str> = members
            .iter()
            .map(|m| m.trim())
            .filter(|m| !matches!(*m, "undefined" | "null"))
            .collect();

        match members.as_slice() {
            [] => Ok(TypeDescriptor::named("void")),
            [single] => self.resolve_at(single, depth),
            _ => {
                let literals: Vec<JsonValue> = members
                    .iter()
                    .map(|m| literal_value(m))
                    .collect::<Option<_>>()
                    .ok_or_else(|| {
                        Error::type_resolution(format!("unsupported union type '{expr}'"))
                    })?;
                // `true | false` is how `boolean` is spelled out
                let is_boolean = literals.iter().all(JsonValue::is_boolean)
                    && literals.contains(&JsonValue::Bool(true))
                    && literals.contains(&JsonValue::Bool(false));
                if is_boolean {
                    return Ok(TypeDescriptor::named("boolean"));
                }
                Ok(TypeDescriptor::enumeration(literals))
            }
        }
    }
}

impl TypeResolver for BuiltinTypeResolver {
    fn resolve(&self, type_expr: &str) -> Result<TypeDescriptor> {
        self.resolve_at(type_expr, 0)
    }
}

fn primitive(name: &str) -> Option<&'static str> {
    let tag = match name {
        "string" | "String" => "string",
        "number" | "Number" | "double" => "double",
        "boolean" | "Boolean" => "boolean",
        "Date" | "datetime" => "datetime",
        "date" => "date",
        "Buffer" | "buffer" => "buffer",
        "integer" => "integer",
        "long" => "long",
        "float" => "float",
        "file" | "File" | "Express.Multer.File" => "file",
        "any" | "unknown" | "object" | "Object" => "object",
        "void" | "undefined" | "null" => "void",
        _ => return None,
    };
    Some(tag)
}

fn literal_value(expr: &str) -> Option<JsonValue> {
    if let Some(caps) = STRING_LITERAL.captures(expr) {
        let text = caps.get(1).or_else(|| caps.get(2))?.as_str();
        return Some(JsonValue::String(ESCAPE.replace_all(text, "$1").into_owned()));
    }
    match expr {
        "true" => return Some(JsonValue::Bool(true)),
        "false" => return Some(JsonValue::Bool(false)),
        _ => {}
    }
    if NUMBER_LITERAL.is_match(expr) {
        return serde_json::from_str(expr).ok();
    }
    None
}

/// Removes parentheses wrapping the whole expression, e.g. `(a | b)`.
fn strip_parens(mut expr: &str) -> Result<&str> {
    while expr.starts_with('(') && expr.ends_with(')') {
        let inner = &expr[1..expr.len() - 1];
        // `(a) | (b)` starts and ends with parens but is not wrapped
        if split_top_level(inner, '\0').is_err() {
            break;
        }
        expr = inner.trim();
    }
    Ok(expr)
}

/// Splits on `separator` outside brackets and string literals.
fn split_top_level(expr: &str, separator: char) -> Result<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth: i32 = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut prev = '\0';
    let mut start = 0;

    for (idx, ch) in expr.char_indices() {
        let after = std::mem::replace(&mut prev, ch);
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '\'' | '"' => quote = Some(ch),
            // arrow of a function type, not a closing generic
            '>' if after == '=' => {}
            '<' | '(' | '[' | '{' => depth += 1,
            '>' | ')' | ']' | '}' => {
                depth -= 1;
                if depth < 0 {
                    return Err(Error::type_resolution(format!(
                        "unbalanced brackets in '{expr}'"
                    )));
                }
            }
            c if c == separator && depth == 0 => {
                parts.push(&expr[start..idx]);
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }

    if depth != 0 || quote.is_some() {
        return Err(Error::type_resolution(format!(
            "unbalanced brackets in '{expr}'"
        )));
    }
    parts.push(&expr[start..]);
    Ok(parts)
}
