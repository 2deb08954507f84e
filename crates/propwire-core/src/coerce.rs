#![forbid(unsafe_code)]

//! Attribute → property coercion.
//!
//! # Boolean attributes
//!
//! | Attribute | Value |
//! |-----------|-------|
//! | absent | default, else `false` |
//! | `""` | `true` |
//! | `"0"` | `true` |
//! | `"False"` | `true` |
//! | `"false"` | `false` |
//!
//! Only the exact lowercase string `"false"` reads as `false`; any other
//! present value, including `"0"` and the empty string, is `true`.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Unparsable number | `"abc"`, `""`, `"NaN"` | Default, else `0`; reported as [`Coerced::Fallback`] |

use std::fmt;

use crate::reflect::to_plain_string;
use crate::value::{PropType, PropValue};

/// Result of a coercion. A fallback carries the raw input that failed.
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced {
    Value(PropValue),
    Fallback { value: PropValue, raw: String },
}

impl Coerced {
    #[must_use]
    pub fn value(&self) -> &PropValue {
        match self {
            Self::Value(value) | Self::Fallback { value, .. } => value,
        }
    }

    #[must_use]
    pub fn into_value(self) -> PropValue {
        match self {
            Self::Value(value) | Self::Fallback { value, .. } => value,
        }
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// A numeric attribute that could not be parsed.
///
/// Non-fatal: the property received `fallback` and the component keeps
/// working.
#[derive(Debug, Clone, PartialEq)]
pub struct CoercionFailure {
    pub property: String,
    /// Attribute the raw value came from, `None` for programmatic writes.
    pub attribute: Option<String>,
    pub raw: String,
    pub fallback: PropValue,
}

impl fmt::Display for CoercionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.attribute {
            Some(attr) => write!(
                f,
                "attribute '{attr}' value {:?} is not a number; property '{}' fell back to {}",
                self.raw,
                self.property,
                to_plain_string(&self.fallback)
            ),
            None => write!(
                f,
                "value {:?} is not a number; property '{}' fell back to {}",
                self.raw,
                self.property,
                to_plain_string(&self.fallback)
            ),
        }
    }
}

/// Boolean reading of an attribute: `None` when absent.
#[must_use]
pub fn parse_boolean_attribute(raw: Option<&str>) -> Option<bool> {
    raw.map(|s| s != "false")
}

/// Parse a numeric attribute. Surrounding whitespace is ignored; empty input
/// and NaN are failures.
#[must_use]
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| !n.is_nan())
}

fn number_fallback(default: Option<&PropValue>) -> PropValue {
    match default {
        Some(value @ PropValue::Number(_)) => value.clone(),
        _ => PropValue::Number(0.0),
    }
}

/// Coerce a raw attribute into a typed property value.
///
/// `raw` is `None` when the attribute is absent.
#[must_use]
pub fn coerce_attribute(raw: Option<&str>, ty: PropType, default: Option<&PropValue>) -> Coerced {
    match (ty, raw) {
        (PropType::Boolean, raw) => Coerced::Value(match parse_boolean_attribute(raw) {
            Some(b) => PropValue::Bool(b),
            None => default.cloned().unwrap_or(PropValue::Bool(false)),
        }),
        (_, None) => Coerced::Value(default.cloned().unwrap_or_default()),
        (PropType::Number, Some(s)) => match parse_number(s) {
            Some(n) => Coerced::Value(PropValue::Number(n)),
            None => Coerced::Fallback {
                value: number_fallback(default),
                raw: s.to_owned(),
            },
        },
        (PropType::String | PropType::Any | PropType::Object, Some(s)) => {
            Coerced::Value(PropValue::Str(s.to_owned()))
        }
    }
}

/// Coerce a programmatically written value to the declared type.
///
/// Primitive-typed properties normalize what they receive; object and
/// untyped properties keep the value exactly as given. Nullish values are
/// never coerced.
#[must_use]
pub fn parse_property_value(value: PropValue, ty: PropType, default: Option<&PropValue>) -> Coerced {
    if value.is_nullish() {
        return Coerced::Value(value);
    }
    match ty {
        PropType::Boolean => {
            let b = match &value {
                PropValue::Bool(b) => *b,
                PropValue::Str(s) => parse_boolean_attribute(Some(s.as_str())) != Some(false),
                PropValue::Number(n) => *n != 0.0 && !n.is_nan(),
                _ => true,
            };
            Coerced::Value(PropValue::Bool(b))
        }
        PropType::Number => match value {
            PropValue::Number(_) => Coerced::Value(value),
            PropValue::Str(s) => match parse_number(&s) {
                Some(n) => Coerced::Value(PropValue::Number(n)),
                None => Coerced::Fallback {
                    value: number_fallback(default),
                    raw: s,
                },
            },
            other => Coerced::Fallback {
                value: number_fallback(default),
                raw: to_plain_string(&other),
            },
        },
        PropType::String => match value {
            PropValue::Bool(_) | PropValue::Number(_) => {
                Coerced::Value(PropValue::Str(to_plain_string(&value)))
            }
            other => Coerced::Value(other),
        },
        PropType::Object | PropType::Any => Coerced::Value(value),
    }
}
