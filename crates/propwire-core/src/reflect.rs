#![forbid(unsafe_code)]

//! Property → attribute stringification.
//!
//! Attribute values are always strings. Booleans reflect as presence:
//! `true` is a valueless attribute and `false` removes it, which is exactly
//! what the boolean attribute coercion reads back.

use crate::value::PropValue;

/// What reflecting a value does to its attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeWrite {
    /// Set the attribute to this string.
    Set(String),
    /// Set the attribute with no meaningful value (boolean `true`).
    Present,
    /// Remove the attribute.
    Remove,
    /// Leave the attribute untouched. Lists and maps have no attribute form.
    Skip,
}

impl AttributeWrite {
    /// The string the host ends up holding, if any.
    #[must_use]
    pub fn as_attribute_value(&self) -> Option<&str> {
        match self {
            Self::Set(s) => Some(s),
            Self::Present => Some(""),
            Self::Remove | Self::Skip => None,
        }
    }
}

/// Canonical attribute form of a property value.
#[must_use]
pub fn stringify_for_attribute(value: &PropValue) -> AttributeWrite {
    match value {
        PropValue::Str(s) => AttributeWrite::Set(s.clone()),
        PropValue::Number(n) => AttributeWrite::Set(format_number(*n)),
        PropValue::Bool(true) => AttributeWrite::Present,
        PropValue::Bool(false) | PropValue::Null | PropValue::Undefined => AttributeWrite::Remove,
        PropValue::List(_) | PropValue::Map(_) => AttributeWrite::Skip,
    }
}

/// Format a number the way script engines print it.
///
/// Integral values print without a fractional part, `-0` prints as `0`,
/// very large and very small magnitudes use exponent notation with an
/// explicit sign (`1e+21`, `1e-7`).
#[must_use]
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_owned();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if n == 0.0 {
        return "0".to_owned();
    }
    let magnitude = n.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let exp = format!("{n:e}");
        return match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
            _ => exp,
        };
    }
    format!("{n}")
}

/// Plain string form of a value, used when a non-string value is written to
/// a string-typed property.
#[must_use]
pub fn to_plain_string(value: &PropValue) -> String {
    match value {
        PropValue::Undefined => "undefined".to_owned(),
        PropValue::Null => "null".to_owned(),
        PropValue::Bool(b) => b.to_string(),
        PropValue::Number(n) => format_number(*n),
        PropValue::Str(s) => s.clone(),
        PropValue::List(items) => items
            .iter()
            .map(|item| {
                if item.is_nullish() {
                    String::new()
                } else {
                    to_plain_string(item)
                }
            })
            .collect::<Vec<_>>()
            .join(","),
        PropValue::Map(_) => "[object Object]".to_owned(),
    }
}
