#![forbid(unsafe_code)]

//! Declared property types and the runtime value model.
//!
//! A [`PropType`] is the explicit type tag supplied when a property is
//! declared. A [`PropValue`] is what an instance actually stores.
//!
//! # Invariants
//!
//! 1. Only [`PropType::Object`] is non-binding: it never acquires an
//!    attribute through derivation.
//! 2. [`PropValue::same_value`] treats two NaN numbers as the same value, so
//!    writing NaN over NaN is not a change.

use std::collections::BTreeMap;
use std::fmt;

/// Declared type of a component property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "manifest", derive(serde::Deserialize))]
#[cfg_attr(feature = "manifest", serde(rename_all = "lowercase"))]
pub enum PropType {
    String,
    Number,
    Boolean,
    /// Object-like values (records, lists, services). Never bound to an attribute.
    Object,
    /// No type given. Not primitive, so no derived attribute; values pass
    /// through untouched.
    #[default]
    Any,
}

impl PropType {
    /// String, number or boolean.
    #[must_use]
    pub const fn is_primitive(self) -> bool {
        matches!(self, Self::String | Self::Number | Self::Boolean)
    }

    /// Whether a property of this type gets a derived attribute name.
    /// Only primitives do.
    #[must_use]
    pub const fn binds_attribute(self) -> bool {
        self.is_primitive()
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Any => "any",
        }
    }

    /// Whether `value` is an acceptable stored value (or default) for this type.
    ///
    /// `Null` and `Undefined` fit every type.
    #[must_use]
    pub fn accepts(self, value: &PropValue) -> bool {
        match (self, value) {
            (_, PropValue::Null | PropValue::Undefined) => true,
            (Self::String, PropValue::Str(_)) => true,
            (Self::Number, PropValue::Number(_)) => true,
            (Self::Boolean, PropValue::Bool(_)) => true,
            (Self::Object | Self::Any, _) => true,
            _ => false,
        }
    }
}

impl fmt::Display for PropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime value held by a component property.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PropValue {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    List(Vec<PropValue>),
    Map(BTreeMap<String, PropValue>),
}

impl PropValue {
    /// Equality used for change detection.
    ///
    /// Identical to `==` except that NaN is the same value as NaN, at any depth.
    #[must_use]
    pub fn same_value(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Self::List(a), Self::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_value(y))
            }
            (Self::Map(a), Self::Map(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b)
                        .all(|((ka, va), (kb, vb))| ka == kb && va.same_value(vb))
            }
            _ => self == other,
        }
    }

    /// `Null` or `Undefined`.
    #[must_use]
    pub fn is_nullish(&self) -> bool {
        matches!(self, Self::Null | Self::Undefined)
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of the variant, for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Str(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Vec<PropValue>> for PropValue {
    fn from(value: Vec<PropValue>) -> Self {
        Self::List(value)
    }
}

impl From<BTreeMap<String, PropValue>> for PropValue {
    fn from(value: BTreeMap<String, PropValue>) -> Self {
        Self::Map(value)
    }
}

impl<T: Into<PropValue>> From<Option<T>> for PropValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
