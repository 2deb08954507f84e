#![forbid(unsafe_code)]

//! Attribute name derivation.
//!
//! Property identifiers are camel-case (`thingToDo`); DOM attributes are
//! lowercase dash-case (`thing-to-do`). A property may override its attribute
//! name or suppress the binding entirely.

use crate::value::PropType;

/// How a declared property chooses its attribute name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AttributeOption {
    /// Derive the name from the property identifier.
    #[default]
    Derived,
    /// Use this name verbatim. An empty name suppresses the binding.
    Explicit(String),
    /// Never bind an attribute.
    Suppressed,
}

impl AttributeOption {
    #[must_use]
    pub fn explicit(name: impl Into<String>) -> Self {
        Self::Explicit(name.into())
    }
}

/// Convert a camel-case identifier to dash-case.
///
/// A hyphen is inserted before every uppercase letter except a leading one,
/// and the result is lowercased.
///
/// ```
/// use propwire_core::naming::dash_case;
///
/// assert_eq!(dash_case("thingToDo"), "thing-to-do");
/// assert_eq!(dash_case("value"), "value");
/// ```
#[must_use]
pub fn dash_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Resolve the attribute bound to a property, if any.
///
/// A non-empty explicit override always wins and is returned verbatim; an
/// empty one suppresses the binding. Without one, only string, number and
/// boolean properties get an attribute: the dash-case form of their name.
#[must_use]
pub fn derive_attribute_name(name: &str, ty: PropType, option: &AttributeOption) -> Option<String> {
    match option {
        AttributeOption::Explicit(attr) if attr.trim().is_empty() => None,
        AttributeOption::Explicit(attr) => Some(attr.clone()),
        AttributeOption::Suppressed => None,
        AttributeOption::Derived if ty.binds_attribute() => Some(dash_case(name)),
        AttributeOption::Derived => None,
    }
}

/// Key used to compare attribute names. HTML attribute names are ASCII
/// case-insensitive.
#[must_use]
pub(crate) fn attribute_key(attr: &str) -> String {
    attr.to_ascii_lowercase()
}

/// Whether `name` is a usable property identifier.
///
/// Letters, digits, `_` and `$`, not starting with a digit.
#[must_use]
pub fn is_valid_property_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
