#![forbid(unsafe_code)]

//! Error types.
//!
//! | Error | Raised by | When |
//! |-------|-----------|------|
//! | [`DeclarationError`] | `ComponentClassBuilder::build` | Class definition is inconsistent |
//! | [`BindingError`] | `ComponentInstance::set_property` and friends | A single write fails |
//! | [`WatchError`] | user watchers | A watcher rejects a new value |
//!
//! Coercion failures are not errors; see [`crate::coerce::CoercionFailure`].

use std::fmt;

use crate::value::PropType;

/// A component class definition was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclarationError {
    /// Two properties resolve to the same attribute (compared case-insensitively).
    AttributeNameCollision {
        attribute: String,
        first: String,
        second: String,
    },
    /// The same property name was declared twice.
    DuplicateProperty { tag: String, property: String },
    /// The property name is not a usable identifier.
    InvalidPropertyName { tag: String, property: String },
    /// The declared default does not fit the declared type.
    DefaultTypeMismatch {
        property: String,
        expected: PropType,
        found: &'static str,
    },
    /// A watcher targets a property that was never declared.
    UnknownWatchTarget { tag: String, property: String },
}

impl fmt::Display for DeclarationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AttributeNameCollision {
                attribute,
                first,
                second,
            } => write!(
                f,
                "properties '{first}' and '{second}' both bind attribute '{attribute}'"
            ),
            Self::DuplicateProperty { tag, property } => {
                write!(f, "<{tag}> declares property '{property}' more than once")
            }
            Self::InvalidPropertyName { tag, property } => {
                write!(f, "<{tag}> declares invalid property name {property:?}")
            }
            Self::DefaultTypeMismatch {
                property,
                expected,
                found,
            } => write!(
                f,
                "default for '{property}' is a {found}, but the property is declared {expected}"
            ),
            Self::UnknownWatchTarget { tag, property } => {
                write!(f, "<{tag}> watches undeclared property '{property}'")
            }
        }
    }
}

impl std::error::Error for DeclarationError {}

/// Failure raised by a watcher callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchError {
    message: String,
}

impl WatchError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for WatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for WatchError {}

/// A property write failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// No property with this name on the component.
    UnknownProperty { tag: String, property: String },
    /// The component tried to reassign a non-mutable property that already
    /// has a value. The previous value is kept.
    ImmutablePropertyWriteRejected { tag: String, property: String },
    /// A watcher rejected the new value. The value was already committed
    /// and reflected.
    ValidationFailure { property: String, source: WatchError },
}

impl fmt::Display for BindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownProperty { tag, property } => {
                write!(f, "<{tag}> has no property '{property}'")
            }
            Self::ImmutablePropertyWriteRejected { tag, property } => write!(
                f,
                "<{tag}> cannot reassign immutable property '{property}' from inside the component"
            ),
            Self::ValidationFailure { property, source } => {
                write!(f, "validation of '{property}' failed: {source}")
            }
        }
    }
}

impl std::error::Error for BindingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ValidationFailure { source, .. } => Some(source),
            _ => None,
        }
    }
}
