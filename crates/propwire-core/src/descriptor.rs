#![forbid(unsafe_code)]

//! Property declarations and the descriptors built from them.
//!
//! A [`PropDecl`] is the explicit declaration record a component supplies at
//! class-definition time. [`PropertyDescriptor`] is the immutable, resolved
//! form kept by the class and read by every instance.

use bitflags::bitflags;

use crate::naming::{AttributeOption, derive_attribute_name};
use crate::value::{PropType, PropValue};

bitflags! {
    /// Behavior flags of a property.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PropFlags: u8 {
        /// The component may reassign the property after it has a value.
        const MUTABLE = 1 << 0;
        /// Writes are mirrored into the bound attribute.
        const REFLECT = 1 << 1;
    }
}

/// Options recognized on a property declaration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropOptions {
    pub attribute: AttributeOption,
    pub mutable: bool,
    pub reflect: bool,
    pub default: Option<PropValue>,
}

impl PropOptions {
    #[must_use]
    pub fn flags(&self) -> PropFlags {
        let mut flags = PropFlags::empty();
        flags.set(PropFlags::MUTABLE, self.mutable);
        flags.set(PropFlags::REFLECT, self.reflect);
        flags
    }
}

/// Declaration of one property on a component class.
///
/// ```
/// use propwire_core::descriptor::PropDecl;
/// use propwire_core::value::PropType;
///
/// let decl = PropDecl::new("isValid", PropType::Boolean).attribute("valid");
/// assert_eq!(decl.name(), "isValid");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PropDecl {
    name: String,
    ty: PropType,
    options: PropOptions,
}

impl PropDecl {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: PropType) -> Self {
        Self {
            name: name.into(),
            ty,
            options: PropOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(name: impl Into<String>, ty: PropType, options: PropOptions) -> Self {
        Self {
            name: name.into(),
            ty,
            options,
        }
    }

    /// Bind to `attr` instead of the derived name.
    ///
    /// An empty name means no attribute, like [`no_attribute`](Self::no_attribute).
    #[must_use]
    pub fn attribute(mut self, attr: impl Into<String>) -> Self {
        self.options.attribute = AttributeOption::Explicit(attr.into());
        self
    }

    /// Do not bind any attribute.
    #[must_use]
    pub fn no_attribute(mut self) -> Self {
        self.options.attribute = AttributeOption::Suppressed;
        self
    }

    #[must_use]
    pub fn mutable(mut self) -> Self {
        self.options.mutable = true;
        self
    }

    #[must_use]
    pub fn reflect(mut self) -> Self {
        self.options.reflect = true;
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: impl Into<PropValue>) -> Self {
        self.options.default = Some(value.into());
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value_type(&self) -> PropType {
        self.ty
    }

    #[must_use]
    pub fn options(&self) -> &PropOptions {
        &self.options
    }
}

/// Resolved, immutable metadata for one property.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    name: String,
    attribute: Option<String>,
    ty: PropType,
    flags: PropFlags,
    default: Option<PropValue>,
}

impl PropertyDescriptor {
    /// Resolve a declaration. Validation happens in the class builder.
    #[must_use]
    pub fn from_decl(decl: PropDecl) -> Self {
        let attribute = derive_attribute_name(&decl.name, decl.ty, &decl.options.attribute);
        let flags = decl.options.flags();
        Self {
            name: decl.name,
            attribute,
            ty: decl.ty,
            flags,
            default: decl.options.default,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bound attribute, if any.
    #[must_use]
    pub fn attribute_name(&self) -> Option<&str> {
        self.attribute.as_deref()
    }

    #[must_use]
    pub fn value_type(&self) -> PropType {
        self.ty
    }

    #[must_use]
    pub fn flags(&self) -> PropFlags {
        self.flags
    }

    #[must_use]
    pub fn is_mutable(&self) -> bool {
        self.flags.contains(PropFlags::MUTABLE)
    }

    #[must_use]
    pub fn reflects(&self) -> bool {
        self.flags.contains(PropFlags::REFLECT)
    }

    #[must_use]
    pub fn default_value(&self) -> Option<&PropValue> {
        self.default.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_immutable_and_not_reflected() {
        let desc = PropertyDescriptor::from_decl(PropDecl::new("thingToDo", PropType::String));
        assert_eq!(desc.name(), "thingToDo");
        assert_eq!(desc.attribute_name(), Some("thing-to-do"));
        assert!(!desc.is_mutable());
        assert!(!desc.reflects());
        assert_eq!(desc.flags(), PropFlags::empty());
        assert_eq!(desc.default_value(), None);
    }

    #[test]
    fn builder_options_resolve() {
        let desc = PropertyDescriptor::from_decl(
            PropDecl::new("number", PropType::Number)
                .reflect()
                .mutable()
                .default_value(42),
        );
        assert!(desc.is_mutable());
        assert!(desc.reflects());
        assert_eq!(desc.flags(), PropFlags::MUTABLE | PropFlags::REFLECT);
        assert_eq!(desc.default_value(), Some(&PropValue::Number(42.0)));
    }

    #[test]
    fn explicit_attribute_is_kept() {
        let desc =
            PropertyDescriptor::from_decl(PropDecl::new("isValid", PropType::Boolean).attribute("valid"));
        assert_eq!(desc.attribute_name(), Some("valid"));
    }

    #[test]
    fn object_and_suppressed_have_no_attribute() {
        let controller = PropertyDescriptor::from_decl(PropDecl::new("controller", PropType::Object));
        assert_eq!(controller.attribute_name(), None);

        let hidden =
            PropertyDescriptor::from_decl(PropDecl::new("label", PropType::String).no_attribute());
        assert_eq!(hidden.attribute_name(), None);
    }

    #[test]
    fn options_flags() {
        let options = PropOptions {
            reflect: true,
            ..PropOptions::default()
        };
        assert_eq!(options.flags(), PropFlags::REFLECT);
    }
}
