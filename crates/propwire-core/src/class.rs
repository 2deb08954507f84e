#![forbid(unsafe_code)]

//! Component classes: the per-class property binding table.
//!
//! A class is built once from its declarations and shared read-only by every
//! instance through an `Arc`.
//!
//! # Invariants
//!
//! 1. Exactly one descriptor per declared property, in declaration order.
//! 2. No two descriptors bind the same attribute (ASCII case-insensitive).
//!    Explicit overrides and derived names are checked against each other.
//! 3. Watchers run in registration order.
//! 4. Nothing on a built class is mutable.

use std::fmt;
use std::sync::Arc;

use ahash::AHashMap;

use crate::descriptor::{PropDecl, PropertyDescriptor};
use crate::error::{DeclarationError, WatchError};
use crate::naming::{attribute_key, is_valid_property_name};
use crate::value::PropValue;

/// Validation/reaction callback: `(new, old)`.
pub type Watcher = Arc<dyn Fn(&PropValue, &PropValue) -> Result<(), WatchError> + Send + Sync>;

/// The binding table of one component class.
pub struct ComponentClass {
    tag: String,
    descriptors: Vec<PropertyDescriptor>,
    by_name: AHashMap<String, usize>,
    by_attribute: AHashMap<String, usize>,
    watchers: Vec<Vec<Watcher>>,
}

impl ComponentClass {
    /// Start declaring a class for the custom element `tag`.
    #[must_use]
    pub fn builder(tag: impl Into<String>) -> ComponentClassBuilder {
        ComponentClassBuilder::new(tag)
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Descriptor for a property name (case-sensitive).
    #[must_use]
    pub fn descriptor(&self, property: &str) -> Option<&PropertyDescriptor> {
        self.index_of(property).map(|i| &self.descriptors[i])
    }

    /// All descriptors in declaration order.
    #[must_use]
    pub fn descriptors(&self) -> &[PropertyDescriptor] {
        &self.descriptors
    }

    /// The property bound to `attribute`. Lookup ignores ASCII case.
    #[must_use]
    pub fn property_for_attribute(&self, attribute: &str) -> Option<&PropertyDescriptor> {
        self.attribute_index(attribute).map(|i| &self.descriptors[i])
    }

    /// Every bound attribute name, in declaration order.
    #[must_use]
    pub fn observed_attributes(&self) -> Vec<&str> {
        self.descriptors
            .iter()
            .filter_map(PropertyDescriptor::attribute_name)
            .collect()
    }

    /// Number of watchers registered on `property`.
    #[must_use]
    pub fn watcher_count(&self, property: &str) -> usize {
        self.index_of(property).map_or(0, |i| self.watchers[i].len())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub(crate) fn index_of(&self, property: &str) -> Option<usize> {
        self.by_name.get(property).copied()
    }

    pub(crate) fn attribute_index(&self, attribute: &str) -> Option<usize> {
        self.by_attribute.get(&attribute_key(attribute)).copied()
    }

    pub(crate) fn descriptor_at(&self, index: usize) -> &PropertyDescriptor {
        &self.descriptors[index]
    }

    pub(crate) fn watchers_at(&self, index: usize) -> &[Watcher] {
        &self.watchers[index]
    }
}

impl fmt::Debug for ComponentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentClass")
            .field("tag", &self.tag)
            .field("descriptors", &self.descriptors)
            .field(
                "watchers",
                &self.watchers.iter().map(Vec::len).sum::<usize>(),
            )
            .finish()
    }
}

/// Collects declarations and watchers for a [`ComponentClass`].
///
/// ```
/// use propwire_core::class::ComponentClass;
/// use propwire_core::descriptor::PropDecl;
/// use propwire_core::value::PropType;
///
/// let class = ComponentClass::builder("todo-item")
///     .prop(PropDecl::new("thingToDo", PropType::String))
///     .prop(PropDecl::new("isValid", PropType::Boolean).attribute("valid"))
///     .build()
///     .unwrap();
///
/// assert_eq!(class.observed_attributes(), ["thing-to-do", "valid"]);
/// ```
pub struct ComponentClassBuilder {
    tag: String,
    decls: Vec<PropDecl>,
    watchers: Vec<(String, Watcher)>,
}

impl ComponentClassBuilder {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            decls: Vec::new(),
            watchers: Vec::new(),
        }
    }

    /// Declare a property.
    #[must_use]
    pub fn prop(mut self, decl: PropDecl) -> Self {
        self.decls.push(decl);
        self
    }

    /// Declare several properties.
    #[must_use]
    pub fn props(mut self, decls: impl IntoIterator<Item = PropDecl>) -> Self {
        self.decls.extend(decls);
        self
    }

    /// Register a watcher on `property`, called with `(new, old)` after each
    /// change.
    #[must_use]
    pub fn watch(
        mut self,
        property: impl Into<String>,
        watcher: impl Fn(&PropValue, &PropValue) -> Result<(), WatchError> + Send + Sync + 'static,
    ) -> Self {
        self.watchers.push((property.into(), Arc::new(watcher)));
        self
    }

    /// Validate the declarations and freeze the binding table.
    ///
    /// # Errors
    ///
    /// Returns the first [`DeclarationError`] found, checked per property in
    /// declaration order, then watchers.
    pub fn build(self) -> Result<Arc<ComponentClass>, DeclarationError> {
        let _span = tracing::debug_span!("class_build", tag = %self.tag).entered();

        let mut descriptors = Vec::with_capacity(self.decls.len());
        let mut by_name = AHashMap::with_capacity(self.decls.len());
        let mut by_attribute: AHashMap<String, usize> = AHashMap::new();

        for decl in self.decls {
            let index = descriptors.len();
            if !is_valid_property_name(decl.name()) {
                return Err(DeclarationError::InvalidPropertyName {
                    tag: self.tag,
                    property: decl.name().to_owned(),
                });
            }
            if by_name.contains_key(decl.name()) {
                return Err(DeclarationError::DuplicateProperty {
                    tag: self.tag,
                    property: decl.name().to_owned(),
                });
            }
            if let Some(default) = &decl.options().default {
                if !decl.value_type().accepts(default) {
                    return Err(DeclarationError::DefaultTypeMismatch {
                        property: decl.name().to_owned(),
                        expected: decl.value_type(),
                        found: default.kind(),
                    });
                }
            }

            let desc = PropertyDescriptor::from_decl(decl);
            if let Some(attr) = desc.attribute_name() {
                let key = attribute_key(attr);
                if let Some(&prior) = by_attribute.get(&key) {
                    let first: &PropertyDescriptor = &descriptors[prior];
                    tracing::warn!(
                        attribute = attr,
                        first = first.name(),
                        second = desc.name(),
                        "attribute name collision"
                    );
                    return Err(DeclarationError::AttributeNameCollision {
                        attribute: attr.to_owned(),
                        first: first.name().to_owned(),
                        second: desc.name().to_owned(),
                    });
                }
                by_attribute.insert(key, index);
            }

            tracing::trace!(
                property = desc.name(),
                attribute = desc.attribute_name(),
                ty = %desc.value_type(),
                mutable = desc.is_mutable(),
                reflect = desc.reflects(),
                "declared property"
            );
            by_name.insert(desc.name().to_owned(), index);
            descriptors.push(desc);
        }

        let mut watchers: Vec<Vec<Watcher>> = vec![Vec::new(); descriptors.len()];
        for (property, watcher) in self.watchers {
            let Some(&index) = by_name.get(&property) else {
                return Err(DeclarationError::UnknownWatchTarget {
                    tag: self.tag,
                    property,
                });
            };
            watchers[index].push(watcher);
        }

        tracing::debug!(properties = descriptors.len(), "component class built");
        Ok(Arc::new(ComponentClass {
            tag: self.tag,
            descriptors,
            by_name,
            by_attribute,
            watchers,
        }))
    }
}

impl fmt::Debug for ComponentClassBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentClassBuilder")
            .field("tag", &self.tag)
            .field("decls", &self.decls)
            .field("watchers", &self.watchers.len())
            .finish()
    }
}
