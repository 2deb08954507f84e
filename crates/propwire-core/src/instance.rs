#![forbid(unsafe_code)]

//! Component instances: the per-instance value store.
//!
//! An instance owns its property values and its host element. Metadata comes
//! from the shared [`ComponentClass`].
//!
//! # Write pipeline
//!
//! Every successful change runs the same steps, synchronously:
//!
//! 1. Coerce the incoming value to the declared type.
//! 2. Compare with the stored value; an equal value ends the write
//!    ([`SetOutcome::Unchanged`]). A reflecting property written through its
//!    attribute is still re-reflected, so the host shows the canonical form.
//! 3. Commit the value.
//! 4. Reflect it into the host attribute (reflecting properties only).
//! 5. Run the property's watchers with `(new, old)`.
//! 6. Request a render.
//!
//! A watcher failure stops at step 5: the value stays committed and
//! reflected, later watchers and the render request are skipped, and the
//! failure is returned to the caller. The rejected value is not rendered
//! until a later change requests a render.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Unknown property | Name not declared | `Err(UnknownProperty)`, nothing changes |
//! | Immutable write | Internal write after a value exists | `Err(ImmutablePropertyWriteRejected)`, value kept |
//! | Bad number | Unparsable numeric input | Fallback value stored, failure recorded |
//! | Watcher error | Watcher returned `Err` | `Err(ValidationFailure)` after commit and reflection; no render requested |
//! | Unobserved attribute | Attribute not bound | Ignored |

use std::fmt;
use std::sync::Arc;

use crate::class::ComponentClass;
use crate::coerce::{Coerced, CoercionFailure, coerce_attribute, parse_property_value};
use crate::error::BindingError;
use crate::host::{AttributeMap, HostElement};
use crate::reflect::{AttributeWrite, stringify_for_attribute};
use crate::schedule::{NoopScheduler, RenderScheduler};
use crate::value::PropValue;

/// Where a write comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// From outside the component: an attribute or the parent's binding.
    External,
    /// From the component's own logic.
    Internal,
}

/// Result of a successful write.
#[derive(Debug, Clone, PartialEq)]
pub enum SetOutcome {
    /// The coerced value equals the stored one. Nothing else happened.
    Unchanged,
    /// The value changed; `old` is what it replaced.
    Changed { old: PropValue },
}

impl SetOutcome {
    #[must_use]
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed { .. })
    }
}

/// A live component: property values, host attributes, render scheduler.
pub struct ComponentInstance<H = AttributeMap, S = NoopScheduler> {
    class: Arc<ComponentClass>,
    values: Vec<PropValue>,
    established: Vec<bool>,
    host: H,
    scheduler: S,
    coercion_failures: Vec<CoercionFailure>,
}

impl ComponentInstance {
    /// Instance on an empty in-memory host with no scheduler.
    #[must_use]
    pub fn new(class: Arc<ComponentClass>) -> Self {
        Self::with_host(class, AttributeMap::new(), NoopScheduler)
    }
}

impl<H: HostElement, S: RenderScheduler> ComponentInstance<H, S> {
    /// Create an instance seeded with declared defaults.
    ///
    /// The host is not read or written here; see
    /// [`hydrate_from_host`](Self::hydrate_from_host).
    pub fn with_host(class: Arc<ComponentClass>, host: H, scheduler: S) -> Self {
        let values: Vec<PropValue> = class
            .descriptors()
            .iter()
            .map(|d| d.default_value().cloned().unwrap_or_default())
            .collect();
        let established = class
            .descriptors()
            .iter()
            .map(|d| d.default_value().is_some())
            .collect();
        Self {
            class,
            values,
            established,
            host,
            scheduler,
            coercion_failures: Vec::new(),
        }
    }

    #[must_use]
    pub fn class(&self) -> &Arc<ComponentClass> {
        &self.class
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Consume the instance, returning the host and scheduler.
    pub fn into_parts(self) -> (H, S) {
        (self.host, self.scheduler)
    }

    /// Current value of `property`, `None` if it is not declared.
    #[must_use]
    pub fn get_property(&self, property: &str) -> Option<&PropValue> {
        self.class.index_of(property).map(|i| &self.values[i])
    }

    /// Whether `property` has a value from a default or an earlier write.
    /// Writes that leave it null or undefined do not count.
    #[must_use]
    pub fn is_established(&self, property: &str) -> bool {
        self.class
            .index_of(property)
            .is_some_and(|i| self.established[i])
    }

    /// Non-fatal coercion failures recorded so far.
    #[must_use]
    pub fn coercion_failures(&self) -> &[CoercionFailure] {
        &self.coercion_failures
    }

    pub fn take_coercion_failures(&mut self) -> Vec<CoercionFailure> {
        std::mem::take(&mut self.coercion_failures)
    }

    /// Write a property value.
    ///
    /// # Errors
    ///
    /// - [`BindingError::UnknownProperty`] if `property` is not declared.
    /// - [`BindingError::ImmutablePropertyWriteRejected`] for an internal
    ///   write to a non-mutable property that already has a value.
    /// - [`BindingError::ValidationFailure`] if a watcher rejects the value.
    pub fn set_property(
        &mut self,
        property: &str,
        value: impl Into<PropValue>,
        origin: Origin,
    ) -> Result<SetOutcome, BindingError> {
        let index = self.index_of(property)?;
        let class = Arc::clone(&self.class);
        let desc = class.descriptor_at(index);
        let _span = tracing::debug_span!(
            "set_property",
            tag = class.tag(),
            property,
            origin = ?origin
        )
        .entered();

        if origin == Origin::Internal && !desc.is_mutable() && self.established[index] {
            tracing::warn!("rejected internal write to immutable property");
            return Err(BindingError::ImmutablePropertyWriteRejected {
                tag: class.tag().to_owned(),
                property: property.to_owned(),
            });
        }

        let coerced = parse_property_value(value.into(), desc.value_type(), desc.default_value());
        self.commit(index, coerced, None)
    }

    /// The DOM reported that `attribute` changed to `new_value` (`None` when
    /// removed). Coerces and applies it as an external write.
    ///
    /// Returns `Ok(None)` for attributes no property observes.
    ///
    /// # Errors
    ///
    /// [`BindingError::ValidationFailure`] if a watcher rejects the value.
    pub fn attribute_changed(
        &mut self,
        attribute: &str,
        new_value: Option<&str>,
    ) -> Result<Option<SetOutcome>, BindingError> {
        let Some(index) = self.class.attribute_index(attribute) else {
            tracing::trace!(attribute, "ignoring unobserved attribute");
            return Ok(None);
        };
        let class = Arc::clone(&self.class);
        let desc = class.descriptor_at(index);
        let _span = tracing::debug_span!(
            "attribute_changed",
            tag = class.tag(),
            attribute,
            property = desc.name()
        )
        .entered();

        let coerced = coerce_attribute(new_value, desc.value_type(), desc.default_value());
        self.commit(index, coerced, desc.attribute_name()).map(Some)
    }

    /// Set (or with `None`, remove) a host attribute and deliver the change,
    /// as the DOM does for `setAttribute` on an observed attribute.
    ///
    /// # Errors
    ///
    /// See [`attribute_changed`](Self::attribute_changed).
    pub fn set_attribute(
        &mut self,
        attribute: &str,
        value: Option<&str>,
    ) -> Result<Option<SetOutcome>, BindingError> {
        match value {
            Some(v) => self.host.set_attribute(attribute, v),
            None => {
                self.host.remove_attribute(attribute);
            }
        }
        self.attribute_changed(attribute, value)
    }

    /// Initial load: apply every observed attribute already on the host,
    /// then reflect all reflecting properties so defaults reach the host.
    ///
    /// Returns how many attributes were applied.
    ///
    /// # Errors
    ///
    /// Stops at the first [`BindingError::ValidationFailure`].
    pub fn hydrate_from_host(&mut self) -> Result<usize, BindingError> {
        let class = Arc::clone(&self.class);
        let mut applied = 0;
        for attr in class.observed_attributes() {
            let Some(raw) = self.host.get_attribute(attr).map(str::to_owned) else {
                continue;
            };
            self.attribute_changed(attr, Some(&raw))?;
            applied += 1;
        }
        for index in 0..class.len() {
            self.reflect_index(index);
        }
        tracing::debug!(tag = class.tag(), applied, "hydrated from host");
        Ok(applied)
    }

    /// Mirror the current value of `property` into its attribute.
    ///
    /// Returns the write performed, or `None` when the property does not
    /// reflect or has no attribute.
    ///
    /// # Errors
    ///
    /// [`BindingError::UnknownProperty`] if `property` is not declared.
    pub fn reflect_property(&mut self, property: &str) -> Result<Option<AttributeWrite>, BindingError> {
        let index = self.index_of(property)?;
        Ok(self.reflect_index(index))
    }

    /// Attributes a renderer emits for this instance, in declaration order.
    ///
    /// Every attribute-bound property with a present value is listed. `true`
    /// booleans are valueless (`None`); `false`, null and undefined values and
    /// unbound properties are omitted.
    #[must_use]
    pub fn render_attributes(&self) -> Vec<(String, Option<String>)> {
        self.class
            .descriptors()
            .iter()
            .zip(&self.values)
            .filter_map(|(desc, value)| {
                let attr = desc.attribute_name()?;
                match stringify_for_attribute(value) {
                    AttributeWrite::Set(s) => Some((attr.to_owned(), Some(s))),
                    AttributeWrite::Present => Some((attr.to_owned(), None)),
                    AttributeWrite::Remove | AttributeWrite::Skip => None,
                }
            })
            .collect()
    }

    /// Opening and closing tag with [`render_attributes`](Self::render_attributes).
    #[must_use]
    pub fn render_markup(&self) -> String {
        let tag = self.class.tag();
        let mut out = format!("<{tag}");
        for (name, value) in self.render_attributes() {
            out.push(' ');
            out.push_str(&name);
            if let Some(value) = value {
                out.push_str("=\"");
                out.push_str(&escape_attribute(&value));
                out.push('"');
            }
        }
        out.push_str("></");
        out.push_str(tag);
        out.push('>');
        out
    }

    fn index_of(&self, property: &str) -> Result<usize, BindingError> {
        self.class
            .index_of(property)
            .ok_or_else(|| BindingError::UnknownProperty {
                tag: self.class.tag().to_owned(),
                property: property.to_owned(),
            })
    }

    fn commit(
        &mut self,
        index: usize,
        coerced: Coerced,
        attribute: Option<&str>,
    ) -> Result<SetOutcome, BindingError> {
        let class = Arc::clone(&self.class);
        let desc = class.descriptor_at(index);

        let value = match coerced {
            Coerced::Value(value) => value,
            Coerced::Fallback { value, raw } => {
                let failure = CoercionFailure {
                    property: desc.name().to_owned(),
                    attribute: attribute.map(str::to_owned),
                    raw,
                    fallback: value.clone(),
                };
                tracing::warn!(%failure, "numeric coercion failed");
                self.coercion_failures.push(failure);
                value
            }
        };

        if self.values[index].same_value(&value) {
            if !value.is_nullish() {
                self.established[index] = true;
            }
            if attribute.is_some() {
                // The host may hold a non-canonical or unparsable string.
                self.reflect_index(index);
            }
            tracing::trace!("value unchanged");
            return Ok(SetOutcome::Unchanged);
        }

        let old = std::mem::replace(&mut self.values[index], value);
        self.established[index] = true;
        tracing::debug!(old = ?old, new = ?self.values[index], "property changed");

        self.reflect_index(index);

        for watcher in class.watchers_at(index) {
            if let Err(source) = watcher(&self.values[index], &old) {
                tracing::warn!(error = %source, "watcher rejected value");
                return Err(BindingError::ValidationFailure {
                    property: desc.name().to_owned(),
                    source,
                });
            }
        }

        self.scheduler.request_render(class.tag(), desc.name());
        Ok(SetOutcome::Changed { old })
    }

    fn reflect_index(&mut self, index: usize) -> Option<AttributeWrite> {
        let desc = self.class.descriptor_at(index);
        if !desc.reflects() {
            return None;
        }
        let attr = desc.attribute_name()?;
        let write = stringify_for_attribute(&self.values[index]);
        tracing::trace!(attribute = attr, write = ?write, "reflect");
        match &write {
            AttributeWrite::Set(s) => self.host.set_attribute(attr, s),
            AttributeWrite::Present => self.host.set_attribute(attr, ""),
            AttributeWrite::Remove => {
                self.host.remove_attribute(attr);
            }
            AttributeWrite::Skip => {}
        }
        Some(write)
    }
}

impl<H: fmt::Debug, S> fmt::Debug for ComponentInstance<H, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<(&str, &PropValue)> = self
            .class
            .descriptors()
            .iter()
            .map(|d| d.name())
            .zip(&self.values)
            .collect();
        f.debug_struct("ComponentInstance")
            .field("tag", &self.class.tag())
            .field("values", &values)
            .field("host", &self.host)
            .field("coercion_failures", &self.coercion_failures.len())
            .finish()
    }
}

fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::PropDecl;
    use crate::error::WatchError;
    use crate::schedule::RenderLog;
    use crate::value::PropType;
    use std::sync::Mutex;
    use tracing_test::traced_test;

    fn todo_item() -> Arc<ComponentClass> {
        ComponentClass::builder("todo-item")
            .prop(PropDecl::new("isComplete", PropType::Boolean))
            .prop(PropDecl::new("timeToComplete", PropType::Number))
            .prop(PropDecl::new("thingToDo", PropType::String))
            .prop(PropDecl::new("myHttpService", PropType::Object))
            .build()
            .unwrap()
    }

    fn my_cmp() -> Arc<ComponentClass> {
        ComponentClass::builder("my-cmp")
            .prop(PropDecl::new("message", PropType::String).reflect().default_value("Hello"))
            .prop(PropDecl::new("value", PropType::String).default_value("The meaning of life..."))
            .prop(PropDecl::new("number", PropType::Number).reflect().default_value(42))
            .prop(PropDecl::new("active", PropType::Boolean).reflect().mutable())
            .build()
            .unwrap()
    }

    fn logged(class: Arc<ComponentClass>) -> ComponentInstance<AttributeMap, RenderLog> {
        ComponentInstance::with_host(class, AttributeMap::new(), RenderLog::new())
    }

    #[test]
    fn new_instance_holds_defaults() {
        let inst = ComponentInstance::new(my_cmp());
        assert_eq!(inst.get_property("message"), Some(&PropValue::Str("Hello".into())));
        assert_eq!(inst.get_property("number"), Some(&PropValue::Number(42.0)));
        assert_eq!(inst.get_property("active"), Some(&PropValue::Undefined));
        assert!(inst.is_established("message"));
        assert!(!inst.is_established("active"));
        assert!(inst.host().is_empty());
    }

    #[test]
    fn unknown_property_is_an_error() {
        let mut inst = ComponentInstance::new(todo_item());
        assert_eq!(inst.get_property("nope"), None);
        assert_eq!(
            inst.set_property("nope", 1, Origin::External),
            Err(BindingError::UnknownProperty {
                tag: "todo-item".into(),
                property: "nope".into()
            })
        );
    }

    #[test]
    fn attribute_changes_coerce() {
        let mut inst = ComponentInstance::new(todo_item());
        inst.attribute_changed("is-complete", Some("0")).unwrap();
        inst.attribute_changed("time-to-complete", Some("15")).unwrap();
        inst.attribute_changed("thing-to-do", Some("Laundry")).unwrap();

        assert_eq!(inst.get_property("isComplete"), Some(&PropValue::Bool(true)));
        assert_eq!(inst.get_property("timeToComplete"), Some(&PropValue::Number(15.0)));
        assert_eq!(inst.get_property("thingToDo"), Some(&PropValue::Str("Laundry".into())));
    }

    #[test]
    fn removing_a_boolean_attribute_reads_false() {
        let mut inst = ComponentInstance::new(todo_item());
        inst.set_attribute("is-complete", Some("")).unwrap();
        assert_eq!(inst.get_property("isComplete"), Some(&PropValue::Bool(true)));
        inst.set_attribute("is-complete", None).unwrap();
        assert_eq!(inst.get_property("isComplete"), Some(&PropValue::Bool(false)));
    }

    #[test]
    fn unobserved_attributes_are_ignored() {
        let mut inst = ComponentInstance::new(todo_item());
        assert_eq!(inst.attribute_changed("my-http-service", Some("x")), Ok(None));
        assert_eq!(inst.attribute_changed("class", Some("big")), Ok(None));
    }

    #[test]
    fn attribute_names_are_case_insensitive() {
        let mut inst = ComponentInstance::new(todo_item());
        inst.attribute_changed("THING-TO-DO", Some("Dishes")).unwrap();
        assert_eq!(inst.get_property("thingToDo"), Some(&PropValue::Str("Dishes".into())));
    }

    #[test]
    fn immutable_property_rejects_internal_writes() {
        let mut inst = ComponentInstance::new(todo_item());
        inst.set_property("thingToDo", "Laundry", Origin::External).unwrap();

        let err = inst.set_property("thingToDo", "Nap", Origin::Internal).unwrap_err();
        assert_eq!(
            err,
            BindingError::ImmutablePropertyWriteRejected {
                tag: "todo-item".into(),
                property: "thingToDo".into()
            }
        );
        assert_eq!(inst.get_property("thingToDo"), Some(&PropValue::Str("Laundry".into())));

        // The parent can still update it.
        inst.set_property("thingToDo", "Dishes", Origin::External).unwrap();
        assert_eq!(inst.get_property("thingToDo"), Some(&PropValue::Str("Dishes".into())));
    }

    #[test]
    fn immutable_property_without_value_accepts_first_internal_write() {
        let mut inst = ComponentInstance::new(todo_item());
        assert!(inst.set_property("thingToDo", "Laundry", Origin::Internal).is_ok());
        assert!(inst.set_property("thingToDo", "Nap", Origin::Internal).is_err());
    }

    #[test]
    fn defaults_count_as_established() {
        let mut inst = ComponentInstance::new(my_cmp());
        assert!(matches!(
            inst.set_property("value", "changed", Origin::Internal),
            Err(BindingError::ImmutablePropertyWriteRejected { .. })
        ));
    }

    #[test]
    fn mutable_property_accepts_internal_writes() {
        let mut inst = ComponentInstance::new(my_cmp());
        inst.set_property("active", true, Origin::Internal).unwrap();
        inst.set_property("active", false, Origin::Internal).unwrap();
        assert_eq!(inst.get_property("active"), Some(&PropValue::Bool(false)));
    }

    #[test]
    fn reflection_mirrors_writes() {
        let mut inst = ComponentInstance::new(my_cmp());
        inst.set_property("number", 7, Origin::External).unwrap();
        assert_eq!(inst.host().get_attribute("number"), Some("7"));

        inst.set_property("active", true, Origin::Internal).unwrap();
        assert_eq!(inst.host().get_attribute("active"), Some(""));
        inst.set_property("active", false, Origin::Internal).unwrap();
        assert_eq!(inst.host().get_attribute("active"), None);
    }

    #[test]
    fn non_reflecting_property_leaves_host_alone() {
        let mut inst = ComponentInstance::new(my_cmp());
        inst.set_property("value", "new", Origin::External).unwrap();
        assert_eq!(inst.host().get_attribute("value"), None);
        assert_eq!(inst.reflect_property("value"), Ok(None));
    }

    #[test]
    fn reflect_property_is_idempotent() {
        let mut inst = ComponentInstance::new(my_cmp());
        let first = inst.reflect_property("message").unwrap();
        let after_first = inst.host().clone();
        let second = inst.reflect_property("message").unwrap();
        assert_eq!(first, second);
        assert_eq!(inst.host(), &after_first);
        assert_eq!(inst.host().len(), 1);
        assert_eq!(inst.host().get_attribute("message"), Some("Hello"));
    }

    #[test]
    fn hydrate_applies_host_then_reflects_defaults() {
        let host = AttributeMap::new().with("message", "Hi").with("value", "42");
        let mut inst = ComponentInstance::with_host(my_cmp(), host, NoopScheduler);
        assert_eq!(inst.hydrate_from_host(), Ok(2));

        assert_eq!(inst.get_property("message"), Some(&PropValue::Str("Hi".into())));
        assert_eq!(inst.get_property("value"), Some(&PropValue::Str("42".into())));
        assert_eq!(inst.host().get_attribute("message"), Some("Hi"));
        assert_eq!(inst.host().get_attribute("number"), Some("42"));
    }

    #[test]
    fn bad_number_attribute_is_rewritten_to_the_fallback() {
        let mut inst = logged(my_cmp());
        let outcome = inst.set_attribute("number", Some("abc")).unwrap();

        assert_eq!(outcome, Some(SetOutcome::Unchanged));
        assert_eq!(inst.get_property("number"), Some(&PropValue::Number(42.0)));
        assert_eq!(inst.host().get_attribute("number"), Some("42"));
        assert!(inst.scheduler().is_empty());
    }

    #[test]
    fn equal_attribute_value_is_canonicalized() {
        let mut inst = ComponentInstance::new(my_cmp());
        inst.set_attribute("number", Some(" 42.0 ")).unwrap();
        assert_eq!(inst.host().get_attribute("number"), Some("42"));

        // Non-reflecting properties leave the host as written.
        let mut item = ComponentInstance::new(todo_item());
        item.set_attribute("time-to-complete", Some("x")).unwrap();
        item.set_attribute("time-to-complete", Some("y")).unwrap();
        assert_eq!(item.host().get_attribute("time-to-complete"), Some("y"));
    }

    #[test]
    fn removing_an_absent_attribute_does_not_establish() {
        let mut inst = ComponentInstance::new(todo_item());
        assert_eq!(
            inst.attribute_changed("thing-to-do", None),
            Ok(Some(SetOutcome::Unchanged))
        );
        assert!(!inst.is_established("thingToDo"));
        assert!(inst.set_property("thingToDo", "Laundry", Origin::Internal).is_ok());
        assert!(inst.is_established("thingToDo"));
    }

    #[test]
    fn equal_writes_are_no_ops() {
        let mut inst = logged(my_cmp());
        assert_eq!(
            inst.set_property("message", "Hello", Origin::External),
            Ok(SetOutcome::Unchanged)
        );
        assert!(inst.scheduler().is_empty());

        let outcome = inst.set_property("message", "Bye", Origin::External).unwrap();
        assert_eq!(
            outcome,
            SetOutcome::Changed {
                old: PropValue::Str("Hello".into())
            }
        );
        assert_eq!(inst.scheduler().properties().collect::<Vec<_>>(), ["message"]);
    }

    #[test]
    fn nan_over_nan_is_unchanged() {
        let mut inst = ComponentInstance::new(my_cmp());
        inst.set_property("number", f64::NAN, Origin::External).unwrap();
        assert_eq!(
            inst.set_property("number", f64::NAN, Origin::External),
            Ok(SetOutcome::Unchanged)
        );
    }

    #[test]
    fn programmatic_strings_coerce_for_primitive_props() {
        let mut inst = ComponentInstance::new(todo_item());
        inst.set_property("timeToComplete", "30", Origin::External).unwrap();
        assert_eq!(inst.get_property("timeToComplete"), Some(&PropValue::Number(30.0)));
        inst.set_property("isComplete", "false", Origin::External).unwrap();
        assert_eq!(inst.get_property("isComplete"), Some(&PropValue::Bool(false)));
    }

    #[test]
    fn object_props_keep_value_type() {
        let mut inst = ComponentInstance::new(todo_item());
        inst.set_property("myHttpService", 42, Origin::External).unwrap();
        assert_eq!(inst.get_property("myHttpService"), Some(&PropValue::Number(42.0)));
        assert!(inst.render_attributes().is_empty());
    }

    #[test]
    #[traced_test]
    fn bad_number_records_failure_and_logs() {
        let mut inst = ComponentInstance::new(todo_item());
        inst.attribute_changed("time-to-complete", Some("soon")).unwrap();

        assert_eq!(inst.get_property("timeToComplete"), Some(&PropValue::Number(0.0)));
        let failures = inst.coercion_failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].attribute.as_deref(), Some("time-to-complete"));
        assert_eq!(failures[0].raw, "soon");
        assert!(logs_contain("numeric coercion failed"));

        assert_eq!(inst.take_coercion_failures().len(), 1);
        assert!(inst.coercion_failures().is_empty());
    }

    #[test]
    #[traced_test]
    fn rejected_write_is_logged() {
        let mut inst = ComponentInstance::new(my_cmp());
        let _ = inst.set_property("message", "x", Origin::Internal);
        assert!(logs_contain("rejected internal write to immutable property"));
    }

    #[test]
    fn watchers_see_new_and_old() {
        let seen: Arc<Mutex<Vec<(PropValue, PropValue)>>> = Arc::default();
        let sink = Arc::clone(&seen);
        let class = ComponentClass::builder("x-el")
            .prop(PropDecl::new("name", PropType::String).default_value("a"))
            .watch("name", move |new, old| {
                sink.lock().unwrap().push((new.clone(), old.clone()));
                Ok(())
            })
            .build()
            .unwrap();

        let mut inst = ComponentInstance::new(class);
        inst.set_property("name", "b", Origin::External).unwrap();
        inst.set_property("name", "b", Origin::External).unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![(PropValue::Str("b".into()), PropValue::Str("a".into()))]
        );
    }

    #[test]
    fn watcher_failure_keeps_commit_and_skips_render() {
        let second_ran = Arc::new(Mutex::new(false));
        let flag = Arc::clone(&second_ran);
        let class = ComponentClass::builder("x-el")
            .prop(PropDecl::new("name", PropType::String).reflect())
            .watch("name", |new, _| {
                if new.as_str().is_some_and(str::is_empty) {
                    Err(WatchError::new("name: required"))
                } else {
                    Ok(())
                }
            })
            .watch("name", move |_, _| {
                *flag.lock().unwrap() = true;
                Ok(())
            })
            .build()
            .unwrap();

        let mut inst = logged(class);
        let err = inst.set_property("name", "", Origin::External).unwrap_err();

        assert_eq!(
            err,
            BindingError::ValidationFailure {
                property: "name".into(),
                source: WatchError::new("name: required"),
            }
        );
        assert_eq!(inst.get_property("name"), Some(&PropValue::Str(String::new())));
        assert_eq!(inst.host().get_attribute("name"), Some(""));
        assert!(!*second_ran.lock().unwrap());
        assert!(inst.scheduler().is_empty());
    }

    #[test]
    fn render_attributes_and_markup() {
        let mut inst = ComponentInstance::new(todo_item());
        inst.set_property("isComplete", true, Origin::External).unwrap();
        inst.set_property("thingToDo", "Say \"hi\" & go", Origin::External).unwrap();

        assert_eq!(
            inst.render_attributes(),
            vec![
                ("is-complete".to_owned(), None),
                ("thing-to-do".to_owned(), Some("Say \"hi\" & go".to_owned())),
            ]
        );
        assert_eq!(
            inst.render_markup(),
            "<todo-item is-complete thing-to-do=\"Say &quot;hi&quot; &amp; go\"></todo-item>"
        );
    }

    #[test]
    fn debug_lists_values_by_name() {
        let inst = ComponentInstance::new(my_cmp());
        let debug = format!("{inst:?}");
        assert!(debug.contains("\"message\""));
        assert!(debug.contains("tag: \"my-cmp\""));
    }

    #[test]
    fn into_parts_returns_host_and_scheduler() {
        let mut inst = logged(my_cmp());
        inst.set_property("number", 1, Origin::External).unwrap();
        let (host, log) = inst.into_parts();
        assert_eq!(host.get_attribute("number"), Some("1"));
        assert_eq!(log.len(), 1);
    }
}
