#![forbid(unsafe_code)]

//! Reference components and helpers for propwire scenario tests.
//!
//! The fixtures mirror the components used throughout the property
//! documentation: a `todo-item` with primitive, renamed and object
//! properties, a `my-cmp` showing reflection, and a `name-tag` whose watcher
//! validates input.
//!
//! Run: `cargo test -p propwire-harness`

use std::sync::Arc;

use propwire_core::{
    AttributeMap, ComponentClass, ComponentInstance, DeclarationError, PropDecl, PropType, PropValue,
    RenderLog, WatchError,
};

/// Instance type used by scenario tests: in-memory host, recorded renders.
pub type Mounted = ComponentInstance<AttributeMap, RenderLog>;

/// `todo-item`: the documentation's running example.
///
/// | Property | Type | Attribute |
/// |----------|------|-----------|
/// | `isComplete` | boolean | `is-complete` |
/// | `timeToComplete` | number | `time-to-complete` |
/// | `thingToDo` | string, mutable | `thing-to-do` |
/// | `isValid` | boolean | `valid` |
/// | `value` | string | `value` |
/// | `controller` | object | none |
pub fn todo_item() -> Arc<ComponentClass> {
    ComponentClass::builder("todo-item")
        .prop(PropDecl::new("isComplete", PropType::Boolean))
        .prop(PropDecl::new("timeToComplete", PropType::Number))
        .prop(PropDecl::new("thingToDo", PropType::String).mutable())
        .prop(PropDecl::new("isValid", PropType::Boolean).attribute("valid"))
        .prop(PropDecl::new("value", PropType::String))
        .prop(PropDecl::new("controller", PropType::Object))
        .build()
        .unwrap_or_else(|err| fixture_failed("todo-item", &err))
}

/// `my-cmp`: `message` and `number` reflect, `value` does not.
pub fn my_cmp() -> Arc<ComponentClass> {
    ComponentClass::builder("my-cmp")
        .prop(
            PropDecl::new("message", PropType::String)
                .reflect()
                .default_value("Hello"),
        )
        .prop(PropDecl::new("value", PropType::String).default_value("The meaning of life..."))
        .prop(PropDecl::new("number", PropType::Number).reflect().default_value(42))
        .build()
        .unwrap_or_else(|err| fixture_failed("my-cmp", &err))
}

/// `name-tag`: `name` is required; the watcher rejects empty or missing names.
pub fn name_tag() -> Arc<ComponentClass> {
    ComponentClass::builder("name-tag")
        .prop(PropDecl::new("name", PropType::String).reflect().mutable())
        .watch("name", validate_name)
        .build()
        .unwrap_or_else(|err| fixture_failed("name-tag", &err))
}

/// Watcher used by [`name_tag`].
///
/// # Errors
///
/// `"name: required"` when the new value is empty or nullish.
pub fn validate_name(new: &PropValue, _old: &PropValue) -> Result<(), WatchError> {
    match new {
        PropValue::Str(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(WatchError::new("name: required")),
    }
}

/// Mount `class` on a host carrying `attrs`, then hydrate.
///
/// # Panics
///
/// If hydration fails; fixtures are expected to hydrate cleanly.
pub fn mount(class: Arc<ComponentClass>, attrs: &[(&str, &str)]) -> Mounted {
    let host: AttributeMap = attrs.iter().copied().collect();
    let mut instance = ComponentInstance::with_host(class, host, RenderLog::new());
    if let Err(err) = instance.hydrate_from_host() {
        panic!("hydration failed: {err}");
    }
    tracing::debug!(markup = %instance.render_markup(), "mounted fixture");
    instance
}

fn fixture_failed(tag: &str, err: &DeclarationError) -> ! {
    panic!("fixture <{tag}> has invalid declarations: {err}")
}
