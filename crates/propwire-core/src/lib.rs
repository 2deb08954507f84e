#![forbid(unsafe_code)]

//! Property/attribute binding for web components.
//!
//! A component class declares typed properties. Each primitive property is
//! bound to a DOM attribute whose name is derived (`thingToDo` →
//! `thing-to-do`) or given explicitly. This crate provides:
//!
//! - [`ComponentClass`]: the per-class binding table, built once and shared.
//! - [`ComponentInstance`]: the per-instance value store with coercion,
//!   reflection, watchers, and render requests.
//! - [`coerce`] / [`reflect`]: string ↔ value conversion rules.
//! - [`HostElement`] and [`RenderScheduler`]: the two seams to the outside.
//!
//! # Example
//!
//! ```
//! use propwire_core::{ComponentClass, ComponentInstance, Origin, PropDecl, PropType, PropValue};
//!
//! let class = ComponentClass::builder("todo-item")
//!     .prop(PropDecl::new("isComplete", PropType::Boolean).reflect().mutable())
//!     .prop(PropDecl::new("thingToDo", PropType::String))
//!     .build()
//!     .unwrap();
//!
//! let mut item = ComponentInstance::new(class);
//! item.attribute_changed("is-complete", Some("0")).unwrap();
//! assert_eq!(item.get_property("isComplete"), Some(&PropValue::Bool(true)));
//!
//! item.set_property("isComplete", false, Origin::Internal).unwrap();
//! assert_eq!(item.render_markup(), "<todo-item></todo-item>");
//! ```

pub mod class;
pub mod coerce;
pub mod descriptor;
pub mod error;
pub mod host;
pub mod instance;
pub mod logging;
#[cfg(feature = "manifest")]
pub mod manifest;
pub mod naming;
pub mod reflect;
pub mod schedule;
pub mod value;

pub use class::{ComponentClass, ComponentClassBuilder, Watcher};
pub use coerce::{Coerced, CoercionFailure, coerce_attribute, parse_property_value};
pub use descriptor::{PropDecl, PropFlags, PropOptions, PropertyDescriptor};
pub use error::{BindingError, DeclarationError, WatchError};
pub use host::{AttributeMap, HostElement};
pub use instance::{ComponentInstance, Origin, SetOutcome};
#[cfg(feature = "manifest")]
pub use manifest::{ComponentManifest, ManifestError};
pub use naming::{AttributeOption, dash_case, derive_attribute_name};
pub use reflect::{AttributeWrite, stringify_for_attribute};
pub use schedule::{NoopScheduler, RenderLog, RenderRequest, RenderScheduler};
pub use value::{PropType, PropValue};
