#![no_main]

//! Random sequences of attribute changes and property writes against a
//! fixed class. Reflected values must be visible on the host after every step.

use std::sync::Arc;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use propwire_core::{
    ComponentClass, ComponentInstance, HostElement, Origin, PropDecl, PropType, PropValue,
};

#[derive(Debug, Arbitrary)]
enum Op {
    Attribute { slot: u8, value: Option<String> },
    Number { value: f64, internal: bool },
    Text { value: String, internal: bool },
    Flag { value: bool },
}

const ATTRS: [&str; 4] = ["is-complete", "time-to-complete", "thing-to-do", "label"];

fn class() -> Option<Arc<ComponentClass>> {
    ComponentClass::builder("fuzz-item")
        .prop(PropDecl::new("isComplete", PropType::Boolean).reflect().mutable())
        .prop(PropDecl::new("timeToComplete", PropType::Number).reflect())
        .prop(PropDecl::new("thingToDo", PropType::String).reflect().mutable())
        .prop(PropDecl::new("label", PropType::String))
        .build()
        .ok()
}

fuzz_target!(|ops: Vec<Op>| {
    let Some(class) = class() else {
        return;
    };
    let mut inst = ComponentInstance::new(class);
    for op in ops {
        let _ = match op {
            Op::Attribute { slot, value } => {
                let attr = ATTRS[usize::from(slot) % ATTRS.len()];
                inst.set_attribute(attr, value.as_deref()).map(|_| ())
            }
            Op::Number { value, internal } => {
                let origin = if internal { Origin::Internal } else { Origin::External };
                inst.set_property("timeToComplete", value, origin).map(|_| ())
            }
            Op::Text { value, internal } => {
                let origin = if internal { Origin::Internal } else { Origin::External };
                inst.set_property("thingToDo", value, origin).map(|_| ())
            }
            Op::Flag { value } => inst.set_property("isComplete", value, Origin::Internal).map(|_| ()),
        };

        if inst.get_property("isComplete") == Some(&PropValue::Bool(true)) {
            assert!(inst.host().has_attribute("is-complete"));
        }
        if let Some(PropValue::Str(text)) = inst.get_property("thingToDo") {
            assert_eq!(inst.host().get_attribute("thing-to-do"), Some(text.as_str()));
        }
    }
});
