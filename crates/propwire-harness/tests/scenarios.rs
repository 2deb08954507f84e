#![forbid(unsafe_code)]

//! Scenario tests for the documented property behaviors.
//!
//! # Invariants
//!
//! 1. **Dash-case**: undeclared attribute names derive from camel-case names.
//! 2. **Boolean quirk**: only `"false"` reads as false; `""` and `"0"` are true.
//! 3. **No object attributes**: object-typed properties never render.
//! 4. **Immutability**: the component cannot reassign its own non-mutable props.
//! 5. **Fail fast**: attribute collisions are rejected before any instance exists.
//!
//! Run: `cargo test -p propwire-harness --test scenarios`

use pretty_assertions::assert_eq;
use propwire_core::{
    BindingError, ComponentClass, DeclarationError, HostElement, Origin, PropDecl, PropType,
    PropValue, SetOutcome, WatchError,
};
use propwire_harness::{mount, my_cmp, name_tag, todo_item};

// ============================================================================
// Attribute naming
// ============================================================================

#[test]
fn todo_item_observes_dash_case_attributes() {
    assert_eq!(
        todo_item().observed_attributes(),
        ["is-complete", "time-to-complete", "thing-to-do", "valid", "value"]
    );
}

#[test]
fn collision_is_rejected_at_declaration_time() {
    let result = ComponentClass::builder("todo-item")
        .prop(PropDecl::new("thingToDo", PropType::String))
        .prop(PropDecl::new("chore", PropType::String).attribute("thing-to-do"))
        .build();

    assert_eq!(
        result.unwrap_err(),
        DeclarationError::AttributeNameCollision {
            attribute: "thing-to-do".into(),
            first: "thingToDo".into(),
            second: "chore".into(),
        }
    );
}

#[test]
fn swapped_explicit_names_do_not_collide() {
    // `isValid` would derive `is-valid`; `valid` is free, so both coexist.
    let class = ComponentClass::builder("x-form")
        .prop(PropDecl::new("isValid", PropType::Boolean).attribute("valid"))
        .prop(PropDecl::new("valid", PropType::String).attribute("is-valid"))
        .build()
        .expect("swapped names do not collide");
    assert_eq!(
        class.property_for_attribute("valid").map(|d| d.name()),
        Some("isValid")
    );
    assert_eq!(
        class.property_for_attribute("is-valid").map(|d| d.name()),
        Some("valid")
    );
}

// ============================================================================
// Boolean coercion through the host
// ============================================================================

#[test]
fn boolean_attribute_values_from_markup() {
    let cases = [
        ("", true),
        ("0", true),
        ("true", true),
        ("False", true),
        ("false", false),
    ];
    for (raw, expected) in cases {
        let item = mount(todo_item(), &[("is-complete", raw)]);
        assert_eq!(
            item.get_property("isComplete"),
            Some(&PropValue::Bool(expected)),
            "is-complete=\"{raw}\""
        );
    }

    let mut item = mount(todo_item(), &[("is-complete", "")]);
    item.set_attribute("is-complete", None).unwrap();
    assert_eq!(item.get_property("isComplete"), Some(&PropValue::Bool(false)));
}

#[test]
fn number_attribute_parse_failure_falls_back() {
    let item = mount(todo_item(), &[("time-to-complete", "later")]);
    assert_eq!(item.get_property("timeToComplete"), Some(&PropValue::Number(0.0)));
    assert_eq!(item.coercion_failures().len(), 1);
    assert_eq!(item.coercion_failures()[0].property, "timeToComplete");
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn renamed_boolean_and_object_props_render() {
    let mut item = mount(todo_item(), &[]);
    item.set_property("isValid", true, Origin::External).unwrap();
    item.set_property("value", "Hello", Origin::External).unwrap();
    item.set_property("controller", PropValue::Map(Default::default()), Origin::External)
        .unwrap();

    assert_eq!(
        item.render_attributes(),
        vec![
            ("valid".to_owned(), None),
            ("value".to_owned(), Some("Hello".to_owned())),
        ]
    );
    assert_eq!(item.render_markup(), "<todo-item valid value=\"Hello\"></todo-item>");
}

#[test]
fn reflected_defaults_reach_the_host() {
    let cmp = mount(my_cmp(), &[]);
    let host: Vec<_> = cmp.host().iter().collect();
    assert_eq!(host, [("message", "Hello"), ("number", "42")]);
}

#[test]
fn reflecting_external_write_round_trips() {
    let mut cmp = mount(my_cmp(), &[]);
    cmp.set_property("number", 3.5, Origin::External).unwrap();

    assert_eq!(cmp.host().get_attribute("number"), Some("3.5"));
    assert_eq!(cmp.get_property("number"), Some(&PropValue::Number(3.5)));
}

// ============================================================================
// Mutability
// ============================================================================

#[test]
fn immutable_prop_rejects_component_writes() {
    let mut item = mount(todo_item(), &[("time-to-complete", "10")]);
    let err = item
        .set_property("timeToComplete", 20, Origin::Internal)
        .unwrap_err();
    assert!(matches!(err, BindingError::ImmutablePropertyWriteRejected { .. }));
    assert_eq!(item.get_property("timeToComplete"), Some(&PropValue::Number(10.0)));
}

#[test]
fn mutable_prop_accepts_component_writes() {
    let mut item = mount(todo_item(), &[("thing-to-do", "Laundry")]);
    let outcome = item
        .set_property("thingToDo", "Fold laundry", Origin::Internal)
        .unwrap();
    assert_eq!(
        outcome,
        SetOutcome::Changed {
            old: PropValue::Str("Laundry".into())
        }
    );
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn validation_failure_reaches_the_caller() {
    let mut tag = mount(name_tag(), &[("name", "Ada")]);
    tag.scheduler_mut().clear();

    let err = tag.set_property("name", "", Origin::Internal).unwrap_err();
    assert_eq!(
        err,
        BindingError::ValidationFailure {
            property: "name".into(),
            source: WatchError::new("name: required"),
        }
    );
    // Committed and reflected before the watcher ran; no render requested.
    assert_eq!(tag.get_property("name"), Some(&PropValue::Str(String::new())));
    assert_eq!(tag.host().get_attribute("name"), Some(""));
    assert!(tag.scheduler().is_empty());
}

#[test]
fn removing_required_attribute_fails_validation() {
    let mut tag = mount(name_tag(), &[("name", "Ada")]);
    let err = tag.set_attribute("name", None).unwrap_err();
    assert!(matches!(err, BindingError::ValidationFailure { .. }));
    assert_eq!(tag.get_property("name"), Some(&PropValue::Undefined));
}

#[test]
fn successful_changes_request_renders_in_order() {
    let mut item = mount(todo_item(), &[]);
    item.set_attribute("thing-to-do", Some("Dishes")).unwrap();
    item.set_attribute("is-complete", Some("")).unwrap();
    item.set_attribute("is-complete", Some("yes")).unwrap();

    let rendered: Vec<&str> = item.scheduler().properties().collect();
    assert_eq!(rendered, ["thingToDo", "isComplete"]);
    assert!(item.host().has_attribute("is-complete"));
}
