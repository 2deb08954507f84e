#![no_main]

//! Raw attribute strings must coerce without panicking, and every coerced
//! value must have a stable attribute form.

use libfuzzer_sys::fuzz_target;
use propwire_core::{AttributeWrite, PropType, coerce_attribute, stringify_for_attribute};

const TYPES: [PropType; 5] = [
    PropType::String,
    PropType::Number,
    PropType::Boolean,
    PropType::Object,
    PropType::Any,
];

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };
    for ty in TYPES {
        let value = coerce_attribute(Some(raw), ty, None).into_value();
        assert!(ty.accepts(&value));

        if let AttributeWrite::Set(text) = stringify_for_attribute(&value) {
            let again = coerce_attribute(Some(&text), ty, None).into_value();
            assert!(again.same_value(&value), "{ty}: {raw:?} -> {text:?}");
        }
    }
});
