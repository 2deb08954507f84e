#![forbid(unsafe_code)]

//! Global subscriber installation. Kept in its own test binary because the
//! unit tests install a capturing subscriber of their own.

use propwire_core::logging;

#[test]
fn init_installs_once() {
    assert!(logging::init().is_ok());
    let err = logging::init().unwrap_err();
    assert!(err.to_string().starts_with("failed to install log subscriber"));
}
