#![forbid(unsafe_code)]

//! Subscriber setup for applications embedding propwire.
//!
//! The library only emits `tracing` events. Binaries and tests that want to
//! see them call [`init`] once. The filter is read from `PROPWIRE_LOG`
//! (`EnvFilter` syntax) and defaults to `warn`. With the `tracing-json`
//! feature, events are written as JSON lines.

use std::fmt;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directives.
pub const LOG_ENV: &str = "PROPWIRE_LOG";

const DEFAULT_DIRECTIVES: &str = "warn";

/// A global subscriber could not be installed.
#[derive(Debug)]
pub struct LoggingInitError {
    message: String,
}

impl fmt::Display for LoggingInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to install log subscriber: {}", self.message)
    }
}

impl std::error::Error for LoggingInitError {}

/// Filter from `PROPWIRE_LOG`, falling back to `warn` when unset or invalid.
#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install the global subscriber.
///
/// # Errors
///
/// Fails if a global subscriber is already set.
pub fn init() -> Result<(), LoggingInitError> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(true);

    #[cfg(feature = "tracing-json")]
    let result = builder.json().try_init();
    #[cfg(not(feature = "tracing-json"))]
    let result = builder.try_init();

    result.map_err(|err| LoggingInitError {
        message: err.to_string(),
    })
}
