//! Mongolia logging setup.
//!
//! Installs a `tracing` subscriber that formats to stderr and filters with
//! `RUST_LOG`, falling back to [`DEFAULT_FILTER`].

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "mongolia_content=info,mongolia_i18n=info,mongolia_mapper=info";

/// Build the filter from `RUST_LOG` or the given default.
pub fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into())
}

/// Install the global subscriber.
///
/// Panics if a global subscriber is already set; use [`try_init`] where that
/// can happen, e.g. in tests.
pub fn init() {
    tracing_subscriber::registry()
        .with(env_filter(DEFAULT_FILTER))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Install the global subscriber unless one is already set.
pub fn try_init() -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter(DEFAULT_FILTER))
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init()
}
