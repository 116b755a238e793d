//! Locale configuration from the environment.

use tracing::warn;

use crate::{Locale, SharedLocales};

/// Environment variable for the initial request locale.
pub const LOCALE_ENV: &str = "MONGOLIA_LOCALE";

/// Environment variable for the default locale.
pub const FALLBACK_LOCALE_ENV: &str = "MONGOLIA_FALLBACK_LOCALE";

/// Locale settings for a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleConfig {
    /// Locale used until a request sets one
    pub current: Locale,

    /// Default locale held by canonical properties
    pub fallback: Locale,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            current: Locale::DEFAULT,
            fallback: Locale::DEFAULT,
        }
    }
}

impl LocaleConfig {
    /// Create config from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup.
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let fallback = read_locale(&lookup, FALLBACK_LOCALE_ENV, Locale::DEFAULT);
        let current = read_locale(&lookup, LOCALE_ENV, fallback);
        Self { current, fallback }
    }

    /// Build a provider starting at the configured locales.
    pub fn provider(&self) -> SharedLocales {
        SharedLocales::with_initial(self.fallback, self.current)
    }
}

fn read_locale<F: Fn(&str) -> Option<String>>(lookup: &F, key: &str, default: Locale) -> Locale {
    match lookup(key) {
        Some(raw) => Locale::parse(raw.trim()).unwrap_or_else(|e| {
            warn!("Ignoring {}: {}, using '{}'", key, e, default);
            default
        }),
        None => default,
    }
}
