//! Mapper configuration.

use mongolia_content::validate_name;
use mongolia_i18n::Locale;
use tracing::warn;

/// Environment variable for the override separator.
pub const OVERRIDE_SEPARATOR_ENV: &str = "MONGOLIA_OVERRIDE_SEPARATOR";

/// Environment variable forcing the default locale.
pub const DEFAULT_LOCALE_ENV: &str = "MONGOLIA_DEFAULT_LOCALE";

/// Separator between a translatable property and its locale, as in `title_de`.
pub const DEFAULT_OVERRIDE_SEPARATOR: &str = "_";

/// Configuration for a [`crate::TreeMapper`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapperConfig {
    /// Joins a property name and a locale into the override property name
    pub override_separator: String,

    /// Default locale; `None` asks the locale provider
    pub default_locale: Option<Locale>,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            override_separator: DEFAULT_OVERRIDE_SEPARATOR.to_string(),
            default_locale: None,
        }
    }
}

impl MapperConfig {
    /// Create config from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup.
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let override_separator = match lookup(OVERRIDE_SEPARATOR_ENV) {
            // The separator ends up inside property names.
            Some(sep) if validate_name(&format!("a{}b", sep)).is_ok() && !sep.is_empty() => sep,
            Some(sep) => {
                warn!("Ignoring {}={:?}, using '{}'", OVERRIDE_SEPARATOR_ENV, sep, DEFAULT_OVERRIDE_SEPARATOR);
                DEFAULT_OVERRIDE_SEPARATOR.to_string()
            }
            None => DEFAULT_OVERRIDE_SEPARATOR.to_string(),
        };

        let default_locale = lookup(DEFAULT_LOCALE_ENV).and_then(|raw| match Locale::parse(raw.trim()) {
            Ok(locale) => Some(locale),
            Err(e) => {
                warn!("Ignoring {}: {}", DEFAULT_LOCALE_ENV, e);
                None
            }
        });

        Self {
            override_separator,
            default_locale,
        }
    }

    /// Name of the property holding `field`'s override for `locale`.
    pub fn override_name(&self, field: &str, locale: Locale) -> String {
        format!("{}{}{}", field, self.override_separator, locale)
    }

    /// If `property` is an override name, the field name and locale it encodes.
    pub fn split_override<'a>(&self, property: &'a str) -> Option<(&'a str, Locale)> {
        let (field, locale) = property.rsplit_once(self.override_separator.as_str())?;
        if field.is_empty() || locale.len() != 2 {
            return None;
        }
        Locale::parse(locale).ok().map(|l| (field, l))
    }
}
