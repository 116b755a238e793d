//! The tree mapper.

use std::sync::Arc;

use mongolia_i18n::{Locale, LocaleProvider};

use crate::config::MapperConfig;
use crate::error::{MapError, Result};
use crate::registry::SchemaSource;
use crate::schema::RecordSchema;

/// Converts between [`crate::Record`]s and node subtrees.
///
/// The mapper holds no store state. Each call gets the store it works on,
/// borrowed shared for [`TreeMapper::read`] and exclusively for
/// [`TreeMapper::write`].
#[derive(Clone)]
pub struct TreeMapper {
    pub(crate) schemas: Arc<dyn SchemaSource>,
    pub(crate) locales: Arc<dyn LocaleProvider>,
    pub(crate) config: MapperConfig,
}

impl TreeMapper {
    /// Create a mapper with default configuration.
    pub fn new(schemas: Arc<dyn SchemaSource>, locales: Arc<dyn LocaleProvider>) -> Self {
        Self::with_config(schemas, locales, MapperConfig::default())
    }

    /// Create a mapper with explicit configuration.
    pub fn with_config(
        schemas: Arc<dyn SchemaSource>,
        locales: Arc<dyn LocaleProvider>,
        config: MapperConfig,
    ) -> Self {
        Self {
            schemas,
            locales,
            config,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Look up a record type.
    pub fn schema(&self, record_type: &str) -> Result<Arc<RecordSchema>> {
        self.schemas
            .schema(record_type)
            .ok_or_else(|| MapError::UnknownType(record_type.to_string()))
    }

    /// Locale whose values live in the canonical, unsuffixed properties.
    pub fn default_locale(&self) -> Locale {
        self.config
            .default_locale
            .unwrap_or_else(|| self.locales.fallback())
    }

    /// Locale used when a read does not name one.
    pub fn current_locale(&self) -> Locale {
        self.locales.current()
    }
}

impl std::fmt::Debug for TreeMapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeMapper")
            .field("config", &self.config)
            .field("current_locale", &self.current_locale())
            .field("default_locale", &self.default_locale())
            .finish()
    }
}
