//! Mongolia i18n
//!
//! Locale codes and the providers that tell the mapper which locale a
//! request wants and which locale canonical properties are stored in.

mod config;
mod error;
mod locale;
mod provider;

pub use config::{LocaleConfig, FALLBACK_LOCALE_ENV, LOCALE_ENV};
pub use error::{LocaleError, Result};
pub use locale::Locale;
pub use provider::{LocaleProvider, RequestLocale, SharedLocales, StaticLocales};
