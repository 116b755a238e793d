//! Ambient locale providers.

use std::cell::RefCell;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::Locale;

/// Supplies the request locale and the deployment's default locale.
pub trait LocaleProvider: Send + Sync {
    /// Locale of the current request context.
    fn current(&self) -> Locale;

    /// Default locale. Canonical, unsuffixed properties hold values in it.
    fn fallback(&self) -> Locale;

    /// True when `locale` is the default locale.
    fn is_fallback(&self, locale: Locale) -> bool {
        locale == self.fallback()
    }
}

/// A provider with fixed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticLocales {
    pub current: Locale,
    pub fallback: Locale,
}

impl StaticLocales {
    /// Current and fallback both set to `locale`.
    pub fn single(locale: Locale) -> Self {
        Self {
            current: locale,
            fallback: locale,
        }
    }
}

impl Default for StaticLocales {
    fn default() -> Self {
        Self::single(Locale::DEFAULT)
    }
}

impl LocaleProvider for StaticLocales {
    fn current(&self) -> Locale {
        self.current
    }

    fn fallback(&self) -> Locale {
        self.fallback
    }
}

/// A provider whose current locale is set per request.
///
/// The request locale is bound to the calling thread: [`SharedLocales::set_current`]
/// only affects reads on the same thread, until the returned guard is dropped.
/// Threads that never set one see the initial locale.
#[derive(Debug)]
pub struct SharedLocales {
    id: u64,
    initial: Locale,
    fallback: Locale,
}

static NEXT_PROVIDER_ID: AtomicU64 = AtomicU64::new(0);

thread_local! {
    // Request locales of this thread, by provider id.
    static REQUEST_LOCALES: RefCell<HashMap<u64, Locale>> = RefCell::new(HashMap::new());
}

impl SharedLocales {
    /// Start with the initial locale equal to the fallback.
    pub fn new(fallback: Locale) -> Self {
        Self::with_initial(fallback, fallback)
    }

    /// Use `initial` on threads that have not set a request locale.
    pub fn with_initial(fallback: Locale, initial: Locale) -> Self {
        Self {
            id: NEXT_PROVIDER_ID.fetch_add(1, Ordering::Relaxed),
            initial,
            fallback,
        }
    }

    /// Set this thread's request locale until the guard is dropped.
    pub fn set_current(&self, locale: Locale) -> RequestLocale<'_> {
        let previous = self.swap(Some(locale));
        RequestLocale {
            provider: self,
            previous,
            _thread_bound: PhantomData,
        }
    }

    /// Drop this thread's request locale, going back to the initial one.
    pub fn reset(&self) {
        self.swap(None);
    }

    /// Locale used on threads without a request locale.
    pub fn initial(&self) -> Locale {
        self.initial
    }

    fn swap(&self, locale: Option<Locale>) -> Option<Locale> {
        REQUEST_LOCALES.with(|locales| {
            let mut locales = locales.borrow_mut();
            match locale {
                Some(locale) => locales.insert(self.id, locale),
                None => locales.remove(&self.id),
            }
        })
    }
}

impl Default for SharedLocales {
    fn default() -> Self {
        Self::new(Locale::DEFAULT)
    }
}

impl LocaleProvider for SharedLocales {
    fn current(&self) -> Locale {
        REQUEST_LOCALES
            .with(|locales| locales.borrow().get(&self.id).copied())
            .unwrap_or(self.initial)
    }

    fn fallback(&self) -> Locale {
        self.fallback
    }
}

/// Restores the previous request locale of the thread when dropped.
#[must_use = "the request locale is reset when the guard is dropped"]
#[derive(Debug)]
pub struct RequestLocale<'a> {
    provider: &'a SharedLocales,
    previous: Option<Locale>,
    // Must be dropped on the thread that created it.
    _thread_bound: PhantomData<*const ()>,
}

impl Drop for RequestLocale<'_> {
    fn drop(&mut self) {
        self.provider.swap(self.previous);
    }
}
