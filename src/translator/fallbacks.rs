//! Locale, key, and default-value fallback policies.

use std::collections::HashMap;
use std::fmt;

use super::GetOptions;
use crate::config::FallbacksConfig;
use crate::scope;

/// Decides which locales and keys a lookup tries, and what it returns when
/// nothing is found.
///
/// Every method has a default, so an implementation only overrides what it
/// changes.
///
/// # Examples
/// ```
/// use i18n_resolver::translator::{FallbackPolicy, GetOptions, Translator};
/// use serde_json::json;
///
/// #[derive(Debug)]
/// struct EnglishLast;
///
/// impl FallbackPolicy for EnglishLast {
///     fn locales_to_try(&self, locale: &str) -> Vec<String> {
///         vec![locale.to_string(), "en".to_string()]
///     }
/// }
///
/// let mut translator: Translator = Translator::default().with_fallbacks(EnglishLast);
/// translator.put(&json!({ "en": { "hello": "world" } }))?;
///
/// // tried "de.hello", then "en.hello"
/// assert_eq!(translator.get("hello", "de", &GetOptions::default())?, "world");
/// # Ok::<(), i18n_resolver::storage::StorageError>(())
/// ```
pub trait FallbackPolicy: fmt::Debug + Send + Sync {
    /// Locales to try, in order, until a non-empty translation is found.
    fn locales_to_try(&self, locale: &str) -> Vec<String> {
        vec![locale.to_string()]
    }

    /// Keys to try, in order, within each locale.
    fn keys_to_try(&self, key: &str) -> Vec<String> {
        vec![key.to_string()]
    }

    /// Value returned when no translation was found and the caller gave no
    /// default of its own.
    fn default_value(&self, _locales: &[String], _keys: &[String], _options: &GetOptions) -> String {
        String::new()
    }
}

/// Tries exactly the requested locale and key; misses resolve to `""`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoFallbacks;

impl FallbackPolicy for NoFallbacks {}

/// Table-driven fallbacks, usually built from settings.
///
/// - locales: the requested locale, then its own fallbacks, then the default
///   locales, without duplicates
/// - keys: the bare key, then the key inside each configured scope
/// - default value: a fixed string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfiguredFallbacks {
    /// Extra locales per requested locale
    locale_fallbacks: HashMap<String, Vec<String>>,
    /// Locales appended to every lookup
    default_locales: Vec<String>,
    /// Scopes a key is additionally looked up in
    key_scopes: Vec<String>,
    /// Returned when nothing is found
    default_value: String,
}

impl ConfiguredFallbacks {
    /// Creates a policy that behaves like [`NoFallbacks`] until configured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the locales tried after `locale`.
    #[must_use]
    pub fn with_locale_fallbacks<I, T>(mut self, locale: impl Into<String>, fallbacks: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.locale_fallbacks.insert(locale.into(), fallbacks.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the locales tried after every locale's own fallbacks.
    #[must_use]
    pub fn with_default_locales<I, T>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.default_locales = locales.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the scopes a key is also looked up in.
    #[must_use]
    pub fn with_key_scopes<I, T>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.key_scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the value returned when nothing is found.
    #[must_use]
    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self
    }
}

impl From<&FallbacksConfig> for ConfiguredFallbacks {
    fn from(config: &FallbacksConfig) -> Self {
        Self {
            locale_fallbacks: config.locale_fallbacks.clone(),
            default_locales: config.default_locales.clone(),
            key_scopes: config.key_scopes.clone(),
            default_value: config.default_value.clone(),
        }
    }
}

impl FallbackPolicy for ConfiguredFallbacks {
    fn locales_to_try(&self, locale: &str) -> Vec<String> {
        let mut locales = vec![locale.to_string()];
        let own = self.locale_fallbacks.get(locale).into_iter().flatten();
        for candidate in own.chain(&self.default_locales) {
            if !locales.contains(candidate) {
                locales.push(candidate.clone());
            }
        }
        locales
    }

    fn keys_to_try(&self, key: &str) -> Vec<String> {
        std::iter::once(key.to_string())
            .chain(self.key_scopes.iter().map(|scope| scope::join(scope, key)))
            .collect()
    }

    fn default_value(&self, _locales: &[String], _keys: &[String], _options: &GetOptions) -> String {
        self.default_value.clone()
    }
}
