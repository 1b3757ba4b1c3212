//! Translation lookup with locale and key fallbacks.
//!
//! The translator knows that keys are dot-separated and include a locale. It
//! flattens translation trees before writing them, because an ordinary
//! key-value storage only holds flat data, and it is in charge of returning a
//! non-empty translation for a set of locales and keys, since some of them
//! are likely missing.

/// Fallback policies
mod fallbacks;

pub use fallbacks::{
    ConfiguredFallbacks,
    FallbackPolicy,
    NoFallbacks,
};
use serde::{
    Deserialize,
    Serialize,
};
use serde_json::{
    Map,
    Value,
};

use crate::config::ResolverSettings;
use crate::read_strategy::{
    Lazy,
    ReadStrategy,
};
use crate::scope;
use crate::storage::{
    Memory,
    Storage,
    StorageError,
};

/// Options for [`Translator::get`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetOptions {
    /// Returned instead of the policy's default value when nothing is found.
    pub default: Option<String>,

    /// Any other options, passed through to
    /// [`FallbackPolicy::default_value`].
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GetOptions {
    /// Options with a literal default.
    #[must_use]
    pub fn with_default(default: impl Into<String>) -> Self {
        Self { default: Some(default.into()), ..Self::default() }
    }

    /// Adds a free-form option.
    #[must_use]
    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }
}

/// A single key or locale, or an explicit list of them.
///
/// A single value is expanded through the translator's
/// [`FallbackPolicy`]; a list is used verbatim, bypassing the policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidates<'a> {
    /// Expanded by the fallback policy.
    One(&'a str),
    /// Tried exactly in this order.
    List(Vec<String>),
}

impl Candidates<'_> {
    /// Returns the list, or expands the single value with `expand`.
    fn resolve(self, expand: impl FnOnce(&str) -> Vec<String>) -> Vec<String> {
        match self {
            Self::One(value) => expand(value),
            Self::List(list) => list,
        }
    }
}

impl<'a> From<&'a str> for Candidates<'a> {
    fn from(value: &'a str) -> Self {
        Self::One(value)
    }
}

impl<'a> From<&'a String> for Candidates<'a> {
    fn from(value: &'a String) -> Self {
        Self::One(value)
    }
}

impl From<Vec<String>> for Candidates<'_> {
    fn from(list: Vec<String>) -> Self {
        Self::List(list)
    }
}

impl From<Vec<&str>> for Candidates<'_> {
    fn from(list: Vec<&str>) -> Self {
        Self::List(list.into_iter().map(str::to_string).collect())
    }
}

impl From<&[String]> for Candidates<'_> {
    fn from(list: &[String]) -> Self {
        Self::List(list.to_vec())
    }
}

impl<const N: usize> From<[&str; N]> for Candidates<'_> {
    fn from(list: [&str; N]) -> Self {
        Self::List(list.iter().map(|s| (*s).to_string()).collect())
    }
}

/// Looks translations up in a storage and writes translation trees into it.
///
/// The storage, the read strategy, and the fallback policy are fixed at
/// construction. Reads take `&self` and writes `&mut self`; the translator
/// does no locking of its own.
///
/// # Examples
/// ```
/// use i18n_resolver::translator::{GetOptions, Translator};
/// use serde_json::json;
///
/// let mut translator: Translator = Translator::default();
/// translator.put(&json!({ "en": { "hello": "world" } }))?;
///
/// let options = GetOptions::default();
/// assert_eq!(translator.get("hello", "en", &options)?, "world");
/// assert_eq!(translator.get("bye", "en", &options)?, "");
/// assert_eq!(translator.get("hello", "de", &GetOptions::with_default("nothing"))?, "nothing");
/// // an explicit locale list replaces the policy's locales
/// assert_eq!(translator.get("hello", ["de", "en"], &options)?, "world");
/// # Ok::<(), i18n_resolver::storage::StorageError>(())
/// ```
#[derive(Debug)]
pub struct Translator<S = Memory> {
    /// Key-value storage for translations
    storage: S,
    /// How the probe list is executed against `storage`
    read_strategy: Box<dyn ReadStrategy>,
    /// Locale, key, and default-value fallbacks
    fallbacks: Box<dyn FallbackPolicy>,
}

impl Default for Translator<Memory> {
    fn default() -> Self {
        Self::new(Memory::new())
    }
}

impl<S: Storage> Translator<S> {
    /// Creates a translator with the lazy strategy and no fallbacks.
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self { storage, read_strategy: Box::new(Lazy), fallbacks: Box::new(NoFallbacks) }
    }

    /// Creates a translator using the strategy and fallbacks from `settings`.
    #[must_use]
    pub fn from_settings(storage: S, settings: &ResolverSettings) -> Self {
        Self {
            storage,
            read_strategy: settings.read_strategy.build(),
            fallbacks: Box::new(ConfiguredFallbacks::from(&settings.fallbacks)),
        }
    }

    /// Replaces the read strategy.
    #[must_use]
    pub fn with_read_strategy(mut self, read_strategy: impl ReadStrategy + 'static) -> Self {
        self.read_strategy = Box::new(read_strategy);
        self
    }

    /// Replaces the fallback policy.
    #[must_use]
    pub fn with_fallbacks(mut self, fallbacks: impl FallbackPolicy + 'static) -> Self {
        self.fallbacks = Box::new(fallbacks);
        self
    }

    /// The storage translations are read from and written to.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Mutable access to the storage.
    pub const fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Gives the storage back.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Retrieves a translation, or a default value if nothing is found.
    ///
    /// `key` and `locale` each accept a single value, expanded through the
    /// fallback policy, or an explicit list used as-is. Every key is tried
    /// for a locale before moving to the next locale.
    ///
    /// When nothing is found, `options.default` wins over the policy's
    /// default value.
    ///
    /// # Errors
    /// Storage failure.
    pub fn get<'a>(
        &self,
        key: impl Into<Candidates<'a>>,
        locale: impl Into<Candidates<'a>>,
        options: &GetOptions,
    ) -> Result<String, StorageError> {
        let keys = key.into().resolve(|k| self.fallbacks.keys_to_try(k));
        let locales = locale.into().resolve(|l| self.fallbacks.locales_to_try(l));

        if let Some(translation) = self.read_strategy.read_first(&self.storage, &locales, &keys)? {
            return Ok(translation);
        }

        tracing::debug!(?locales, ?keys, "Translation missing, using default");
        Ok(options
            .default
            .clone()
            .unwrap_or_else(|| self.fallbacks.default_value(&locales, &keys, options)))
    }

    /// Writes translations, keeping values that already exist.
    ///
    /// Root keys of `translations` must be locales.
    ///
    /// # Errors
    /// Storage failure; keys written before the failure stay written.
    pub fn put(&mut self, translations: &Value) -> Result<(), StorageError> {
        let mut written = 0_usize;
        for (key, value) in scope::flatten(translations) {
            if !self.storage.exist(&key)? {
                self.storage.write(&key, value.as_deref())?;
                written += 1;
            }
        }
        tracing::debug!(written, "Stored new translations");
        Ok(())
    }

    /// Writes translations, overwriting existing values.
    ///
    /// # Errors
    /// Storage failure; keys written before the failure stay written.
    pub fn put_force(&mut self, translations: &Value) -> Result<(), StorageError> {
        let flat = scope::flatten(translations);
        for (key, value) in &flat {
            self.storage.write(key, value.as_deref())?;
        }
        tracing::debug!(written = flat.len(), "Stored translations");
        Ok(())
    }
}
