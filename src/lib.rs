//! i18n-resolver
//!
//! Resolves translations for a key and locale against pluggable key-value
//! storages, trying fallback keys and locales in a fixed order.
//!
//! ```
//! use i18n_resolver::{GetOptions, Translator};
//! use serde_json::json;
//!
//! let mut translator: Translator = Translator::default();
//! translator.put(&json!({ "en": { "hello": "world" } }))?;
//!
//! let options = GetOptions::default();
//! assert_eq!(translator.get("hello", ["de", "en"], &options)?, "world");
//! assert_eq!(translator.get("hello", "de", &options)?, "");
//! # Ok::<(), i18n_resolver::StorageError>(())
//! ```

pub mod config;
pub mod input;
pub mod interpolation;
pub mod read_strategy;
pub mod scope;
pub mod storage;
pub mod translator;

#[cfg(test)]
mod test_utils;

pub use config::{
    ConfigManager,
    ResolverSettings,
};
pub use interpolation::{
    Interpolation,
    Sprintf,
};
pub use storage::{
    Storage,
    StorageError,
};
pub use translator::{
    GetOptions,
    Translator,
};
