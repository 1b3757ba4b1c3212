//! Key-value storage for flattened translations.
//!
//! Every backend implements [`Storage`]. Keys are fully scoped strings
//! (`en.errors.blank`); values are strings or absent.

/// Ordered composition of several storages
mod chain;
/// In-memory storage
mod memory;
/// Write-protecting wrapper
mod readonly;

use std::collections::HashMap;
use std::fmt;

pub use chain::Chain;
pub use memory::Memory;
pub use readonly::Readonly;
use thiserror::Error;

/// Errors raised by a storage backend.
///
/// The engine never retries or swallows these; they reach the caller as-is.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backend rejected or failed an operation.
    #[error("Storage backend '{backend}' failed: {message}")]
    Backend {
        /// Name of the failing backend
        backend: String,
        /// Backend-specific description
        message: String,
    },

    /// I/O failure while talking to the backend.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other backend error, passed through untouched.
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

/// Contract every translation storage must satisfy.
///
/// Reads take `&self` and writes take `&mut self`. Implementations are not
/// required to synchronize internally; a storage shared between threads must
/// be wrapped in a lock by its owner.
pub trait Storage: fmt::Debug {
    /// Reads a single key.
    ///
    /// # Errors
    /// Backend failure.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Reads several keys at once.
    ///
    /// Only keys holding a value are returned. The map carries no ordering;
    /// callers must look entries up by key.
    ///
    /// # Errors
    /// Backend failure.
    fn read_multi(&self, keys: &[String]) -> Result<HashMap<String, String>, StorageError>;

    /// Writes a value, or an absent value, under `key`.
    ///
    /// # Errors
    /// Backend failure.
    fn write(&mut self, key: &str, value: Option<&str>) -> Result<(), StorageError>;

    /// Whether `key` is stored.
    ///
    /// Backends tracking existence separately from content report `true`
    /// for keys stored with an empty or absent value.
    ///
    /// # Errors
    /// Backend failure.
    fn exist(&self, key: &str) -> Result<bool, StorageError>;

    /// Removes every entry. May be a no-op for backends that cannot clear.
    ///
    /// # Errors
    /// Backend failure.
    fn clear(&mut self) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn read_multi(&self, keys: &[String]) -> Result<HashMap<String, String>, StorageError> {
        (**self).read_multi(keys)
    }

    fn write(&mut self, key: &str, value: Option<&str>) -> Result<(), StorageError> {
        (**self).write(key, value)
    }

    fn exist(&self, key: &str) -> Result<bool, StorageError> {
        (**self).exist(key)
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        (**self).clear()
    }
}

/// Returns the translation only when it is usable.
///
/// Absent values and empty strings are both "no translation". Whitespace is
/// a valid translation.
///
/// # Examples
/// ```
/// use i18n_resolver::storage::presence;
///
/// assert_eq!(presence(Some("hello".to_string())), Some("hello".to_string()));
/// assert_eq!(presence(Some(String::new())), None);
/// assert_eq!(presence(Some("  ".to_string())), Some("  ".to_string()));
/// assert_eq!(presence(None), None);
/// ```
#[must_use]
pub fn presence(translation: Option<String>) -> Option<String> {
    translation.filter(|t| !t.is_empty())
}

/// Borrowing counterpart of [`presence`].
#[must_use]
pub fn is_present(translation: Option<&str>) -> bool {
    translation.is_some_and(|t| !t.is_empty())
}
