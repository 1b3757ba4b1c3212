//! Write protection for a storage.

use std::collections::HashMap;

use super::{
    Storage,
    StorageError,
};

/// Wrapper that forwards reads and silently drops writes.
///
/// Useful inside a [`Chain`](super::Chain) to protect a shared or remote
/// storage from `put` fan-out.
#[derive(Debug, Clone, Default)]
pub struct Readonly<S> {
    /// Wrapped storage
    inner: S,
}

impl<S: Storage> Readonly<S> {
    /// Wraps `inner`.
    #[must_use]
    pub const fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Returns the wrapped storage.
    #[must_use]
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    /// Unwraps the storage, giving write access back.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: Storage> Storage for Readonly<S> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.read(key)
    }

    fn read_multi(&self, keys: &[String]) -> Result<HashMap<String, String>, StorageError> {
        self.inner.read_multi(keys)
    }

    fn write(&mut self, key: &str, _value: Option<&str>) -> Result<(), StorageError> {
        tracing::debug!(key, "Ignoring write to read-only storage");
        Ok(())
    }

    fn exist(&self, key: &str) -> Result<bool, StorageError> {
        self.inner.exist(key)
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        tracing::debug!("Ignoring clear of read-only storage");
        Ok(())
    }
}
