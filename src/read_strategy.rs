//! Strategies for finding the first usable translation.
//!
//! Both strategies try every locale × key combination in the same order
//! (locales outer, keys inner) and return the same result for the same
//! storage contents. They differ only in how they talk to the storage.

/// One batch read per lookup
mod eager;
/// One read per probe
mod lazy;

use std::fmt;

pub use eager::Eager;
pub use lazy::Lazy;

use crate::storage::{
    Storage,
    StorageError,
};

/// Finds the first non-empty translation among fallback candidates.
pub trait ReadStrategy: fmt::Debug + Send + Sync {
    /// Returns the first present value for `locale.key`, trying locales in
    /// order and, for each locale, keys in order.
    ///
    /// # Errors
    /// Storage failure.
    fn read_first(
        &self,
        storage: &dyn Storage,
        locales: &[String],
        keys: &[String],
    ) -> Result<Option<String>, StorageError>;
}
