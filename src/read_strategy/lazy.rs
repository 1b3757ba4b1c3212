use super::ReadStrategy;
use crate::scope;
use crate::storage::{
    Storage,
    StorageError,
    presence,
};

/// Reads one probe at a time and stops at the first hit.
///
/// Best for in-process storages where a read is cheap. This is the
/// translator's default strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lazy;

impl ReadStrategy for Lazy {
    fn read_first(
        &self,
        storage: &dyn Storage,
        locales: &[String],
        keys: &[String],
    ) -> Result<Option<String>, StorageError> {
        for locale in locales {
            for key in keys {
                let probe = scope::join(locale, key);
                if let Some(value) = presence(storage.read(&probe)?) {
                    tracing::trace!(probe = %probe, "Translation found");
                    return Ok(Some(value));
                }
                tracing::trace!(probe = %probe, "No translation");
            }
        }

        Ok(None)
    }
}
