use super::ReadStrategy;
use crate::scope;
use crate::storage::{
    Storage,
    StorageError,
    is_present,
};

/// Fetches every probe in one batch, then picks the first hit.
///
/// Best for remote storages where each read is a network round trip: one
/// `read_multi` replaces up to `locales × keys` reads. The batch result is
/// scanned in probe order, never in the order the storage returned it.
///
/// # Examples
/// ```
/// use i18n_resolver::read_strategy::{Eager, ReadStrategy};
/// use i18n_resolver::storage::{Memory, Storage};
///
/// let mut storage = Memory::new();
/// storage.write("en.hello", Some("Hello"))?;
///
/// let locales = vec!["de".to_string(), "en".to_string()];
/// let keys = vec!["hello".to_string()];
/// let found = Eager.read_first(&storage, &locales, &keys)?;
/// assert_eq!(found.as_deref(), Some("Hello"));
/// # Ok::<(), i18n_resolver::storage::StorageError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Eager;

impl ReadStrategy for Eager {
    fn read_first(
        &self,
        storage: &dyn Storage,
        locales: &[String],
        keys: &[String],
    ) -> Result<Option<String>, StorageError> {
        let probes = scope::cross_join(locales, keys);
        let mut results = storage.read_multi(&probes)?;

        let found = probes.iter().find(|probe| is_present(results.get(*probe).map(String::as_str)));
        tracing::trace!(probes = probes.len(), found = ?found, "Batch lookup finished");

        Ok(found.and_then(|probe| results.remove(probe)))
    }
}
