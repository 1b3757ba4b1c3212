//! In-memory translation storage.

use std::collections::HashMap;

use super::{
    Storage,
    StorageError,
};

/// Thin wrapper around a `HashMap`.
///
/// This is the fastest storage, but every process keeps its own copy of all
/// translations. It does no locking of its own: when translations are loaded
/// once at startup and only read afterwards this does not matter, otherwise
/// wrap the owning translator in a lock.
#[derive(Debug, Clone, Default)]
pub struct Memory {
    /// Stored entries; `None` marks a key written with an absent value.
    entries: HashMap<String, Option<String>>,
}

impl Memory {
    /// Creates an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys, including keys stored with an absent value.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Storage for Memory {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned().flatten())
    }

    fn read_multi(&self, keys: &[String]) -> Result<HashMap<String, String>, StorageError> {
        Ok(keys
            .iter()
            .filter_map(|key| {
                self.entries.get(key)?.as_ref().map(|value| (key.clone(), value.clone()))
            })
            .collect())
    }

    fn write(&mut self, key: &str, value: Option<&str>) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.map(str::to_string));
        Ok(())
    }

    fn exist(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.entries.contains_key(key))
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.entries.clear();
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;
    use crate::test_utils::strings;

    #[fixture]
    fn storage() -> Memory {
        Memory::new()
    }

    #[rstest]
    fn read_missing_key(storage: Memory) {
        assert_that!(storage.read("hello").unwrap(), none());
    }

    #[rstest]
    fn read_written_key(mut storage: Memory) {
        storage.write("hello", Some("world")).unwrap();

        assert_that!(storage.read("hello").unwrap(), some(eq("world")));
    }

    #[rstest]
    fn write_overwrites(mut storage: Memory) {
        storage.write("hello", Some("world")).unwrap();
        storage.write("hello", Some("there")).unwrap();

        assert_that!(storage.read("hello").unwrap(), some(eq("there")));
        assert_that!(storage.len(), eq(1));
    }

    #[rstest]
    fn read_multi_returns_requested_keys(mut storage: Memory) {
        storage.write("hello", Some("world")).unwrap();
        storage.write("foo", Some("bar")).unwrap();
        storage.write("unrelated", Some("value")).unwrap();

        let result = storage.read_multi(&strings(&["hello", "foo"])).unwrap();

        assert_that!(result.len(), eq(2));
        assert_that!(result.get("hello"), some(eq("world")));
        assert_that!(result.get("foo"), some(eq("bar")));
    }

    #[rstest]
    fn read_multi_skips_missing_and_absent(mut storage: Memory) {
        storage.write("hello", Some("world")).unwrap();
        storage.write("nothing", None).unwrap();

        let result = storage.read_multi(&strings(&["hello", "foo", "nothing"])).unwrap();

        assert_that!(result.len(), eq(1));
        assert_that!(result.get("hello"), some(eq("world")));
    }

    #[rstest]
    fn read_multi_keeps_empty_strings(mut storage: Memory) {
        storage.write("empty", Some("")).unwrap();

        let result = storage.read_multi(&strings(&["empty"])).unwrap();

        assert_that!(result.get("empty"), some(eq("")));
    }

    #[rstest]
    fn exist_for_missing_key(storage: Memory) {
        assert_that!(storage.exist("hello").unwrap(), eq(false));
    }

    #[rstest]
    fn exist_for_written_key(mut storage: Memory) {
        storage.write("hello", Some("world")).unwrap();

        assert_that!(storage.exist("hello").unwrap(), eq(true));
    }

    #[rstest]
    fn exist_for_absent_value(mut storage: Memory) {
        storage.write("hello", None).unwrap();

        assert_that!(storage.exist("hello").unwrap(), eq(true));
        assert_that!(storage.read("hello").unwrap(), none());
    }

    #[rstest]
    fn clear_removes_everything(mut storage: Memory) {
        storage.write("hello", Some("world")).unwrap();

        storage.clear().unwrap();

        assert_that!(storage.read("hello").unwrap(), none());
        assert_that!(storage.is_empty(), eq(true));
    }
}
