//! Several storages treated as one.

use std::collections::HashMap;

use super::{
    Storage,
    StorageError,
    is_present,
    presence,
};

/// Ordered list of storages presented as a single storage.
///
/// Reads consult storages by position, so the first storage wins whenever it
/// has a non-empty value. Writes and clears reach every storage; wrap a
/// storage in [`Readonly`](super::Readonly) to protect it.
///
/// # Examples
/// ```
/// use i18n_resolver::storage::{Chain, Memory, Storage};
///
/// let mut first = Memory::new();
/// first.write("hello", Some("ruby"))?;
/// let mut second = Memory::new();
/// second.write("hello", Some("world"))?;
/// second.write("bye", Some("war"))?;
///
/// let chain = Chain::new(vec![Box::new(first), Box::new(second)]);
/// assert_eq!(chain.read("hello")?.as_deref(), Some("ruby"));
/// assert_eq!(chain.read("bye")?.as_deref(), Some("war"));
/// # Ok::<(), i18n_resolver::storage::StorageError>(())
/// ```
#[derive(Debug)]
pub struct Chain {
    /// Storages in priority order
    storages: Vec<Box<dyn Storage>>,
}

impl Chain {
    /// Creates a chain; index 0 has the highest priority.
    #[must_use]
    pub fn new(storages: Vec<Box<dyn Storage>>) -> Self {
        Self { storages }
    }

    /// Storages in priority order.
    #[must_use]
    pub fn storages(&self) -> &[Box<dyn Storage>] {
        &self.storages
    }
}

impl Storage for Chain {
    /// Returns the first non-empty value while trying each storage in order.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        for (index, storage) in self.storages.iter().enumerate() {
            if let Some(value) = presence(storage.read(key)?) {
                tracing::trace!(key, storage = index, "Chain read hit");
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    /// Composes the non-empty values of all storages.
    ///
    /// For each key the first storage holding a non-empty value wins. A
    /// storage's own `read_multi` runs at most once, and only once some key
    /// is still unresolved after every storage before it.
    fn read_multi(&self, keys: &[String]) -> Result<HashMap<String, String>, StorageError> {
        let mut fetched: Vec<Option<HashMap<String, String>>> =
            std::iter::repeat_with(|| None).take(self.storages.len()).collect();
        let mut found = HashMap::with_capacity(keys.len());

        for key in keys {
            for (index, (storage, results)) in
                self.storages.iter().zip(fetched.iter_mut()).enumerate()
            {
                if results.is_none() {
                    tracing::trace!(storage = index, keys = keys.len(), "Chain fetching batch");
                    *results = Some(storage.read_multi(keys)?);
                }
                if let Some(value) = results.as_ref().and_then(|r| r.get(key))
                    && is_present(Some(value.as_str()))
                {
                    found.insert(key.clone(), value.clone());
                    break;
                }
            }
        }

        Ok(found)
    }

    /// Writes to every storage.
    fn write(&mut self, key: &str, value: Option<&str>) -> Result<(), StorageError> {
        for storage in &mut self.storages {
            storage.write(key, value)?;
        }
        Ok(())
    }

    /// Whether any storage has `key`.
    fn exist(&self, key: &str) -> Result<bool, StorageError> {
        for storage in &self.storages {
            if storage.exist(key)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Clears every storage.
    fn clear(&mut self) -> Result<(), StorageError> {
        for storage in &mut self.storages {
            storage.clear()?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use googletest::prelude::*;
    use rstest::*;

    use super::*;
    use crate::storage::Memory;
    use crate::test_utils::{
        Call,
        RecordingStorage,
        strings,
    };

    /// Shares a recording storage between the chain and the test body.
    #[derive(Debug, Clone)]
    struct Shared(Rc<RefCell<RecordingStorage>>);

    impl Shared {
        fn new(entries: &[(&str, Option<&str>)]) -> Self {
            Self(Rc::new(RefCell::new(RecordingStorage::with_entries(entries))))
        }

        fn calls(&self) -> Vec<Call> {
            self.0.borrow().calls()
        }
    }

    impl Storage for Shared {
        fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.borrow().read(key)
        }

        fn read_multi(&self, keys: &[String]) -> Result<HashMap<String, String>, StorageError> {
            self.0.borrow().read_multi(keys)
        }

        fn write(&mut self, key: &str, value: Option<&str>) -> Result<(), StorageError> {
            self.0.borrow_mut().write(key, value)
        }

        fn exist(&self, key: &str) -> Result<bool, StorageError> {
            self.0.borrow().exist(key)
        }

        fn clear(&mut self) -> Result<(), StorageError> {
            self.0.borrow_mut().clear()
        }
    }

    fn chain_of(first: &Shared, second: &Shared) -> Chain {
        Chain::new(vec![Box::new(first.clone()), Box::new(second.clone())])
    }

    #[rstest]
    fn read_from_first_storage() {
        let first = Shared::new(&[("hello", Some("hello"))]);
        let second = Shared::new(&[]);
        let chain = chain_of(&first, &second);

        assert_that!(chain.read("hello").unwrap(), some(eq("hello")));
        assert_that!(second.calls(), is_empty());
    }

    #[rstest]
    #[case::missing(None)]
    #[case::empty(Some(""))]
    fn read_falls_through_to_second_storage(#[case] first_value: Option<&str>) {
        let first = Shared::new(&[("hello", first_value)]);
        let second = Shared::new(&[("hello", Some("hi"))]);
        let chain = chain_of(&first, &second);

        assert_that!(chain.read("hello").unwrap(), some(eq("hi")));
        assert_that!(first.calls(), elements_are![eq(&Call::Read("hello".to_string()))]);
        assert_that!(second.calls(), elements_are![eq(&Call::Read("hello".to_string()))]);
    }

    #[rstest]
    fn read_returns_none_when_nothing_present() {
        let first = Shared::new(&[("hello", Some(""))]);
        let second = Shared::new(&[]);

        assert_that!(chain_of(&first, &second).read("hello").unwrap(), none());
    }

    #[rstest]
    fn read_empty_then_value_in_memory_storages() {
        let mut storage1 = Memory::new();
        storage1.write("en.hello", Some("")).unwrap();
        let mut storage2 = Memory::new();
        storage2.write("en.hello", Some("World")).unwrap();
        let chain = Chain::new(vec![Box::new(storage1), Box::new(storage2)]);

        assert_that!(chain.read("en.hello").unwrap(), some(eq("World")));
    }

    #[rstest]
    fn read_multi_from_first_storage_only() {
        let first = Shared::new(&[("hello", Some("world")), ("foo", Some("bar"))]);
        let second = Shared::new(&[]);

        let result = chain_of(&first, &second).read_multi(&strings(&["hello", "foo"])).unwrap();

        assert_that!(result.len(), eq(2));
        assert_that!(result.get("hello"), some(eq("world")));
        assert_that!(result.get("foo"), some(eq("bar")));
        assert_that!(second.calls(), is_empty());
    }

    #[rstest]
    fn read_multi_from_second_storage_only() {
        let first = Shared::new(&[]);
        let second = Shared::new(&[("hello", Some("world")), ("foo", Some("bar"))]);

        let result = chain_of(&first, &second).read_multi(&strings(&["hello", "foo"])).unwrap();

        assert_that!(result.len(), eq(2));
        assert_that!(result.get("hello"), some(eq("world")));
        assert_that!(result.get("foo"), some(eq("bar")));
    }

    #[rstest]
    fn read_multi_merges_and_fetches_each_storage_once() {
        let first = Shared::new(&[("hello", Some("world"))]);
        let second = Shared::new(&[("foo", Some("bar")), ("baz", Some("qux"))]);
        let keys = strings(&["hello", "foo", "baz"]);

        let result = chain_of(&first, &second).read_multi(&keys).unwrap();

        assert_that!(result.len(), eq(3));
        assert_that!(result.get("hello"), some(eq("world")));
        assert_that!(result.get("foo"), some(eq("bar")));
        assert_that!(result.get("baz"), some(eq("qux")));
        assert_that!(first.calls(), elements_are![eq(&Call::ReadMulti(keys.clone()))]);
        assert_that!(second.calls(), elements_are![eq(&Call::ReadMulti(keys.clone()))]);
    }

    #[rstest]
    fn read_multi_prefers_non_empty_value_from_later_storage() {
        let first = Shared::new(&[("hello", Some(""))]);
        let second = Shared::new(&[("hello", Some("world"))]);

        let result = chain_of(&first, &second).read_multi(&strings(&["hello"])).unwrap();

        assert_that!(result.len(), eq(1));
        assert_that!(result.get("hello"), some(eq("world")));
    }

    #[rstest]
    fn read_multi_first_storage_wins() {
        let first = Shared::new(&[("hello", Some("ruby"))]);
        let second = Shared::new(&[("hello", Some("world")), ("bye", Some("war"))]);

        let result = chain_of(&first, &second).read_multi(&strings(&["hello", "bye"])).unwrap();

        assert_that!(result.get("hello"), some(eq("ruby")));
        assert_that!(result.get("bye"), some(eq("war")));
    }

    #[rstest]
    fn read_multi_omits_missing_keys() {
        let first = Shared::new(&[("hello", Some("world"))]);
        let second = Shared::new(&[]);

        let result = chain_of(&first, &second).read_multi(&strings(&["hello", "foo"])).unwrap();

        assert_that!(result.len(), eq(1));
        assert_that!(result.contains_key("foo"), eq(false));
    }

    #[rstest]
    fn read_multi_does_not_cache_between_calls() {
        let mut memory = Memory::new();
        memory.write("hello", Some("old")).unwrap();
        let mut chain = Chain::new(vec![Box::new(memory)]);
        let keys = strings(&["hello"]);

        let before = chain.read_multi(&keys).unwrap();
        chain.write("hello", Some("new")).unwrap();
        let after = chain.read_multi(&keys).unwrap();

        assert_that!(before.get("hello"), some(eq("old")));
        assert_that!(after.get("hello"), some(eq("new")));
    }

    #[rstest]
    fn write_fans_out() {
        let first = Shared::new(&[]);
        let second = Shared::new(&[]);

        chain_of(&first, &second).write("hello", Some("world")).unwrap();

        let expected = Call::Write("hello".to_string(), Some("world".to_string()));
        assert_that!(first.calls(), elements_are![eq(&expected)]);
        assert_that!(second.calls(), elements_are![eq(&expected)]);
    }

    #[rstest]
    fn clear_fans_out() {
        let first = Shared::new(&[]);
        let second = Shared::new(&[]);

        chain_of(&first, &second).clear().unwrap();

        assert_that!(first.calls(), elements_are![eq(&Call::Clear)]);
        assert_that!(second.calls(), elements_are![eq(&Call::Clear)]);
    }

    #[rstest]
    #[case::nowhere(false, false, false, true)]
    #[case::first(true, false, true, false)]
    #[case::second(false, true, true, true)]
    fn exist_short_circuits(
        #[case] in_first: bool,
        #[case] in_second: bool,
        #[case] expected: bool,
        #[case] second_consulted: bool,
    ) {
        let entries: &[(&str, Option<&str>)] = &[("hello", Some("x"))];
        let first = Shared::new(if in_first { entries } else { &[] });
        let second = Shared::new(if in_second { entries } else { &[] });

        let result = chain_of(&first, &second).exist("hello").unwrap();

        assert_that!(result, eq(expected));
        assert_that!(second.calls().len(), eq(usize::from(second_consulted)));
    }

    #[rstest]
    fn backend_failure_propagates() {
        let chain = Chain::new(vec![
            Box::new(RecordingStorage::failing("connection refused")),
            Box::new(Memory::new()),
        ]);

        let result = chain.read("hello");

        assert_that!(
            result,
            err(displays_as(contains_substring("connection refused")))
        );
    }
}
