//! Test helpers shared between unit test modules.
//!
//! `RecordingStorage` serves fixed entries and records every call so tests
//! can assert probe order and call counts.
#![cfg(test)]

use std::cell::RefCell;
use std::collections::HashMap;

use crate::storage::{
    Storage,
    StorageError,
};

/// A storage call observed by [`RecordingStorage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    /// `read(key)`
    Read(String),
    /// `read_multi(keys)`
    ReadMulti(Vec<String>),
    /// `write(key, value)`
    Write(String, Option<String>),
    /// `exist(key)`
    Exist(String),
    /// `clear()`
    Clear,
}

/// Storage double that records calls.
#[derive(Debug, Default)]
pub(crate) struct RecordingStorage {
    /// Entries served by reads
    entries: HashMap<String, Option<String>>,
    /// Calls in the order they were made
    calls: RefCell<Vec<Call>>,
    /// When set, every call fails with this message
    failure: Option<String>,
}

impl RecordingStorage {
    /// Creates a storage serving `entries`.
    pub(crate) fn with_entries(entries: &[(&str, Option<&str>)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.map(str::to_string)))
                .collect(),
            ..Self::default()
        }
    }

    /// Creates a storage whose every call fails.
    pub(crate) fn failing(message: &str) -> Self {
        Self { failure: Some(message.to_string()), ..Self::default() }
    }

    /// Calls made so far.
    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Records `call` and returns the configured failure, if any.
    fn record(&self, call: Call) -> Result<(), StorageError> {
        self.calls.borrow_mut().push(call);
        match &self.failure {
            Some(message) => Err(StorageError::Backend {
                backend: "recording".to_string(),
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl Storage for RecordingStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.record(Call::Read(key.to_string()))?;
        Ok(self.entries.get(key).cloned().flatten())
    }

    fn read_multi(&self, keys: &[String]) -> Result<HashMap<String, String>, StorageError> {
        self.record(Call::ReadMulti(keys.to_vec()))?;
        Ok(keys
            .iter()
            .filter_map(|key| {
                self.entries.get(key)?.as_ref().map(|value| (key.clone(), value.clone()))
            })
            .collect())
    }

    fn write(&mut self, key: &str, value: Option<&str>) -> Result<(), StorageError> {
        self.record(Call::Write(key.to_string(), value.map(str::to_string)))?;
        self.entries.insert(key.to_string(), value.map(str::to_string));
        Ok(())
    }

    fn exist(&self, key: &str) -> Result<bool, StorageError> {
        self.record(Call::Exist(key.to_string()))?;
        Ok(self.entries.contains_key(key))
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.record(Call::Clear)?;
        self.entries.clear();
        Ok(())
    }
}

/// Converts string literals into owned keys.
pub(crate) fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}
