use std::collections::HashMap;

use super::{StorageBackend, StorageKey};
use crate::errors::Result;

/// Volatile backend holding the serialized documents in a map. Used by tests
/// and by embedders that manage persistence themselves.
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    entries: HashMap<StorageKey, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates a key, mimicking state left behind by a previous run.
    pub fn with_entry(mut self, key: StorageKey, value: impl Into<String>) -> Self {
        self.entries.insert(key, value.into());
        self
    }

    pub fn raw(&self, key: StorageKey) -> Option<&str> {
        self.entries.get(&key).map(String::as_str)
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: StorageKey) -> Result<Option<String>> {
        Ok(self.entries.get(&key).cloned())
    }

    fn commit(&mut self, entries: &[(StorageKey, String)]) -> Result<()> {
        for (key, value) in entries {
            self.entries.insert(*key, value.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_overwrites_previous_values() {
        let mut backend = MemoryBackend::new();
        backend
            .commit(&[(StorageKey::Theme, "\"light\"".into())])
            .unwrap();
        backend
            .commit(&[(StorageKey::Theme, "\"dark\"".into())])
            .unwrap();
        assert_eq!(
            backend.read(StorageKey::Theme).unwrap().as_deref(),
            Some("\"dark\"")
        );
    }

    #[test]
    fn absent_key_reads_none() {
        let backend = MemoryBackend::new();
        assert!(backend.read(StorageKey::Wallets).unwrap().is_none());
    }
}
