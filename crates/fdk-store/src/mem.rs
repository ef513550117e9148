//! In-memory storage fake for tests.

use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::{StoragePort, validate_key};

/// HashMap-backed [`StoragePort`] with the same key validation as the file
/// store. Used by repository and session tests.
#[derive(Debug, Default)]
pub struct MemStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StoragePort for MemStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        let entries = self.entries.lock().map_err(|_| anyhow!("mem store poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn put_raw(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        let mut entries = self.entries.lock().map_err(|_| anyhow!("mem store poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        let mut entries = self.entries.lock().map_err(|_| anyhow!("mem store poisoned"))?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get_remove() {
        let store = MemStore::new();
        assert!(store.get_raw("user").unwrap().is_none());

        store.put_raw("user", "{}").unwrap();
        assert_eq!(store.get_raw("user").unwrap().as_deref(), Some("{}"));

        store.remove("user").unwrap();
        assert!(store.get_raw("user").unwrap().is_none());
    }

    #[test]
    fn test_invalid_key_rejected() {
        let store = MemStore::new();
        assert!(store.put_raw("a/b", "x").is_err());
    }
}
