//! Durable key-value storage for feedback-desk.
//!
//! Collections are stored one JSON document per key under the user's state
//! directory. The storage surface is deliberately small: raw string
//! get/put/remove on a [`StoragePort`], with typed collection helpers on
//! top. Repositories receive the port by reference, so tests run against
//! [`MemStore`] instead of the real filesystem.
//!
//! Loading a collection never fails on bad data: an unparseable stored
//! value is logged and treated as absent. A corrupted file therefore reads
//! as an empty collection and is silently replaced on the next save.

use anyhow::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;

mod file;
mod mem;

pub use file::FileStore;
pub use mem::MemStore;

/// Storage key names for the persisted collections.
pub mod keys {
    /// Persisted session identity.
    pub const USER: &str = "user";
    /// The feedback collection.
    pub const FEEDBACKS: &str = "feedbacks";
    /// Append-only anonymous feedback collection.
    pub const ANONYMOUS_FEEDBACKS: &str = "anonymousFeedbacks";
    /// Append-only feedback request collection.
    pub const FEEDBACK_REQUESTS: &str = "feedbackRequests";
    /// Denormalized manager id, set at login.
    pub const MANAGER_ID: &str = "managerId";
    /// Denormalized employee id, set at login.
    pub const EMPLOYEE_ID: &str = "employeeId";
}

/// Injected storage boundary.
///
/// Each `put_raw` is an independent full replace of the stored value; there
/// is no partial-write or cross-key transactional guarantee.
pub trait StoragePort {
    /// Read the raw stored value for `key`, or `None` if absent.
    fn get_raw(&self, key: &str) -> Result<Option<String>>;

    /// Replace the stored value for `key`.
    fn put_raw(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the stored value for `key` (no-op if absent).
    fn remove(&self, key: &str) -> Result<()>;
}

/// Load a JSON collection from the store.
///
/// Absent key or unparseable stored value both yield an empty collection;
/// the parse failure is only logged.
pub fn load_collection<T: DeserializeOwned>(store: &dyn StoragePort, key: &str) -> Result<Vec<T>> {
    let Some(raw) = store.get_raw(key)? else {
        return Ok(Vec::new());
    };

    match serde_json::from_str(&raw) {
        Ok(records) => Ok(records),
        Err(e) => {
            tracing::warn!(
                key = %key,
                error = %e,
                "Stored collection is not parseable, treating as empty"
            );
            Ok(Vec::new())
        }
    }
}

/// Serialize and fully overwrite a JSON collection in the store.
pub fn save_collection<T: Serialize>(
    store: &dyn StoragePort,
    key: &str,
    records: &[T],
) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    store.put_raw(key, &json)
}

/// Validate a storage key before it touches the filesystem.
///
/// Accepts ASCII alphanumerics only (`feedbacks`, `anonymousFeedbacks`).
/// Rejects separators and traversal components outright.
pub(crate) fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(fdk_core::AppError::InvalidKey(key.to_string()).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Entry {
        id: String,
        value: u32,
    }

    fn sample_entries() -> Vec<Entry> {
        vec![
            Entry {
                id: "a".into(),
                value: 1,
            },
            Entry {
                id: "b".into(),
                value: 2,
            },
        ]
    }

    #[test]
    fn test_load_absent_key_is_empty() {
        let store = MemStore::new();
        let entries: Vec<Entry> = load_collection(&store, keys::FEEDBACKS).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let store = MemStore::new();
        let entries = sample_entries();

        save_collection(&store, keys::FEEDBACKS, &entries).unwrap();
        let loaded: Vec<Entry> = load_collection(&store, keys::FEEDBACKS).unwrap();
        assert_eq!(loaded, entries);
    }

    #[test]
    fn test_save_of_loaded_collection_is_stable() {
        let store = MemStore::new();
        save_collection(&store, keys::FEEDBACKS, &sample_entries()).unwrap();

        let first = store.get_raw(keys::FEEDBACKS).unwrap().unwrap();
        let loaded: Vec<Entry> = load_collection(&store, keys::FEEDBACKS).unwrap();
        save_collection(&store, keys::FEEDBACKS, &loaded).unwrap();
        let second = store.get_raw(keys::FEEDBACKS).unwrap().unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_corrupted_value_reads_as_empty() {
        let store = MemStore::new();
        store.put_raw(keys::FEEDBACKS, "{not json").unwrap();

        let entries: Vec<Entry> = load_collection(&store, keys::FEEDBACKS).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_wrong_shape_reads_as_empty() {
        let store = MemStore::new();
        store.put_raw(keys::FEEDBACKS, "{\"id\": \"a\"}").unwrap();

        let entries: Vec<Entry> = load_collection(&store, keys::FEEDBACKS).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_save_fully_overwrites() {
        let store = MemStore::new();
        save_collection(&store, keys::FEEDBACKS, &sample_entries()).unwrap();

        let shorter = vec![Entry {
            id: "c".into(),
            value: 3,
        }];
        save_collection(&store, keys::FEEDBACKS, &shorter).unwrap();

        let loaded: Vec<Entry> = load_collection(&store, keys::FEEDBACKS).unwrap();
        assert_eq!(loaded, shorter);
    }

    #[test]
    fn test_validate_key_rejects_traversal() {
        assert!(validate_key("feedbacks").is_ok());
        assert!(validate_key("anonymousFeedbacks").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../user").is_err());
        assert!(validate_key("a/b").is_err());
        assert!(validate_key("a\\b").is_err());
        assert!(validate_key("user.json").is_err());
    }
}
