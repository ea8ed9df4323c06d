use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::warn;

use flashmaster_core::model::{CardId, MasterySet};

/// Key under which the mastery list is persisted.
pub const MASTERED_IDS_KEY: &str = "flashmaster_mastered_ids";

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Encode the mastery set as the persisted JSON array of id strings.
///
/// Ids are sorted so repeated writes of the same set are byte-identical.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if JSON encoding fails.
pub fn encode_mastered(mastered: &MasterySet) -> Result<String, StorageError> {
    let ids: Vec<String> = mastered
        .sorted_ids()
        .iter()
        .map(|id| id.as_str().to_owned())
        .collect();
    serde_json::to_string(&ids).map_err(|err| StorageError::Serialization(err.to_string()))
}

/// Decode a persisted value into a mastery set.
///
/// A value that fails to parse as a list of strings is not an error: it is
/// logged once and treated as "no prior mastery data".
#[must_use]
pub fn decode_mastered(raw: &str) -> MasterySet {
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(ids) => MasterySet::from_ids(ids.into_iter().map(CardId::new)),
        Err(err) => {
            warn!(%err, key = MASTERED_IDS_KEY, "discarding unparseable mastery data");
            MasterySet::new()
        }
    }
}

/// Repository contract for the persisted mastery set.
#[async_trait]
pub trait MasteryRepository: Send + Sync {
    /// Load the persisted mastery set.
    ///
    /// An absent entry or an undecodable value yields an empty set; only
    /// backend failures surface as errors.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn load_mastered(&self) -> Result<MasterySet, StorageError>;

    /// Persist the full mastery set, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the set cannot be stored.
    async fn save_mastered(&self, mastered: &MasterySet) -> Result<(), StorageError>;

    /// Remove the persisted entry entirely.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the entry cannot be removed.
    async fn clear_mastered(&self) -> Result<(), StorageError>;
}

/// Simple in-memory key/value store for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a raw value under a key, bypassing encoding.
    ///
    /// Test hook for exercising corrupt-value recovery.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the store lock is poisoned.
    pub fn insert_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[async_trait]
impl MasteryRepository for InMemoryRepository {
    async fn load_mastered(&self) -> Result<MasterySet, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard
            .get(MASTERED_IDS_KEY)
            .map_or_else(MasterySet::new, |raw| decode_mastered(raw)))
    }

    async fn save_mastered(&self, mastered: &MasterySet) -> Result<(), StorageError> {
        let value = encode_mastered(mastered)?;
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(MASTERED_IDS_KEY.to_owned(), value);
        Ok(())
    }

    async fn clear_mastered(&self) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(MASTERED_IDS_KEY);
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub mastery: Arc<dyn MasteryRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let mastery: Arc<dyn MasteryRepository> = Arc::new(repo);
        Self { mastery }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn absent_entry_loads_as_empty_set() {
        let repo = InMemoryRepository::new();
        let loaded = repo.load_mastered().await.unwrap();
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn round_trips_mastery_set() {
        let repo = InMemoryRepository::new();
        let mastered = MasterySet::from_ids(vec![CardId::new("b"), CardId::new("a")]);

        repo.save_mastered(&mastered).await.unwrap();
        let loaded = repo.load_mastered().await.unwrap();

        assert_eq!(loaded, mastered);
    }

    #[tokio::test]
    async fn corrupt_value_loads_as_empty_set() {
        let repo = InMemoryRepository::new();
        repo.insert_raw(MASTERED_IDS_KEY, "not valid json").unwrap();

        let loaded = repo.load_mastered().await.unwrap();
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn wrong_shape_value_loads_as_empty_set() {
        // Valid JSON, wrong type: still treated as no prior data.
        let repo = InMemoryRepository::new();
        repo.insert_raw(MASTERED_IDS_KEY, r#"{"a": 1}"#).unwrap();

        let loaded = repo.load_mastered().await.unwrap();
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn clear_removes_the_entry() {
        let repo = InMemoryRepository::new();
        let mastered = MasterySet::from_ids(vec![CardId::new("a")]);
        repo.save_mastered(&mastered).await.unwrap();

        repo.clear_mastered().await.unwrap();
        let loaded = repo.load_mastered().await.unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn encoding_is_sorted_and_stable() {
        let mastered = MasterySet::from_ids(vec![CardId::new("z"), CardId::new("a")]);
        let encoded = encode_mastered(&mastered).unwrap();
        assert_eq!(encoded, r#"["a","z"]"#);
    }

    #[test]
    fn decode_ignores_id_order() {
        let from_raw = decode_mastered(r#"["b","a"]"#);
        let expected = MasterySet::from_ids(vec![CardId::new("a"), CardId::new("b")]);
        assert_eq!(from_raw, expected);
    }
}
