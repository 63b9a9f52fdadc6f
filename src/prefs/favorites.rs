//! Favorites repository
//!
//! Insertion-ordered set of saved answers, unique by id. Mutations apply to
//! in-memory state synchronously and enqueue a write of the full set;
//! search is a pure read-side projection that never reorders the set.

use super::{Prefs, keys};
use crate::record::AnswerRecord;
use crate::{Error, Result};

/// Saved question/answer records, persisted under `favorites`.
pub struct FavoritesStore {
    prefs: Prefs,
    records: Vec<AnswerRecord>,
}

impl FavoritesStore {
    /// Load the stored set, falling back to empty
    pub async fn load(prefs: Prefs) -> Self {
        let records = match prefs.load::<Vec<AnswerRecord>>(keys::FAVORITES).await {
            Ok(Some(records)) => records,
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load favorites, starting empty");
                Vec::new()
            }
        };
        Self { prefs, records }
    }

    /// Append a record and persist the set.
    ///
    /// A record whose id is already present is rejected with
    /// [`Error::DuplicateId`] and the set is left unchanged.
    pub fn add(&mut self, record: AnswerRecord) -> Result<()> {
        if self.contains(&record.id) {
            return Err(Error::DuplicateId(record.id));
        }
        self.records.push(record);
        self.persist()
    }

    /// Remove the record with the given id and persist the set.
    ///
    /// Removing an absent id is a no-op, not an error.
    pub fn remove(&mut self, id: &str) -> Result<()> {
        let before = self.records.len();
        self.records.retain(|record| record.id != id);
        if self.records.len() == before {
            return Ok(());
        }
        self.persist()
    }

    /// Whether a record with the given id is saved
    pub fn contains(&self, id: &str) -> bool {
        self.records.iter().any(|record| record.id == id)
    }

    /// Get a saved record by id
    pub fn get(&self, id: &str) -> Option<&AnswerRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// All saved records, in insertion order
    pub fn records(&self) -> &[AnswerRecord] {
        &self.records
    }

    /// Number of saved records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Case-insensitive substring search over question and answer text.
    ///
    /// An empty query matches everything. Results keep insertion order.
    pub fn search(&self, query: &str) -> Vec<&AnswerRecord> {
        let needle = query.to_lowercase();
        self.records
            .iter()
            .filter(|record| {
                record.question.to_lowercase().contains(&needle)
                    || record.answer.to_lowercase().contains(&needle)
            })
            .collect()
    }

    fn persist(&self) -> Result<()> {
        self.prefs.save(keys::FAVORITES, &self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::Region;

    fn sample_record(id: &str, question: &str) -> AnswerRecord {
        AnswerRecord::new(id, question, "answer text", Region::default(), 1_000)
    }

    #[tokio::test]
    async fn test_add_then_contains() {
        let prefs = Prefs::open_in_memory().unwrap();
        let mut store = FavoritesStore::load(prefs).await;

        store.add(sample_record("1", "outlet height")).unwrap();
        assert!(store.contains("1"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_then_absent() {
        let prefs = Prefs::open_in_memory().unwrap();
        let mut store = FavoritesStore::load(prefs).await;

        store.add(sample_record("1", "outlet height")).unwrap();
        store.remove("1").unwrap();
        assert!(!store.contains("1"));
    }

    #[tokio::test]
    async fn test_remove_absent_is_noop() {
        let prefs = Prefs::open_in_memory().unwrap();
        let mut store = FavoritesStore::load(prefs).await;

        assert!(store.remove("missing").is_ok());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let prefs = Prefs::open_in_memory().unwrap();
        let mut store = FavoritesStore::load(prefs).await;

        store.add(sample_record("1", "first")).unwrap();
        let err = store.add(sample_record("1", "second")).unwrap_err();

        assert!(matches!(err, Error::DuplicateId(_)));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("1").unwrap().question, "first");
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_projection() {
        let prefs = Prefs::open_in_memory().unwrap();
        let mut store = FavoritesStore::load(prefs).await;

        store.add(sample_record("1", "Bathroom lighting rules")).unwrap();
        store.add(sample_record("2", "Outlet height")).unwrap();
        store.add(sample_record("3", "bathroom fan circuit")).unwrap();

        let hits = store.search("BATHROOM");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, "1");
        assert_eq!(hits[1].id, "3");

        // the projection must not disturb stored order or content
        let ids: Vec<&str> = store.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[tokio::test]
    async fn test_empty_query_matches_all() {
        let prefs = Prefs::open_in_memory().unwrap();
        let mut store = FavoritesStore::load(prefs).await;

        store.add(sample_record("1", "a")).unwrap();
        store.add(sample_record("2", "b")).unwrap();

        assert_eq!(store.search("").len(), 2);
    }

    #[tokio::test]
    async fn test_reload_preserves_insertion_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.db");

        {
            let prefs = Prefs::open(&path).unwrap();
            let mut store = FavoritesStore::load(prefs.clone()).await;
            store.add(sample_record("b", "second saved first")).unwrap();
            store.add(sample_record("a", "first saved second")).unwrap();
            prefs.flush().await.unwrap();
        }

        let prefs = Prefs::open(&path).unwrap();
        let store = FavoritesStore::load(prefs).await;
        let ids: Vec<&str> = store.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
