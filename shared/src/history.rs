//! Bounded local search history
//!
//! Most recent first, capped at [`HISTORY_LIMIT`]. Every mutation updates
//! the in-memory list before persisting, so a storage failure never loses
//! the session view.

use std::collections::HashMap;

use crate::models::{HistoryEntry, HistoryFilter, HistoryStats, RequestMethod};
use crate::storage::{load_json, save_json, KeyValueStore, StorageError};
use crate::types::storage_keys;

pub const HISTORY_LIMIT: usize = 50;

pub struct HistoryCache<S: KeyValueStore> {
    store: S,
    entries: Vec<HistoryEntry>,
}

impl<S: KeyValueStore> HistoryCache<S> {
    /// Load persisted history. Unreadable data starts an empty list.
    pub fn load(store: S) -> Self {
        let mut entries: Vec<HistoryEntry> =
            load_json(&store, storage_keys::SEARCH_HISTORY).unwrap_or_default();
        entries.truncate(HISTORY_LIMIT);
        Self { store, entries }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert at the head, evict past the limit, then persist
    pub fn append(&mut self, entry: HistoryEntry) -> Result<(), StorageError> {
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_LIMIT);
        self.persist()
    }

    /// Remove by position in the full list. Out-of-range indices return
    /// `Ok(None)` without touching storage. On `Err` the entry is already
    /// gone from memory.
    pub fn remove(&mut self, index: usize) -> Result<Option<HistoryEntry>, StorageError> {
        if index >= self.entries.len() {
            return Ok(None);
        }
        let removed = self.entries.remove(index);
        self.persist()?;
        Ok(Some(removed))
    }

    /// Entries matching the filter, most recent first, each paired with its
    /// index in the full list
    pub fn list(&self, filter: HistoryFilter) -> Vec<(usize, &HistoryEntry)> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| filter.matches(entry))
            .collect()
    }

    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.entries.clear();
        self.store.remove(storage_keys::SEARCH_HISTORY)
    }

    pub fn stats(&self) -> HistoryStats {
        let auto = self
            .entries
            .iter()
            .filter(|e| e.method == RequestMethod::Auto)
            .count();

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for crop in self.entries.iter().flat_map(|e| e.crops.iter()) {
            *counts.entry(crop.original_name.as_str()).or_default() += 1;
        }
        // Ties go to the alphabetically first name
        let most_recommended = counts
            .into_iter()
            .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(name, _)| name.to_string());

        HistoryStats {
            total: self.entries.len(),
            auto,
            manual: self.entries.len() - auto,
            most_recommended,
        }
    }

    fn persist(&self) -> Result<(), StorageError> {
        save_json(&self.store, storage_keys::SEARCH_HISTORY, &self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HistorySource, Recommendation};
    use crate::storage::MemoryStore;
    use chrono::{Duration, TimeZone, Utc};

    fn entry(n: i64, method: RequestMethod, crops: &[&str]) -> HistoryEntry {
        HistoryEntry {
            method,
            timestamp: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(n),
            source: HistorySource::Manual { inputs: None },
            crops: crops
                .iter()
                .map(|name| Recommendation {
                    name: name.to_string(),
                    original_name: name.to_string(),
                    emoji: "🌱".to_string(),
                    suitability: 80,
                    price: "N/A".to_string(),
                    reason: String::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_append_persists_and_reloads() {
        let store = MemoryStore::new();
        let mut cache = HistoryCache::load(store.clone());
        cache.append(entry(1, RequestMethod::Auto, &["Rice"])).unwrap();
        cache.append(entry(2, RequestMethod::Manual, &["Wheat"])).unwrap();

        let reloaded = HistoryCache::load(store);
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.entries()[0].method, RequestMethod::Manual);
    }

    #[test]
    fn test_list_keeps_full_indices() {
        let mut cache = HistoryCache::load(MemoryStore::new());
        cache.append(entry(1, RequestMethod::Auto, &[])).unwrap();
        cache.append(entry(2, RequestMethod::Manual, &[])).unwrap();
        cache.append(entry(3, RequestMethod::Auto, &[])).unwrap();

        let autos: Vec<usize> = cache.list(HistoryFilter::Auto).iter().map(|(i, _)| *i).collect();
        assert_eq!(autos, vec![0, 2]);

        let removed = cache.remove(2).unwrap().unwrap();
        assert_eq!(removed.timestamp, entry(1, RequestMethod::Auto, &[]).timestamp);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut cache = HistoryCache::load(MemoryStore::new());
        assert_eq!(cache.remove(0), Ok(None));
    }

    #[test]
    fn test_corrupt_storage_starts_empty() {
        let store = MemoryStore::new();
        store.set(storage_keys::SEARCH_HISTORY, "{not json").unwrap();
        assert!(HistoryCache::load(store).is_empty());
    }

    #[test]
    fn test_stats() {
        let mut cache = HistoryCache::load(MemoryStore::new());
        cache.append(entry(1, RequestMethod::Auto, &["Rice", "Maize"])).unwrap();
        cache.append(entry(2, RequestMethod::Manual, &["Maize", "Cotton"])).unwrap();
        cache.append(entry(3, RequestMethod::Auto, &["Cotton", "Rice"])).unwrap();

        let stats = cache.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.auto, 2);
        assert_eq!(stats.manual, 1);
        assert_eq!(stats.most_recommended.as_deref(), Some("Cotton"));
    }
}
