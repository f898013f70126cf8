#![allow(dead_code)]

use async_trait::async_trait;
use sinkhole_dns_application::ports::{ListSource, VerdictCache};
use sinkhole_dns_domain::{Action, DomainError, ListKind};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// ============================================================================
// Mock VerdictCache
// ============================================================================

#[derive(Default)]
pub struct MockVerdictCache {
    entries: Mutex<HashMap<String, Action>>,
    replace_calls: Mutex<usize>,
}

impl MockVerdictCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: &[(&str, Action)]) -> Self {
        let cache = Self::new();
        for (key, action) in entries {
            cache.set(key, *action);
        }
        cache
    }

    pub fn replace_calls(&self) -> usize {
        *self.replace_calls.lock().unwrap()
    }
}

impl VerdictCache for MockVerdictCache {
    fn get(&self, key: &str) -> Result<Action, DomainError> {
        self.entries
            .lock()
            .unwrap()
            .get(key)
            .copied()
            .ok_or_else(|| DomainError::KeyNotFound(key.to_string()))
    }

    fn set(&self, key: &str, action: Action) {
        self.entries.lock().unwrap().insert(key.to_string(), action);
    }

    fn exists(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }

    fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    fn replace(&self, entries: HashMap<String, Action>) {
        *self.entries.lock().unwrap() = entries;
        *self.replace_calls.lock().unwrap() += 1;
    }

    fn find_first_key(&self, keys: &[&str]) -> Result<Action, DomainError> {
        let entries = self.entries.lock().unwrap();
        keys.iter()
            .find_map(|k| entries.get(*k).copied())
            .ok_or_else(|| DomainError::KeyNotFound(keys.join(",")))
    }
}

// ============================================================================
// Mock ListSource
// ============================================================================

#[derive(Clone, Default)]
pub struct MockListSource {
    lists: Arc<Mutex<HashMap<String, HashMap<String, Action>>>>,
}

impl MockListSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locations without content fail to load.
    pub fn set_list(&self, location: &str, entries: &[(&str, Action)]) {
        let map = entries
            .iter()
            .map(|(k, a)| (k.to_string(), *a))
            .collect();
        self.lists.lock().unwrap().insert(location.to_string(), map);
    }
}

#[async_trait]
impl ListSource for MockListSource {
    async fn load(
        &self,
        _kind: ListKind,
        location: &str,
    ) -> Result<HashMap<String, Action>, DomainError> {
        self.lists
            .lock()
            .unwrap()
            .get(location)
            .cloned()
            .ok_or_else(|| DomainError::ListSource(format!("{} unavailable", location)))
    }
}
