#![allow(dead_code)]

use async_trait::async_trait;
use sinkhole_dns_application::ports::{ListSource, VerdictCache};
use sinkhole_dns_application::services::ListRegistry;
use sinkhole_dns_domain::{Action, DomainError, ListKind};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

// ============================================================================
// Mock VerdictCache
// ============================================================================

#[derive(Default)]
pub struct MockVerdictCache {
    entries: Mutex<HashMap<String, Action>>,
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
    }

    fn find_first_key(&self, keys: &[&str]) -> Result<Action, DomainError> {
        let entries = self.entries.lock().unwrap();
        keys.iter()
            .find_map(|key| entries.get(*key).copied())
            .ok_or_else(|| DomainError::KeyNotFound(keys.join(",")))
    }
}

pub fn mock_registry() -> Arc<ListRegistry> {
    Arc::new(ListRegistry::new(
        Arc::new(MockVerdictCache::default()),
        Arc::new(MockVerdictCache::default()),
        Arc::new(MockVerdictCache::default()),
    ))
}

// ============================================================================
// Mock ListSource
// ============================================================================

pub struct MockListSource {
    call_count: Arc<AtomicU64>,
}

impl MockListSource {
    pub fn new() -> Self {
        Self {
            call_count: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ListSource for MockListSource {
    async fn load(
        &self,
        _kind: ListKind,
        location: &str,
    ) -> Result<HashMap<String, Action>, DomainError> {
        let generation = self.call_count.fetch_add(1, Ordering::SeqCst) + 1;
        let mut entries = HashMap::new();
        entries.insert(format!("gen{}.{}", generation, location), Action::Black);
        Ok(entries)
    }
}
