use compact_str::CompactString;
use rustc_hash::FxHashMap;
use sinkhole_dns_application::ports::VerdictCache;
use sinkhole_dns_application::services::ListRegistry;
use sinkhole_dns_domain::{Action, DomainError};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

type Backend = FxHashMap<CompactString, Action>;

/// Verdict list held in memory behind a reader/writer lock.
///
/// Reads share the lock; `set`, `remove` and `replace` take it exclusively.
/// `replace` builds the new map before locking, so the write section is a
/// single pointer swap and readers never see a half-filled mapping.
pub struct MemoryVerdictCache {
    backend: RwLock<Backend>,
}

impl MemoryVerdictCache {
    pub fn new() -> Self {
        Self {
            backend: RwLock::new(Backend::default()),
        }
    }

    pub fn from_entries(entries: HashMap<String, Action>) -> Self {
        Self {
            backend: RwLock::new(into_backend(entries)),
        }
    }

    // A panic while holding the lock cannot leave the map half-written:
    // every write is a single insert, remove or swap.
    fn read(&self) -> RwLockReadGuard<'_, Backend> {
        self.backend.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Backend> {
        self.backend.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryVerdictCache {
    fn default() -> Self {
        Self::new()
    }
}

fn into_backend(entries: HashMap<String, Action>) -> Backend {
    let mut backend = Backend::with_capacity_and_hasher(entries.len(), Default::default());
    backend.extend(
        entries
            .into_iter()
            .map(|(key, action)| (CompactString::from(key), action)),
    );
    backend
}

impl VerdictCache for MemoryVerdictCache {
    fn get(&self, key: &str) -> Result<Action, DomainError> {
        let found = self.read().get(key).copied();
        match found {
            Some(action) => {
                debug!(key = %key, action = %action, "Verdict cache hit");
                Ok(action)
            }
            None => {
                debug!(key = %key, "Verdict cache miss");
                Err(DomainError::KeyNotFound(key.to_string()))
            }
        }
    }

    fn set(&self, key: &str, action: Action) {
        debug!(key = %key, action = %action, "Verdict cache set");
        self.write().insert(CompactString::from(key), action);
    }

    fn exists(&self, key: &str) -> bool {
        self.read().contains_key(key)
    }

    fn remove(&self, key: &str) {
        let removed = self.write().remove(key).is_some();
        debug!(key = %key, removed, "Verdict cache remove");
    }

    fn len(&self) -> usize {
        self.read().len()
    }

    fn replace(&self, entries: HashMap<String, Action>) {
        let next = into_backend(entries);
        let size = next.len();
        let previous = std::mem::replace(&mut *self.write(), next);
        debug!(entries = size, previous = previous.len(), "Verdict cache replaced");
    }

    fn find_first_key(&self, keys: &[&str]) -> Result<Action, DomainError> {
        let found = {
            let backend = self.read();
            keys.iter()
                .find_map(|key| backend.get(*key).map(|action| (*key, *action)))
        };
        match found {
            Some((key, action)) => {
                debug!(key = %key, action = %action, "Verdict cache hit");
                Ok(action)
            }
            None => Err(DomainError::KeyNotFound(keys.join(","))),
        }
    }
}

/// Registry whose three lists are empty in-memory caches.
pub fn in_memory_registry() -> ListRegistry {
    ListRegistry::new(
        Arc::new(MemoryVerdictCache::new()),
        Arc::new(MemoryVerdictCache::new()),
        Arc::new(MemoryVerdictCache::new()),
    )
}
