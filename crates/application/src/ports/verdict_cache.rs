use sinkhole_dns_domain::{Action, DomainError};
use std::collections::HashMap;

/// One list of verdicts keyed by domain name or textual IP address.
///
/// Keys are compared byte-for-byte. Implementations must make `replace`
/// atomic with respect to every read: a reader sees either the whole old
/// mapping or the whole new one. No I/O happens while a lock is held.
pub trait VerdictCache: Send + Sync {
    /// `DomainError::KeyNotFound` when `key` is absent.
    fn get(&self, key: &str) -> Result<Action, DomainError>;

    /// Insert or overwrite.
    fn set(&self, key: &str, action: Action);

    fn exists(&self, key: &str) -> bool;

    /// No-op when `key` is absent.
    fn remove(&self, key: &str);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Swap the whole mapping in one step.
    fn replace(&self, entries: HashMap<String, Action>);

    /// Action of the first key in `keys` that is present, scanning in order
    /// under a single read lock. `DomainError::KeyNotFound` when none are.
    fn find_first_key(&self, keys: &[&str]) -> Result<Action, DomainError>;
}
