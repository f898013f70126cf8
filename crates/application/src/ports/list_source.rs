use async_trait::async_trait;
use sinkhole_dns_domain::{Action, DomainError, ListKind};
use std::collections::HashMap;

/// Loads the full content of one verdict list from a file, URL, feed, etc.
#[async_trait]
pub trait ListSource: Send + Sync {
    async fn load(
        &self,
        kind: ListKind,
        location: &str,
    ) -> Result<HashMap<String, Action>, DomainError>;
}
