use async_trait::async_trait;
use sinkhole_dns_domain::{BlacklistedRecord, DomainError};

/// Remote service that knows whether a single domain or address is a listed indicator.
#[async_trait]
pub trait VerdictAuthority: Send + Sync {
    /// `Ok(Some(record))` when `candidate` is listed, `Ok(None)` when it is not.
    ///
    /// `candidate` has no trailing root dot. Callers treat `Err` as "not listed".
    async fn lookup(&self, candidate: &str) -> Result<Option<BlacklistedRecord>, DomainError>;
}
