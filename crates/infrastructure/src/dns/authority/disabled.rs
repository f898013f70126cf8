use async_trait::async_trait;
use sinkhole_dns_application::ports::VerdictAuthority;
use sinkhole_dns_domain::{BlacklistedRecord, DomainError};

/// Authority used when no remote service is configured: nothing is ever listed.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledAuthority;

#[async_trait]
impl VerdictAuthority for DisabledAuthority {
    async fn lookup(&self, _candidate: &str) -> Result<Option<BlacklistedRecord>, DomainError> {
        Ok(None)
    }
}
