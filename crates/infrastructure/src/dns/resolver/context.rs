use sinkhole_dns_domain::{DomainError, Network};
use std::sync::Arc;
use std::time::Duration;

/// Per-lookup snapshot of what is being resolved and how.
#[derive(Debug, Clone)]
pub struct QueryContext {
    pub qname: String,
    pub network: Network,
    pub timeout: Duration,
    pub interval: Duration,
    pub nameservers: Arc<[String]>,
}

impl QueryContext {
    /// The error reported when no upstream delivered a usable answer.
    pub fn resolution_failed(&self) -> DomainError {
        DomainError::ResolutionFailed {
            qname: self.qname.clone(),
            network: self.network,
            nameservers: self.nameservers.to_vec(),
        }
    }
}
