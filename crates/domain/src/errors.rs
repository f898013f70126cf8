use crate::Network;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{qname} resolv failed on {} ({network})", .nameservers.join("; "))]
    ResolutionFailed {
        qname: String,
        network: Network,
        nameservers: Vec<String>,
    },

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Transport error on {server}: {reason}")]
    Transport { server: String, reason: String },

    #[error("Upstream {server} answered {rcode}")]
    UpstreamRcode { server: String, rcode: String },

    #[error("Invalid DNS request: {0}")]
    InvalidDnsRequest(String),

    #[error("Invalid nameserver: {0}")]
    InvalidNameserver(String),

    #[error("Verdict authority error: {0}")]
    Authority(String),

    #[error("List source error: {0}")]
    ListSource(String),
}

impl DomainError {
    pub fn transport(server: impl Into<String>, reason: impl ToString) -> Self {
        Self::Transport {
            server: server.into(),
            reason: reason.to_string(),
        }
    }
}
