use super::Transport;
use async_trait::async_trait;
use hickory_proto::op::Message;
use sinkhole_dns_domain::{DomainError, Network};
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::debug;

/// One request/response exchange with an upstream nameserver.
///
/// Implementations return whatever the upstream answered, including
/// non-success response codes. Judging the rcode is the caller's job.
#[async_trait]
pub trait UpstreamExchange: Send + Sync {
    async fn exchange(
        &self,
        request: &Message,
        nameserver: &str,
        network: Network,
        timeout: Duration,
    ) -> Result<Message, DomainError>;
}

/// Exchanges DNS messages over real UDP and TCP sockets.
#[derive(Debug, Default, Clone, Copy)]
pub struct NetworkExchanger;

impl NetworkExchanger {
    pub fn new() -> Self {
        Self
    }

    /// Literal addresses skip the system resolver; host names are looked up
    /// within the exchange timeout.
    async fn resolve(nameserver: &str, timeout: Duration) -> Result<SocketAddr, DomainError> {
        if let Ok(addr) = nameserver.parse::<SocketAddr>() {
            return Ok(addr);
        }
        Self::first_address(nameserver, timeout, tokio::net::lookup_host(nameserver)).await
    }

    async fn first_address<F, I>(
        nameserver: &str,
        timeout: Duration,
        lookup: F,
    ) -> Result<SocketAddr, DomainError>
    where
        F: Future<Output = io::Result<I>>,
        I: Iterator<Item = SocketAddr>,
    {
        tokio::time::timeout(timeout, lookup)
            .await
            .map_err(|_| DomainError::transport(nameserver, "timeout resolving nameserver address"))?
            .map_err(|e| DomainError::InvalidNameserver(format!("{}: {}", nameserver, e)))?
            .next()
            .ok_or_else(|| DomainError::InvalidNameserver(format!("{}: no address", nameserver)))
    }

    async fn send_once(
        wire: &[u8],
        expected_id: u16,
        nameserver: &str,
        addr: SocketAddr,
        network: Network,
        timeout: Duration,
    ) -> Result<Message, DomainError> {
        let transport = Transport::new(network, addr);
        let response = transport.send(wire, timeout).await?;

        let message = Message::from_vec(&response.bytes).map_err(|e| {
            DomainError::transport(nameserver, format!("undecodable response: {}", e))
        })?;

        if message.id() != expected_id {
            return Err(DomainError::transport(
                nameserver,
                format!("response id {} does not match query id {}", message.id(), expected_id),
            ));
        }

        debug!(
            server = %nameserver,
            protocol = response.protocol_used,
            answers = message.answers().len(),
            "Upstream exchange complete"
        );

        Ok(message)
    }
}

#[async_trait]
impl UpstreamExchange for NetworkExchanger {
    async fn exchange(
        &self,
        request: &Message,
        nameserver: &str,
        network: Network,
        timeout: Duration,
    ) -> Result<Message, DomainError> {
        let addr = Self::resolve(nameserver, timeout).await?;

        let mut outgoing = request.clone();
        let query_id = fastrand::u16(..);
        outgoing.set_id(query_id);

        let wire = outgoing
            .to_vec()
            .map_err(|e| DomainError::InvalidDnsRequest(e.to_string()))?;

        let mut response =
            Self::send_once(&wire, query_id, nameserver, addr, network, timeout).await?;

        if network == Network::Udp && response.truncated() {
            debug!(server = %nameserver, "Truncated UDP response, retrying over TCP");
            response =
                Self::send_once(&wire, query_id, nameserver, addr, Network::Tcp, timeout).await?;
        }

        response.set_id(request.id());
        Ok(response)
    }
}
