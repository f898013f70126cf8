pub mod exchange;
pub mod tcp;
pub mod udp;

use async_trait::async_trait;
use sinkhole_dns_domain::{DomainError, Network};
use std::net::SocketAddr;
use std::time::Duration;

pub use exchange::{NetworkExchanger, UpstreamExchange};

/// Result of a raw DNS transport operation
#[derive(Debug)]
pub struct TransportResponse {
    /// Raw DNS response bytes (wire format)
    pub bytes: Vec<u8>,
    /// Which protocol was used
    pub protocol_used: &'static str,
}

/// Trait for sending raw DNS messages over the wire
#[async_trait]
pub trait DnsTransport: Send + Sync {
    /// `timeout` bounds the write and the read separately.
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;

    fn protocol_name(&self) -> &'static str;
}

/// Enum-dispatched transport, no Box or vtable on the hot path.
pub enum Transport {
    Udp(udp::UdpTransport),
    Tcp(tcp::TcpTransport),
}

impl Transport {
    pub fn new(network: Network, server_addr: SocketAddr) -> Self {
        match network {
            Network::Udp => Self::Udp(udp::UdpTransport::new(server_addr)),
            Network::Tcp => Self::Tcp(tcp::TcpTransport::new(server_addr)),
        }
    }

    /// Send a DNS query via the appropriate protocol (static dispatch).
    pub async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        match self {
            Self::Udp(t) => DnsTransport::send(t, message_bytes, timeout).await,
            Self::Tcp(t) => DnsTransport::send(t, message_bytes, timeout).await,
        }
    }

    /// Protocol name for logging.
    pub fn protocol_name(&self) -> &'static str {
        match self {
            Self::Udp(_) => "UDP",
            Self::Tcp(_) => "TCP",
        }
    }
}
