use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use sinkhole_dns_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

/// DNS over TCP transport: every message is prefixed with its 2-byte big-endian length.
pub struct TcpTransport {
    server_addr: SocketAddr,
}

impl TcpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }
}

/// Write one length-prefixed DNS message.
pub async fn write_framed<W>(stream: &mut W, message: &[u8]) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let len = u16::try_from(message.len()).map_err(|_| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "DNS message exceeds 65535 bytes",
        )
    })?;

    let mut frame = Vec::with_capacity(message.len() + 2);
    frame.extend_from_slice(&len.to_be_bytes());
    frame.extend_from_slice(message);
    stream.write_all(&frame).await?;
    stream.flush().await
}

/// Read one length-prefixed DNS message.
pub async fn read_framed<R>(stream: &mut R) -> std::io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut len_buf = [0u8; 2];
    stream.read_exact(&mut len_buf).await?;
    let len = u16::from_be_bytes(len_buf) as usize;

    let mut message = vec![0u8; len];
    stream.read_exact(&mut message).await?;
    Ok(message)
}

#[async_trait]
impl DnsTransport for TcpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let server = self.server_addr.to_string();

        let mut stream = tokio::time::timeout(timeout, TcpStream::connect(self.server_addr))
            .await
            .map_err(|_| DomainError::transport(&server, "timeout connecting over TCP"))?
            .map_err(|e| DomainError::transport(&server, format!("connect failed: {}", e)))?;

        tokio::time::timeout(timeout, write_framed(&mut stream, message_bytes))
            .await
            .map_err(|_| DomainError::transport(&server, "timeout sending TCP query"))?
            .map_err(|e| DomainError::transport(&server, format!("send failed: {}", e)))?;

        debug!(server = %self.server_addr, bytes_sent = message_bytes.len(), "TCP query sent");

        let bytes = tokio::time::timeout(timeout, read_framed(&mut stream))
            .await
            .map_err(|_| DomainError::transport(&server, "timeout waiting for TCP response"))?
            .map_err(|e| DomainError::transport(&server, format!("receive failed: {}", e)))?;

        debug!(server = %self.server_addr, bytes_received = bytes.len(), "TCP response received");

        Ok(TransportResponse {
            bytes,
            protocol_used: "TCP",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "TCP"
    }
}
