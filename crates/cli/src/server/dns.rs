use hickory_server::ServerFuture;
use sinkhole_dns_infrastructure::dns::DnsFrontend;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{TcpListener, UdpSocket};
use tokio_util::sync::CancellationToken;
use tracing::info;

pub async fn start_dns_server(
    socket_addr: SocketAddr,
    frontend: DnsFrontend,
    tcp_idle_timeout: Duration,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    info!(bind_address = %socket_addr, "Starting DNS server");

    let udp_socket = UdpSocket::bind(socket_addr).await?;
    info!(protocol = "UDP", "DNS server listening");

    let tcp_listener = TcpListener::bind(socket_addr).await?;
    info!(protocol = "TCP", "DNS server listening");

    info!(
        nameservers = ?frontend.resolver().nameservers(),
        timeout_ms = frontend.resolver().timeout().as_millis() as u64,
        "DNS server ready to accept queries"
    );

    let mut server = ServerFuture::new(frontend);
    server.register_socket(udp_socket);
    server.register_listener(tcp_listener, tcp_idle_timeout);

    tokio::select! {
        result = server.block_until_done() => result?,
        _ = shutdown.cancelled() => {
            info!("Stopping DNS server");
            server.shutdown_gracefully().await?;
        }
    }

    info!("DNS server stopped");
    Ok(())
}
