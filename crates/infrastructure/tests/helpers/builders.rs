#![allow(dead_code)]
use hickory_proto::op::{Message, Query};
use hickory_server::ServerFuture;
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{Name, RData, RecordType};
use sinkhole_dns_application::services::ListRegistry;
use sinkhole_dns_domain::config::{ResolverConfig, SinkholeConfig};
use sinkhole_dns_infrastructure::dns::{
    in_memory_registry, DisabledAuthority, DnsFrontend, NetworkExchanger, RacingResolver,
    SinkholePolicy,
};
use sinkhole_dns_infrastructure::dns::transport::tcp::{read_framed, write_framed};
use std::net::{Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream, UdpSocket};

pub fn query(qname: &str, id: u16) -> Message {
    let mut message = Message::new();
    message.set_id(id);
    message.set_recursion_desired(true);
    message.add_query(Query::query(Name::from_str(qname).unwrap(), RecordType::A));
    message
}

pub fn query_bytes(qname: &str, id: u16) -> Vec<u8> {
    query(qname, id).to_vec().unwrap()
}

pub fn first_a(message: &Message) -> Ipv4Addr {
    match message.answers()[0].data() {
        RData::A(A(addr)) => *addr,
        other => panic!("expected an A record, got {:?}", other),
    }
}

/// Resolver config racing `nameservers` with a 1 s timeout.
pub fn resolver_config(nameservers: Vec<String>, interval_ms: u64) -> ResolverConfig {
    ResolverConfig {
        nameservers,
        port: 53,
        timeout_secs: 1,
        interval_ms,
    }
}

/// Full resolve path over real sockets: exchanger, policy, racing resolver and a
/// running DNS server on loopback.
pub struct Stack {
    pub registry: Arc<ListRegistry>,
    pub resolver: Arc<RacingResolver>,
    pub udp: SocketAddr,
    pub tcp: SocketAddr,
}

impl Stack {
    pub async fn start(config: ResolverConfig) -> Self {
        let registry = Arc::new(in_memory_registry());
        let policy = Arc::new(SinkholePolicy::new(
            Arc::clone(&registry),
            Arc::new(DisabledAuthority),
            &SinkholeConfig::default(),
        ));
        let resolver = Arc::new(RacingResolver::new(
            &config,
            Arc::new(NetworkExchanger::new()),
            policy,
        ));

        let udp_socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let tcp_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let udp = udp_socket.local_addr().unwrap();
        let tcp = tcp_listener.local_addr().unwrap();

        let mut server = ServerFuture::new(DnsFrontend::new(Arc::clone(&resolver)));
        server.register_socket(udp_socket);
        server.register_listener(tcp_listener, Duration::from_secs(5));
        tokio::spawn(async move {
            let _ = server.block_until_done().await;
        });

        Self {
            registry,
            resolver,
            udp,
            tcp,
        }
    }

    /// Send `request` to the server over UDP and decode the reply.
    pub async fn ask_udp(&self, request: &[u8]) -> Message {
        let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        client.connect(self.udp).await.unwrap();
        client.send(request).await.unwrap();

        let mut buf = vec![0u8; 4096];
        let len = tokio::time::timeout(Duration::from_secs(5), client.recv(&mut buf))
            .await
            .expect("no UDP answer from server")
            .unwrap();
        Message::from_vec(&buf[..len]).unwrap()
    }

    /// Send `request` to the server over TCP and decode the reply.
    pub async fn ask_tcp(&self, request: &[u8]) -> Message {
        let mut stream = TcpStream::connect(self.tcp).await.unwrap();
        write_framed(&mut stream, request).await.unwrap();
        let bytes = tokio::time::timeout(Duration::from_secs(5), read_framed(&mut stream))
            .await
            .expect("no TCP answer from server")
            .unwrap();
        Message::from_vec(&bytes).unwrap()
    }
}
