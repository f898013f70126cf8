#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{RData, Record};
use sinkhole_dns_infrastructure::dns::transport::tcp::{read_framed, write_framed};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

/// How the mock upstream answers every query.
#[derive(Debug, Clone)]
pub struct MockBehavior {
    pub answer: Option<Ipv4Addr>,
    pub rcode: ResponseCode,
    pub delay: Duration,
    /// Answer UDP queries with an empty TC=1 response; TCP gets the full answer.
    pub truncate_udp: bool,
}

impl MockBehavior {
    pub fn answering(addr: Ipv4Addr) -> Self {
        Self {
            answer: Some(addr),
            rcode: ResponseCode::NoError,
            delay: Duration::ZERO,
            truncate_udp: false,
        }
    }

    pub fn failing(rcode: ResponseCode) -> Self {
        Self {
            answer: None,
            rcode,
            delay: Duration::ZERO,
            truncate_udp: false,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn truncating_udp(mut self) -> Self {
        self.truncate_udp = true;
        self
    }

    fn respond(&self, query: &[u8], over_udp: bool) -> Option<Vec<u8>> {
        let request = Message::from_vec(query).ok()?;
        let question = request.queries().first()?.clone();

        let mut response = Message::new();
        response.set_id(request.id());
        response.set_message_type(MessageType::Response);
        response.set_op_code(request.op_code());
        response.set_recursion_desired(request.recursion_desired());
        response.set_recursion_available(true);
        response.set_response_code(self.rcode);
        response.add_query(question.clone());

        if over_udp && self.truncate_udp {
            response.set_truncated(true);
        } else if let (ResponseCode::NoError, Some(addr)) = (self.rcode, self.answer) {
            response.add_answer(Record::from_rdata(
                question.name().clone(),
                60,
                RData::A(A(addr)),
            ));
        }

        response.to_vec().ok()
    }
}

/// Loopback upstream DNS server listening on UDP and TCP at the same port.
pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(behavior: MockBehavior) -> Result<Self, std::io::Error> {
        let socket = Arc::new(UdpSocket::bind("127.0.0.1:0").await?);
        let addr = socket.local_addr()?;
        let listener = TcpListener::bind(addr).await?;

        let queries = Arc::new(AtomicUsize::new(0));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
        let behavior = Arc::new(behavior);

        let counter = Arc::clone(&queries);
        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        let Ok((len, peer)) = result else { continue };
                        counter.fetch_add(1, Ordering::SeqCst);
                        let query = buf[..len].to_vec();
                        let socket = Arc::clone(&socket);
                        let behavior = Arc::clone(&behavior);
                        tokio::spawn(async move {
                            tokio::time::sleep(behavior.delay).await;
                            if let Some(response) = behavior.respond(&query, true) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        });
                    }
                    result = listener.accept() => {
                        let Ok((mut stream, _)) = result else { continue };
                        counter.fetch_add(1, Ordering::SeqCst);
                        let behavior = Arc::clone(&behavior);
                        tokio::spawn(async move {
                            let Ok(query) = read_framed(&mut stream).await else { return };
                            tokio::time::sleep(behavior.delay).await;
                            if let Some(response) = behavior.respond(&query, false) {
                                let _ = write_framed(&mut stream, &response).await;
                            }
                        });
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Nameserver entry as it would appear in the resolver configuration.
    pub fn nameserver(&self) -> String {
        format!("{}#{}", self.addr.ip(), self.addr.port())
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
