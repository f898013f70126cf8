use crate::dns::resolver::RacingResolver;
use hickory_proto::op::{Edns, Header, Message, MessageType, ResponseCode};
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use sinkhole_dns_domain::{DomainError, Network};
use std::sync::Arc;
use tracing::{debug, warn};

/// Largest UDP response a client without EDNS is guaranteed to accept.
const MIN_UDP_PAYLOAD: u16 = 512;

/// Request handler for the inbound DNS server.
///
/// Every query is handed to the racing resolver; the server owns the sockets,
/// framing and UDP truncation.
pub struct DnsFrontend {
    resolver: Arc<RacingResolver>,
}

impl DnsFrontend {
    pub fn new(resolver: Arc<RacingResolver>) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &Arc<RacingResolver> {
        &self.resolver
    }

    async fn send<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
        header: Header,
        response: Option<&Message>,
    ) -> ResponseInfo {
        let mut builder = MessageResponseBuilder::from_message_request(request);
        if let Some(edns) = request.edns() {
            builder.edns(response_edns(edns));
        }

        let sent = match response {
            Some(message) => {
                let built = builder.build(
                    header,
                    message.answers().iter(),
                    message.name_servers().iter(),
                    &[],
                    message.additionals().iter(),
                );
                response_handle.send_response(built).await
            }
            None => {
                let built = builder.build_no_records(header);
                response_handle.send_response(built).await
            }
        };

        match sent {
            Ok(info) => info,
            Err(e) => {
                warn!(client = %request.src(), id = header.id(), error = %e, "Failed to send response");
                ResponseInfo::from(header)
            }
        }
    }
}

#[async_trait::async_trait]
impl RequestHandler for DnsFrontend {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        response_handle: R,
    ) -> ResponseInfo {
        let mut header = Header::response_from_request(request.header());
        header.set_recursion_available(true);

        if request.queries().is_empty() {
            debug!(id = request.id(), "Request without a question");
            header.set_response_code(ResponseCode::FormErr);
            return self.send(request, response_handle, header, None).await;
        }

        let network = if request.protocol().is_datagram() {
            Network::Udp
        } else {
            Network::Tcp
        };
        let query = to_message(request);

        match self.resolver.lookup(network, &query).await {
            Ok(response) => {
                header.set_response_code(response.response_code());
                header.set_authoritative(response.authoritative());
                self.send(request, response_handle, header, Some(&response))
                    .await
            }
            Err(DomainError::InvalidDnsRequest(reason)) => {
                debug!(id = request.id(), reason = %reason, "Rejecting request");
                header.set_response_code(ResponseCode::FormErr);
                self.send(request, response_handle, header, None).await
            }
            Err(e) => {
                debug!(id = request.id(), error = %e, "Answering SERVFAIL");
                header.set_response_code(ResponseCode::ServFail);
                self.send(request, response_handle, header, None).await
            }
        }
    }
}

/// Rebuild the query the resolver forwards upstream.
fn to_message(request: &Request) -> Message {
    let mut message = Message::new();
    let header = request.header();
    message
        .set_id(header.id())
        .set_message_type(MessageType::Query)
        .set_op_code(header.op_code())
        .set_recursion_desired(header.recursion_desired())
        .set_checking_disabled(header.checking_disabled());
    message.add_queries(request.queries().iter().map(|q| q.original().clone()));
    if let Some(edns) = request.edns() {
        message.set_edns(edns.clone());
    }
    message
}

/// EDNS for the response; the payload size bounds UDP truncation.
fn response_edns(request: &Edns) -> Edns {
    let mut edns = Edns::new();
    edns.set_max_payload(request.max_payload().max(MIN_UDP_PAYLOAD));
    edns
}
