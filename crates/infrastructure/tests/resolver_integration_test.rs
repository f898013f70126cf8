use hickory_proto::op::{Message, ResponseCode};
use sinkhole_dns_domain::{Action, DomainError, Network};
use sinkhole_dns_infrastructure::dns::{NetworkExchanger, UpstreamExchange};
use std::net::Ipv4Addr;
use std::time::Duration;

mod helpers;
use helpers::{first_a, query, query_bytes, resolver_config, MockBehavior, MockDnsServer, Stack};

#[tokio::test]
async fn test_udp_query_is_answered_by_upstream() {
    let upstream = MockDnsServer::start(MockBehavior::answering(Ipv4Addr::new(192, 0, 2, 10)))
        .await
        .unwrap();
    let stack = Stack::start(resolver_config(vec![upstream.nameserver()], 50)).await;

    let response = stack.ask_udp(&query_bytes("www.example.", 0x1234)).await;

    assert_eq!(response.id(), 0x1234);
    assert_eq!(response.response_code(), ResponseCode::NoError);
    assert_eq!(first_a(&response), Ipv4Addr::new(192, 0, 2, 10));
}

#[tokio::test]
async fn test_tcp_query_is_answered_by_upstream() {
    let upstream = MockDnsServer::start(MockBehavior::answering(Ipv4Addr::new(192, 0, 2, 11)))
        .await
        .unwrap();
    let stack = Stack::start(resolver_config(vec![upstream.nameserver()], 50)).await;

    let response = stack.ask_tcp(&query_bytes("www.example.", 77)).await;

    assert_eq!(response.id(), 77);
    assert_eq!(first_a(&response), Ipv4Addr::new(192, 0, 2, 11));
}

#[tokio::test]
async fn test_listed_address_is_sinkholed_end_to_end() {
    let upstream = MockDnsServer::start(MockBehavior::answering(Ipv4Addr::new(203, 0, 113, 9)))
        .await
        .unwrap();
    let stack = Stack::start(resolver_config(vec![upstream.nameserver()], 50)).await;
    stack.registry.ioclist().set("203.0.113.9", Action::Black);

    let response = stack
        .resolver
        .lookup(Network::Udp, &query("evil.example.", 9))
        .await
        .unwrap();

    assert_eq!(response.answers().len(), 1);
    assert_eq!(response.answers()[0].ttl(), 5);
    assert_eq!(first_a(&response), Ipv4Addr::LOCALHOST);
}

#[tokio::test]
async fn test_faster_later_upstream_wins_the_race() {
    let slow = MockDnsServer::start(
        MockBehavior::answering(Ipv4Addr::new(192, 0, 2, 1)).delayed(Duration::from_millis(800)),
    )
    .await
    .unwrap();
    let fast = MockDnsServer::start(MockBehavior::answering(Ipv4Addr::new(192, 0, 2, 2)))
        .await
        .unwrap();
    let unused = MockDnsServer::start(MockBehavior::answering(Ipv4Addr::new(192, 0, 2, 3)))
        .await
        .unwrap();
    let stack = Stack::start(resolver_config(
        vec![slow.nameserver(), fast.nameserver(), unused.nameserver()],
        100,
    ))
    .await;

    let response = stack
        .resolver
        .lookup(Network::Udp, &query("www.example.", 1))
        .await
        .unwrap();

    assert_eq!(first_a(&response), Ipv4Addr::new(192, 0, 2, 2));
    assert_eq!(unused.queries(), 0);
}

#[tokio::test]
async fn test_every_upstream_failing_is_servfail() {
    let first = MockDnsServer::start(MockBehavior::failing(ResponseCode::ServFail))
        .await
        .unwrap();
    let second = MockDnsServer::start(MockBehavior::failing(ResponseCode::Refused))
        .await
        .unwrap();
    let stack = Stack::start(resolver_config(
        vec![first.nameserver(), second.nameserver()],
        20,
    ))
    .await;

    let err = stack
        .resolver
        .lookup(Network::Udp, &query("down.example.", 3))
        .await
        .unwrap_err();
    match err {
        DomainError::ResolutionFailed { qname, network, nameservers } => {
            assert_eq!(qname, "down.example.");
            assert_eq!(network, Network::Udp);
            assert_eq!(
                nameservers,
                vec![first.addr().to_string(), second.addr().to_string()]
            );
        }
        other => panic!("unexpected error {:?}", other),
    }

    let response = stack.ask_udp(&query_bytes("down.example.", 4)).await;
    assert_eq!(response.id(), 4);
    assert_eq!(response.response_code(), ResponseCode::ServFail);
    assert_eq!(response.queries().len(), 1);
}

#[tokio::test]
async fn test_malformed_requests_get_formerr() {
    let stack = Stack::start(resolver_config(vec!["127.0.0.1#9".into()], 20)).await;

    // Header claims one question but the body ends.
    let cut_short = [0x00, 0x2A, 0x01, 0x00, 0x00, 0x01, 0, 0, 0, 0, 0, 0];
    let response = stack.ask_udp(&cut_short).await;
    assert_eq!(response.id(), 0x2A);
    assert_eq!(response.response_code(), ResponseCode::FormErr);

    let mut empty = Message::new();
    empty.set_id(55);
    let empty = empty.to_vec().unwrap();

    let response = stack.ask_udp(&empty).await;
    assert_eq!(response.id(), 55);
    assert_eq!(response.response_code(), ResponseCode::FormErr);

    let response = stack.ask_tcp(&empty).await;
    assert_eq!(response.id(), 55);
    assert_eq!(response.response_code(), ResponseCode::FormErr);
}

#[tokio::test]
async fn test_truncated_udp_answer_is_retried_over_tcp() {
    let upstream = MockDnsServer::start(
        MockBehavior::answering(Ipv4Addr::new(192, 0, 2, 99)).truncating_udp(),
    )
    .await
    .unwrap();

    let request = query("big.example.", 321);
    let response = NetworkExchanger::new()
        .exchange(
            &request,
            &upstream.addr().to_string(),
            Network::Udp,
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    assert_eq!(response.id(), 321);
    assert!(!response.truncated());
    assert_eq!(first_a(&response), Ipv4Addr::new(192, 0, 2, 99));
    assert_eq!(upstream.queries(), 2);
}
