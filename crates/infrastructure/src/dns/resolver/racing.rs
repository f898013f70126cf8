use super::context::QueryContext;
use crate::dns::sinkhole::{SinkholeDecision, SinkholePolicy};
use crate::dns::transport::UpstreamExchange;
use hickory_proto::op::{Message, ResponseCode};
use sinkhole_dns_domain::config::ResolverConfig;
use sinkhole_dns_domain::{DomainError, Network};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{timeout, Instant};
use tracing::{debug, info, warn};

/// A response that made it through the single-slot conduit.
struct UpstreamAnswer {
    message: Message,
    server: String,
    rtt: Duration,
}

/// Races the configured nameservers with staggered starts.
///
/// Servers are launched in list order, one `interval` apart. The first
/// successful answer wins; once it is in, no further server is launched.
/// Workers that are still in flight are left to finish on their own and
/// their answers are dropped.
pub struct RacingResolver {
    nameservers: Arc<[String]>,
    timeout: Duration,
    interval: Duration,
    exchanger: Arc<dyn UpstreamExchange>,
    policy: Arc<SinkholePolicy>,
}

impl RacingResolver {
    pub fn new(
        config: &ResolverConfig,
        exchanger: Arc<dyn UpstreamExchange>,
        policy: Arc<SinkholePolicy>,
    ) -> Self {
        Self {
            nameservers: config.nameservers().into(),
            timeout: config.timeout(),
            interval: config.interval(),
            exchanger,
            policy,
        }
    }

    pub fn nameservers(&self) -> &[String] {
        &self.nameservers
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Resolve `request` upstream and run the sinkhole policy on the winner.
    pub async fn lookup(&self, network: Network, request: &Message) -> Result<Message, DomainError> {
        let qname = request
            .queries()
            .first()
            .map(|query| query.name().to_string())
            .ok_or_else(|| DomainError::InvalidDnsRequest("request has no question".into()))?;

        let ctx = QueryContext {
            qname,
            network,
            timeout: self.timeout,
            interval: self.interval,
            nameservers: Arc::clone(&self.nameservers),
        };

        let Some(answer) = self.race(&ctx, request).await else {
            let err = ctx.resolution_failed();
            warn!(qname = %ctx.qname, network = %network, error = %err, "Resolution failed");
            return Err(err);
        };

        info!(
            qname = %ctx.qname,
            server = %answer.server,
            network = %network,
            rtt_ms = answer.rtt.as_millis() as u64,
            "Upstream answered"
        );

        let mut message = answer.message;
        let decision = self.policy.decide(&mut message, &ctx.qname).await;
        log_decision(&ctx.qname, &decision);

        Ok(message)
    }

    async fn race(&self, ctx: &QueryContext, request: &Message) -> Option<UpstreamAnswer> {
        let (tx, mut rx) = mpsc::channel::<UpstreamAnswer>(1);
        let request = Arc::new(request.clone());
        let mut workers: Vec<JoinHandle<()>> = Vec::with_capacity(ctx.nameservers.len());

        for server in ctx.nameservers.iter() {
            workers.push(self.launch(ctx, server.clone(), Arc::clone(&request), tx.clone()));

            // `tx` is still held here, so `recv` cannot observe a closed channel.
            if let Ok(Some(answer)) = timeout(ctx.interval, rx.recv()).await {
                return Some(answer);
            }
        }

        drop(tx);
        for worker in workers {
            if let Err(e) = worker.await {
                warn!(qname = %ctx.qname, error = %e, "Upstream worker panicked");
            }
        }

        rx.try_recv().ok()
    }

    fn launch(
        &self,
        ctx: &QueryContext,
        server: String,
        request: Arc<Message>,
        tx: mpsc::Sender<UpstreamAnswer>,
    ) -> JoinHandle<()> {
        let exchanger = Arc::clone(&self.exchanger);
        let network = ctx.network;
        let exchange_timeout = ctx.timeout;
        let qname = ctx.qname.clone();

        debug!(qname = %qname, server = %server, network = %network, "Launching upstream exchange");

        tokio::spawn(async move {
            let started = Instant::now();
            let result = exchanger
                .exchange(&request, &server, network, exchange_timeout)
                .await
                .and_then(|message| match message.response_code() {
                    ResponseCode::NoError => Ok(message),
                    rcode => Err(DomainError::UpstreamRcode {
                        server: server.clone(),
                        rcode: rcode.to_string(),
                    }),
                });

            match result {
                Ok(message) => {
                    let answer = UpstreamAnswer {
                        message,
                        server,
                        rtt: started.elapsed(),
                    };
                    // Capacity 1: a second success or a finished race drops the answer.
                    if let Err(dropped) = tx.try_send(answer) {
                        let answer = dropped.into_inner();
                        debug!(qname = %qname, server = %answer.server, "Late upstream answer discarded");
                    }
                }
                Err(e) => {
                    debug!(qname = %qname, server = %server, error = %e, "Upstream exchange failed");
                }
            }
        })
    }
}

fn log_decision(qname: &str, decision: &SinkholeDecision) {
    match decision {
        SinkholeDecision::Blocked { candidate, source } => {
            info!(qname = %qname, candidate = %candidate, source = %source, "Sinkholed");
        }
        SinkholeDecision::Logged { candidate, list } => {
            info!(qname = %qname, candidate = %candidate, list = %list, verdict = "log", "Listed for logging");
        }
        SinkholeDecision::Allowed => {
            debug!(qname = %qname, "Allowed");
        }
    }
}
