use super::candidates::{lookup_keys, normalize_candidate, record_value};
use super::decision::{BlockSource, SinkholeDecision};
use hickory_proto::op::Message;
use hickory_proto::rr::rdata::{A, AAAA};
use hickory_proto::rr::{Name, RData, Record};
use sinkhole_dns_application::ports::VerdictAuthority;
use sinkhole_dns_application::services::ListRegistry;
use sinkhole_dns_domain::config::SinkholeConfig;
use sinkhole_dns_domain::{Action, ListKind, SinkholeTier};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

const DEFAULT_AUTHORITY_TIMEOUT: Duration = Duration::from_millis(1500);

const PERSONALIZED_LISTS: &[ListKind] = &[ListKind::Custom, ListKind::Ioc];
const SHARED_LISTS: &[ListKind] = &[ListKind::AllIndicators];

/// Outcome for a single candidate string.
enum Verdict {
    Allow,
    Log(ListKind),
    Block(BlockSource),
}

/// Decides whether a resolved message goes to the sinkhole.
///
/// Candidates are the values of every answer record, then the query name.
/// Each one is looked up in the verdict caches of the configured tier; a miss
/// or a `Check` entry falls through to the remote verdict authority. Any
/// authority failure counts as "not listed".
pub struct SinkholePolicy {
    lists: Arc<ListRegistry>,
    authority: Arc<dyn VerdictAuthority>,
    address: IpAddr,
    ttl: u32,
    tier: SinkholeTier,
    authority_timeout: Duration,
}

impl SinkholePolicy {
    pub fn new(
        lists: Arc<ListRegistry>,
        authority: Arc<dyn VerdictAuthority>,
        config: &SinkholeConfig,
    ) -> Self {
        Self {
            lists,
            authority,
            address: config.address,
            ttl: config.ttl,
            tier: config.tier,
            authority_timeout: DEFAULT_AUTHORITY_TIMEOUT,
        }
    }

    /// Upper bound on one authority call, on top of the client's own timeout.
    pub fn with_authority_timeout(mut self, authority_timeout: Duration) -> Self {
        self.authority_timeout = authority_timeout;
        self
    }

    pub fn address(&self) -> IpAddr {
        self.address
    }

    /// Classify `message` for `qname` and rewrite its answers when blocked.
    pub async fn decide(&self, message: &mut Message, qname: &str) -> SinkholeDecision {
        let mut logged: Option<(String, ListKind)> = None;

        let values: Vec<String> = message.answers().iter().filter_map(record_value).collect();
        let name = std::iter::once(qname.to_string());

        for raw in values.into_iter().chain(name) {
            let candidate = normalize_candidate(&raw);
            if candidate.is_empty() {
                continue;
            }

            match self.classify(&candidate).await {
                Verdict::Block(source) => {
                    self.sinkhole(message, qname);
                    return SinkholeDecision::Blocked { candidate, source };
                }
                Verdict::Log(list) => {
                    logged.get_or_insert((candidate, list));
                }
                Verdict::Allow => {}
            }
        }

        match logged {
            Some((candidate, list)) => SinkholeDecision::Logged { candidate, list },
            None => SinkholeDecision::Allowed,
        }
    }

    /// Replace the whole answer section with one record pointing at the sinkhole.
    pub fn sinkhole(&self, message: &mut Message, qname: &str) {
        let name = Name::from_ascii(qname)
            .ok()
            .or_else(|| message.queries().first().map(|q| q.name().clone()))
            .unwrap_or_else(Name::root);

        let rdata = match self.address {
            IpAddr::V4(v4) => RData::A(A(v4)),
            IpAddr::V6(v6) => RData::AAAA(AAAA(v6)),
        };

        message.take_answers();
        message.insert_answers(vec![Record::from_rdata(name, self.ttl, rdata)]);
    }

    async fn classify(&self, candidate: &str) -> Verdict {
        match self.cached_action(candidate) {
            Some((Action::Black, list)) => Verdict::Block(BlockSource::List(list)),
            Some((Action::White, list)) => {
                debug!(candidate = %candidate, list = %list, "Whitelisted");
                Verdict::Allow
            }
            Some((Action::Log, list)) => Verdict::Log(list),
            Some((Action::Check, _)) | None => self.ask_authority(candidate).await,
        }
    }

    /// Strongest action for `candidate` across the tier's caches.
    ///
    /// Precedence when lists disagree: Black > Check > Log > White.
    fn cached_action(&self, candidate: &str) -> Option<(Action, ListKind)> {
        let keys = lookup_keys(candidate);
        let lists = match self.tier {
            SinkholeTier::Personalized => PERSONALIZED_LISTS,
            SinkholeTier::Shared => SHARED_LISTS,
        };

        lists
            .iter()
            .filter_map(|kind| {
                self.lists
                    .get(*kind)
                    .find_first_key(&keys)
                    .ok()
                    .map(|action| (action, *kind))
            })
            .max_by_key(|(action, _)| precedence(*action))
    }

    async fn ask_authority(&self, candidate: &str) -> Verdict {
        match timeout(self.authority_timeout, self.authority.lookup(candidate)).await {
            Ok(Ok(Some(record))) => Verdict::Block(BlockSource::Authority(record)),
            Ok(Ok(None)) => Verdict::Allow,
            Ok(Err(e)) => {
                warn!(candidate = %candidate, error = %e, "Verdict authority failed; allowing");
                Verdict::Allow
            }
            Err(_) => {
                warn!(
                    candidate = %candidate,
                    timeout_ms = self.authority_timeout.as_millis() as u64,
                    "Verdict authority timed out; allowing"
                );
                Verdict::Allow
            }
        }
    }
}

fn precedence(action: Action) -> u8 {
    match action {
        Action::Black => 3,
        Action::Check => 2,
        Action::Log => 1,
        Action::White => 0,
    }
}
