use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{StatusCode, Url};
use sinkhole_dns_application::ports::VerdictAuthority;
use sinkhole_dns_domain::config::AuthorityConfig;
use sinkhole_dns_domain::{BlacklistedRecord, DomainError};
use std::time::Duration;
use tracing::debug;

const RECORD_PATH: &str = "sinkit/rest/blacklist/record";
const TOKEN_HEADER: &str = "X-sinkit-token";
const IDENTITY_HEADER: &str = "X-sinkit-resolver";

/// Bodies shorter than this cannot hold a record and mean "not listed".
const MIN_RECORD_LEN: usize = 10;

/// Verdict authority reached over HTTP: `GET {base_url}/sinkit/rest/blacklist/record/{candidate}`.
pub struct HttpVerdictAuthority {
    client: reqwest::Client,
    base_url: Url,
    access_token: String,
    server_identity: String,
}

impl HttpVerdictAuthority {
    pub fn new(config: &AuthorityConfig) -> Result<Self, DomainError> {
        let raw = config
            .base_url
            .as_deref()
            .ok_or_else(|| DomainError::Authority("authority base_url is not set".into()))?;
        let base_url = Url::parse(raw)
            .map_err(|e| DomainError::Authority(format!("invalid base_url {}: {}", raw, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(DomainError::Authority(format!("invalid base_url {}", raw)));
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("sinkhole-dns/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| DomainError::Authority(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            access_token: config.access_token.clone(),
            server_identity: config.server_identity.clone(),
        })
    }

    /// The candidate is pushed as one percent-encoded path segment.
    fn record_url(&self, candidate: &str) -> Result<Url, DomainError> {
        let segment = candidate.trim_end_matches('.');
        if matches!(segment, "" | "." | "..") {
            return Err(DomainError::Authority(format!("unusable candidate {:?}", candidate)));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| DomainError::Authority(format!("invalid base_url {}", self.base_url)))?
            .pop_if_empty()
            .extend(RECORD_PATH.split('/'))
            .push(segment);
        Ok(url)
    }
}

#[async_trait]
impl VerdictAuthority for HttpVerdictAuthority {
    async fn lookup(&self, candidate: &str) -> Result<Option<BlacklistedRecord>, DomainError> {
        let url = self.record_url(candidate)?;

        let response = self
            .client
            .get(url.clone())
            .header(TOKEN_HEADER, &self.access_token)
            .header(IDENTITY_HEADER, &self.server_identity)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| DomainError::Authority(format!("fetch error for {}: {}", url, e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(candidate = %candidate, "Authority has no record");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(DomainError::Authority(format!(
                "HTTP {} for {}",
                status.as_u16(),
                url
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DomainError::Authority(format!("read error for {}: {}", url, e)))?;

        if body.len() < MIN_RECORD_LEN {
            debug!(candidate = %candidate, bytes = body.len(), "Authority body too short, not listed");
            return Ok(None);
        }

        let record: BlacklistedRecord = serde_json::from_slice(&body).map_err(|e| {
            DomainError::Authority(format!("malformed record for {}: {}", candidate, e))
        })?;

        debug!(
            candidate = %candidate,
            source = %record.source,
            score = record.score,
            taxonomy = record.taxonomy,
            "Authority listed candidate"
        );

        Ok(Some(record))
    }
}
