use super::parser::parse_list_text;
use async_trait::async_trait;
use sinkhole_dns_application::ports::ListSource;
use sinkhole_dns_domain::{Action, DomainError, ListKind};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Reads verdict lists from local files or `http(s)://` URLs.
pub struct FileListSource {
    http_client: reqwest::Client,
}

impl FileListSource {
    pub fn new() -> Result<Self, DomainError> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("sinkhole-dns/", env!("CARGO_PKG_VERSION"), " (list-refresh)"))
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| DomainError::ListSource(e.to_string()))?;

        Ok(Self { http_client })
    }

    async fn fetch_url(&self, url: &str) -> Result<String, DomainError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| DomainError::ListSource(format!("fetch error for {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(DomainError::ListSource(format!(
                "HTTP {} for {}",
                response.status().as_u16(),
                url
            )));
        }

        response
            .text()
            .await
            .map_err(|e| DomainError::ListSource(format!("read error for {}: {}", url, e)))
    }

    async fn read_file(path: &str) -> Result<String, DomainError> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| DomainError::ListSource(format!("read error for {}: {}", path, e)))
    }
}

fn is_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

#[async_trait]
impl ListSource for FileListSource {
    async fn load(
        &self,
        kind: ListKind,
        location: &str,
    ) -> Result<HashMap<String, Action>, DomainError> {
        let text = if is_url(location) {
            self.fetch_url(location).await?
        } else {
            Self::read_file(location).await?
        };

        let entries = parse_list_text(&text);
        debug!(list = %kind, source = %location, entries = entries.len(), "Verdict list parsed");
        Ok(entries)
    }
}
