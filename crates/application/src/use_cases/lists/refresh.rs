use crate::ports::ListSource;
use crate::services::ListRegistry;
use sinkhole_dns_domain::ListKind;
use std::sync::Arc;
use tracing::{info, warn};

/// Outcome of one refresh pass.
#[derive(Debug, Default)]
pub struct RefreshReport {
    /// Lists that were replaced, with their new entry count.
    pub replaced: Vec<(ListKind, usize)>,
    /// Lists whose load failed; their previous content is kept.
    pub failed: Vec<(ListKind, String)>,
}

impl RefreshReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Reload every configured list and swap it into its cache.
pub struct RefreshListsUseCase {
    registry: Arc<ListRegistry>,
    source: Arc<dyn ListSource>,
    locations: Vec<(ListKind, String)>,
}

impl RefreshListsUseCase {
    pub fn new(
        registry: Arc<ListRegistry>,
        source: Arc<dyn ListSource>,
        locations: Vec<(ListKind, String)>,
    ) -> Self {
        Self {
            registry,
            source,
            locations,
        }
    }

    pub fn has_sources(&self) -> bool {
        !self.locations.is_empty()
    }

    pub async fn execute(&self) -> RefreshReport {
        let mut report = RefreshReport::default();

        for (kind, location) in &self.locations {
            match self.source.load(*kind, location).await {
                Ok(entries) => {
                    let count = entries.len();
                    self.registry.get(*kind).replace(entries);
                    info!(list = %kind, entries = count, source = %location, "Verdict list replaced");
                    report.replaced.push((*kind, count));
                }
                Err(e) => {
                    warn!(list = %kind, source = %location, error = %e, "Verdict list load failed; keeping previous content");
                    report.failed.push((*kind, e.to_string()));
                }
            }
        }

        report
    }
}
