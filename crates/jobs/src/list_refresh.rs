use sinkhole_dns_application::use_cases::RefreshListsUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Periodically reloads the verdict lists and swaps them into their caches.
pub struct ListRefreshJob {
    refresh: Arc<RefreshListsUseCase>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl ListRefreshJob {
    pub fn new(refresh: Arc<RefreshListsUseCase>) -> Self {
        Self {
            refresh,
            interval_secs: 300,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn interval_secs(&self) -> u64 {
        self.interval_secs
    }

    /// Spawn the refresh loop. The first refresh happens one interval after start.
    pub async fn start(self: Arc<Self>) -> JoinHandle<()> {
        info!(interval_secs = self.interval_secs, "Starting list refresh job");

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs.max(1)));
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("ListRefreshJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        let report = self.refresh.execute().await;
                        if report.is_clean() {
                            info!(lists = report.replaced.len(), "ListRefreshJob: refresh completed");
                        } else {
                            warn!(
                                replaced = report.replaced.len(),
                                failed = report.failed.len(),
                                "ListRefreshJob: refresh completed with failures"
                            );
                        }
                    }
                }
            }
        })
    }
}
