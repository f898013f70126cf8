use crate::ListRefreshJob;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

/// Central orchestrator for all background jobs.
///
/// Use the builder pattern to register jobs, then call `.start()` once.
///
/// # Example
///
/// ```rust,ignore
/// JobRunner::new()
///     .with_list_refresh(ListRefreshJob::new(refresh).with_interval(300))
///     .start()
///     .await;
/// ```
pub struct JobRunner {
    list_refresh: Option<ListRefreshJob>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self { list_refresh: None }
    }

    pub fn with_list_refresh(mut self, job: ListRefreshJob) -> Self {
        self.list_refresh = Some(job);
        self
    }

    /// Start all registered background jobs and return their task handles.
    pub async fn start(self) -> Vec<JoinHandle<()>> {
        info!("Starting background job runner");
        let mut handles = Vec::new();

        if let Some(job) = self.list_refresh {
            handles.push(Arc::new(job).start().await);
        }

        info!(jobs = handles.len(), "All background jobs started");
        handles
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}
