//! # Sinkhole DNS
//!
//! DNS proxy that races its upstream nameservers and answers listed
//! indicators of compromise with a sinkhole address.

mod bootstrap;
mod di;
mod server;

use clap::Parser;
use sinkhole_dns_domain::CliOverrides;
use sinkhole_dns_jobs::{JobRunner, ListRefreshJob};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "sinkhole-dns")]
#[command(version)]
#[command(about = "Racing DNS proxy with a threat-indicator sinkhole")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Upstream nameserver, repeatable (`8.8.8.8` or `10.0.0.1#5353`)
    #[arg(short = 'n', long = "nameserver")]
    nameservers: Vec<String>,

    /// Log level or filter directive
    #[arg(short = 'l', long)]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            bind_address: self.bind.clone(),
            dns_port: self.dns_port,
            nameservers: (!self.nameservers.is_empty()).then(|| self.nameservers.clone()),
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;
    bootstrap::init_logging(&config.logging)?;

    info!(
        config_file = cli.config.as_deref().unwrap_or("default"),
        dns_port = config.server.dns_port,
        bind = %config.server.bind_address,
        tier = ?config.sinkhole.tier,
        sinkhole = %config.sinkhole.address,
        "Configuration loaded"
    );

    let services = di::Services::new(&config)?;

    if services.refresh.has_sources() {
        let report = services.refresh.execute().await;
        if !report.is_clean() {
            warn!(failed = report.failed.len(), "Some verdict lists could not be loaded at startup");
        }
    }
    let stats = services.stats.execute();
    info!(
        customlist = stats.customlist,
        ioclist = stats.ioclist,
        all_indicators_with_custom_lists = stats.all_indicators_with_custom_lists,
        "Verdict lists ready"
    );

    let shutdown = CancellationToken::new();

    let mut runner = JobRunner::new();
    if services.refresh.has_sources() {
        runner = runner.with_list_refresh(
            ListRefreshJob::new(services.refresh.clone())
                .with_interval(config.lists.refresh_interval_secs)
                .with_cancellation(shutdown.clone()),
        );
    }
    let jobs = runner.start().await;

    let ctrl_c = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received");
                ctrl_c.cancel();
            }
            Err(e) => warn!(error = %e, "Failed to listen for shutdown signal"),
        }
    });

    let listen_addr = config.server.listen_addr()?;
    let served = server::start_dns_server(
        listen_addr,
        services.frontend,
        Duration::from_secs(config.server.tcp_idle_timeout_secs),
        shutdown.clone(),
    )
    .await;

    shutdown.cancel();
    for job in jobs {
        if let Err(e) = job.await {
            warn!(error = %e, "Background job ended abnormally");
        }
    }

    info!(entries = services.stats.execute().total(), "Shutdown complete");
    served
}
