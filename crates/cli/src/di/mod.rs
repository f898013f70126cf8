use sinkhole_dns_application::ports::VerdictAuthority;
use sinkhole_dns_application::use_cases::{GetListStatsUseCase, RefreshListsUseCase};
use sinkhole_dns_domain::Config;
use sinkhole_dns_infrastructure::dns::{
    in_memory_registry, DisabledAuthority, DnsFrontend, HttpVerdictAuthority, NetworkExchanger,
    RacingResolver, SinkholePolicy,
};
use sinkhole_dns_infrastructure::lists::FileListSource;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Everything the binary needs, wired from one `Config`.
pub struct Services {
    pub frontend: DnsFrontend,
    pub refresh: Arc<RefreshListsUseCase>,
    pub stats: GetListStatsUseCase,
}

impl Services {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let registry = Arc::new(in_memory_registry());

        let authority: Arc<dyn VerdictAuthority> = if config.authority.enabled {
            info!(
                base_url = config.authority.base_url.as_deref().unwrap_or_default(),
                "Remote verdict authority enabled"
            );
            Arc::new(HttpVerdictAuthority::new(&config.authority)?)
        } else {
            info!("Remote verdict authority disabled");
            Arc::new(DisabledAuthority)
        };

        let policy = Arc::new(
            SinkholePolicy::new(Arc::clone(&registry), authority, &config.sinkhole)
                .with_authority_timeout(Duration::from_millis(config.authority.timeout_ms)),
        );

        let resolver = Arc::new(RacingResolver::new(
            &config.resolver,
            Arc::new(NetworkExchanger::new()),
            policy,
        ));

        let frontend = DnsFrontend::new(resolver);

        let refresh = Arc::new(RefreshListsUseCase::new(
            Arc::clone(&registry),
            Arc::new(FileListSource::new()?),
            config.lists.sources(),
        ));

        let stats = GetListStatsUseCase::new(Arc::clone(&registry));

        Ok(Self {
            frontend,
            refresh,
            stats,
        })
    }
}
