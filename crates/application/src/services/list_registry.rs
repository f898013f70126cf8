use crate::ports::VerdictCache;
use sinkhole_dns_domain::ListKind;
use std::sync::Arc;

/// The three verdict caches the process keeps for its lifetime.
///
/// No merging happens here. Callers pick the cache matching the consumer's
/// trust tier; each cache synchronises itself.
pub struct ListRegistry {
    customlist: Arc<dyn VerdictCache>,
    ioclist: Arc<dyn VerdictCache>,
    all_indicators_with_custom_lists: Arc<dyn VerdictCache>,
}

impl ListRegistry {
    pub fn new(
        customlist: Arc<dyn VerdictCache>,
        ioclist: Arc<dyn VerdictCache>,
        all_indicators_with_custom_lists: Arc<dyn VerdictCache>,
    ) -> Self {
        Self {
            customlist,
            ioclist,
            all_indicators_with_custom_lists,
        }
    }

    pub fn customlist(&self) -> &Arc<dyn VerdictCache> {
        &self.customlist
    }

    pub fn ioclist(&self) -> &Arc<dyn VerdictCache> {
        &self.ioclist
    }

    /// Every indicator and every custom list regardless of per-customer settings.
    pub fn all_indicators_with_custom_lists(&self) -> &Arc<dyn VerdictCache> {
        &self.all_indicators_with_custom_lists
    }

    pub fn get(&self, kind: ListKind) -> &Arc<dyn VerdictCache> {
        match kind {
            ListKind::Custom => &self.customlist,
            ListKind::Ioc => &self.ioclist,
            ListKind::AllIndicators => &self.all_indicators_with_custom_lists,
        }
    }
}
