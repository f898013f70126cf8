use crate::services::ListRegistry;
use sinkhole_dns_domain::ListKind;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListStats {
    pub customlist: usize,
    pub ioclist: usize,
    pub all_indicators_with_custom_lists: usize,
}

impl ListStats {
    pub fn total(&self) -> usize {
        self.customlist + self.ioclist + self.all_indicators_with_custom_lists
    }
}

pub struct GetListStatsUseCase {
    registry: Arc<ListRegistry>,
}

impl GetListStatsUseCase {
    pub fn new(registry: Arc<ListRegistry>) -> Self {
        Self { registry }
    }

    pub fn execute(&self) -> ListStats {
        ListStats {
            customlist: self.registry.get(ListKind::Custom).len(),
            ioclist: self.registry.get(ListKind::Ioc).len(),
            all_indicators_with_custom_lists: self.registry.get(ListKind::AllIndicators).len(),
        }
    }
}
