use crate::ListKind;
use serde::{Deserialize, Serialize};

/// Where each verdict cache is loaded from. A source is a file path or an
/// `http(s)://` URL.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListsConfig {
    #[serde(default)]
    pub custom: Option<String>,

    #[serde(default)]
    pub ioc: Option<String>,

    #[serde(default)]
    pub all_indicators: Option<String>,

    /// Seconds between list refreshes. `0` loads once at startup only.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
}

impl ListsConfig {
    pub fn source_for(&self, kind: ListKind) -> Option<&str> {
        match kind {
            ListKind::Custom => self.custom.as_deref(),
            ListKind::Ioc => self.ioc.as_deref(),
            ListKind::AllIndicators => self.all_indicators.as_deref(),
        }
    }

    /// Configured `(kind, source)` pairs.
    pub fn sources(&self) -> Vec<(ListKind, String)> {
        ListKind::ALL
            .iter()
            .filter_map(|kind| self.source_for(*kind).map(|s| (*kind, s.to_string())))
            .collect()
    }
}

fn default_refresh_interval() -> u64 {
    300
}

impl Default for ListsConfig {
    fn default() -> Self {
        Self {
            custom: None,
            ioc: None,
            all_indicators: None,
            refresh_interval_secs: default_refresh_interval(),
        }
    }
}
