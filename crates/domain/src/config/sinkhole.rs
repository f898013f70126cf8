use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

/// Which verdict caches a resolver instance consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkholeTier {
    /// Custom list first, then the IoC list.
    #[default]
    Personalized,
    /// The combined list holding every indicator and every custom list.
    Shared,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SinkholeConfig {
    /// Address substituted for blocked resolutions.
    #[serde(default = "default_address")]
    pub address: IpAddr,

    /// TTL of the synthesised sinkhole record, in seconds.
    #[serde(default = "default_ttl")]
    pub ttl: u32,

    #[serde(default)]
    pub tier: SinkholeTier,
}

fn default_address() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

fn default_ttl() -> u32 {
    5
}

impl Default for SinkholeConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            ttl: default_ttl(),
            tier: SinkholeTier::default(),
        }
    }
}
