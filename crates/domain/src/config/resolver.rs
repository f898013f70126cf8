use serde::{Deserialize, Serialize};
use std::net::Ipv6Addr;
use std::time::Duration;

/// Separator between host and port in a nameserver entry, as dnsmasq spells it.
const PORT_SEPARATOR: char = '#';

/// Upstream racing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Upstream nameservers in priority order, e.g. `"8.8.8.8"` or `"10.0.0.1#5353"`.
    #[serde(default = "default_nameservers")]
    pub nameservers: Vec<String>,

    /// Port appended to nameservers that do not carry one.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Per-exchange read/write timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Delay between launching successive upstream exchanges, in milliseconds.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl ResolverConfig {
    /// Nameservers normalised to `host:port`.
    ///
    /// `#` in an entry is treated as the port separator; entries without one get
    /// the default port. IPv6 literals are bracketed.
    pub fn nameservers(&self) -> Vec<String> {
        self.nameservers
            .iter()
            .map(|server| normalize_nameserver(server, self.port))
            .collect()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Turn a configured nameserver entry into a `host:port` string.
pub fn normalize_nameserver(server: &str, default_port: u16) -> String {
    let server = server.trim();
    let (host, port) = match server.find(PORT_SEPARATOR) {
        Some(i) if i > 0 => (&server[..i], server[i + 1..].to_string()),
        _ => (server, default_port.to_string()),
    };

    if host.parse::<Ipv6Addr>().is_ok() {
        format!("[{}]:{}", host, port)
    } else {
        format!("{}:{}", host, port)
    }
}

fn default_nameservers() -> Vec<String> {
    vec!["8.8.8.8".to_string(), "1.1.1.1".to_string()]
}

fn default_port() -> u16 {
    53
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_interval_ms() -> u64 {
    200
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            nameservers: default_nameservers(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            interval_ms: default_interval_ms(),
        }
    }
}
