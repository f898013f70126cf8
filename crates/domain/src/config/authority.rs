use serde::{Deserialize, Serialize};

/// Remote verdict authority consulted on cache misses.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthorityConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Base URL, e.g. `http://core.example:8080`.
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default)]
    pub access_token: String,

    /// Identity this resolver presents to the authority.
    #[serde(default)]
    pub server_identity: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    1500
}

impl Default for AuthorityConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: None,
            access_token: String::new(),
            server_identity: String::new(),
            timeout_ms: default_timeout_ms(),
        }
    }
}
