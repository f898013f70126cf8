use serde::{Deserialize, Serialize};
use std::path::Path;

use super::authority::AuthorityConfig;
use super::errors::ConfigError;
use super::lists::ListsConfig;
use super::logging::LoggingConfig;
use super::resolver::ResolverConfig;
use super::server::ServerConfig;
use super::sinkhole::SinkholeConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub sinkhole: SinkholeConfig,

    #[serde(default)]
    pub authority: AuthorityConfig,

    #[serde(default)]
    pub lists: ListsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub bind_address: Option<String>,
    pub dns_port: Option<u16>,
    pub nameservers: Option<Vec<String>>,
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration from `path` (or defaults when `None`) and apply CLI overrides.
    pub fn load(path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(nameservers) = overrides.nameservers {
            self.resolver.nameservers = nameservers;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Err(e) = self.server.listen_addr() {
            return Err(ConfigError::Validation(format!(
                "server.bind_address '{}' is not an IP address: {}",
                self.server.bind_address, e
            )));
        }
        if self.resolver.nameservers.is_empty() {
            return Err(ConfigError::Validation(
                "resolver.nameservers must contain at least one server".into(),
            ));
        }
        if self.resolver.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "resolver.timeout_secs must be greater than 0".into(),
            ));
        }
        if self.resolver.interval_ms == 0 {
            return Err(ConfigError::Validation(
                "resolver.interval_ms must be greater than 0".into(),
            ));
        }
        if self.authority.enabled
            && self
                .authority
                .base_url
                .as_deref()
                .map_or(true, |url| url.trim().is_empty())
        {
            return Err(ConfigError::Validation(
                "authority.base_url is required when the authority is enabled".into(),
            ));
        }
        Ok(())
    }
}
