//! Configuration module for Sinkhole DNS
//!
//! This module contains all configuration structures organized by domain:
//! - `root`: Main configuration and CLI overrides
//! - `server`: Front-end listener binding
//! - `resolver`: Upstream nameservers, timeout and launch interval
//! - `sinkhole`: Sinkhole target address and trust tier
//! - `authority`: Remote verdict authority endpoint and credentials
//! - `lists`: Verdict list sources and refresh cadence
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod authority;
pub mod errors;
pub mod lists;
pub mod logging;
pub mod resolver;
pub mod root;
pub mod server;
pub mod sinkhole;

pub use authority::AuthorityConfig;
pub use errors::ConfigError;
pub use lists::ListsConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use resolver::ResolverConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use sinkhole::{SinkholeConfig, SinkholeTier};
