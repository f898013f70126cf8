//! Sinkhole DNS Domain Layer
pub mod action;
pub mod blacklist_record;
pub mod config;
pub mod errors;
pub mod network;

pub use action::{Action, ListKind};
pub use blacklist_record::{BlacklistedRecord, Listed};
pub use config::{CliOverrides, Config, ConfigError, SinkholeTier};
pub use errors::DomainError;
pub use network::Network;
