pub mod authority;
pub mod resolver;
pub mod server;
pub mod sinkhole;
pub mod transport;
pub mod verdict_cache;

pub use authority::{DisabledAuthority, HttpVerdictAuthority};
pub use resolver::{QueryContext, RacingResolver};
pub use server::DnsFrontend;
pub use sinkhole::{BlockSource, SinkholeDecision, SinkholePolicy};
pub use transport::{NetworkExchanger, UpstreamExchange};
pub use verdict_cache::{in_memory_registry, MemoryVerdictCache};
