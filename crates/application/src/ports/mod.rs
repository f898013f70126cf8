pub mod list_source;
pub mod verdict_authority;
pub mod verdict_cache;

pub use list_source::ListSource;
pub use verdict_authority::VerdictAuthority;
pub use verdict_cache::VerdictCache;
