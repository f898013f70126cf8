mod disabled;
mod http;

pub use disabled::DisabledAuthority;
pub use http::HttpVerdictAuthority;
