mod candidates;
mod decision;
mod policy;

pub use candidates::{lookup_keys, normalize_candidate, record_value};
pub use decision::{BlockSource, SinkholeDecision};
pub use policy::SinkholePolicy;
