mod context;
mod racing;

pub use context::QueryContext;
pub use racing::RacingResolver;
