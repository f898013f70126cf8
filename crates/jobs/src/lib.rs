pub mod list_refresh;
pub mod runner;

pub use list_refresh::ListRefreshJob;
pub use runner::JobRunner;
