pub mod get_stats;
pub mod refresh;

pub use get_stats::{GetListStatsUseCase, ListStats};
pub use refresh::{RefreshListsUseCase, RefreshReport};
