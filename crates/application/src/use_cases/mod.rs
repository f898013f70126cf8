pub mod lists;

pub use lists::{GetListStatsUseCase, ListStats, RefreshListsUseCase, RefreshReport};
