#![allow(dead_code)]

pub mod mock_repositories;

pub use mock_repositories::{MockListSource, MockVerdictCache};
