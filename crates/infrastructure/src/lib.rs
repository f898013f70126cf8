pub mod dns;
pub mod lists;
