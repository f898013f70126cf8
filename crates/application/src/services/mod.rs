pub mod list_registry;

pub use list_registry::ListRegistry;
