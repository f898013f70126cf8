mod frontend;

pub use frontend::DnsFrontend;
