//! Sinkhole DNS Application Layer
//!
//! Ports implemented by the infrastructure layer and the use cases that drive them.
pub mod ports;
pub mod services;
pub mod use_cases;
