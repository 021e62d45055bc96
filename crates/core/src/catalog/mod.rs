//! Product catalog access

pub mod ports;
