//! Domain types for the relay client.

pub mod config;

pub use config::RelayConfig;
