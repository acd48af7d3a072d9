//! Infrastructure: the WebSocket session channel and the JSON key-binding
//! config file loader.

pub mod config_file;
pub mod ws_channel;

pub use config_file::{load_overrides, ConfigError};
pub use ws_channel::WsChannel;
