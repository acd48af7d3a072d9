//! # relay-client
//!
//! The Gesture-Relay client binary's library crate.
//!
//! Layering follows the usual three rings:
//!
//! - **`domain`** – runtime configuration ([`domain::RelayConfig`]).
//! - **`application`** – the line-processing loop: classification, encoding,
//!   and ordered transmission over a [`application::SessionChannel`].
//! - **`infrastructure`** – the WebSocket implementation of the channel and
//!   the JSON key-binding config file loader.

pub mod application;
pub mod domain;
pub mod infrastructure;
