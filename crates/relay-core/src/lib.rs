//! # relay-core
//!
//! Shared library for Gesture-Relay containing the key-binding domain model,
//! the command/comment line classifier, and the binary event-frame codec.
//!
//! This crate is used by the relay client binary and by interoperability
//! tests.  It has zero dependencies on sockets, the OS, or any async runtime.
//!
//! # Architecture overview
//!
//! Gesture-Relay turns lines typed on standard input into a small binary
//! remote-control protocol.  A line made up entirely of recognized gesture
//! characters (by default the vi movement keys `h`, `j`, `k`, `l` plus space
//! for Block) is a *command*: each character becomes a press/release pair of
//! length-prefixed binary frames.  Any other line is a *comment* and is
//! forwarded verbatim as a single tagged text message.
//!
//! This crate defines:
//!
//! - **`domain`** – Pure business logic: the five logical [`Action`]s and
//!   their opcodes, the [`KeyMapping`] built once at startup from optional
//!   overrides, and the [`is_command`] classifier.
//!
//! - **`protocol`** – How bytes travel over the wire: the [`EventFrame`]
//!   codec (`[len][id..][state][opcode]`), the per-line command encoder,
//!   and the lower-fidelity digit-substitution fallback mode.

pub mod domain;
pub mod protocol;

pub use domain::action::Action;
pub use domain::classifier::is_command;
pub use domain::keymap::{KeyMapping, KeyOverrides};
pub use protocol::encoder::{
    comment_message, encode_command, substitute_command, EncodeError, EncodingMode,
};
pub use protocol::frame::{EventFrame, KeyState, ProtocolError};
