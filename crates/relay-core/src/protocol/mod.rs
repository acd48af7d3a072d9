//! Wire protocol: the binary event-frame codec and the per-line command and
//! comment message builders.

pub mod encoder;
pub mod frame;

pub use encoder::{comment_message, encode_command, substitute_command, EncodeError, EncodingMode};
pub use frame::{EventFrame, KeyState, ProtocolError};
