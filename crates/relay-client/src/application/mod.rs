//! Application layer: the line-processing relay session.

pub mod session;

pub use session::{
    run_relay, ChannelError, LineOutcome, RelaySession, SessionChannel, SessionError,
};
