//! Binary codec for a single press/release event frame.
//!
//! Wire format:
//! ```text
//! [length:1][session id:N][key state:1][opcode:1]
//! ```
//! where `length = N + 2`, i.e. the length byte counts every byte that
//! follows it.  All fields are single bytes except the session identifier,
//! which is the identifier's UTF-8 bytes with no terminator.
//!
//! Frames are never fragmented: each one is written as a single binary
//! message on the session channel, so decoding only ever sees whole frames
//! (the decoder still validates lengths defensively, mainly for tests and
//! interoperability checks against other protocol implementations).

use thiserror::Error;

use crate::domain::action::Action;

/// Whether the frame reports the gesture key going down or up.
///
/// The discriminants are the wire bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum KeyState {
    Released = 0,
    Pressed = 1,
}

impl TryFrom<u8> for KeyState {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(KeyState::Released),
            1 => Ok(KeyState::Pressed),
            other => Err(other),
        }
    }
}

/// Errors that can occur while encoding or decoding an event frame.
#[derive(Debug, Error, PartialEq)]
pub enum ProtocolError {
    /// The session identifier is too long for the one-byte length prefix.
    #[error("session id of {len} bytes exceeds the {max} bytes the length prefix can represent")]
    SessionIdTooLong { len: usize, max: usize },

    /// The byte slice is shorter than the minimum required length.
    #[error("insufficient data: need at least {needed} bytes, got {available}")]
    InsufficientData { needed: usize, available: usize },

    /// The length byte is too small to cover the key-state and opcode bytes.
    #[error("length byte {0} is too small for the key-state and opcode bytes")]
    LengthTooSmall(u8),

    /// The key-state byte is neither 0 (released) nor 1 (pressed).
    #[error("unknown key state: 0x{0:02X}")]
    UnknownKeyState(u8),

    /// The opcode byte does not name one of the five actions.
    #[error("unknown opcode: 0x{0:02X}")]
    UnknownOpcode(u8),

    /// The session identifier bytes are not valid UTF-8.
    #[error("session id is not valid UTF-8: {0}")]
    InvalidSessionId(String),
}

/// Maximum session-id byte length representable in the length prefix.
///
/// The length byte holds `id.len() + 2`, so the id itself may be at most
/// `u8::MAX - 2` bytes.
pub const MAX_SESSION_ID_LEN: usize = u8::MAX as usize - 2;

/// One press or release event addressed to a session identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFrame {
    /// Opaque tag identifying which input source the event came from.
    pub session_id: String,
    /// Press or release.
    pub state: KeyState,
    /// The logical action the gesture character mapped to.
    pub action: Action,
}

impl EventFrame {
    /// Encodes the frame as `[len][id..][state][opcode]`.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::SessionIdTooLong`] when the identifier does
    /// not fit the one-byte length prefix.  This is a startup-detectable
    /// misconfiguration; refusing here beats emitting a wrapped, nonsense
    /// length byte.
    pub fn encode(&self) -> Result<Vec<u8>, ProtocolError> {
        let id = self.session_id.as_bytes();
        if id.len() > MAX_SESSION_ID_LEN {
            return Err(ProtocolError::SessionIdTooLong {
                len: id.len(),
                max: MAX_SESSION_ID_LEN,
            });
        }

        let mut buf = Vec::with_capacity(1 + id.len() + 2);
        buf.push((id.len() + 2) as u8);
        buf.extend_from_slice(id);
        buf.push(self.state as u8);
        buf.push(self.action.opcode());
        Ok(buf)
    }

    /// Decodes one frame from the beginning of `bytes`.
    ///
    /// Returns the frame and the total number of bytes consumed so a caller
    /// reading from a concatenated buffer can advance its cursor.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError`] if the bytes are truncated or any field is
    /// out of range.
    pub fn decode(bytes: &[u8]) -> Result<(Self, usize), ProtocolError> {
        let Some(&length) = bytes.first() else {
            return Err(ProtocolError::InsufficientData {
                needed: 1,
                available: 0,
            });
        };
        if length < 2 {
            return Err(ProtocolError::LengthTooSmall(length));
        }

        let total = 1 + length as usize;
        if bytes.len() < total {
            return Err(ProtocolError::InsufficientData {
                needed: total,
                available: bytes.len(),
            });
        }

        let id_len = length as usize - 2;
        let session_id = std::str::from_utf8(&bytes[1..1 + id_len])
            .map_err(|e| ProtocolError::InvalidSessionId(e.to_string()))?
            .to_string();
        let state_byte = bytes[1 + id_len];
        let opcode_byte = bytes[2 + id_len];

        let state =
            KeyState::try_from(state_byte).map_err(ProtocolError::UnknownKeyState)?;
        let action = Action::try_from(opcode_byte).map_err(ProtocolError::UnknownOpcode)?;

        Ok((
            Self {
                session_id,
                state,
                action,
            },
            total,
        ))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
