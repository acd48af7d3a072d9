//! Per-line encoding: command lines into ordered event frames (primary mode)
//! or digit-substituted text (fallback mode), and comment lines into tagged
//! text messages.
//!
//! The encoder assumes its caller already classified the line with
//! [`crate::domain::classifier::is_command`].  The two must always be used
//! together: a character that is absent from the mapping inside a line
//! presented as a command is a caller contract violation and surfaces as
//! [`EncodeError::UnmappedCharacter`] rather than a panic.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::domain::keymap::KeyMapping;
use crate::protocol::frame::{EventFrame, KeyState, ProtocolError};

/// Errors from command-line encoding.
#[derive(Debug, Error, PartialEq)]
pub enum EncodeError {
    /// A character in a supposed command line has no binding.  Indicates the
    /// classifier was bypassed or a different mapping was used for the two
    /// steps — an internal invariant violation, not a user input error.
    #[error("character {0:?} in command line is not bound in the key mapping")]
    UnmappedCharacter(char),

    /// Frame-level encoding failed (oversized session identifier).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

/// Which wire representation command lines are encoded to.
///
/// Fixed for the lifetime of a session; both modes share the identical
/// classification step and differ only in this encoding stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EncodingMode {
    /// The primary mode: one press frame and one release frame per gesture
    /// character, each a separate binary message.
    #[default]
    EventFrames,
    /// Lower-fidelity fallback for interoperability testing: the whole line
    /// is substituted character-by-character into action digits and sent as
    /// one text message.
    DigitSubstitution,
}

impl EncodingMode {
    /// The canonical CLI / config spelling of this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            EncodingMode::EventFrames => "event-frames",
            EncodingMode::DigitSubstitution => "digit-substitution",
        }
    }
}

impl fmt::Display for EncodingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EncodingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "event-frames" => Ok(EncodingMode::EventFrames),
            "digit-substitution" => Ok(EncodingMode::DigitSubstitution),
            other => Err(format!(
                "unknown encoding mode '{other}' (expected 'event-frames' or 'digit-substitution')"
            )),
        }
    }
}

/// Encodes a command line into its ordered sequence of event frames.
///
/// The line's characters are iterated in their original left-to-right order
/// with no pre-substitution; each character's opcode is looked up against
/// `mapping` at the point it is reached.  Every character produces a press
/// frame followed by a release frame, so a line of N characters yields
/// exactly 2N frames:
///
/// ```text
/// char₁-press, char₁-release, char₂-press, char₂-release, …
/// ```
///
/// An empty line yields an empty sequence (a legal no-op — see
/// [`crate::domain::classifier::is_command`]).
///
/// # Errors
///
/// - [`EncodeError::UnmappedCharacter`] when a character has no binding
///   (caller contract violation — see module docs).
/// - [`EncodeError::Protocol`] when the session identifier does not fit the
///   frame's one-byte length prefix.
pub fn encode_command(
    id: &str,
    line: &str,
    mapping: &KeyMapping,
) -> Result<Vec<Vec<u8>>, EncodeError> {
    let mut frames = Vec::with_capacity(line.chars().count() * 2);

    for c in line.chars() {
        let action = mapping
            .action_for(c)
            .ok_or(EncodeError::UnmappedCharacter(c))?;

        for state in [KeyState::Pressed, KeyState::Released] {
            let frame = EventFrame {
                session_id: id.to_string(),
                state,
                action,
            };
            frames.push(frame.encode()?);
        }
    }

    Ok(frames)
}

/// Encodes a command line in the digit-substitution fallback mode.
///
/// Each gesture character is replaced by its action's fixed ASCII digit and
/// the whole substituted line is packaged as one tagged text message,
/// `id + "\t" + substituted_line`.
///
/// # Errors
///
/// Returns [`EncodeError::UnmappedCharacter`] under the same contract as
/// [`encode_command`].
pub fn substitute_command(
    id: &str,
    line: &str,
    mapping: &KeyMapping,
) -> Result<String, EncodeError> {
    let mut substituted = String::with_capacity(line.len());
    for c in line.chars() {
        let action = mapping
            .action_for(c)
            .ok_or(EncodeError::UnmappedCharacter(c))?;
        substituted.push(action.digit());
    }
    Ok(comment_message(id, &substituted))
}

/// Builds the single tagged text message for a comment line:
/// `id + "\t" + line`, verbatim, with no character transformation.
pub fn comment_message(id: &str, line: &str) -> String {
    format!("{id}\t{line}")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
