//! The five logical gesture actions and their fixed wire opcodes.
//!
//! Opcode values are an internal protocol convention: the remote end
//! interprets them, so they must never change between releases.
//!
//! | Action | Opcode | Default key | Substitution digit |
//! |--------|--------|-------------|--------------------|
//! | Down   | 0      | `j`         | `2`                |
//! | Left   | 1      | `h`         | `4`                |
//! | Right  | 2      | `l`         | `6`                |
//! | Up     | 3      | `k`         | `8`                |
//! | Block  | 4      | space       | `5`                |
//!
//! The substitution digits follow the numpad arrow layout, which is why they
//! do not line up with the opcodes.

/// One of the five logical remote-control actions.
///
/// The `#[repr(u8)]` discriminants *are* the wire opcodes, so
/// [`Action::opcode`] is a plain cast and [`Action::try_from`] is the
/// inverse used when decoding frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Action {
    Down = 0,
    Left = 1,
    Right = 2,
    Up = 3,
    Block = 4,
}

impl Action {
    /// Fixed order in which key bindings are resolved and reported.
    ///
    /// Binding resolution walks this array, so when two actions are
    /// configured to the same character the *later* action in this order
    /// wins the character (last-writer-wins).  The diagnostic view printed
    /// at startup iterates this array too, never the mapping's underlying
    /// storage, so output is deterministic.
    pub const RESOLUTION_ORDER: [Action; 5] = [
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
        Action::Block,
    ];

    /// The single-byte opcode transmitted in every event frame.
    pub fn opcode(self) -> u8 {
        self as u8
    }

    /// The built-in input character bound to this action when no override
    /// is configured.
    pub fn default_key(self) -> char {
        match self {
            Action::Up => 'k',
            Action::Down => 'j',
            Action::Left => 'h',
            Action::Right => 'l',
            Action::Block => ' ',
        }
    }

    /// The ASCII digit substituted for this action's character in
    /// digit-substitution mode (numpad arrow layout).
    pub fn digit(self) -> char {
        match self {
            Action::Up => '8',
            Action::Down => '2',
            Action::Left => '4',
            Action::Right => '6',
            Action::Block => '5',
        }
    }

    /// Human-readable name for startup diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            Action::Up => "Up",
            Action::Down => "Down",
            Action::Left => "Left",
            Action::Right => "Right",
            Action::Block => "Block",
        }
    }
}

impl TryFrom<u8> for Action {
    type Error = u8;

    /// Decodes a wire opcode back into an [`Action`].
    ///
    /// Returns the unrecognized byte as the error so callers can report it.
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Action::Down),
            1 => Ok(Action::Left),
            2 => Ok(Action::Right),
            3 => Ok(Action::Up),
            4 => Ok(Action::Block),
            other => Err(other),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
