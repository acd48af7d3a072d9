//! Pure domain logic: logical actions, key-binding resolution, and the
//! command/comment line classifier.  No I/O and no wire-format knowledge.

pub mod action;
pub mod classifier;
pub mod keymap;

pub use action::Action;
pub use classifier::is_command;
pub use keymap::{KeyMapping, KeyOverrides};
