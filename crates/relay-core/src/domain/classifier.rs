//! Command/comment line classification.
//!
//! A line is a *command* when every one of its characters is bound in the
//! key mapping; otherwise it is a *comment* and is relayed verbatim.  The
//! classifier is a total function: any string input classifies one way or
//! the other, and nothing here can fail.

use crate::domain::keymap::KeyMapping;

/// Returns `true` iff every character of `line` is bound in `mapping`.
///
/// Characters are inspected as Unicode scalar values (`char`), not raw
/// bytes, so multi-byte input classifies correctly.
///
/// # Edge case: the empty line
///
/// An empty line is a command — the "every character" condition holds
/// vacuously over zero characters.  Encoding it produces zero frames, a
/// legal no-op.
pub fn is_command(line: &str, mapping: &KeyMapping) -> bool {
    line.chars().all(|c| mapping.contains(c))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::keymap::{KeyMapping, KeyOverrides};

    #[test]
    fn test_empty_line_is_a_command() {
        assert!(is_command("", &KeyMapping::default()));
    }

    #[test]
    fn test_all_default_gesture_characters_form_a_command() {
        assert!(is_command("hjkl ", &KeyMapping::default()));
    }

    #[test]
    fn test_single_gesture_character_is_a_command() {
        assert!(is_command("h", &KeyMapping::default()));
    }

    #[test]
    fn test_line_with_unmapped_character_is_a_comment() {
        // 'e' and 'o' are not bound under the defaults.
        assert!(!is_command("hello", &KeyMapping::default()));
    }

    #[test]
    fn test_free_text_is_a_comment() {
        assert!(!is_command("gg well played", &KeyMapping::default()));
    }

    #[test]
    fn test_multibyte_unmapped_character_is_a_comment() {
        assert!(!is_command("hjé", &KeyMapping::default()));
    }

    #[test]
    fn test_multibyte_mapped_character_is_a_command() {
        let mapping = KeyMapping::build(&KeyOverrides {
            up: Some("↑".to_string()),
            ..KeyOverrides::default()
        });
        assert!(is_command("↑↑", &mapping));
    }

    #[test]
    fn test_classification_follows_overridden_bindings() {
        let mapping = KeyMapping::build(&KeyOverrides {
            up: Some("w".to_string()),
            ..KeyOverrides::default()
        });
        // 'w' replaced 'k', so 'k' no longer classifies as a gesture.
        assert!(is_command("w", &mapping));
        assert!(!is_command("k", &mapping));
    }
}
