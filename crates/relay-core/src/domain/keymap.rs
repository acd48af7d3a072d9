//! Key-binding resolution: turning optional per-action overrides into the
//! immutable character→action mapping used for the lifetime of a session.
//!
//! The mapping is built exactly once at startup and never mutated.  All
//! lookup during line processing goes through [`KeyMapping`], so there is no
//! global state and no hidden configuration read.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::debug;

use crate::domain::action::Action;

/// Optional per-action key overrides, deserialized from `config.json`.
///
/// Each field, when present *and non-empty*, overrides the built-in default
/// character for that action; only the first character of the string is
/// used.  An empty string counts as absent.  Unknown JSON fields are
/// ignored, so older and newer config files both load.
///
/// ```json
/// { "up": "w", "down": "s", "left": "a", "right": "d" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct KeyOverrides {
    #[serde(default)]
    pub up: Option<String>,
    #[serde(default)]
    pub down: Option<String>,
    #[serde(default)]
    pub left: Option<String>,
    #[serde(default)]
    pub right: Option<String>,
    #[serde(default)]
    pub block: Option<String>,
}

impl KeyOverrides {
    /// Returns the configured override string for `action`, if any.
    fn for_action(&self, action: Action) -> Option<&str> {
        match action {
            Action::Up => self.up.as_deref(),
            Action::Down => self.down.as_deref(),
            Action::Left => self.left.as_deref(),
            Action::Right => self.right.as_deref(),
            Action::Block => self.block.as_deref(),
        }
    }
}

/// Immutable mapping from input character to logical action.
///
/// Built once via [`KeyMapping::build`] and shared read-only thereafter.
///
/// # Collision policy
///
/// No uniqueness validation is performed on the configured characters.  When
/// two actions resolve to the same character, the action that is *later* in
/// [`Action::RESOLUTION_ORDER`] silently overwrites the earlier one, so the
/// mapping may hold fewer than five entries.  This is reproducible, and the
/// [`KeyMapping::bindings`] diagnostic view still reports all five actions
/// so a collision is visible to the operator.
#[derive(Debug, Clone)]
pub struct KeyMapping {
    /// Character → action lookup used on the hot path.
    map: HashMap<char, Action>,
    /// What each action resolved to, in resolution order, collisions and all.
    /// Transmission only ever consults `map`; this exists for diagnostics.
    resolved: [(Action, char); 5],
}

impl KeyMapping {
    /// Resolves `overrides` into a mapping, walking actions in
    /// [`Action::RESOLUTION_ORDER`].
    ///
    /// For each action the bound character is the first character of its
    /// configured override when that override is non-empty, otherwise the
    /// action's built-in default.
    pub fn build(overrides: &KeyOverrides) -> Self {
        let mut map = HashMap::with_capacity(Action::RESOLUTION_ORDER.len());
        let mut resolved = [(Action::Up, ' '); 5];

        for (slot, action) in Action::RESOLUTION_ORDER.into_iter().enumerate() {
            let key = resolve_key(overrides.for_action(action), action.default_key());
            resolved[slot] = (action, key);
            map.insert(key, action);
        }

        debug!(entries = map.len(), "key mapping built");
        Self { map, resolved }
    }

    /// Looks up the action bound to `key`, if any.
    pub fn action_for(&self, key: char) -> Option<Action> {
        self.map.get(&key).copied()
    }

    /// Returns `true` when `key` is bound to some action.
    pub fn contains(&self, key: char) -> bool {
        self.map.contains_key(&key)
    }

    /// Number of distinct bound characters (five unless collisions reduced it).
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` when no characters are bound.  Cannot happen for a
    /// mapping produced by [`KeyMapping::build`]; provided for completeness.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Diagnostic view of the resolution, one entry per action in
    /// [`Action::RESOLUTION_ORDER`].
    ///
    /// Iterates the stored resolution result rather than the map's storage,
    /// so the output order is deterministic and collided actions still show
    /// the character they asked for.
    pub fn bindings(&self) -> [(Action, char); 5] {
        self.resolved
    }
}

impl Default for KeyMapping {
    /// The all-defaults mapping (`k`/`j`/`h`/`l`/space).
    fn default() -> Self {
        Self::build(&KeyOverrides::default())
    }
}

/// Picks the bound character: first character of a non-empty override,
/// otherwise the default.
fn resolve_key(configured: Option<&str>, default_key: char) -> char {
    match configured {
        Some(s) => s.chars().next().unwrap_or(default_key),
        None => default_key,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
