//! Relay client runtime configuration.
//!
//! [`RelayConfig`] is the single source of truth for all runtime settings.
//! It is constructed once at startup from CLI arguments (with environment
//! variable overrides) and passed explicitly into the session — nothing in
//! the relay reads global state after startup.

use std::path::PathBuf;

use relay_core::EncodingMode;

/// All runtime configuration for one relay session.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// WebSocket URL of the already-running relay server, e.g.
    /// `ws://127.0.0.1:9000/session`.
    pub url: String,

    /// Opaque session identifier attached to every outgoing message.  The
    /// server uses it to tell input sources apart; the relay never
    /// interprets it.
    pub session_id: String,

    /// Path to the optional JSON key-binding override file.  A missing file
    /// means "all default bindings".
    pub config_path: PathBuf,

    /// Which wire representation command lines are encoded to.  Fixed for
    /// the lifetime of the session.
    pub mode: EncodingMode,
}

impl Default for RelayConfig {
    /// Returns a `RelayConfig` suitable for local development and tests.
    fn default() -> Self {
        Self {
            url: "ws://127.0.0.1:9000".to_string(),
            session_id: "relay".to_string(),
            config_path: PathBuf::from("config.json"),
            mode: EncodingMode::EventFrames,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode_is_event_frames() {
        let cfg = RelayConfig::default();
        assert_eq!(cfg.mode, EncodingMode::EventFrames);
    }

    #[test]
    fn test_default_config_path_is_config_json() {
        let cfg = RelayConfig::default();
        assert_eq!(cfg.config_path, PathBuf::from("config.json"));
    }

    #[test]
    fn test_config_can_be_cloned() {
        let cfg = RelayConfig::default();
        let cloned = cfg.clone();
        assert_eq!(cfg.url, cloned.url);
        assert_eq!(cfg.session_id, cloned.session_id);
    }
}
