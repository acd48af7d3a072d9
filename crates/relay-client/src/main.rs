//! Gesture-Relay client — entry point.
//!
//! Reads lines from standard input and relays them over a WebSocket
//! connection.  Lines made up entirely of recognized gesture characters
//! (`h`/`j`/`k`/`l`/space by default) become binary press/release event
//! frames; every other line is forwarded as a tagged text message.
//!
//! # Usage
//!
//! ```text
//! relay-client <URL> <ID> [OPTIONS]
//!
//! Arguments:
//!   <URL>   WebSocket URL of the relay server (ws:// or wss://)
//!   <ID>    Session identifier attached to every outgoing message
//!
//! Options:
//!   --config <PATH>  Key-binding override file [default: config.json]
//!   --mode <MODE>    Wire encoding: event-frames | digit-substitution
//!                    [default: event-frames]
//! ```
//!
//! # Environment variable overrides
//!
//! CLI args take precedence when both are present.
//!
//! | Variable       | Description                      |
//! |----------------|----------------------------------|
//! | `RELAY_URL`    | WebSocket server URL             |
//! | `RELAY_ID`     | Session identifier               |
//! | `RELAY_CONFIG` | Key-binding override file path   |
//! | `RELAY_MODE`   | Wire encoding mode               |
//!
//! Log verbosity is controlled by `RUST_LOG` (e.g. `RUST_LOG=debug`).

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use relay_client::application::{run_relay, RelaySession};
use relay_client::domain::RelayConfig;
use relay_client::infrastructure::{load_overrides, WsChannel};
use relay_core::{EncodingMode, KeyMapping};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Gesture-Relay client.
///
/// Relays gesture lines typed on stdin to a WebSocket server as binary
/// press/release event frames, and everything else as tagged chat messages.
#[derive(Debug, Parser)]
#[command(
    name = "relay-client",
    about = "Relay stdin gesture lines to a WebSocket server as binary event frames",
    version
)]
struct Cli {
    /// WebSocket URL of the relay server (ws:// or wss://).
    #[arg(env = "RELAY_URL")]
    url: String,

    /// Session identifier attached to every outgoing message.
    ///
    /// Opaque to the relay; the server uses it to tell input sources apart.
    #[arg(env = "RELAY_ID")]
    id: String,

    /// Path to the JSON key-binding override file.
    ///
    /// A missing file means "all default bindings" (k/j/h/l/space).
    #[arg(long, default_value = "config.json", env = "RELAY_CONFIG")]
    config: PathBuf,

    /// Wire encoding for command lines.
    ///
    /// `event-frames` sends a press/release frame pair per gesture
    /// character; `digit-substitution` is a lower-fidelity fallback that
    /// sends the whole line as one digit-substituted text message.
    #[arg(long, default_value_t = EncodingMode::EventFrames, env = "RELAY_MODE")]
    mode: EncodingMode,
}

impl Cli {
    /// Converts the parsed CLI arguments into a [`RelayConfig`].
    fn into_relay_config(self) -> RelayConfig {
        RelayConfig {
            url: self.url,
            session_id: self.id,
            config_path: self.config,
            mode: self.mode,
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Log level comes from RUST_LOG, with `info` as the fallback.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Cli::parse().into_relay_config();

    // The mapping is built exactly once, before the connection is dialed,
    // and is immutable for the rest of the run.
    let overrides = load_overrides(&config.config_path)
        .with_context(|| format!("loading key bindings from {}", config.config_path.display()))?;
    let mapping = KeyMapping::build(&overrides);

    // Operator-visible resolution, always in canonical action order.
    for (action, key) in mapping.bindings() {
        info!("{:<5} => {:?}", action.label(), key);
    }

    info!(
        url = %config.url,
        id = %config.session_id,
        mode = %config.mode,
        "connecting to relay server"
    );
    let channel = WsChannel::connect(&config.url).await?;

    let mut session = RelaySession::new(channel, config.session_id, mapping, config.mode);
    let result = run_relay(&mut session, BufReader::new(tokio::io::stdin())).await;

    // Close the connection however the loop ended; the session is over
    // either way and nothing is retried or replayed.
    session.into_channel().close().await;

    result.context("relay session ended with an error")?;
    info!("input closed; session finished");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_positional_url_and_id() {
        let cli = Cli::parse_from(["relay-client", "ws://127.0.0.1:9000", "42"]);
        assert_eq!(cli.url, "ws://127.0.0.1:9000");
        assert_eq!(cli.id, "42");
    }

    #[test]
    fn test_cli_default_config_path() {
        let cli = Cli::parse_from(["relay-client", "ws://host:1", "42"]);
        assert_eq!(cli.config, PathBuf::from("config.json"));
    }

    #[test]
    fn test_cli_default_mode_is_event_frames() {
        let cli = Cli::parse_from(["relay-client", "ws://host:1", "42"]);
        assert_eq!(cli.mode, EncodingMode::EventFrames);
    }

    #[test]
    fn test_cli_config_override() {
        let cli = Cli::parse_from([
            "relay-client",
            "ws://host:1",
            "42",
            "--config",
            "/etc/relay/keys.json",
        ]);
        assert_eq!(cli.config, PathBuf::from("/etc/relay/keys.json"));
    }

    #[test]
    fn test_cli_mode_override() {
        let cli = Cli::parse_from([
            "relay-client",
            "ws://host:1",
            "42",
            "--mode",
            "digit-substitution",
        ]);
        assert_eq!(cli.mode, EncodingMode::DigitSubstitution);
    }

    #[test]
    fn test_cli_rejects_unknown_mode() {
        let result = Cli::try_parse_from(["relay-client", "ws://host:1", "42", "--mode", "raw"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_requires_url_and_id() {
        // Only meaningful when the env fallbacks are unset.
        if std::env::var_os("RELAY_URL").is_none() && std::env::var_os("RELAY_ID").is_none() {
            assert!(Cli::try_parse_from(["relay-client"]).is_err());
            assert!(Cli::try_parse_from(["relay-client", "ws://host:1"]).is_err());
        }
    }

    #[test]
    fn test_into_relay_config_carries_all_fields() {
        let cli = Cli::parse_from([
            "relay-client",
            "ws://10.0.0.5:9000/session",
            "player-one",
            "--config",
            "keys.json",
            "--mode",
            "digit-substitution",
        ]);

        let config = cli.into_relay_config();

        assert_eq!(config.url, "ws://10.0.0.5:9000/session");
        assert_eq!(config.session_id, "player-one");
        assert_eq!(config.config_path, PathBuf::from("keys.json"));
        assert_eq!(config.mode, EncodingMode::DigitSubstitution);
    }
}
