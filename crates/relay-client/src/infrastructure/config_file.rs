//! JSON key-binding configuration loading.
//!
//! The relay reads an optional `config.json` next to wherever it is run
//! (path overridable with `--config`) holding up to five string fields:
//!
//! ```json
//! { "up": "w", "down": "s", "left": "a", "right": "d", "block": "x" }
//! ```
//!
//! A missing file is not an error — it simply means "all default bindings".
//! An unreadable or malformed file *is* an error: silently falling back to
//! defaults there would hand the user a mapping they did not ask for.

use std::path::{Path, PathBuf};

use thiserror::Error;

use relay_core::KeyOverrides;

/// Error type for config file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error other than "not found".
    #[error("I/O error reading config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The JSON content could not be parsed.
    #[error("failed to parse config JSON at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Loads [`KeyOverrides`] from `path`, returning all-defaults when the file
/// does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not
/// found", and [`ConfigError::Parse`] if the JSON is malformed.
pub fn load_overrides(path: &Path) -> Result<KeyOverrides, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(KeyOverrides::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
