//! Application configuration types.
//!
//! The top-level [`Config`] struct is deserialized from TOML and carries the
//! engine and settings-store sections. Every section defaults sensibly so a
//! completely empty file is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::Error;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
    pub settings: SettingsConfig,
}

impl Config {
    /// Deserialize a `Config` from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| Error::validation(format!("config parse error: {e}")))
    }

    /// Load configuration from a file path, falling back to defaults if the
    /// path is `None` or the file does not exist.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file {}: {e}", path.display());
                Self::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config file at {}; using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Failed to read config file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.engine.path.is_none() && self.engine.name.is_empty() {
            warnings.push("engine.name is empty and engine.path is not set".into());
        }

        if self.engine.quit_grace_ms == 0 {
            warnings.push("engine.quit_grace_ms is 0; the engine will be killed immediately".into());
        }

        if self.settings.dir.trim().is_empty() {
            warnings.push("settings.dir is empty; per-file settings will land in the working directory".into());
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Playback-engine section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Explicit path to the engine executable. Unset means look `name` up on
    /// `PATH`.
    pub path: Option<PathBuf>,
    /// Engine binary name used for the `PATH` lookup.
    pub name: String,
    /// Extra arguments appended to every engine invocation.
    pub args: Vec<String>,
    /// Grace period in milliseconds between a quit command and a kill.
    pub quit_grace_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            path: None,
            name: "mplayer".to_string(),
            args: Vec::new(),
            quit_grace_ms: 2000,
        }
    }
}

// ---------------------------------------------------------------------------
// Settings store
// ---------------------------------------------------------------------------

/// Key-derivation strategy for the per-file settings store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingsMethod {
    /// Key derived from the sanitized file path plus its byte size.
    Path,
    /// Key derived from a content hash, stable across renames and moves.
    Hash,
}

impl Default for SettingsMethod {
    fn default() -> Self {
        Self::Hash
    }
}

/// Per-file settings persistence section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    /// Directory holding the settings store; `~` is expanded.
    pub dir: String,
    /// Which key-derivation strategy to use.
    pub method: SettingsMethod,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            dir: "~/.playshell".to_string(),
            method: SettingsMethod::default(),
        }
    }
}

impl SettingsConfig {
    /// The settings directory with `~` expanded to the user's home.
    pub fn resolved_dir(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.dir).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_valid() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.engine.name, "mplayer");
        assert_eq!(config.engine.quit_grace_ms, 2000);
        assert_eq!(config.settings.method, SettingsMethod::Hash);
    }

    #[test]
    fn parse_full_config() {
        let config = Config::from_toml(
            r#"
            [engine]
            name = "mpv"
            args = ["-fs"]
            quit_grace_ms = 500

            [settings]
            dir = "/tmp/shell"
            method = "path"
            "#,
        )
        .unwrap();
        assert_eq!(config.engine.name, "mpv");
        assert_eq!(config.engine.args, vec!["-fs".to_string()]);
        assert_eq!(config.engine.quit_grace_ms, 500);
        assert_eq!(config.settings.method, SettingsMethod::Path);
        assert_eq!(config.settings.resolved_dir(), PathBuf::from("/tmp/shell"));
    }

    #[test]
    fn bad_toml_reports_validation_error() {
        let err = Config::from_toml("engine = 3").unwrap_err();
        assert!(err.to_string().contains("config parse error"));
    }

    #[test]
    fn load_or_default_without_path() {
        let config = Config::load_or_default(None);
        assert_eq!(config.engine.name, "mplayer");
    }

    #[test]
    fn validate_flags_empty_engine() {
        let mut config = Config::default();
        config.engine.name.clear();
        config.engine.quit_grace_ms = 0;
        let warnings = config.validate();
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn tilde_expansion() {
        let settings = SettingsConfig {
            dir: "~/media".to_string(),
            method: SettingsMethod::Hash,
        };
        let resolved = settings.resolved_dir();
        assert!(!resolved.to_string_lossy().starts_with('~'));
        assert!(resolved.to_string_lossy().ends_with("media"));
    }
}
