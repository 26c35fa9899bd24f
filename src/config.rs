//! Configuration file handling.
//!
//! Loads configuration from `~/.config/glyph-mirror/config.toml` or a
//! custom path. All values are startup constants: nothing here is
//! reconfigurable at runtime (the mirror toggle is session state, not
//! config).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::presence::PresenceConfig;

/// Configuration file structure.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub presence: PresenceSection,
    #[serde(default)]
    pub mosaic: MosaicSection,
    #[serde(default)]
    pub camera: CameraSection,
}

/// Presence state machine thresholds and durations.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct PresenceSection {
    /// Accumulated presence (ms) needed to unlock color glyphs
    #[serde(default = "default_goal_ms")]
    pub goal_ms: u64,
    /// Motion score that counts as "present"
    #[serde(default = "default_motion_threshold")]
    pub motion_threshold: f64,
    /// Allowed still time (ms) before losing presence
    #[serde(default = "default_presence_hold_ms")]
    pub presence_hold_ms: u64,
    /// Blackout cooldown duration (ms)
    #[serde(default = "default_blackout_ms")]
    pub blackout_ms: u64,
}

/// Mosaic rendering options.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct MosaicSection {
    /// Glyph cell size in pixels
    #[serde(default = "default_cell_size")]
    pub cell_size: u32,
    /// Mirror horizontally (selfie mode)
    #[serde(default = "default_true")]
    pub mirror: bool,
}

/// Camera selection.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct CameraSection {
    /// Camera device index
    #[serde(default)]
    pub device: u32,
}

fn default_goal_ms() -> u64 {
    60_000
}

fn default_motion_threshold() -> f64 {
    1.0
}

fn default_presence_hold_ms() -> u64 {
    1_500
}

fn default_blackout_ms() -> u64 {
    2_000
}

fn default_cell_size() -> u32 {
    18
}

fn default_true() -> bool {
    true
}

impl Default for PresenceSection {
    fn default() -> Self {
        Self {
            goal_ms: default_goal_ms(),
            motion_threshold: default_motion_threshold(),
            presence_hold_ms: default_presence_hold_ms(),
            blackout_ms: default_blackout_ms(),
        }
    }
}

impl Default for MosaicSection {
    fn default() -> Self {
        Self {
            cell_size: default_cell_size(),
            mirror: default_true(),
        }
    }
}

impl Config {
    /// Load configuration from a file path.
    ///
    /// Returns default config if the file doesn't exist. Returns an error
    /// if the file exists but cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;
            let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.clone(),
                source: e,
            })?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Validate startup constants. Malformed configuration is a
    /// precondition violation: fail fast here instead of limping along.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.presence.goal_ms == 0 {
            return Err(ConfigError::Invalid("presence.goal_ms must be positive".into()));
        }
        if self.presence.presence_hold_ms == 0 {
            return Err(ConfigError::Invalid(
                "presence.presence_hold_ms must be positive".into(),
            ));
        }
        if self.presence.blackout_ms == 0 {
            return Err(ConfigError::Invalid(
                "presence.blackout_ms must be positive".into(),
            ));
        }
        if !self.presence.motion_threshold.is_finite() || self.presence.motion_threshold < 0.0 {
            return Err(ConfigError::Invalid(
                "presence.motion_threshold must be a non-negative number".into(),
            ));
        }
        if self.mosaic.cell_size == 0 {
            return Err(ConfigError::Invalid("mosaic.cell_size must be positive".into()));
        }
        Ok(())
    }

    /// The presence-machine slice of the config.
    pub fn presence_config(&self) -> PresenceConfig {
        PresenceConfig {
            goal_ms: self.presence.goal_ms,
            motion_threshold: self.presence.motion_threshold,
            presence_hold_ms: self.presence.presence_hold_ms,
            blackout_ms: self.presence.blackout_ms,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("glyph-mirror").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/glyph-mirror/config.toml")
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_installation_constants() {
        let config = Config::default();
        assert_eq!(config.presence.goal_ms, 60_000);
        assert_eq!(config.presence.motion_threshold, 1.0);
        assert_eq!(config.presence.presence_hold_ms, 1_500);
        assert_eq!(config.presence.blackout_ms, 2_000);
        assert_eq!(config.mosaic.cell_size, 18);
        assert!(config.mosaic.mirror);
        assert_eq!(config.camera.device, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = Config::load(Some(Path::new("/nonexistent/config.toml"))).unwrap();
        assert_eq!(config.presence.goal_ms, 60_000);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[presence]\ngoal_ms = 30000\n\n[mosaic]\nmirror = false").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.presence.goal_ms, 30_000);
        // Everything unspecified keeps its default
        assert_eq!(config.presence.presence_hold_ms, 1_500);
        assert!(!config.mosaic.mirror);
        assert_eq!(config.mosaic.cell_size, 18);
    }

    #[test]
    fn test_load_rejects_unknown_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[presence]\ngaol_ms = 30000").unwrap();

        let result = Config::load(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_validate_rejects_zero_durations() {
        let mut config = Config::default();
        config.presence.blackout_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.presence.goal_ms = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.presence.presence_hold_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_threshold_and_cell_size() {
        let mut config = Config::default();
        config.presence.motion_threshold = -0.5;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.presence.motion_threshold = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.mosaic.cell_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_presence_config_slice() {
        let config = Config::default();
        let pc = config.presence_config();
        assert_eq!(pc.goal_ms, 60_000);
        assert_eq!(pc.blackout_ms, 2_000);
    }
}
