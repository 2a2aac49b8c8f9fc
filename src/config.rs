/// Runtime configuration.
///
/// Read from a JSON file; every field is optional.  Frame pacing only decides
/// how often the loop ticks: movement stays distance-per-tick.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Overrides the config file location.
pub const CONFIG_ENV_VAR: &str = "BALLOON_SHOOTER_CONFIG";

/// Longest initial key-repeat delay a terminal without release events is
/// expected to show before the first repeat arrives.
pub const KEY_REPEAT_DELAY: Duration = Duration::from_millis(500);

const DATA_DIR_NAME: &str = ".balloon_shooter";
const CONFIG_FILE_NAME: &str = "config.json";
const LOG_FILE_NAME: &str = "balloon_shooter.log";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Target frame duration in milliseconds (16 ≈ 60 Hz).
    pub frame_millis: u64,
    /// Where the high score lives.  Defaults to `$HOME/.balloon_shooter`.
    pub data_dir: Option<PathBuf>,
    /// Log output.  Defaults to `<data_dir>/balloon_shooter.log`.
    pub log_file: Option<PathBuf>,
    /// Fixed RNG seed; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            frame_millis: 16,
            data_dir: None,
            log_file: None,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Parse a config file.  A missing file is not an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Config from `$BALLOON_SHOOTER_CONFIG`, else `<default data dir>/config.json`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| default_data_dir().join(CONFIG_FILE_NAME));
        Self::load(&path)
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(self.frame_millis.max(1))
    }

    /// Frames a key stays held after its last press or repeat.  Spans the
    /// initial repeat delay so a held key never drops out before repeats
    /// start; a single tap lingers for the same time.
    pub fn hold_window_frames(&self) -> u64 {
        let frame = self.frame_duration().as_millis();
        KEY_REPEAT_DELAY.as_millis().div_ceil(frame) as u64
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.data_dir().join(LOG_FILE_NAME))
    }
}

fn default_data_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(DATA_DIR_NAME)
}
