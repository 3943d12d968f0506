//! Runtime configuration
//!
//! Optional `config.ron` next to the executable. Every field has a default,
//! so a missing file or a partial file both work.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::settings::DEFAULT_FPS_CAP;

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(ron::error::SpannedError),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "config parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

/// User-tunable startup settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Directory holding the four map layer files.
    pub map_dir: PathBuf,
    /// Directory holding `graphics/` and `audio/`.
    pub asset_dir: PathBuf,
    pub fullscreen: bool,
    pub fps_cap: u32,
    /// Music volume in 0.0..=1.0.
    pub music_volume: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map_dir: PathBuf::from("map"),
            asset_dir: PathBuf::from("assets"),
            fullscreen: false,
            fps_cap: DEFAULT_FPS_CAP,
            music_volume: 0.4,
        }
    }
}

impl GameConfig {
    /// Read the config file, or fall back to defaults if it does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Ok(ron::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let config = GameConfig::load(Path::new("/nonexistent/config.ron")).unwrap();
        assert_eq!(config.fps_cap, DEFAULT_FPS_CAP);
        assert_eq!(config.map_dir, PathBuf::from("map"));
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ron");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "(fps_cap: 144, music_volume: 0.1)").unwrap();

        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config.fps_cap, 144);
        assert_eq!(config.music_volume, 0.1);
        assert!(!config.fullscreen);
    }

    #[test]
    fn garbage_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ron");
        std::fs::write(&path, "not ron at all (").unwrap();

        assert!(matches!(GameConfig::load(&path), Err(ConfigError::Parse(_))));
    }
}
