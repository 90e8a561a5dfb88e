//! Runtime configuration.
//!
//! The configuration is a JSON file in the platform config directory
//! (`~/.config/glstart/config.json` on Linux). Every field is optional; a missing file means
//! the defaults are used.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::scenes::Stage;

/// Directory name used under the platform config directory.
pub const APP_DIR_NAME: &str = "glstart";
/// File name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Window and OpenGL context settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
    pub vsync: bool,
    /// Requested context version as `[major, minor]`.
    pub gl_version: [u8; 2],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Main Window".to_string(),
            width: 800,
            height: 600,
            resizable: true,
            vsync: true,
            gl_version: [3, 3],
        }
    }
}

/// Top level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    /// Stage shown on startup unless one is given on the command line.
    pub stage: Stage,
    /// Color the clear stage fills the window with.
    pub clear_color: [f32; 4],
    /// Time slept after every frame. Zero disables the sleep.
    pub frame_sleep_ms: u64,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            stage: Stage::Triangle,
            clear_color: [1.0, 0.0, 0.0, 1.0],
            frame_sleep_ms: 16,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parses and validates a configuration from JSON text.
    pub fn from_json_str(s: &str) -> Result<Self, String> {
        let config: Config = serde_json::from_str(s).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the configuration at `path`, falling back to the defaults if the file does not
    /// exist.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_json_str(&contents)
                .map_err(|e| format!("Invalid config file {}: {e}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(format!("Could not read config file {}: {e}", path.display())),
        }
    }

    /// Loads the configuration from [`Config::default_path`], or the defaults if there is no
    /// config directory on this platform.
    pub fn load() -> Result<Self, String> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Location of the configuration file.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Checks the values serde cannot check on its own.
    pub fn validate(&self) -> Result<(), String> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(format!(
                "Window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            ));
        }
        let [major, minor] = self.window.gl_version;
        if (major, minor) < (3, 3) {
            return Err(format!(
                "OpenGL {major}.{minor} is too old, at least 3.3 is required"
            ));
        }
        if let Some(channel) = self
            .clear_color
            .iter()
            .find(|c| !(0.0..=1.0).contains(*c))
        {
            return Err(format!("Clear color channel {channel} is outside [0, 1]"));
        }
        crate::logging::parse_level(&self.log_level)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = Config::from_json_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.window.title, "Main Window");
        assert_eq!((config.window.width, config.window.height), (800, 600));
        assert_eq!(config.window.gl_version, [3, 3]);
        assert_eq!(config.clear_color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(config.frame_sleep_ms, 16);
    }

    #[test]
    fn test_partial_config() {
        let input = r#"{
            "window": { "width": 1280, "vsync": false },
            "stage": "clear",
            "clear_color": [0.1, 0.2, 0.3, 1.0],
            "frame_sleep_ms": 0
        }"#;
        let config = Config::from_json_str(input).unwrap();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.window.height, 600);
        assert!(!config.window.vsync);
        assert_eq!(config.stage, Stage::Clear);
        assert_eq!(config.clear_color, [0.1, 0.2, 0.3, 1.0]);
        assert_eq!(config.frame_sleep_ms, 0);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(Config::from_json_str(r#"{ "window": { "height": 0 } }"#).is_err());
        assert!(Config::from_json_str(r#"{ "window": { "gl_version": [3, 2] } }"#).is_err());
        assert!(Config::from_json_str(r#"{ "window": { "gl_version": [4, 1] } }"#).is_ok());
        assert!(Config::from_json_str(r#"{ "clear_color": [1.5, 0.0, 0.0, 1.0] }"#).is_err());
        assert!(Config::from_json_str(r#"{ "stage": "square" }"#).is_err());
        assert!(Config::from_json_str(r#"{ "log_level": "loud" }"#).is_err());
        assert!(Config::from_json_str(r#"{ "log_level": "Debug" }"#).is_ok());
        assert!(Config::from_json_str("not json").is_err());
    }

    #[test]
    fn test_load_from_missing_file() {
        let path = std::env::temp_dir().join("glstart-test-missing/config.json");
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join(format!("glstart-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE_NAME);

        let mut config = Config::default();
        config.window.title = "Test".to_string();
        config.stage = Stage::Clear;
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);

        std::fs::write(&path, "{ \"window\": ").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(err.contains("Invalid config file"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
