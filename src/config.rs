use crate::error::{Result, SubkitError};
use crate::subtitle::SubtitleFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

/// Title written into the `[Script Info]` section of generated ASS files.
pub const DEFAULT_ASS_TITLE: &str = "Converted Subtitle";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_format: SubtitleFormat,
    /// Clamp merge/shift offsets to zero or more before they reach the engine.
    pub clamp_negative_offsets: bool,
    pub ass_title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_format: SubtitleFormat::default(),
            clamp_negative_offsets: true,
            ass_title: DEFAULT_ASS_TITLE.to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        // Load from config file if it exists
        if let Some(config_path) = Self::config_file_path() {
            if config_path.exists() {
                let contents = std::fs::read_to_string(&config_path)?;
                match toml::from_str::<Config>(&contents) {
                    Ok(file_config) => config = file_config,
                    Err(e) => warn!("Ignoring invalid config file {:?}: {}", config_path, e),
                }
            }
        }

        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(format) = std::env::var("SUBKIT_DEFAULT_FORMAT") {
            match format.parse() {
                Ok(f) => self.default_format = f,
                Err(e) => warn!("Ignoring SUBKIT_DEFAULT_FORMAT: {}", e),
            }
        }
        if let Ok(clamp) = std::env::var("SUBKIT_CLAMP_OFFSETS") {
            match parse_bool(&clamp) {
                Some(b) => self.clamp_negative_offsets = b,
                None => warn!("Ignoring SUBKIT_CLAMP_OFFSETS: expected true or false"),
            }
        }
        if let Ok(title) = std::env::var("SUBKIT_ASS_TITLE") {
            self.ass_title = title;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.ass_title.trim().is_empty() {
            return Err(SubkitError::Config(
                "ass_title must not be empty".to_string(),
            ));
        }

        if self.ass_title.contains(['\n', '\r']) {
            return Err(SubkitError::Config(
                "ass_title must be a single line".to_string(),
            ));
        }

        Ok(())
    }

    /// Applies the offset policy: negative offsets become zero when clamping is on.
    pub fn effective_offset(&self, offset_ms: i64) -> i64 {
        if self.clamp_negative_offsets {
            offset_ms.max(0)
        } else {
            offset_ms
        }
    }

    fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("subkit").join("config.toml"))
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default_format, SubtitleFormat::Srt);
        assert!(config.clamp_negative_offsets);
        assert_eq!(config.ass_title, "Converted Subtitle");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_toml() {
        let config: Config = toml::from_str(
            "default_format = \"ass\"\nclamp_negative_offsets = false\n",
        )
        .unwrap();
        assert_eq!(config.default_format, SubtitleFormat::Ass);
        assert!(!config.clamp_negative_offsets);
        // Missing keys fall back to defaults
        assert_eq!(config.ass_title, DEFAULT_ASS_TITLE);
    }

    #[test]
    fn test_validate_ass_title() {
        let mut config = Config::default();
        config.ass_title = "   ".to_string();
        assert!(config.validate().is_err());

        config.ass_title = "Line one\nLine two".to_string();
        assert!(config.validate().is_err());

        config.ass_title = "My Show".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_effective_offset() {
        let mut config = Config::default();
        assert_eq!(config.effective_offset(-1500), 0);
        assert_eq!(config.effective_offset(2000), 2000);

        config.clamp_negative_offsets = false;
        assert_eq!(config.effective_offset(-1500), -1500);
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
