use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::ui::grid::GridConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    pub theme: String,
    /// Terminal rows drawn per grid hour.
    pub rows_per_hour: u16,
    pub date_format: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: "default".to_string(),
            rows_per_hour: 2,
            date_format: "%A, %B %d, %Y".to_string(),
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    pub fn load_or_create() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            tracing::info!("Wrote default config to {}", config_path.display());
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("daybook")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                base_url: "http://localhost:8000".to_string(),
            },
            grid: GridConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::grid::OutOfRangePolicy;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_points_at_local_backend() {
        let config = Config::default();
        assert_eq!(config.server.base_url, "http://localhost:8000");
    }

    #[test]
    fn default_grid_starts_at_six_with_64px_hours() {
        let config = Config::default();
        assert_eq!(config.grid.first_hour, 6);
        assert_eq!(config.grid.hour_rows, 16);
        assert_eq!(config.grid.pixels_per_hour, 64.0);
        assert_eq!(config.grid.out_of_range, OutOfRangePolicy::Clamp);
    }

    #[test]
    fn parse_valid_toml_config() {
        let toml_content = r#"
            [server]
            base_url = "https://scheduling.example.com"

            [grid]
            first_hour = 7
            hour_rows = 12
            pixels_per_hour = 48.0
            top_offset = -26.0
            height_offset = 0.0
            out_of_range = "reject"

            [ui]
            theme = "nord"
            rows_per_hour = 4
            date_format = "%d/%m/%Y"
        "#;

        let config = Config::from_toml(toml_content).unwrap();

        assert_eq!(config.server.base_url, "https://scheduling.example.com");
        assert_eq!(config.grid.first_hour, 7);
        assert_eq!(config.grid.top_offset, -26.0);
        assert_eq!(config.grid.out_of_range, OutOfRangePolicy::Reject);
        assert_eq!(config.ui.theme, "nord");
        assert_eq!(config.ui.rows_per_hour, 4);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config = Config::from_toml("[server]\nbase_url = \"http://backend\"\n").unwrap();

        assert_eq!(config.grid, GridConfig::default());
        assert_eq!(config.ui, UiConfig::default());
    }

    #[test]
    fn parse_invalid_toml_returns_error() {
        let result = Config::from_toml("this is not valid toml");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.ui.theme = "gruvbox".to_string();
        config.grid.top_offset = -26.0;

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn loading_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();

        let result = Config::load_from(&dir.path().join("absent.toml"));

        assert!(matches!(result, Err(ConfigError::ReadError(_))));
    }
}
