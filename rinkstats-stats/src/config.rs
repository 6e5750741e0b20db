//! Dashboard configuration, loaded from `rinkstats.toml`.
//!
//! Every section is optional; missing keys take the defaults below.
//!
//! ```toml
//! [workbook]
//! path = "mailajoket_2014_2026_dataworkbook.xlsx"
//!
//! [team]
//! name = "Mailajoket"
//!
//! [points]
//! win = 2
//! draw = 1
//! loss = 0
//!
//! [display]
//! leaderboard_size = 10
//! form_window = 5
//! page_size = 20
//! csv_delimiter = ","
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_WORKBOOK: &str = "mailajoket_2014_2026_dataworkbook.xlsx";
pub const DEFAULT_TEAM: &str = "Mailajoket";
/// Looked up in the working directory when no config path is given.
pub const CONFIG_FILE: &str = "rinkstats.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkbookSection {
    pub path: PathBuf,
}

impl Default for WorkbookSection {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_WORKBOOK),
        }
    }
}

/// The club whose perspective the team views take. `None` disables them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamSection {
    pub name: Option<String>,
}

impl Default for TeamSection {
    fn default() -> Self {
        Self {
            name: Some(DEFAULT_TEAM.to_string()),
        }
    }
}

/// Standings points per result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointsScheme {
    pub win: u32,
    pub draw: u32,
    pub loss: u32,
}

impl Default for PointsScheme {
    fn default() -> Self {
        Self {
            win: 2,
            draw: 1,
            loss: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    pub leaderboard_size: usize,
    pub form_window: usize,
    pub page_size: usize,
    pub csv_delimiter: char,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            leaderboard_size: 10,
            form_window: 5,
            page_size: 20,
            csv_delimiter: ',',
        }
    }
}

impl DisplaySection {
    /// Delimiter as the single byte the CSV writer wants.
    pub fn delimiter_byte(&self) -> u8 {
        // validate() guarantees ASCII
        self.csv_delimiter as u8
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub workbook: WorkbookSection,
    pub team: TeamSection,
    pub points: PointsScheme,
    pub display: DisplaySection,
}

impl DashboardConfig {
    /// Load and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(&content)?;
        // Relative workbook paths are relative to the config file.
        if config.workbook.path.is_relative() {
            if let Some(dir) = path.parent() {
                config.workbook.path = dir.join(&config.workbook.path);
            }
        }
        Ok(config)
    }

    /// Parse and validate a config from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display.page_size == 0 {
            return Err(ConfigError::Invalid("display.page_size must be positive".into()));
        }
        if self.display.form_window == 0 {
            return Err(ConfigError::Invalid("display.form_window must be positive".into()));
        }
        let d = self.display.csv_delimiter;
        if !d.is_ascii() || d == '"' || d == '\n' || d == '\r' {
            return Err(ConfigError::Invalid(format!(
                "display.csv_delimiter must be a single ASCII character other than a quote or newline, got {d:?}"
            )));
        }
        if self.points.win < self.points.draw || self.points.draw < self.points.loss {
            return Err(ConfigError::Invalid(
                "points must satisfy win >= draw >= loss".into(),
            ));
        }
        if let Some(name) = &self.team.name {
            if name.trim().is_empty() {
                return Err(ConfigError::Invalid("team.name must not be blank".into()));
            }
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = DashboardConfig::from_toml("").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.team.name.as_deref(), Some("Mailajoket"));
        assert_eq!(config.points, PointsScheme { win: 2, draw: 1, loss: 0 });
        assert_eq!(config.display.leaderboard_size, 10);
        assert_eq!(config.display.form_window, 5);
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let config = DashboardConfig::from_toml(
            r#"
            [points]
            win = 3

            [display]
            csv_delimiter = ";"
            "#,
        )
        .unwrap();
        assert_eq!(config.points.win, 3);
        assert_eq!(config.points.draw, 1);
        assert_eq!(config.display.delimiter_byte(), b';');
        assert_eq!(config.display.page_size, 20);
    }

    #[test]
    fn rejects_zero_page_size() {
        let err = DashboardConfig::from_toml("[display]\npage_size = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_non_ascii_delimiter() {
        let err = DashboardConfig::from_toml("[display]\ncsv_delimiter = \"§\"").unwrap_err();
        assert!(err.to_string().contains("csv_delimiter"));
    }

    #[test]
    fn rejects_inverted_points() {
        assert!(DashboardConfig::from_toml("[points]\nwin = 0\ndraw = 1").is_err());
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = DashboardConfig::from_toml("[display\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn relative_workbook_path_resolves_next_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rinkstats.toml");
        std::fs::write(&path, "[workbook]\npath = \"data/club.xlsx\"\n").unwrap();
        let config = DashboardConfig::from_file(&path).unwrap();
        assert_eq!(config.workbook.path, dir.path().join("data/club.xlsx"));
    }
}
