//! Configuration management module.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration load result.
#[derive(Debug)]
pub enum ConfigLoadResult {
    /// Config loaded successfully.
    Loaded(AppConfig),
    /// Config file missing (defaults apply).
    Missing,
    /// Config file exists but invalid.
    Invalid(ConfigError),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub report: ReportConfig,
    pub pdf: PdfConfig,
    pub export: ExportConfig,
}

/// Report header defaults. The CLI can override both per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub company_name: String,
    pub title: String,
}

/// Paginated document layout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfConfig {
    /// Text rows available per page for employee blocks (header and footer
    /// excluded). Blocks are packed whole; one block is 5 rows.
    #[serde(default = "default_rows_per_page")]
    pub rows_per_page: u32,
    /// Body font size in points.
    #[serde(default = "default_font_size")]
    pub font_size: f32,
}

fn default_rows_per_page() -> u32 {
    30
}

fn default_font_size() -> f32 {
    6.5
}

/// Output file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
}

impl AppConfig {
    /// Get config file path (same directory as executable).
    pub fn default_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Attempt to load config with detailed result.
    pub fn try_load(path: &Path) -> ConfigLoadResult {
        if !path.exists() {
            return ConfigLoadResult::Missing;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(config) => match config.validate() {
                    Ok(()) => ConfigLoadResult::Loaded(config),
                    Err(e) => ConfigLoadResult::Invalid(e),
                },
                Err(e) => ConfigLoadResult::Invalid(ConfigError::Parse(e)),
            },
            Err(e) => ConfigLoadResult::Invalid(ConfigError::Read(e)),
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.report.company_name.trim().is_empty() {
            return Err(ConfigError::Validation("Company name cannot be empty".to_string()));
        }
        if self.report.title.trim().is_empty() {
            return Err(ConfigError::Validation("Report title cannot be empty".to_string()));
        }
        // A block is 5 rows; anything smaller can fit no employee at all.
        if self.pdf.rows_per_page < 5 {
            return Err(ConfigError::Validation(
                "PDF rows per page must be at least 5".to_string(),
            ));
        }
        if self.pdf.rows_per_page > 60 {
            return Err(ConfigError::Validation(
                "PDF rows per page cannot exceed 60".to_string(),
            ));
        }
        if self.pdf.font_size < 4.0 || self.pdf.font_size > 12.0 {
            return Err(ConfigError::Validation(
                "PDF font size must be between 4 and 12 points".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            company_name: "Company".to_string(),
            title: "Monthly Attendance Report".to_string(),
        }
    }
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            rows_per_page: default_rows_per_page(),
            font_size: default_font_size(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
        }
    }
}
