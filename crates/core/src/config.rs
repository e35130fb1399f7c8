//! Configuration management for Structura.
//!
//! Configuration is layered, later sources winning:
//! - Built-in defaults
//! - Config file (`.structura/config.yaml` or an explicit path)
//! - Environment variables
//! - Command-line flags

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{AppError, AppResult};

/// How an extraction archive is turned into documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractMode {
    /// Yield the structure description itself as a single document
    Json,
    /// Rebuild heading-scoped chunks from the element stream
    #[default]
    Chunks,
    /// Ignore the structure and yield every image and table entry
    Data,
}

impl ExtractMode {
    /// All recognized mode names.
    pub const NAMES: [&'static str; 3] = ["json", "chunks", "data"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Chunks => "chunks",
            Self::Data => "data",
        }
    }
}

impl FromStr for ExtractMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "chunks" => Ok(Self::Chunks),
            "data" => Ok(Self::Data),
            other => Err(AppError::InvalidConfiguration(format!(
                "Invalid mode: {}. Supported: {}",
                other,
                Self::NAMES.join(", ")
            ))),
        }
    }
}

impl fmt::Display for ExtractMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Output mode name, validated lazily so a bad value surfaces as
    /// `InvalidConfiguration` rather than a YAML error
    pub mode: String,

    /// Inline figure renditions as base64 instead of keeping caption text
    pub embed_figures: bool,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Emit logs as JSON lines
    pub log_json: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    extract: Option<ExtractSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ExtractSection {
    mode: Option<String>,
    #[serde(rename = "embedFigures")]
    embed_figures: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
    json: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_file: None,
            mode: ExtractMode::default().as_str().to_string(),
            embed_figures: true,
            log_level: None,
            verbose: false,
            no_color: false,
            log_json: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the config file and environment variables.
    ///
    /// Environment variables:
    /// - `STRUCTURA_CONFIG`: Path to config file
    /// - `STRUCTURA_MODE`: Output mode (`json`, `chunks`, `data`)
    /// - `STRUCTURA_EMBED_FIGURES`: `true`/`false`
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load() -> AppResult<Self> {
        let explicit = std::env::var("STRUCTURA_CONFIG").ok().map(PathBuf::from);
        Self::load_with(explicit.as_deref())
    }

    /// Like [`AppConfig::load`], with the config file chosen by the caller.
    pub fn load_with(config_file: Option<&Path>) -> AppResult<Self> {
        let mut config = Self::load_from(config_file)?;

        if let Ok(mode) = std::env::var("STRUCTURA_MODE") {
            config.mode = mode;
        }

        if let Ok(embed) = std::env::var("STRUCTURA_EMBED_FIGURES") {
            config.embed_figures = parse_bool("STRUCTURA_EMBED_FIGURES", &embed)?;
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var_os("NO_COLOR").is_some() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Load defaults merged with a config file, without consulting the
    /// environment. An explicit path must exist; the default path is
    /// optional.
    pub fn load_from(config_file: Option<&Path>) -> AppResult<Self> {
        let mut config = Self::default();

        let path = match config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(AppError::InvalidConfiguration(format!(
                        "Config file does not exist: {:?}",
                        path
                    )));
                }
                config.config_file = Some(path.to_path_buf());
                path.to_path_buf()
            }
            None => Self::default_config_path(),
        };

        if path.exists() {
            config = config.merge_yaml(&path)?;
        }

        Ok(config)
    }

    /// `.structura/config.yaml` under the current directory.
    pub fn default_config_path() -> PathBuf {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(".structura")
            .join("config.yaml")
    }

    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::InvalidConfiguration(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::InvalidConfiguration(format!(
                "Failed to parse config file {:?}: {}",
                path, e
            ))
        })?;

        let mut result = self.clone();

        if let Some(extract) = config_file.extract {
            if let Some(mode) = extract.mode {
                result.mode = mode;
            }
            if let Some(embed) = extract.embed_figures {
                result.embed_figures = embed;
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
            if let Some(json) = logging.json {
                result.log_json = json;
            }
        }

        tracing::debug!("Merged config file {:?}", path);
        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Flags take precedence over the file and the environment.
    pub fn with_overrides(
        mut self,
        mode: Option<String>,
        embed_figures: Option<bool>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
        log_json: bool,
    ) -> Self {
        if let Some(mode) = mode {
            self.mode = mode;
        }

        if let Some(embed) = embed_figures {
            self.embed_figures = embed;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        if log_json {
            self.log_json = true;
        }

        self
    }

    /// Parsed output mode.
    pub fn extract_mode(&self) -> AppResult<ExtractMode> {
        self.mode.parse()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> AppResult<()> {
        self.extract_mode().map(|_| ())
    }
}

/// Parse a boolean flag value from the environment.
pub fn parse_bool(name: &str, value: &str) -> AppResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AppError::InvalidConfiguration(format!(
            "{} must be a boolean, got '{}'",
            name, other
        ))),
    }
}
