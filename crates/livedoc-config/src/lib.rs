//! Configuration management for livedoc.
//!
//! Parses `livedoc.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! `editor.base_url` supports `${VAR}` (errors if unset) and
//! `${VAR:-default}`.

mod expand;

use std::path::{Path, PathBuf};

use livedoc_editor::OutputFormat;
use livedoc_renderer::RenderOptions;
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliSettings {
    /// Override the initial output format.
    pub format: Option<OutputFormat>,
    /// Override the editor page address.
    pub base_url: Option<String>,
    /// Override LaTeX section numbering.
    pub number_sections: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "livedoc.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Editor page settings.
    pub editor: EditorConfig,
    /// Markdown rendering settings.
    pub render: RenderConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Editor page configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Format selected when the editor opens.
    pub default_format: OutputFormat,
    /// Page whose query string carries the editing state.
    pub base_url: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::Preview,
            base_url: "http://localhost/".to_owned(),
        }
    }
}

/// Markdown rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub number_sections: bool,
    /// Largest document body accepted for rendering.
    pub max_content_bytes: usize,
    pub tables: bool,
    pub strikethrough: bool,
    pub tasklists: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let options = RenderOptions::default();
        Self {
            number_sections: options.number_sections,
            max_content_bytes: options.max_content_bytes,
            tables: options.tables,
            strikethrough: options.strikethrough,
            tasklists: options.tasklists,
        }
    }
}

impl RenderConfig {
    /// Renderer options for this configuration.
    #[must_use]
    pub fn options(&self) -> RenderOptions {
        RenderOptions {
            number_sections: self.number_sections,
            max_content_bytes: self.max_content_bytes,
            tables: self.tables,
            strikethrough: self.strikethrough,
            tasklists: self.tasklists,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error, including unknown output formats.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`editor.base_url`").
        field: String,
        /// Error message (e.g., "${`LIVEDOC_HOST`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `livedoc.toml` in current directory and parents,
    /// falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails
    /// or the result does not validate.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(format) = settings.format {
            self.editor.default_format = format;
        }
        if let Some(base_url) = &settings.base_url {
            self.editor.base_url.clone_from(base_url);
        }
        if let Some(number_sections) = settings.number_sections {
            self.render.number_sections = number_sections;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.editor.base_url, "editor.base_url")?;
        require_http_url(&self.editor.base_url, "editor.base_url")?;

        if self.render.max_content_bytes == 0 {
            return Err(ConfigError::Validation(
                "render.max_content_bytes must be greater than 0".to_owned(),
            ));
        }

        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.editor.base_url = expand::expand_env(&self.editor.base_url, "editor.base_url")?;
        Ok(())
    }
}
