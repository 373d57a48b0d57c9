//! CLI error types.

use livedoc_config::ConfigError;
use livedoc_renderer::RenderError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid address: {0}")]
    Address(#[from] url::ParseError),

    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),
}
