//! `livedoc link` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use livedoc_config::Config;

use super::{GlobalArgs, SettingsArgs};
use crate::error::CliError;
use crate::output::Output;
use crate::terminal::editor_at;

/// Arguments for the link command.
#[derive(Args)]
pub(crate) struct LinkArgs {
    /// Markdown file to share.
    file: PathBuf,

    /// Document title.
    #[arg(short, long)]
    title: Option<String>,

    /// Document author.
    #[arg(short, long)]
    author: Option<String>,

    #[command(flatten)]
    pub(crate) settings: SettingsArgs,
}

impl LinkArgs {
    /// Execute the link command.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or rendering fails.
    pub(crate) fn execute(self, global: &GlobalArgs<'_>) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = self.settings.cli_settings();
        let config = Config::load(global.config, Some(&cli_settings))?;

        let url = share_url(
            &config,
            &self.file,
            self.title.as_deref(),
            self.author.as_deref(),
        )?;

        output.success(&format!("Link for {}:", self.file.display()));
        output.print(&url);
        Ok(())
    }
}

/// Render `file` once and return the editor address that reproduces it.
pub(crate) fn share_url(
    config: &Config,
    file: &Path,
    title: Option<&str>,
    author: Option<&str>,
) -> Result<String, CliError> {
    let content = std::fs::read_to_string(file)?;

    let mut editor = editor_at(config, &config.editor.base_url)?;
    let fields = editor.fields_mut();
    fields.apply_overrides(title, author);
    fields.content = content;

    editor.run_update_cycle()?;
    Ok(editor.location().href())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write_doc(dir: &tempfile::TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("doc.md");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_share_url() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_doc(&dir, "# Notes\n\n50% done\n");
        let config = Config::default();

        let url = share_url(&config, &file, Some("Weekly"), Some("Ada")).unwrap();

        assert_eq!(
            url,
            "http://localhost/?title=Weekly&author=Ada&content=%23%20Notes%0A%0A50%25%20done"
        );
    }

    #[test]
    fn test_share_url_keeps_base_title() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_doc(&dir, "body");
        let mut config = Config::default();
        config.editor.base_url = "https://x.org/editor/?title=Old".to_owned();

        let url = share_url(&config, &file, None, None).unwrap();

        assert_eq!(url, "https://x.org/editor/?title=Old&content=body");
    }

    #[test]
    fn test_share_url_with_cli_settings() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_doc(&dir, "body");
        let config_path = dir.path().join("livedoc.toml");
        std::fs::write(&config_path, "").unwrap();
        let settings = SettingsArgs {
            format: None,
            base_url: Some("https://x.org/ed/".to_owned()),
            number_sections: true,
            no_number_sections: false,
        };
        let config = Config::load(Some(&config_path), Some(&settings.cli_settings())).unwrap();

        let url = share_url(&config, &file, None, None).unwrap();

        assert_eq!(url, "https://x.org/ed/?content=body");
        assert!(config.render.number_sections);
    }

    #[test]
    fn test_share_url_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();

        let err = share_url(&config, &dir.path().join("nope.md"), None, None).unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
    }
}
