//! `livedoc render` command implementation.

use clap::Args;
use livedoc_config::Config;

use super::{GlobalArgs, SettingsArgs};
use crate::error::CliError;
use crate::output::Output;
use crate::terminal::{TerminalEditor, editor_at};

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Editor address whose query string holds the document (default: editor.base_url).
    #[arg(long)]
    url: Option<String>,

    #[command(flatten)]
    pub(crate) settings: SettingsArgs,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or rendering fails.
    pub(crate) fn execute(self, global: &GlobalArgs<'_>) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = self.settings.cli_settings();
        let config = Config::load(global.config, Some(&cli_settings))?;
        let url = self.url.as_deref().unwrap_or(&config.editor.base_url);

        let editor = render_url(&config, url)?;

        editor.surface().write_to(std::io::stdout().lock())?;
        output.highlight(&format!("Format: {}", editor.surface().describe()));
        output.info(&format!("URL: {}", editor.location().href()));
        Ok(())
    }
}

/// Page-load lifecycle for `url`: decode, seed, run the initial cycle.
pub(crate) fn render_url(config: &Config, url: &str) -> Result<TerminalEditor, CliError> {
    let mut editor = editor_at(config, url)?;
    editor.run_update_cycle()?;
    Ok(editor)
}
