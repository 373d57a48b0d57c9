//! `livedoc watch` command implementation.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use clap::Args;
use livedoc_config::Config;
use notify::{EventKind, RecursiveMode, Watcher};

use super::{GlobalArgs, SettingsArgs};
use crate::error::CliError;
use crate::output::Output;
use crate::terminal::{TerminalEditor, editor_at};

/// Arguments for the watch command.
#[derive(Args)]
pub(crate) struct WatchArgs {
    /// Markdown file to watch.
    file: PathBuf,

    /// Document title.
    #[arg(short, long)]
    title: Option<String>,

    /// Document author.
    #[arg(short, long)]
    author: Option<String>,

    #[command(flatten)]
    pub(crate) settings: SettingsArgs,

    /// Write each rendering to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl WatchArgs {
    /// Execute the watch command. Runs until the watcher shuts down.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial render fails or the file cannot be watched.
    pub(crate) fn execute(self, global: &GlobalArgs<'_>) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = self.settings.cli_settings();
        let config = Config::load(global.config, Some(&cli_settings))?;

        let mut editor = editor_at(&config, &config.editor.base_url)?;
        editor
            .fields_mut()
            .apply_overrides(self.title.as_deref(), self.author.as_deref());

        refresh(&mut editor, &self.file)?;
        write_surface(&editor, self.output.as_deref())?;
        output.info(&format!("URL: {}", editor.location().href()));

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
            let _ = tx.send(res);
        })?;
        watcher.watch(watch_dir(&self.file), RecursiveMode::NonRecursive)?;

        output.highlight(&format!(
            "Watching {} (press Ctrl+C to stop)",
            self.file.display()
        ));

        for res in rx {
            match res {
                Ok(event) if is_change_to(&event, &self.file) => {
                    self.handle_change(&mut editor, &output);
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "File watcher error"),
            }
        }

        Ok(())
    }

    fn handle_change(&self, editor: &mut TerminalEditor, output: &Output) {
        let result = refresh(editor, &self.file)
            .and_then(|()| write_surface(editor, self.output.as_deref()));
        match result {
            Ok(()) => {
                let url = editor.location().href();
                tracing::info!(file = %self.file.display(), url = %url, "Document updated");
                output.success(&format!("Updated: {url}"));
            }
            Err(e) => output.warning(&format!("Skipped update: {e}")),
        }
    }
}

/// Re-read `file` into the content field and run one update cycle.
fn refresh(editor: &mut TerminalEditor, file: &Path) -> Result<(), CliError> {
    editor.fields_mut().content = std::fs::read_to_string(file)?;
    editor.run_update_cycle()?;
    Ok(())
}

fn write_surface(editor: &TerminalEditor, output: Option<&Path>) -> Result<(), CliError> {
    match output {
        Some(path) => editor.surface().write_to(File::create(path)?)?,
        None => editor.surface().write_to(std::io::stdout().lock())?,
    }
    Ok(())
}

/// Directory to watch. Editors often replace files, so the parent is watched.
fn watch_dir(file: &Path) -> &Path {
    file.parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
}

fn is_change_to(event: &notify::Event, file: &Path) -> bool {
    matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
        && event
            .paths
            .iter()
            .any(|path| path.file_name() == file.file_name())
}
