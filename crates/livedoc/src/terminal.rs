//! Terminal host: in-memory fields and a buffered output surface.

use std::io::Write;

use livedoc_config::Config;
use livedoc_editor::{EditorFields, MemoryLocation, OutputFormat, OutputSurface, StateController};
use livedoc_renderer::MarkdownDocument;

use crate::error::CliError;

/// Editor wired to the terminal host.
pub(crate) type TerminalEditor =
    StateController<MarkdownDocument, TerminalFields, TerminalSurface, MemoryLocation>;

/// Field values held for the editor. Commands update them before each cycle.
#[derive(Debug, Default)]
pub(crate) struct TerminalFields {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) content: String,
    pub(crate) format: OutputFormat,
}

impl TerminalFields {
    pub(crate) fn new(format: OutputFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    /// Override title and author when given on the command line.
    pub(crate) fn apply_overrides(&mut self, title: Option<&str>, author: Option<&str>) {
        if let Some(title) = title {
            title.clone_into(&mut self.title);
        }
        if let Some(author) = author {
            author.clone_into(&mut self.author);
        }
    }
}

impl EditorFields for TerminalFields {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn author(&self) -> String {
        self.author.clone()
    }

    fn content(&self) -> String {
        self.content.clone()
    }

    fn format(&self) -> OutputFormat {
        self.format
    }

    fn seed(&mut self, title: &str, author: &str, content: &str) {
        title.clone_into(&mut self.title);
        author.clone_into(&mut self.author);
        content.clone_into(&mut self.content);
    }
}

/// Keeps the most recent rendering until a command writes it out.
#[derive(Debug, Default)]
pub(crate) struct TerminalSurface {
    class: String,
    body: String,
    markup: bool,
}

impl TerminalSurface {
    pub(crate) fn body(&self) -> &str {
        &self.body
    }

    /// Short description such as `latex (text)` or `preview (markup)`.
    pub(crate) fn describe(&self) -> String {
        let class = if self.class.is_empty() {
            "preview"
        } else {
            &self.class
        };
        let kind = if self.markup { "markup" } else { "text" };
        format!("{class} ({kind})")
    }

    /// Write the body followed by a newline.
    pub(crate) fn write_to(&self, mut writer: impl Write) -> std::io::Result<()> {
        writeln!(writer, "{}", self.body)?;
        writer.flush()
    }
}

impl OutputSurface for TerminalSurface {
    fn show_markup(&mut self, class: &str, markup: &str) {
        class.clone_into(&mut self.class);
        markup.clone_into(&mut self.body);
        self.markup = true;
    }

    fn show_text(&mut self, class: &str, text: &str) {
        class.clone_into(&mut self.class);
        text.clone_into(&mut self.body);
        self.markup = false;
    }
}

/// Build an editor for the absolute address `href`, seeded from its query,
/// without rendering.
pub(crate) fn editor_at(config: &Config, href: &str) -> Result<TerminalEditor, CliError> {
    Ok(StateController::new(
        MarkdownDocument::new(config.render.options()),
        TerminalFields::new(config.editor.default_format),
        TerminalSurface::default(),
        MemoryLocation::parse(href)?,
    ))
}
