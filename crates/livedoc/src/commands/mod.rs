//! CLI command implementations.

use clap::Args;
use livedoc_config::CliSettings;
use livedoc_editor::OutputFormat;

pub(crate) mod decode;
pub(crate) mod link;
pub(crate) mod render;
pub(crate) mod watch;

pub(crate) use decode::DecodeArgs;
pub(crate) use link::LinkArgs;
pub(crate) use render::RenderArgs;
pub(crate) use watch::WatchArgs;

/// Options shared by every command.
pub(crate) struct GlobalArgs<'a> {
    /// Explicit config file (default: auto-discover livedoc.toml).
    pub(crate) config: Option<&'a std::path::Path>,
}

/// Config overrides accepted by every command that renders.
#[derive(Args)]
pub(crate) struct SettingsArgs {
    /// Output format (preview, latex or html; overrides config).
    #[arg(short, long)]
    pub(crate) format: Option<OutputFormat>,

    /// Editor page address (overrides editor.base_url).
    #[arg(long)]
    pub(crate) base_url: Option<String>,

    /// Number LaTeX sections.
    #[arg(long)]
    pub(crate) number_sections: bool,

    /// Keep LaTeX sections unnumbered.
    #[arg(long, conflicts_with = "number_sections")]
    pub(crate) no_number_sections: bool,
}

impl SettingsArgs {
    pub(crate) fn cli_settings(&self) -> CliSettings {
        CliSettings {
            format: self.format,
            base_url: self.base_url.clone(),
            number_sections: self.resolve_number_sections(),
        }
    }

    /// Resolve `number_sections` from --number-sections/--no-number-sections flags.
    fn resolve_number_sections(&self) -> Option<bool> {
        self.no_number_sections
            .then_some(false)
            .or(self.number_sections.then_some(true))
    }
}
