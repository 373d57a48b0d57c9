//! `livedoc decode` command implementation.

use clap::Args;
use livedoc_config::Config;
use livedoc_editor::{EditingState, Location, MemoryLocation, url};

use super::GlobalArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the decode command.
#[derive(Args)]
pub(crate) struct DecodeArgs {
    /// Editor address to decode.
    url: String,
}

impl DecodeArgs {
    /// Execute the decode command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, address parsing or
    /// serialization fails.
    pub(crate) fn execute(self, global: &GlobalArgs<'_>) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(global.config, None)?;
        let state = decode_state(&config, &self.url)?;
        output.print(&serde_json::to_string_pretty(&state)?);
        Ok(())
    }
}

/// The state an editor opened at `href` would start with.
pub(crate) fn decode_state(config: &Config, href: &str) -> Result<EditingState, CliError> {
    let location = MemoryLocation::parse(href)?;
    Ok(EditingState::from_decoded(
        url::decode(location.query()),
        config.editor.default_format,
    ))
}
