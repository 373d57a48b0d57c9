//! livedoc CLI - live markdown editor host.
//!
//! Provides commands for:
//! - `render`: Open an editor address and print its rendering
//! - `link`: Turn a markdown file into a shareable editor address
//! - `decode`: Show the editing state carried by an address
//! - `watch`: Re-render a markdown file on every change

mod commands;
mod error;
mod output;
mod terminal;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{DecodeArgs, GlobalArgs, LinkArgs, RenderArgs, WatchArgs};
use output::Output;

/// livedoc - live markdown preview with shareable links.
#[derive(Parser)]
#[command(name = "livedoc", version, about)]
struct Cli {
    /// Path to configuration file (default: auto-discover livedoc.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output (per-update logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the document carried by an editor address.
    Render(RenderArgs),
    /// Print a shareable editor address for a markdown file.
    Link(LinkArgs),
    /// Decode an editor address into its editing state (JSON).
    Decode(DecodeArgs),
    /// Watch a markdown file and re-render it on every change.
    Watch(WatchArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let global = GlobalArgs {
        config: cli.config.as_deref(),
    };

    let result = match cli.command {
        Commands::Render(args) => args.execute(&global),
        Commands::Link(args) => args.execute(&global),
        Commands::Decode(args) => args.execute(&global),
        Commands::Watch(args) => args.execute(&global),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use livedoc_config::CliSettings;
    use livedoc_editor::OutputFormat;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args_after_subcommand() {
        let cli = Cli::try_parse_from(["livedoc", "decode", "http://localhost/", "-v", "-c", "x.toml"])
            .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        assert!(matches!(cli.command, Commands::Decode(_)));
    }

    #[test]
    fn test_settings_flags_reach_cli_settings() {
        let cli = Cli::try_parse_from([
            "livedoc",
            "link",
            "doc.md",
            "--base-url",
            "https://x.org/ed/",
            "--number-sections",
            "-f",
            "latex",
        ])
        .unwrap();
        let Commands::Link(args) = cli.command else {
            panic!("expected link command");
        };

        assert_eq!(
            args.settings.cli_settings(),
            CliSettings {
                format: Some(OutputFormat::Latex),
                base_url: Some("https://x.org/ed/".to_owned()),
                number_sections: Some(true),
            }
        );
    }

    #[test]
    fn test_settings_flags_default_to_none() {
        let cli = Cli::try_parse_from(["livedoc", "watch", "doc.md", "--no-number-sections"]).unwrap();
        let Commands::Watch(args) = cli.command else {
            panic!("expected watch command");
        };

        assert_eq!(
            args.settings.cli_settings(),
            CliSettings {
                number_sections: Some(false),
                ..CliSettings::default()
            }
        );
    }

    #[test]
    fn test_number_sections_flags_conflict() {
        let result = Cli::try_parse_from([
            "livedoc",
            "render",
            "--number-sections",
            "--no-number-sections",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_format_rejected() {
        let result = Cli::try_parse_from(["livedoc", "render", "--format", "pdf"]);
        assert!(result.is_err());
    }
}
