//! fetch CLI - Fetch web pages to disk and report metadata about them.
//!
//! Usage:
//! - `fetch <url>...`: store each page as `<hostname>.html`
//! - `fetch --metadata <url>...`: print one JSON line per stored page
//! - `fetch version`: print version information

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::FetchArgs;
use output::Output;

/// Application version from Cargo.toml.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fetch web pages to disk and report metadata about them.
#[derive(Parser)]
#[command(
    name = "fetch",
    version,
    about,
    args_conflicts_with_subcommands = true,
    subcommand_negates_reqs = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    fetch: FetchArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the version number of fetch.
    Version,
}

/// Install the stderr tracing subscriber.
///
/// Debug mode forces DEBUG level, otherwise `RUST_LOG` applies with INFO as
/// the fallback.
pub(crate) fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let result = match cli.command {
        Some(Commands::Version) => commands::version::execute(VERSION),
        None => cli.fetch.execute(&output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_urls() {
        let cli = Cli::try_parse_from(["fetch", "https://a.example", "https://b.example"]).unwrap();

        assert!(cli.command.is_none());
        assert_eq!(cli.fetch.urls, ["https://a.example", "https://b.example"]);
        assert!(!cli.fetch.metadata);
        assert!(!cli.fetch.debug);
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "fetch",
            "-m",
            "-d",
            "--config",
            "/tmp/fetch.yaml",
            "https://a.example",
        ])
        .unwrap();

        assert!(cli.fetch.metadata);
        assert!(cli.fetch.debug);
        assert_eq!(
            cli.fetch.config.as_deref(),
            Some(std::path::Path::new("/tmp/fetch.yaml"))
        );
    }

    #[test]
    fn test_parse_long_metadata_flag() {
        let cli = Cli::try_parse_from(["fetch", "--metadata", "https://a.example"]).unwrap();

        assert!(cli.fetch.metadata);
    }

    #[test]
    fn test_parse_requires_at_least_one_url() {
        let err = Cli::try_parse_from(["fetch"]).err().unwrap();

        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn test_parse_version_subcommand() {
        let cli = Cli::try_parse_from(["fetch", "version"]).unwrap();

        assert!(matches!(cli.command, Some(Commands::Version)));
    }

    #[test]
    fn test_parse_unknown_flag_is_error() {
        assert!(Cli::try_parse_from(["fetch", "--bogus", "https://a.example"]).is_err());
    }
}
