//! Default command: fetch URLs or report metadata about them.

use std::path::PathBuf;

use clap::Args;
use fetch_config::{CliSettings, Config};
use fetch_core::{Invocation, Mode, TransportOptions, UreqTransport};
use fetch_storage::FsDocumentStore;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for fetching.
#[derive(Args)]
pub(crate) struct FetchArgs {
    /// Enable debug logging.
    #[arg(short, long)]
    pub debug: bool,

    /// Path to configuration file (default: ~/.fetch.yaml).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print metadata of previously fetched pages instead of fetching.
    #[arg(short, long)]
    pub metadata: bool,

    /// URLs to process, in order.
    #[arg(required = true)]
    pub urls: Vec<String>,
}

impl FetchArgs {
    fn mode(&self) -> Mode {
        if self.metadata {
            Mode::Metadata
        } else {
            Mode::Fetch
        }
    }

    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            debug: self.debug.then_some(true),
        }
    }

    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or any URL fails to process.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        crate::init_tracing(config.debug);

        if let Some(path) = &config.config_path {
            output.info(&format!("Using config file: {}", path.display()));
        }
        tracing::debug!(store_dir = %config.store_resolved.dir.display(), "configuration loaded");

        let store = FsDocumentStore::new(config.store_resolved.dir.clone());
        let transport = UreqTransport::new(&TransportOptions {
            timeout: config.http.timeout(),
            user_agent: config.http.user_agent.clone(),
        });

        let mode = self.mode();
        let invocation = Invocation::new(self.urls, mode);
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        fetch_core::run(&invocation, &transport, &store, &mut out)?;
        Ok(())
    }
}
