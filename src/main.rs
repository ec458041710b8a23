//! Committer config CLI
//!
//! Bootstraps and inspects the layered configuration used by committer.

use anyhow::Result;
use clap::Parser;
use committer_config::cli::show::{run_get, run_paths, run_show};
use committer_config::cli::{Cli, Command};
use committer_config::config::ConfigStore;
use std::fs::OpenOptions;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Install the tracing subscriber selected by `--log`.
///
/// `RUST_LOG` takes precedence over `--verbose` when set.
fn init_logging(cli: &Cli) -> Result<()> {
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };

    match cli.log.as_str() {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter())
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter())
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)?;
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter())
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let store = ConfigStore::discover();
    debug!(?store, "Config store ready");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Setup => {
            store.setup(&mut out)?;
        }
        Command::Show(args) => run_show(&store, &args, &mut out)?,
        Command::Get(args) => run_get(&store, &args, &mut out)?,
        Command::Paths => run_paths(&store, &mut out)?,
    }

    Ok(())
}
