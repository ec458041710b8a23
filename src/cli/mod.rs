//! CLI command definitions for committer's config commands
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

pub mod show;

use clap::{Parser, Subcommand};
use show::{GetArgs, ShowArgs};

/// Committer configuration tools
#[derive(Parser, Debug)]
#[command(name = "committer", author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the default config file to ~/.committer/config.yml
    Setup,

    /// Print the merged configuration
    Show(ShowArgs),

    /// Print a single configuration value
    Get(GetArgs),

    /// Print the config file locations that are consulted
    Paths,
}
