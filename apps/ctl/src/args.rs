//! # CLI Argument Definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "chanlogctl")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Validate and apply chanlog level configuration files")]
pub struct Cli {
    /// Print the registry's own diagnostics
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Fail on sections other than `log` instead of skipping them
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Dry-run a configuration file without applying it
    Check {
        /// Path to the TOML configuration file
        file: PathBuf,
    },
    /// Apply a configuration file and print the resulting module levels
    Apply {
        /// Path to the TOML configuration file
        file: PathBuf,
        /// Module to register before the configuration is applied (repeatable)
        #[arg(short, long = "module", value_name = "NAME")]
        modules: Vec<String>,
    },
}
