#![allow(clippy::print_stdout)]

pub mod args;
pub mod commands;

use crate::args::{Cli, Command};
use anyhow::Result;
use chanlog::{Console, Level};
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::Debug } else { Level::Warn };
    Console::builder().level(level).init()?;

    let lines = match cli.command {
        Command::Check { file } => commands::check(&file, cli.strict)?,
        Command::Apply { file, modules } => commands::apply(&file, &modules, cli.strict)?,
    };

    for line in lines {
        println!("{line}");
    }

    Ok(())
}
