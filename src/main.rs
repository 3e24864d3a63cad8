mod cli;
mod commands;
mod logging;
mod model;
mod storage;
mod ui;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    // Keep the handle alive so buffered log lines are flushed on exit.
    let _logger = match logging::init() {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("dayplan: file logging disabled: {:#}", err);
            None
        }
    };
    let command = args.command.unwrap_or(cli::Command::Tui);
    match command {
        cli::Command::List { filter, weeks } => commands::list(args.file, filter, weeks),
        cli::Command::Set { date, text } => commands::set(args.file, date, text),
        cli::Command::Clear { yes } => commands::clear(args.file, yes),
        cli::Command::Tui => commands::tui(args.file),
    }
}
