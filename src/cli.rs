use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dayplan", version, about = "Terminal day-by-day planner for 2026")]
pub struct Cli {
    /// Plan file to use instead of the default data location
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the planning table
    List {
        /// Show only rows whose text contains this substring
        #[arg(long)]
        filter: Option<String>,
        /// Insert a separator before each Monday
        #[arg(long)]
        weeks: bool,
    },
    /// Write the note for one day
    Set {
        /// Day to write, as YYYY-MM-DD
        date: String,
        /// Note text (stored trimmed; empty text blanks the day)
        text: String,
    },
    /// Erase every note in the plan
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Launch the interactive planner
    Tui,
}
