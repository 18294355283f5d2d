//! Command-line arguments and selection parsing.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

/// tasksync - a to-do list kept in sync across views and storage
#[derive(Debug, Parser)]
#[command(name = "tasksync")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// SQLite file holding the saved list
    #[arg(long, global = true, default_value = "tasksync.sqlite3")]
    pub db: PathBuf,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Share endpoint used by the `share` command
    #[arg(long, global = true)]
    pub share_url: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a task to the to-do list
    Add {
        /// Task text; multiple words are joined with spaces
        #[arg(required = true)]
        content: Vec<String>,
    },
    /// Show both lists
    List,
    /// Mark to-do items as done
    Complete(Picks),
    /// Move done items back to the to-do list
    Undo(Picks),
    /// Delete items from either list
    Remove {
        /// Positions in the to-do list
        #[arg(long = "todo", num_args = 1..)]
        todo: Vec<Pick>,
        /// Positions in the done list
        #[arg(long = "done", num_args = 1..)]
        done: Vec<Pick>,
    },
    /// Show counts and the progress bar
    Summary,
    /// Show the shareable progress message and link
    Share,
}

#[derive(Debug, Args)]
pub struct Picks {
    /// 1-based positions as shown by `list`; `N-M` selects a range
    #[arg(required = true)]
    pub picks: Vec<Pick>,
}

/// One position or an inclusive range of positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    Single(usize),
    Range(usize, usize),
}

impl FromStr for Pick {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parse = |part: &str| -> Result<usize, String> {
            match part.trim().parse::<usize>() {
                Ok(0) | Err(_) => Err(format!("`{part}` is not a position (1, 2, ...)")),
                Ok(position) => Ok(position),
            }
        };

        match value.split_once('-') {
            Some((start, end)) => Ok(Self::Range(parse(start)?, parse(end)?)),
            None => Ok(Self::Single(parse(value)?)),
        }
    }
}
