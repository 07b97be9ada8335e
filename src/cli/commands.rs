use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "plan", about = concat!("plan v", env!("CARGO_PKG_VERSION"), " - a todo tree you address by label"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Todo file to use (default: $TODO_PATH, then ~/todo)
    #[arg(short = 'f', long = "file", global = true)]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new item
    Create(CreateArgs),
    /// List items
    List(PathArgs),
    /// Mark an item finished
    Finish(RequiredPathArgs),
    /// Mark an item unfinished
    Unfinish(RequiredPathArgs),
    /// Remove finished items from view
    Cleanup(PathArgs),
}

/// A label path that may be empty (selects the top level)
#[derive(Args)]
pub struct PathArgs {
    /// Labels to descend through; each may be a fragment of the real label
    pub path: Vec<String>,
}

/// A label path that must name at least one item
#[derive(Args)]
pub struct RequiredPathArgs {
    /// Labels to descend through; each may be a fragment of the real label
    #[arg(required = true)]
    pub path: Vec<String>,
}

#[derive(Args)]
pub struct CreateArgs {
    /// Labels of the parent, followed by the label of the new item
    #[arg(required = true)]
    pub path: Vec<String>,
}

impl CreateArgs {
    /// Split into (parent path, new label).
    pub fn split(&self) -> (&[String], &str) {
        match self.path.split_last() {
            Some((label, parent)) => (parent, label.as_str()),
            None => (&[], ""),
        }
    }
}
