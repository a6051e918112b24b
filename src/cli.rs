// Command-line definitions and argument validation

use crate::error::StoreError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "tox")]
#[command(about = "Tox - manage your todos from the terminal")]
#[command(version = env!("GIT_DESCRIBE"))]
pub struct Cli {
    /// Path to a YAML config file (default: <config dir>/tox/tox.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the todo database (default: ~/.tox)
    #[arg(long, global = true, env = "TOX_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Add a new todo
    Add {
        /// Task text; multiple words are joined with spaces
        words: Vec<String>,
    },

    /// List your todos, by default only showing incomplete tasks
    List {
        /// Show all todos, including completed ones
        #[arg(short, long)]
        all: bool,

        /// Print tasks as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mark a todo as done
    Done {
        /// ID of the todo
        id: String,
    },

    /// Delete a todo permanently and renumber the rest
    #[command(visible_aliases = ["del", "rm"])]
    Delete {
        /// ID of the todo
        id: String,
    },

    /// Reset all todo IDs to be sequential starting from 1
    Reindex,
}

/// A command with its arguments validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Add(String),
    List { all: bool, json: bool },
    Done(i64),
    Delete(i64),
    Reindex,
}

impl Commands {
    /// Validate raw arguments so bad input never reaches the store
    pub fn into_action(self) -> Result<Action, StoreError> {
        Ok(match self {
            Commands::Add { words } => Action::Add(join_description(&words)?),
            Commands::List { all, json } => Action::List { all, json },
            Commands::Done { id } => Action::Done(parse_id(&id)?),
            Commands::Delete { id } => Action::Delete(parse_id(&id)?),
            Commands::Reindex => Action::Reindex,
        })
    }
}

/// Join free-form words into one task description
///
/// The result is trimmed the same way the store trims it, so the echoed
/// text matches what gets persisted.
pub fn join_description(words: &[String]) -> Result<String, StoreError> {
    let description = words.join(" ");
    let description = description.trim();
    if description.is_empty() {
        return Err(StoreError::invalid_input("Task cannot be empty"));
    }
    Ok(description.to_string())
}

/// Parse a task ID argument
///
/// Surrounding whitespace is tolerated; IDs below 1 can never exist, so
/// they are rejected here as invalid rather than reported as not found.
pub fn parse_id(text: &str) -> Result<i64, StoreError> {
    match text.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(StoreError::invalid_input(format!("invalid ID: {}", text))),
    }
}
