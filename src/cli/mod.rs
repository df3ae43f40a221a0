//! Command-line interface for taskboard
//!
//! This module defines the CLI structure using clap derive macros.
//! Each group of subcommands is implemented in its own submodule.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::dashboard::Dashboard;
use crate::error::Result;
use crate::model::Snapshot;
use crate::output::Report;
use crate::seed::default_snapshot;
use crate::storage::{default_data_dir, FileStorage, DATA_DIR_ENV};
use crate::store::Commit;

mod board;
mod init;
mod task;

/// taskboard - a three-column task board
///
/// Tasks live in Todo, In Progress and Completed columns. Every change is
/// written to a JSON snapshot in the data directory.
#[derive(Parser, Debug)]
#[command(name = "taskboard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding the snapshot and taskboard.toml
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    pub data_dir: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show every column and its tasks
    Board,

    /// Show one task
    Show {
        /// Task ID
        id: String,
    },

    /// Create a task in a column
    Add {
        /// Column ID: todo, inProgress, completed
        #[arg(long, default_value = "todo")]
        column: String,

        /// Title (at least 2 characters)
        #[arg(long)]
        title: String,

        /// Priority: Low, Medium, High
        #[arg(long)]
        priority: Option<String>,

        /// Due date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        due: Option<String>,

        /// Assignee ID or name (see `taskboard people`)
        #[arg(long)]
        assignee: Option<String>,

        /// Free-form description
        #[arg(long)]
        description: Option<String>,
    },

    /// Edit fields of a task
    Edit {
        /// Task ID
        id: String,

        #[arg(long)]
        title: Option<String>,

        /// Status: Todo, In Progress, Completed
        #[arg(long)]
        status: Option<String>,

        #[arg(long)]
        priority: Option<String>,

        #[arg(long)]
        due: Option<String>,

        #[arg(long)]
        assignee: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a task
    Delete {
        /// Task ID
        id: String,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Move a task to a column position, as a drag and drop would
    Move {
        /// Task ID
        id: String,

        /// Destination column ID
        #[arg(long)]
        to: String,

        /// Destination index (defaults to the end of the column)
        #[arg(long)]
        index: Option<usize>,
    },

    /// List the assignee directory
    People,

    /// Write the example board to the data directory
    Init {
        /// Overwrite an existing snapshot
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// Run the CLI command
    pub fn run(self) -> Result<()> {
        let data_dir = self.data_dir;
        let json = self.json;
        let quiet = self.quiet;

        match self.command {
            Commands::Board => board::run_board(board::BoardOptions {
                data_dir,
                json,
                quiet,
            }),
            Commands::Show { id } => board::run_show(board::ShowOptions {
                id,
                data_dir,
                json,
                quiet,
            }),
            Commands::People => board::run_people(board::PeopleOptions { json, quiet }),
            Commands::Add {
                column,
                title,
                priority,
                due,
                assignee,
                description,
            } => task::run_add(task::AddOptions {
                column,
                title,
                priority,
                due,
                assignee,
                description,
                data_dir,
                json,
                quiet,
            }),
            Commands::Edit {
                id,
                title,
                status,
                priority,
                due,
                assignee,
                description,
            } => task::run_edit(task::EditOptions {
                id,
                title,
                status,
                priority,
                due,
                assignee,
                description,
                data_dir,
                json,
                quiet,
            }),
            Commands::Delete { id, yes } => task::run_delete(task::DeleteOptions {
                id,
                yes,
                data_dir,
                json,
                quiet,
            }),
            Commands::Move { id, to, index } => task::run_move(task::MoveOptions {
                id,
                to,
                index,
                data_dir,
                json,
                quiet,
            }),
            Commands::Init { force } => init::run(init::InitOptions {
                force,
                data_dir,
                json,
                quiet,
            }),
        }
    }
}

/// One invocation's view of the board.
pub(crate) struct Session {
    pub config: Config,
    pub dashboard: Dashboard<FileStorage>,
}

pub(crate) fn resolve_data_dir(data_dir: Option<PathBuf>) -> Result<PathBuf> {
    match data_dir {
        Some(path) => Ok(path),
        None => default_data_dir(),
    }
}

pub(crate) fn open_session(data_dir: Option<PathBuf>) -> Result<Session> {
    let data_dir = resolve_data_dir(data_dir)?;
    let config = Config::load_from_dir(&data_dir);
    let storage = FileStorage::from_config(&data_dir, &config.storage);
    let fallback = if config.board.seed_when_empty {
        default_snapshot()
    } else {
        Snapshot::default()
    };
    tracing::debug!(path = %storage.snapshot_path().display(), "opening board");
    Ok(Session {
        config,
        dashboard: Dashboard::open(storage, fallback),
    })
}

/// Surface a failed write without failing the command.
pub(crate) fn note_commit(report: &mut Report, commit: &Commit) {
    if let Some(err) = &commit.persist_error {
        report.warn(format!("change kept in memory but not saved: {err}"));
    }
}
