//! CLI argument parsing for kanboard.

use clap::{Parser, Subcommand};
use kanboard::DropPolicy;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "kb",
    about = "Drive a Kanban board with drag-and-drop results",
    version = env!("GIT_DESCRIBE"),
    after_help = "Logs are written to: ~/.local/share/kanboard/logs/kanboard.log"
)]
pub struct Cli {
    /// Seed board file, JSON or YAML (default: built-in board)
    #[arg(short, long, global = true)]
    pub board: Option<PathBuf>,

    /// Drop policy (forward-only, unrestricted)
    #[arg(short, long, global = true)]
    pub policy: Option<DropPolicy>,

    /// Config file (default: ~/.config/kanboard/kanboard.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the board
    Show,

    /// Show which columns accept a drop while a task is dragged
    Eligibility {
        /// Task ID
        task_id: String,
    },

    /// Drag a task to a position in a column
    MoveTask {
        /// Task ID
        task_id: String,

        /// Destination column ID
        column_id: String,

        /// Position within the destination column
        index: usize,
    },

    /// Drag a column to a new position
    MoveColumn {
        /// Column ID
        column_id: String,

        /// New position in the column order
        index: usize,
    },

    /// Replay a JSON Lines file of drag events
    Replay {
        /// Path to the events file
        events: PathBuf,

        /// Print every handled drop
        #[arg(long)]
        history: bool,
    },

    /// Print the board in seed-file form
    Export {
        /// Output format (json, yaml)
        #[arg(short, long, default_value = "yaml")]
        format: String,
    },
}
