//! Initial board data: the built-in seed, a builder, and seed files.

use crate::types::{Board, Column, Task};
use eyre::{Context, Result};
use std::fs;
use std::path::Path;

/// Builder for assembling a board column by column.
///
/// Tasks are placed in the most recently added column.
///
/// # Example
///
/// ```
/// use kanboard::BoardBuilder;
///
/// let board = BoardBuilder::new()
///     .column("To do")
///     .task("Write the report")
///     .task("Book flights")
///     .column("Done")
///     .build()
///     .unwrap();
///
/// assert_eq!(board.column_order(), ["column-1", "column-2"]);
/// assert_eq!(board.column("column-1").unwrap().task_ids, vec!["task-1", "task-2"]);
/// ```
#[derive(Debug, Default)]
pub struct BoardBuilder {
    tasks: Vec<Task>,
    columns: Vec<Column>,
    orphans: Vec<String>,
}

impl BoardBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column with a generated id ("column-N").
    pub fn column(self, title: impl Into<String>) -> Self {
        let id = format!("column-{}", self.columns.len() + 1);
        self.column_with_id(id, title)
    }

    /// Add a column with an explicit id.
    pub fn column_with_id(mut self, id: impl Into<String>, title: impl Into<String>) -> Self {
        self.columns.push(Column::new(id, title));
        self
    }

    /// Add a task with a generated id ("task-N") to the last column.
    pub fn task(self, content: impl Into<String>) -> Self {
        let id = format!("task-{}", self.tasks.len() + 1);
        self.task_with_id(id, content)
    }

    /// Add a task with an explicit id to the last column.
    pub fn task_with_id(mut self, id: impl Into<String>, content: impl Into<String>) -> Self {
        let task = Task::new(id, content);
        match self.columns.last_mut() {
            Some(column) => column.task_ids.push(task.id.clone()),
            None => self.orphans.push(task.id.clone()),
        }
        self.tasks.push(task);
        self
    }

    /// Build the board, with columns ordered as they were added.
    pub fn build(self) -> Result<Board> {
        if let Some(orphan) = self.orphans.first() {
            eyre::bail!("task {} was added before any column", orphan);
        }
        let order = self.columns.iter().map(|c| c.id.clone()).collect();
        Board::new(self.tasks, self.columns, order).map_err(|e| eyre::eyre!(e))
    }
}

/// The board a fresh session starts from when no seed file is configured.
pub fn default_board() -> Result<Board> {
    BoardBuilder::new()
        .column("To do")
        .task("Take out the garbage")
        .task("Watch my favorite show")
        .task("Charge my phone")
        .task("Cook dinner")
        .column("In progress")
        .column("Done")
        .build()
}

/// Serialization format for seed files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedFormat {
    Json,
    Yaml,
}

impl SeedFormat {
    /// JSON for `.json` files, YAML for everything else.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SeedFormat::Json,
            _ => SeedFormat::Yaml,
        }
    }
}

/// Parse a seed board and check its invariants.
pub fn parse_board(text: &str, format: SeedFormat) -> Result<Board> {
    let board: Board = match format {
        SeedFormat::Json => serde_json::from_str(text).context("Failed to parse JSON board")?,
        SeedFormat::Yaml => serde_yaml::from_str(text).context("Failed to parse YAML board")?,
    };
    board.validate().map_err(|e| eyre::eyre!(e)).context("Seed board is invalid")?;
    Ok(board)
}

/// Load a seed board from a file.
pub fn load_board(path: &Path) -> Result<Board> {
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read board file {}", path.display()))?;
    let board = parse_board(&text, SeedFormat::from_path(path))
        .with_context(|| format!("Failed to load board from {}", path.display()))?;
    log::info!(
        "Loaded board from {}: {} columns, {} tasks",
        path.display(),
        board.column_order().len(),
        board.task_count()
    );
    Ok(board)
}

/// Render a board in seed-file form.
pub fn export_board(board: &Board, format: SeedFormat) -> Result<String> {
    match format {
        SeedFormat::Json => serde_json::to_string_pretty(board).context("Failed to serialize board"),
        SeedFormat::Yaml => serde_yaml::to_string(board).context("Failed to serialize board"),
    }
}
