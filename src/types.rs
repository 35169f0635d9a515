//! Core data types for the board.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

/// A single card on the board. Never mutated once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    /// Unique identifier, e.g. "task-1"
    pub id: String,

    /// Card text
    pub content: String,
}

impl Task {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
        }
    }
}

/// A column and the order of the tasks it holds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Unique identifier, also the droppable id of the column's task list
    pub id: String,

    /// Heading shown above the task list
    pub title: String,

    /// Task order within the column; each id at most once
    #[serde(default)]
    pub task_ids: Vec<String>,
}

impl Column {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            task_ids: Vec::new(),
        }
    }

    /// Same column with a different task order.
    pub fn with_task_ids(&self, task_ids: Vec<String>) -> Self {
        Self {
            id: self.id.clone(),
            title: self.title.clone(),
            task_ids,
        }
    }

    /// Position of a task within this column.
    pub fn position_of(&self, task_id: &str) -> Option<usize> {
        self.task_ids.iter().position(|id| id == task_id)
    }
}

/// Normalized board state: tasks, columns, and column order.
///
/// A `Board` is an immutable snapshot. Transitions build a new one, sharing
/// every column they did not touch (and the task map) with the previous
/// snapshot through `Arc`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub(crate) tasks: Arc<BTreeMap<String, Task>>,
    pub(crate) columns: BTreeMap<String, Arc<Column>>,
    pub(crate) column_order: Vec<String>,
}

impl Board {
    /// Assemble a board from its parts and check every invariant.
    pub fn new(tasks: Vec<Task>, columns: Vec<Column>, column_order: Vec<String>) -> Result<Self, ValidationError> {
        let mut task_map = BTreeMap::new();
        for task in tasks {
            if let Some(dup) = task_map.insert(task.id.clone(), task) {
                return Err(ValidationError::DuplicateTask(dup.id));
            }
        }

        let mut column_map = BTreeMap::new();
        for column in columns {
            let id = column.id.clone();
            if column_map.insert(id.clone(), Arc::new(column)).is_some() {
                return Err(ValidationError::DuplicateColumn(id));
            }
        }

        let board = Self {
            tasks: Arc::new(task_map),
            columns: column_map,
            column_order,
        };
        board.validate()?;
        Ok(board)
    }

    /// Look up a task by id.
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// Look up a column by id.
    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.get(id).map(Arc::as_ref)
    }

    /// Shared handle to a column, for identity comparisons across snapshots.
    pub fn column_handle(&self, id: &str) -> Option<&Arc<Column>> {
        self.columns.get(id)
    }

    /// Column ids in display order.
    pub fn column_order(&self) -> &[String] {
        &self.column_order
    }

    /// Position of a column in display order.
    pub fn column_index(&self, id: &str) -> Option<usize> {
        self.column_order.iter().position(|c| c == id)
    }

    /// Columns in display order.
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.column_order.iter().filter_map(|id| self.column(id))
    }

    /// Resolve a column's task ids to tasks, in column order.
    pub fn tasks_in(&self, column: &Column) -> Vec<&Task> {
        column.task_ids.iter().filter_map(|id| self.tasks.get(id)).collect()
    }

    /// The column currently holding a task.
    pub fn column_of_task(&self, task_id: &str) -> Option<&Column> {
        self.columns().find(|c| c.task_ids.iter().any(|id| id == task_id))
    }

    /// Total number of tasks on the board.
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// True if both snapshots share the same task map allocation.
    pub fn shares_tasks_with(&self, other: &Board) -> bool {
        Arc::ptr_eq(&self.tasks, &other.tasks)
    }

    /// Check the board's structural invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (key, task) in self.tasks.iter() {
            if key != &task.id {
                return Err(ValidationError::MismatchedKey(key.clone()));
            }
        }

        // Task ids: known, and placed in exactly one column at most once
        let mut placed: HashSet<&str> = HashSet::new();
        for (key, column) in &self.columns {
            if key != &column.id {
                return Err(ValidationError::MismatchedKey(key.clone()));
            }
            let mut local: HashSet<&str> = HashSet::new();
            for task_id in &column.task_ids {
                if !self.tasks.contains_key(task_id) {
                    return Err(ValidationError::UnknownTask(task_id.clone()));
                }
                if !local.insert(task_id) {
                    return Err(ValidationError::DuplicateTask(task_id.clone()));
                }
                if !placed.insert(task_id) {
                    return Err(ValidationError::TaskInMultipleColumns(task_id.clone()));
                }
            }
        }

        // Column order: known ids, each exactly once, covering every column
        let mut ordered: HashSet<&str> = HashSet::new();
        for column_id in &self.column_order {
            if !self.columns.contains_key(column_id) {
                return Err(ValidationError::UnknownColumn(column_id.clone()));
            }
            if !ordered.insert(column_id) {
                return Err(ValidationError::DuplicateColumn(column_id.clone()));
            }
        }
        if let Some(missing) = self.columns.keys().find(|id| !ordered.contains(id.as_str())) {
            return Err(ValidationError::ColumnNotOrdered(missing.clone()));
        }

        Ok(())
    }
}

/// Structural problems found by [`Board::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    UnknownTask(String),
    UnknownColumn(String),
    DuplicateTask(String),
    DuplicateColumn(String),
    TaskInMultipleColumns(String),
    ColumnNotOrdered(String),
    MismatchedKey(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::UnknownTask(id) => write!(f, "column references unknown task '{}'", id),
            ValidationError::UnknownColumn(id) => write!(f, "column order references unknown column '{}'", id),
            ValidationError::DuplicateTask(id) => write!(f, "task '{}' is listed more than once", id),
            ValidationError::DuplicateColumn(id) => write!(f, "column '{}' is listed more than once", id),
            ValidationError::TaskInMultipleColumns(id) => {
                write!(f, "task '{}' appears in more than one column", id)
            }
            ValidationError::ColumnNotOrdered(id) => write!(f, "column '{}' is missing from the column order", id),
            ValidationError::MismatchedKey(key) => write!(f, "entry '{}' is stored under a different id", key),
        }
    }
}

impl std::error::Error for ValidationError {}
