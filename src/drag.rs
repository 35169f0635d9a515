//! Drag gesture notifications consumed from the drag-and-drop source.
//!
//! Field names follow the wire shape gesture sources emit
//! (`draggableId`, `droppableId`, `type`).

use serde::{Deserialize, Serialize};

/// Droppable id of the horizontal track that holds the columns themselves.
pub const BOARD_DROPPABLE_ID: &str = "all-columns";

/// What kind of item is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragKind {
    Column,
    Task,
}

/// A position inside a droppable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraggableLocation {
    pub droppable_id: String,
    pub index: usize,
}

impl DraggableLocation {
    pub fn new(droppable_id: impl Into<String>, index: usize) -> Self {
        Self {
            droppable_id: droppable_id.into(),
            index,
        }
    }
}

/// Sent once when an item is picked up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragStart {
    pub draggable_id: String,
    #[serde(rename = "type")]
    pub kind: DragKind,
    pub source: DraggableLocation,
}

/// Sent whenever the hovered destination changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragUpdate {
    pub draggable_id: String,
    #[serde(rename = "type")]
    pub kind: DragKind,
    pub source: DraggableLocation,
    #[serde(default)]
    pub destination: Option<DraggableLocation>,
}

/// Sent once when the item is released: the input to the reducer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragResult {
    pub draggable_id: String,
    #[serde(rename = "type")]
    pub kind: DragKind,
    pub source: DraggableLocation,
    /// `None` when the drag was cancelled or dropped outside any target
    #[serde(default)]
    pub destination: Option<DraggableLocation>,
}

impl DragResult {
    /// A task drop from `(from_column, from_index)` to `(to_column, to_index)`.
    pub fn task(
        task_id: impl Into<String>,
        from_column: impl Into<String>,
        from_index: usize,
        to_column: impl Into<String>,
        to_index: usize,
    ) -> Self {
        Self {
            draggable_id: task_id.into(),
            kind: DragKind::Task,
            source: DraggableLocation::new(from_column, from_index),
            destination: Some(DraggableLocation::new(to_column, to_index)),
        }
    }

    /// A column drop along the board track.
    pub fn column(column_id: impl Into<String>, from_index: usize, to_index: usize) -> Self {
        Self {
            draggable_id: column_id.into(),
            kind: DragKind::Column,
            source: DraggableLocation::new(BOARD_DROPPABLE_ID, from_index),
            destination: Some(DraggableLocation::new(BOARD_DROPPABLE_ID, to_index)),
        }
    }

    /// The same drag, released outside any droppable.
    pub fn cancelled(mut self) -> Self {
        self.destination = None;
        self
    }

    /// True if the item was released where it was picked up.
    pub fn is_in_place(&self) -> bool {
        self.destination.as_ref() == Some(&self.source)
    }

    /// The start notification that opened this drag.
    pub fn start(&self) -> DragStart {
        DragStart {
            draggable_id: self.draggable_id.clone(),
            kind: self.kind,
            source: self.source.clone(),
        }
    }
}

/// One notification from the gesture source, tagged by phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum DragEvent {
    Start(DragStart),
    Update(DragUpdate),
    End(DragResult),
}
