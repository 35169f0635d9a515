//! Kanboard: the state engine behind a drag-and-drop Kanban board.
//!
//! A [`Board`] is an immutable snapshot of tasks, columns, and column order.
//! Completed drags are turned into new snapshots by [`reduce`], and a
//! [`Session`] feeds the gesture source's start/update/end notifications
//! through it while tracking which columns accept a drop.
//!
//! # Example
//!
//! ```
//! use kanboard::{DragResult, DropPolicy, Session, default_board};
//!
//! let mut session = Session::new(default_board().unwrap(), DropPolicy::ForwardOnly);
//!
//! // Move the first task from "To do" into "In progress"
//! let drag = DragResult::task("task-1", "column-1", 0, "column-2", 0);
//! session.on_drag_start(drag.start());
//! session.on_drag_end(drag).unwrap();
//!
//! assert_eq!(session.board().column("column-2").unwrap().task_ids, vec!["task-1"]);
//! ```

mod seq;
mod types;

pub mod config;
pub mod drag;
pub mod eligibility;
pub mod reducer;
pub mod seed;
pub mod session;

// Re-export public API
pub use config::Config;
pub use drag::{BOARD_DROPPABLE_ID, DragEvent, DragKind, DragResult, DragStart, DragUpdate, DraggableLocation};
pub use eligibility::{ColumnEligibility, DropPolicy, drop_eligibility, home_index};
pub use reducer::{BoardError, Transition, reduce};
pub use seed::{BoardBuilder, SeedFormat, default_board, export_board, load_board, parse_board};
pub use seq::{insert_at, remove_at, reorder};
pub use session::{ActiveDrag, Outcome, ReplaySummary, Session, TransitionRecord};
pub use types::{Board, Column, Task, ValidationError};
