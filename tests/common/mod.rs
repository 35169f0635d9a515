//! Shared test infrastructure for kanboard integration tests.
//!
//! Provides TestEnv helper for consistent session setup.

#![allow(dead_code)]

use kanboard::{Board, BoardBuilder, BoardError, Column, DragResult, DropPolicy, Session};
use std::sync::Arc;

/// Three columns, tasks t1..t3 in the first, t4 in the second.
pub fn sample_board() -> Board {
    BoardBuilder::new()
        .column_with_id("col-1", "To do")
        .task_with_id("t1", "Take out the garbage")
        .task_with_id("t2", "Watch my favorite show")
        .task_with_id("t3", "Charge my phone")
        .column_with_id("col-2", "In progress")
        .task_with_id("t4", "Cook dinner")
        .column_with_id("col-3", "Done")
        .build()
        .expect("Failed to build sample board")
}

/// Test environment wrapping a session over the sample board.
pub struct TestEnv {
    pub session: Session,
}

impl TestEnv {
    /// Sample board with the forward-only policy.
    pub fn new() -> Self {
        Self::with_policy(DropPolicy::ForwardOnly)
    }

    pub fn with_policy(policy: DropPolicy) -> Self {
        Self {
            session: Session::new(sample_board(), policy),
        }
    }

    pub fn board(&self) -> &Board {
        self.session.board()
    }

    /// Run a full start/end gesture for `result`.
    pub fn drag(&mut self, result: DragResult) -> Result<Arc<Board>, BoardError> {
        self.session.on_drag_start(result.start());
        self.session.on_drag_end(result)
    }

    /// Run a full gesture that must succeed.
    pub fn drag_ok(&mut self, result: DragResult) -> Arc<Board> {
        self.drag(result).expect("Drag was rejected")
    }

    /// Task ids of a column.
    pub fn task_ids(&self, column_id: &str) -> Vec<String> {
        self.column(column_id).task_ids.clone()
    }

    pub fn column(&self, column_id: &str) -> &Column {
        self.board()
            .column(column_id)
            .unwrap_or_else(|| panic!("Column {} not found", column_id))
    }

    /// Drop-disabled flags in column order.
    pub fn disabled_flags(&self) -> Vec<bool> {
        self.session
            .drop_eligibility()
            .iter()
            .map(|f| f.is_drop_disabled)
            .collect()
    }

    /// Assert the board still satisfies every structural invariant.
    pub fn assert_valid(&self) {
        if let Err(e) = self.board().validate() {
            panic!("Board invariant broken: {}", e);
        }
    }

    /// Total tasks placed in columns.
    pub fn placed_count(&self) -> usize {
        self.board().columns().map(|c| c.task_ids.len()).sum()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
