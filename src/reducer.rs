//! Drag result interpreter: computes the next board from a completed drag.

use crate::drag::{DragKind, DragResult, DraggableLocation};
use crate::seq::{insert_at, remove_at, reorder};
use crate::types::{Board, Column};
use std::sync::Arc;

/// Errors that can occur while applying a drag result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// The drag result does not match the current board.
    InvariantViolation(String),
    /// The destination column does not accept drops for the active drag.
    DropDisabled { column_id: String },
}

impl std::fmt::Display for BoardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardError::InvariantViolation(msg) => write!(f, "invariant violation: {}", msg),
            BoardError::DropDisabled { column_id } => write!(f, "column {} does not accept this drop", column_id),
        }
    }
}

impl std::error::Error for BoardError {}

fn violation(msg: impl Into<String>) -> BoardError {
    BoardError::InvariantViolation(msg.into())
}

/// Outcome of a successful reduction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Cancelled or dropped in place; keep the current snapshot.
    Unchanged,
    /// A new snapshot to replace the current one.
    Moved(Board),
}

impl Transition {
    /// The resulting board, falling back to `current` for a no-op.
    pub fn into_board(self, current: &Board) -> Board {
        match self {
            Transition::Unchanged => current.clone(),
            Transition::Moved(board) => board,
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, Transition::Unchanged)
    }
}

/// Compute the board that results from `result`.
///
/// The input board is never modified. Columns the move does not touch are
/// shared with the returned board, as is the task map.
pub fn reduce(board: &Board, result: &DragResult) -> Result<Transition, BoardError> {
    let Some(destination) = &result.destination else {
        log::debug!("Drag of {} cancelled", result.draggable_id);
        return Ok(Transition::Unchanged);
    };

    if result.is_in_place() {
        log::debug!("Drag of {} dropped in place", result.draggable_id);
        return Ok(Transition::Unchanged);
    }

    let next = match result.kind {
        DragKind::Column => move_column(board, result, destination)?,
        DragKind::Task if destination.droppable_id == result.source.droppable_id => {
            move_task_within(board, result, destination)?
        }
        DragKind::Task => move_task_across(board, result, destination)?,
    };

    Ok(Transition::Moved(next))
}

fn move_column(board: &Board, result: &DragResult, destination: &DraggableLocation) -> Result<Board, BoardError> {
    let from = result.source.index;
    match board.column_order.get(from) {
        Some(id) if id == &result.draggable_id => {}
        Some(id) => {
            return Err(violation(format!(
                "column order has {} at index {}, not {}",
                id, from, result.draggable_id
            )));
        }
        None => return Err(violation(format!("column index {} out of range", from))),
    }

    let column_order = reorder(&board.column_order, from, destination.index)
        .ok_or_else(|| violation(format!("column destination index {} out of range", destination.index)))?;

    Ok(Board {
        tasks: Arc::clone(&board.tasks),
        columns: board.columns.clone(),
        column_order,
    })
}

fn move_task_within(board: &Board, result: &DragResult, destination: &DraggableLocation) -> Result<Board, BoardError> {
    let column = source_column(board, result)?;

    let task_ids = reorder(&column.task_ids, result.source.index, destination.index).ok_or_else(|| {
        violation(format!(
            "destination index {} out of range for column {}",
            destination.index, column.id
        ))
    })?;

    Ok(replace_columns(board, [column.with_task_ids(task_ids)]))
}

fn move_task_across(board: &Board, result: &DragResult, destination: &DraggableLocation) -> Result<Board, BoardError> {
    let start = source_column(board, result)?;
    let finish = board
        .column(&destination.droppable_id)
        .ok_or_else(|| violation(format!("unknown destination column {}", destination.droppable_id)))?;

    // Source index was validated by source_column
    let (start_ids, moved) = remove_at(&start.task_ids, result.source.index)
        .ok_or_else(|| violation(format!("source index {} out of range", result.source.index)))?;

    let finish_ids = insert_at(&finish.task_ids, destination.index, moved).ok_or_else(|| {
        violation(format!(
            "destination index {} out of range for column {}",
            destination.index, finish.id
        ))
    })?;

    Ok(replace_columns(
        board,
        [start.with_task_ids(start_ids), finish.with_task_ids(finish_ids)],
    ))
}

/// Resolve the source column and confirm it holds the dragged task at the source index.
fn source_column<'a>(board: &'a Board, result: &DragResult) -> Result<&'a Column, BoardError> {
    let source = &result.source;
    let column = board
        .column(&source.droppable_id)
        .ok_or_else(|| violation(format!("unknown source column {}", source.droppable_id)))?;

    if board.task(&result.draggable_id).is_none() {
        return Err(violation(format!("unknown task {}", result.draggable_id)));
    }

    match column.task_ids.get(source.index) {
        Some(id) if id == &result.draggable_id => Ok(column),
        Some(id) => Err(violation(format!(
            "column {} has {} at index {}, not {}",
            column.id, id, source.index, result.draggable_id
        ))),
        None => Err(violation(format!(
            "source index {} out of range for column {}",
            source.index, column.id
        ))),
    }
}

fn replace_columns<const N: usize>(board: &Board, replaced: [Column; N]) -> Board {
    let mut columns = board.columns.clone();
    for column in replaced {
        columns.insert(column.id.clone(), Arc::new(column));
    }
    Board {
        tasks: Arc::clone(&board.tasks),
        columns,
        column_order: board.column_order.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Task;

    fn make_board() -> Board {
        let mut col1 = Column::new("col-1", "To do");
        col1.task_ids = vec!["t1".into(), "t2".into(), "t3".into()];
        let col2 = Column::new("col-2", "Done");
        Board::new(
            vec![Task::new("t1", "one"), Task::new("t2", "two"), Task::new("t3", "three")],
            vec![col1, col2],
            vec!["col-1".into(), "col-2".into()],
        )
        .unwrap()
    }

    fn moved(transition: Transition) -> Board {
        match transition {
            Transition::Moved(board) => board,
            Transition::Unchanged => panic!("expected a move"),
        }
    }

    #[test]
    fn test_cancelled_is_unchanged() {
        let board = make_board();
        let result = DragResult::task("t1", "col-1", 0, "col-2", 0).cancelled();
        assert_eq!(reduce(&board, &result).unwrap(), Transition::Unchanged);
    }

    #[test]
    fn test_in_place_is_unchanged() {
        let board = make_board();
        let result = DragResult::task("t2", "col-1", 1, "col-1", 1);
        assert_eq!(reduce(&board, &result).unwrap(), Transition::Unchanged);
    }

    #[test]
    fn test_cross_column_move() {
        let board = make_board();
        let next = moved(reduce(&board, &DragResult::task("t1", "col-1", 0, "col-2", 0)).unwrap());

        assert_eq!(next.column("col-1").unwrap().task_ids, vec!["t2", "t3"]);
        assert_eq!(next.column("col-2").unwrap().task_ids, vec!["t1"]);
        assert!(next.validate().is_ok());
    }

    #[test]
    fn test_same_column_move_later() {
        let board = make_board();
        let next = moved(reduce(&board, &DragResult::task("t1", "col-1", 0, "col-1", 2)).unwrap());

        assert_eq!(next.column("col-1").unwrap().task_ids, vec!["t2", "t3", "t1"]);
        assert!(Arc::ptr_eq(
            board.column_handle("col-2").unwrap(),
            next.column_handle("col-2").unwrap()
        ));
    }

    #[test]
    fn test_column_reorder_leaves_columns_untouched() {
        let board = make_board();
        let next = moved(reduce(&board, &DragResult::column("col-1", 0, 1)).unwrap());

        assert_eq!(next.column_order(), ["col-2", "col-1"]);
        for id in board.column_order() {
            assert!(Arc::ptr_eq(board.column_handle(id).unwrap(), next.column_handle(id).unwrap()));
        }
        assert!(next.shares_tasks_with(&board));
    }

    #[test]
    fn test_wrong_task_at_source_index() {
        let board = make_board();
        let err = reduce(&board, &DragResult::task("t1", "col-1", 1, "col-2", 0)).unwrap_err();
        assert!(matches!(err, BoardError::InvariantViolation(_)));
    }

    #[test]
    fn test_unknown_destination_column() {
        let board = make_board();
        let err = reduce(&board, &DragResult::task("t1", "col-1", 0, "col-9", 0)).unwrap_err();
        assert!(matches!(err, BoardError::InvariantViolation(_)));
    }

    #[test]
    fn test_input_board_untouched_after_move() {
        let board = make_board();
        let before = board.clone();
        let _ = reduce(&board, &DragResult::task("t3", "col-1", 2, "col-2", 0)).unwrap();
        assert_eq!(board, before);
    }

    #[test]
    fn test_error_display() {
        let err = BoardError::DropDisabled {
            column_id: "col-1".into(),
        };
        assert_eq!(err.to_string(), "column col-1 does not accept this drop");
    }
}
