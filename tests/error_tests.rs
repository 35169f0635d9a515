//! Integration tests for error handling.
//!
//! Tests that drag results which do not match the board are rejected and leave state intact.

mod common;

use common::{TestEnv, sample_board};
use kanboard::{BoardError, DragKind, DragResult, DraggableLocation, load_board, reduce};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn assert_violation(result: &DragResult) {
    let board = sample_board();
    match reduce(&board, result) {
        Err(BoardError::InvariantViolation(_)) => {}
        other => panic!("expected invariant violation for {:?}, got {:?}", result, other),
    }
}

// =============================================================================
// Unknown Ids
// =============================================================================

#[test]
fn test_unknown_task_rejected() {
    assert_violation(&DragResult::task("t99", "col-1", 0, "col-2", 0));
}

#[test]
fn test_unknown_source_column_rejected() {
    assert_violation(&DragResult::task("t1", "col-9", 0, "col-2", 0));
}

#[test]
fn test_unknown_destination_column_rejected() {
    assert_violation(&DragResult::task("t1", "col-1", 0, "col-9", 0));
}

#[test]
fn test_unknown_column_drag_rejected() {
    assert_violation(&DragResult::column("col-9", 0, 1));
}

// =============================================================================
// Mismatched Indices
// =============================================================================

#[test]
fn test_task_not_at_source_index_rejected() {
    assert_violation(&DragResult::task("t1", "col-1", 2, "col-2", 0));
}

#[test]
fn test_task_in_other_column_rejected() {
    assert_violation(&DragResult::task("t4", "col-1", 0, "col-3", 0));
}

#[test]
fn test_source_index_out_of_range_rejected() {
    assert_violation(&DragResult::task("t1", "col-1", 7, "col-2", 0));
}

#[test]
fn test_destination_index_out_of_range_rejected() {
    // col-2 holds one task, so valid insert positions are 0 and 1
    assert_violation(&DragResult::task("t1", "col-1", 0, "col-2", 2));
    // Within col-1, the shortened list has two tasks: 0..=2 valid
    assert_violation(&DragResult::task("t1", "col-1", 0, "col-1", 3));
}

#[test]
fn test_column_not_at_source_index_rejected() {
    assert_violation(&DragResult::column("col-1", 1, 2));
}

#[test]
fn test_column_destination_out_of_range_rejected() {
    assert_violation(&DragResult::column("col-1", 0, 3));
}

// =============================================================================
// Rejection Keeps State
// =============================================================================

#[test]
fn test_rejected_drop_keeps_snapshot() {
    let mut env = TestEnv::new();
    let before = env.session.snapshot();

    let result = env.drag(DragResult::task("t99", "col-1", 0, "col-2", 0));

    assert!(matches!(result, Err(BoardError::InvariantViolation(_))));
    assert!(Arc::ptr_eq(&before, &env.session.snapshot()));
    assert!(env.session.active_drag().is_none());
}

#[test]
fn test_disabled_drop_keeps_snapshot() {
    let mut env = TestEnv::new();
    let before = env.session.snapshot();

    let result = env.drag(DragResult::task("t4", "col-2", 0, "col-1", 0));

    assert_eq!(
        result.unwrap_err(),
        BoardError::DropDisabled {
            column_id: "col-1".into()
        }
    );
    assert!(Arc::ptr_eq(&before, &env.session.snapshot()));
}

#[test]
fn test_session_usable_after_rejection() {
    let mut env = TestEnv::new();
    let _ = env.drag(DragResult::task("t1", "col-1", 1, "col-2", 0));

    env.drag_ok(DragResult::task("t1", "col-1", 0, "col-2", 0));
    assert_eq!(env.task_ids("col-2"), vec!["t1", "t4"]);
}

#[test]
fn test_end_without_start_still_checked() {
    let mut env = TestEnv::new();
    let result = DragResult {
        draggable_id: "t4".into(),
        kind: DragKind::Task,
        source: DraggableLocation::new("col-2", 0),
        destination: Some(DraggableLocation::new("col-1", 0)),
    };

    assert!(matches!(
        env.session.on_drag_end(result),
        Err(BoardError::DropDisabled { .. })
    ));
}

// =============================================================================
// Seed Files
// =============================================================================

#[test]
fn test_load_seed_with_shared_task_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("board.yml");
    fs::write(
        &path,
        r#"
tasks:
  t1: { id: t1, content: one }
columns:
  a: { id: a, title: A, taskIds: [t1] }
  b: { id: b, title: B, taskIds: [t1] }
columnOrder: [a, b]
"#,
    )
    .unwrap();

    assert!(load_board(&path).is_err());
}

#[test]
fn test_load_malformed_seed_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("board.json");
    fs::write(&path, "{ \"tasks\": ").unwrap();

    assert!(load_board(&path).is_err());
}
