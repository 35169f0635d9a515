//! Per-column drop eligibility while a task is being dragged.

use crate::types::Board;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which columns may receive a dragged task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DropPolicy {
    /// Tasks only move forward: columns left of the task's home column refuse drops.
    #[default]
    ForwardOnly,
    /// Any column accepts any task.
    Unrestricted,
}

impl DropPolicy {
    /// Whether the column at `position` refuses drops, given the dragged task's home column.
    ///
    /// With no active task drag (`home_index == None`) nothing is disabled.
    pub fn is_drop_disabled(&self, position: usize, home_index: Option<usize>) -> bool {
        match (self, home_index) {
            (DropPolicy::ForwardOnly, Some(home)) => position < home,
            _ => false,
        }
    }
}

impl FromStr for DropPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "forward-only" => Ok(DropPolicy::ForwardOnly),
            "unrestricted" => Ok(DropPolicy::Unrestricted),
            other => Err(format!(
                "unknown drop policy '{}': expected forward-only or unrestricted",
                other
            )),
        }
    }
}

impl std::fmt::Display for DropPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DropPolicy::ForwardOnly => write!(f, "forward-only"),
            DropPolicy::Unrestricted => write!(f, "unrestricted"),
        }
    }
}

/// Drop flag for one column, as read by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnEligibility {
    pub column_id: String,
    pub position: usize,
    pub is_drop_disabled: bool,
}

/// Position in `column_order` of the column a drag started from.
pub fn home_index(board: &Board, source_droppable_id: &str) -> Option<usize> {
    board.column_index(source_droppable_id)
}

/// Eligibility of every column, in display order.
pub fn drop_eligibility(board: &Board, policy: DropPolicy, home_index: Option<usize>) -> Vec<ColumnEligibility> {
    board
        .column_order()
        .iter()
        .enumerate()
        .map(|(position, column_id)| ColumnEligibility {
            column_id: column_id.clone(),
            position,
            is_drop_disabled: policy.is_drop_disabled(position, home_index),
        })
        .collect()
}
