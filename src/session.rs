//! Drag session: holds the current board snapshot and consumes gesture notifications.

use crate::drag::{DragEvent, DragKind, DragResult, DragStart, DragUpdate, DraggableLocation};
use crate::eligibility::{ColumnEligibility, DropPolicy, drop_eligibility, home_index};
use crate::reducer::{BoardError, Transition, reduce};
use crate::types::Board;
use chrono::{DateTime, Utc};
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::BufRead;
use std::sync::Arc;

/// The drag currently in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveDrag {
    pub draggable_id: String,
    pub kind: DragKind,
    pub source: DraggableLocation,
    /// Position of the source column, for task drags
    pub home_index: Option<usize>,
    /// Last destination reported by a drag update
    pub hovered: Option<DraggableLocation>,
}

/// What happened to a drag result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Moved,
    Unchanged,
    Rejected(String),
}

/// One entry in the session's transition log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub at: DateTime<Utc>,
    pub draggable_id: String,
    pub kind: DragKind,
    pub outcome: Outcome,
}

/// Counts from replaying a recorded event stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub moved: usize,
    pub unchanged: usize,
    pub rejected: usize,
    /// Lines that could not be parsed as a drag event
    pub skipped: usize,
}

/// Owns the current board and applies drag results to it.
pub struct Session {
    board: Arc<Board>,
    policy: DropPolicy,
    active: Option<ActiveDrag>,
    log: Vec<TransitionRecord>,
}

impl Session {
    /// Start a session from an initial board.
    pub fn new(board: Board, policy: DropPolicy) -> Self {
        Self {
            board: Arc::new(board),
            policy,
            active: None,
            log: Vec::new(),
        }
    }

    /// The current snapshot.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Shared handle to the current snapshot.
    pub fn snapshot(&self) -> Arc<Board> {
        Arc::clone(&self.board)
    }

    pub fn policy(&self) -> DropPolicy {
        self.policy
    }

    /// The drag in progress, if any.
    pub fn active_drag(&self) -> Option<&ActiveDrag> {
        self.active.as_ref()
    }

    /// Every drag result handled so far, oldest first.
    pub fn history(&self) -> &[TransitionRecord] {
        &self.log
    }

    /// Per-column drop flags for the drag in progress.
    pub fn drop_eligibility(&self) -> Vec<ColumnEligibility> {
        let home = self.active.as_ref().and_then(|drag| drag.home_index);
        drop_eligibility(&self.board, self.policy, home)
    }

    /// Handle a drag-start notification.
    pub fn on_drag_start(&mut self, start: DragStart) {
        if let Some(previous) = &self.active {
            log::warn!(
                "Drag of {} started while {} was still active; replacing it",
                start.draggable_id,
                previous.draggable_id
            );
        }

        let home = match start.kind {
            DragKind::Task => home_index(&self.board, &start.source.droppable_id),
            DragKind::Column => None,
        };
        log::debug!(
            "Drag start: {} {:?} from {}[{}], home index {:?}",
            start.draggable_id,
            start.kind,
            start.source.droppable_id,
            start.source.index,
            home
        );

        self.active = Some(ActiveDrag {
            draggable_id: start.draggable_id,
            kind: start.kind,
            source: start.source,
            home_index: home,
            hovered: None,
        });
    }

    /// Handle a drag-update notification.
    pub fn on_drag_update(&mut self, update: DragUpdate) {
        match &mut self.active {
            Some(drag) if drag.draggable_id == update.draggable_id => {
                log::debug!("Drag update: {} over {:?}", update.draggable_id, update.destination);
                drag.hovered = update.destination;
            }
            _ => log::debug!("Ignoring update for {} with no matching drag", update.draggable_id),
        }
    }

    /// Handle a drag-end notification, replacing the snapshot on success.
    ///
    /// On error the previous snapshot is kept and the rejection is logged.
    pub fn on_drag_end(&mut self, result: DragResult) -> Result<Arc<Board>, BoardError> {
        let active = self.active.take();
        let home = match (&active, result.kind) {
            (Some(drag), _) if drag.draggable_id == result.draggable_id => drag.home_index,
            (_, DragKind::Task) => home_index(&self.board, &result.source.droppable_id),
            (_, DragKind::Column) => None,
        };

        match self.apply(&result, home) {
            Ok(Transition::Moved(next)) => {
                log::info!("Applied {:?} move of {}", result.kind, result.draggable_id);
                self.board = Arc::new(next);
                self.record(&result, Outcome::Moved);
                Ok(self.snapshot())
            }
            Ok(Transition::Unchanged) => {
                self.record(&result, Outcome::Unchanged);
                Ok(self.snapshot())
            }
            Err(e) => {
                log::warn!("Rejected drop of {}: {}", result.draggable_id, e);
                self.record(&result, Outcome::Rejected(e.to_string()));
                Err(e)
            }
        }
    }

    /// Route a tagged event to its handler.
    pub fn dispatch(&mut self, event: DragEvent) -> Result<(), BoardError> {
        match event {
            DragEvent::Start(start) => self.on_drag_start(start),
            DragEvent::Update(update) => self.on_drag_update(update),
            DragEvent::End(result) => {
                self.on_drag_end(result)?;
            }
        }
        Ok(())
    }

    /// Replay a JSON Lines stream of drag events.
    ///
    /// Blank lines are skipped. Lines that fail to parse and drops that are
    /// rejected are counted and logged, and replay continues.
    pub fn replay(&mut self, reader: impl BufRead) -> Result<ReplaySummary> {
        let mut summary = ReplaySummary::default();

        for (n, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read event line {}", n + 1))?;
            if line.trim().is_empty() {
                continue;
            }

            let event = match serde_json::from_str::<DragEvent>(&line) {
                Ok(event) => event,
                Err(e) => {
                    log::warn!("Failed to parse event at line {}: {}", n + 1, e);
                    summary.skipped += 1;
                    continue;
                }
            };

            if !matches!(event, DragEvent::End(_)) {
                // Start/update cannot fail
                let _ = self.dispatch(event);
                continue;
            }

            let before = self.log.len();
            let _ = self.dispatch(event);
            match self.log.get(before).map(|r| &r.outcome) {
                Some(Outcome::Moved) => summary.moved += 1,
                Some(Outcome::Unchanged) => summary.unchanged += 1,
                Some(Outcome::Rejected(_)) => summary.rejected += 1,
                None => {}
            }
        }

        Ok(summary)
    }

    fn apply(&self, result: &DragResult, home: Option<usize>) -> Result<Transition, BoardError> {
        if result.kind == DragKind::Task
            && let Some(destination) = &result.destination
            && let Some(position) = self.board.column_index(&destination.droppable_id)
            && self.policy.is_drop_disabled(position, home)
        {
            return Err(BoardError::DropDisabled {
                column_id: destination.droppable_id.clone(),
            });
        }

        reduce(&self.board, result)
    }

    fn record(&mut self, result: &DragResult, outcome: Outcome) {
        self.log.push(TransitionRecord {
            at: Utc::now(),
            draggable_id: result.draggable_id.clone(),
            kind: result.kind,
            outcome,
        });
    }
}
