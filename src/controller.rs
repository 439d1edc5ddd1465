//! Board controller - the single owner of board state and gesture state.
//!
//! The view adapter forwards raw events here and re-renders from the
//! notifications it gets back:
//!
//! ```text
//! drag_begin ─► drag_over_column* ─► run_frame (once per frame) ─► drop | drag_end
//!                     │                                              │
//!               drag_leave_column                         commit ─► save ─► observers
//! ```
//!
//! Every failure on the drag path (stale origin, unreadable transfer data,
//! unknown column) is logged and turns into a no-op.

use crate::board::BoardState;
use crate::board::store::KeyValueStore;
use crate::commit::{AbandonReason, MoveOutcome, commit_move};
use crate::config::BoardConfig;
use crate::drag::{
    DragOrigin, DragSession, InsertionDescriptor, PlaceholderMark, PlaceholderPositioner,
    PositionerStats, TransferData,
};
use crate::edit::{EditSession, EditTarget};
use crate::error::{BoardError, BoardResult, DragError};
use crate::logging;
use crate::perf::{ScopedTimer, is_profiling_enabled};
use crate::types::{Card, ColumnId};
use crate::view::{CardLayout, ChangeKind, ObserverId, StateChange, StateObserver};

/// Why a drop did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// No drag session and no transfer data
    NoOrigin,
    /// Transfer data could not be decoded
    BadTransferData,
    /// Drop target is not one of the board's columns
    UnknownColumn,
}

/// Result of a drop event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Card was moved (possibly back onto its own slot)
    Moved {
        from_column: ColumnId,
        from_index: usize,
        to_column: ColumnId,
        to_index: usize,
        persisted: bool,
    },
    /// Dragged card was no longer at its origin; board unchanged
    Abandoned(AbandonReason),
    /// Drop was not actionable; board unchanged
    Ignored(IgnoreReason),
}

impl DropOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

pub struct BoardController<S: KeyValueStore> {
    config: BoardConfig,
    store: S,
    board: BoardState,
    drag: DragSession,
    placeholder: PlaceholderPositioner,
    edit: EditSession,
    observers: Vec<(ObserverId, StateObserver)>,
    next_observer_id: u64,
}

impl<S: KeyValueStore> BoardController<S> {
    /// Load the board from `store` and start idle.
    pub fn new(config: BoardConfig, store: S) -> Self {
        let board = BoardState::load(&store, &config.storage_key, config.columns.iter().cloned());
        Self {
            config,
            store,
            board,
            drag: DragSession::new(),
            placeholder: PlaceholderPositioner::new(),
            edit: EditSession::new(),
            observers: Vec::new(),
            next_observer_id: 0,
        }
    }

    /// Host entry point: install logging from `config.log_filter`, then load.
    ///
    /// Hosts that set up their own `tracing` subscriber call [`new`] instead.
    ///
    /// [`new`]: Self::new
    pub fn start(config: BoardConfig, store: S) -> Self {
        logging::init(&config.log_filter);
        Self::new(config, store)
    }

    pub fn with_defaults(store: S) -> Self {
        Self::new(BoardConfig::default(), store)
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ==================== Observers ====================

    /// Register a callback run after every committed mutation.
    pub fn subscribe<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(&BoardState, &StateChange) + 'static,
    {
        let id = ObserverId(self.next_observer_id);
        self.next_observer_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    // ==================== Drag Events ====================

    /// A card started being dragged.
    ///
    /// Returns what the view should put on the native drag channel.
    pub fn drag_begin(
        &mut self,
        column: impl Into<ColumnId>,
        index: usize,
        payload: &str,
    ) -> Result<TransferData, DragError> {
        let column = column.into();
        if self.edit.is_editing(&column, index) {
            return Err(DragError::CardBeingEdited { column, index });
        }
        let payload = Card::new(payload)
            .map_err(|_| DragError::PayloadMismatch { column: column.clone(), index })?;

        let origin = DragOrigin::new(column, index, payload);
        self.drag.begin(&self.board, origin.clone())?;
        self.placeholder.clear();
        Ok(TransferData::for_origin(&origin))
    }

    /// Pointer moved over `column` during a drag.
    ///
    /// Returns `true` when the view must schedule a [`run_frame`] call; extra
    /// moves before that frame are coalesced.
    ///
    /// [`run_frame`]: Self::run_frame
    pub fn drag_over_column(&mut self, column: impl Into<ColumnId>, pointer_y: f64) -> bool {
        let column = column.into();
        if !self.drag.is_active() || !self.board.has_column(&column) {
            return false;
        }
        let needs_frame = self.placeholder.request(column.clone(), pointer_y);
        if needs_frame {
            tracing::trace!(column = %column, pointer_y, "Placeholder frame requested");
        }
        needs_frame
    }

    /// Perform the pending placeholder recomputation. Call once per frame.
    pub fn run_frame(&mut self, layout: &dyn CardLayout) -> Option<&PlaceholderMark> {
        let _timer = is_profiling_enabled()
            .then(|| ScopedTimer::new("run_frame", self.config.frame_budget_ms));

        if !self.drag.is_active() {
            self.placeholder.clear();
            return None;
        }
        self.placeholder.flush(layout)
    }

    /// Pointer left `column`'s drop zone (not just onto one of its children).
    pub fn drag_leave_column(&mut self, column: impl Into<ColumnId>) -> bool {
        let column = column.into();
        let removed = self.placeholder.leave(&column);
        if removed {
            tracing::debug!(column = %column, "Placeholder removed on leave");
        }
        removed
    }

    /// Card released over `column`.
    ///
    /// `transfer_data` is what the native drag channel carried; it is only
    /// read when there is no in-memory drag session.
    pub fn drop(&mut self, column: impl Into<ColumnId>, transfer_data: Option<&str>) -> DropOutcome {
        let column = column.into();

        let origin = match self.drag.snapshot() {
            Some(origin) => origin.clone(),
            None => match transfer_data.map(DragOrigin::from_transfer_data) {
                Some(Ok(origin)) => {
                    tracing::debug!(column = %origin.column, index = origin.index, "Recovered drag origin from transfer data");
                    origin
                }
                Some(Err(e)) => {
                    tracing::warn!("Ignoring drop, transfer data unreadable: {}", e);
                    return DropOutcome::Ignored(IgnoreReason::BadTransferData);
                }
                None => {
                    tracing::debug!(column = %column, "Ignoring drop without a drag origin");
                    return DropOutcome::Ignored(IgnoreReason::NoOrigin);
                }
            },
        };

        if !self.board.has_column(&column) {
            tracing::warn!(column = %column, "Ignoring drop on unknown column");
            self.finish_drag();
            return DropOutcome::Ignored(IgnoreReason::UnknownColumn);
        }

        // The slot on screen, not a pending request, decides where the card goes.
        let target_index = self
            .placeholder
            .descriptor_in(&column)
            .map(InsertionDescriptor::target_index)
            .unwrap_or_else(|| self.board.len(&column));

        self.finish_drag();

        match commit_move(&mut self.board, &origin, &column, target_index) {
            MoveOutcome::Moved {
                from_column,
                from_index,
                to_column,
                to_index,
            } => {
                self.edit.follow_move(&from_column, from_index, &to_column, to_index);
                let affected = self.in_board_order(&[&from_column, &to_column]);
                let persisted = self.persist_and_notify(ChangeKind::Moved, affected);
                DropOutcome::Moved {
                    from_column,
                    from_index,
                    to_column,
                    to_index,
                    persisted,
                }
            }
            MoveOutcome::Abandoned(reason) => DropOutcome::Abandoned(reason),
        }
    }

    /// Drag finished, dropped or not. Safe to call when idle.
    pub fn drag_end(&mut self) {
        self.finish_drag();
    }

    fn finish_drag(&mut self) {
        self.placeholder.clear();
        self.drag.end();
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    pub fn drag_origin(&self) -> Option<&DragOrigin> {
        self.drag.snapshot()
    }

    /// Card the view should keep in layout but hide.
    pub fn suppressed_card(&self) -> Option<(&ColumnId, usize)> {
        self.drag.suppressed_card()
    }

    /// Placeholder the view should draw, if any.
    pub fn current_insertion_descriptor(&self) -> Option<&PlaceholderMark> {
        self.placeholder.current()
    }

    /// Column whose drop zone should be highlighted.
    pub fn highlighted_column(&self) -> Option<&ColumnId> {
        self.placeholder.current().map(|m| &m.column)
    }

    pub fn positioner_stats(&self) -> PositionerStats {
        self.placeholder.stats()
    }

    // ==================== Card Text Operations ====================

    /// Append a card. Blank text is ignored and returns `false`.
    pub fn add_card(&mut self, column: impl Into<ColumnId>, text: &str) -> BoardResult<bool> {
        let column = column.into();
        let card = match Card::new(text) {
            Ok(card) => card,
            Err(BoardError::EmptyCard) => return Ok(false),
            Err(e) => return Err(e),
        };
        self.board.add_card(&column, card)?;
        self.persist_and_notify(ChangeKind::Added, vec![column]);
        Ok(true)
    }

    /// Replace a card's text. Blank or unchanged text leaves it as is.
    pub fn edit_card(
        &mut self,
        column: impl Into<ColumnId>,
        index: usize,
        text: &str,
    ) -> BoardResult<bool> {
        let column = column.into();
        let card = match Card::new(text) {
            Ok(card) => card,
            Err(BoardError::EmptyCard) => return Ok(false),
            Err(e) => return Err(e),
        };
        if !self.board.edit_card(&column, index, card)? {
            return Ok(false);
        }
        self.persist_and_notify(ChangeKind::Edited, vec![column]);
        Ok(true)
    }

    /// Remove a card, returning it.
    pub fn delete_card(&mut self, column: impl Into<ColumnId>, index: usize) -> BoardResult<Card> {
        let column = column.into();
        let card = self.board.delete_card(&column, index)?;
        if self.edit.active().is_some_and(|t| t.column == column) {
            self.edit.cancel();
        }
        self.persist_and_notify(ChangeKind::Deleted, vec![column]);
        Ok(card)
    }

    // ==================== Edit Session ====================

    /// Open the editor on a card, aborting any other open edit.
    pub fn begin_edit(&mut self, column: impl Into<ColumnId>, index: usize) -> BoardResult<()> {
        let column = column.into();
        self.edit.begin(&self.board, &column, index)?;
        Ok(())
    }

    /// Commit the editor's text (Enter or blur). Returns whether the card
    /// changed.
    pub fn finish_edit(&mut self, text: &str) -> BoardResult<bool> {
        let Some(EditTarget {
            column,
            index,
            original,
        }) = self.edit.take()
        else {
            return Ok(false);
        };

        if self.board.card(&column, index) != Some(&original) {
            tracing::warn!(column = %column, index, "Dropping edit of a card that changed while editing");
            return Ok(false);
        }
        self.edit_card(column, index, text)
    }

    /// Discard the editor's text (Escape).
    pub fn cancel_edit(&mut self) -> bool {
        self.edit.cancel().is_some()
    }

    pub fn editing(&self) -> Option<&EditTarget> {
        self.edit.active()
    }

    // ==================== Teardown ====================

    /// Cancel in-flight gestures and detach all observers.
    pub fn shutdown(&mut self) {
        self.finish_drag();
        self.edit.cancel();
        self.observers.clear();
        tracing::debug!("Board controller shut down");
    }

    // ==================== Internals ====================

    fn in_board_order(&self, columns: &[&ColumnId]) -> Vec<ColumnId> {
        self.board
            .column_ids()
            .iter()
            .filter(|id| columns.contains(id))
            .cloned()
            .collect()
    }

    /// Save the board and tell observers. Returns whether the save succeeded.
    fn persist_and_notify(&mut self, kind: ChangeKind, affected: Vec<ColumnId>) -> bool {
        let persisted = match self.board.save(&mut self.store, &self.config.storage_key) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Failed to persist board: {}", e);
                false
            }
        };

        let change = StateChange {
            kind,
            affected,
            persisted,
        };
        for (_, observer) in self.observers.iter_mut() {
            observer(&self.board, &change);
        }
        persisted
    }
}
