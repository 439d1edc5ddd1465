//! Card text editing - at most one card is open in the editor at a time.
//!
//! ```text
//! Idle -> Editing      (begin on a card)
//! Editing -> Editing   (begin on another card: the previous edit is aborted)
//! Editing -> Idle      (finish on Enter/blur, cancel on Escape)
//! ```
//!
//! A card under edit cannot be dragged.

use crate::board::BoardState;
use crate::error::{BoardError, BoardResult};
use crate::types::{Card, ColumnId};

/// The card being edited and its text when editing started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTarget {
    pub column: ColumnId,
    pub index: usize,
    pub original: Card,
}

#[derive(Debug, Default)]
pub struct EditSession {
    active: Option<EditTarget>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the editor on `column[index]`.
    ///
    /// Returns the edit that was aborted to make room, if any. Beginning on
    /// the card already being edited is a no-op.
    pub fn begin(
        &mut self,
        board: &BoardState,
        column: &ColumnId,
        index: usize,
    ) -> BoardResult<Option<EditTarget>> {
        if self.is_editing(column, index) {
            return Ok(None);
        }
        if !board.has_column(column) {
            return Err(BoardError::UnknownColumn(column.clone()));
        }
        let original = board
            .card(column, index)
            .cloned()
            .ok_or_else(|| BoardError::CardOutOfRange {
                column: column.clone(),
                index,
                len: board.len(column),
            })?;

        let aborted = self.active.replace(EditTarget {
            column: column.clone(),
            index,
            original,
        });
        if let Some(prev) = &aborted {
            tracing::debug!(column = %prev.column, index = prev.index, "Edit aborted by a new edit");
        }
        Ok(aborted)
    }

    pub fn active(&self) -> Option<&EditTarget> {
        self.active.as_ref()
    }

    pub fn is_editing(&self, column: &ColumnId, index: usize) -> bool {
        self.active
            .as_ref()
            .is_some_and(|t| &t.column == column && t.index == index)
    }

    /// Close the editor, handing back its target for the caller to apply.
    pub fn take(&mut self) -> Option<EditTarget> {
        self.active.take()
    }

    /// Keep the target on the same card after a committed move.
    ///
    /// `to_index` is the moved card's final index. The card under edit
    /// shifts left if it sat after the removed card, then right if it sits at
    /// or after the inserted one.
    pub fn follow_move(
        &mut self,
        from_column: &ColumnId,
        from_index: usize,
        to_column: &ColumnId,
        to_index: usize,
    ) {
        let Some(target) = self.active.as_mut() else {
            return;
        };
        let before = (target.column.clone(), target.index);

        if &target.column == from_column && target.index == from_index {
            target.column = to_column.clone();
            target.index = to_index;
        } else {
            if &target.column == from_column && target.index > from_index {
                target.index -= 1;
            }
            if &target.column == to_column && target.index >= to_index {
                target.index += 1;
            }
        }

        if (&before.0, before.1) != (&target.column, target.index) {
            tracing::debug!(
                from = %before.0,
                from_index = before.1,
                to = %target.column,
                to_index = target.index,
                "Edit target re-indexed after move"
            );
        }
    }

    /// Close the editor discarding the typed text.
    pub fn cancel(&mut self) -> Option<EditTarget> {
        let cancelled = self.active.take();
        if let Some(target) = &cancelled {
            tracing::debug!(column = %target.column, index = target.index, "Edit cancelled");
        }
        cancelled
    }
}
