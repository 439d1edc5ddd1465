//! Move commits - apply a resolved drop to the board atomically.
//!
//! Either the whole move happens or nothing does. Every check runs before the
//! first mutation, so an abandoned move leaves the board untouched.
//!
//! ## Index rules
//!
//! `target_index` is expressed against the target column as rendered before
//! the move (the dragged card still occupies its slot).
//!
//! - Same column: remove, then shift the target left by one if it was after
//!   the source. In `[A,B,C,D]`, moving 0 to slot 4 (after the last card)
//!   gives `[B,C,D,A]`; moving 0 to slot 3 (before `D`) gives `[B,C,A,D]`.
//! - Cross column: remove from source, clamp the target to the target column
//!   length, insert.

use crate::board::BoardState;
use crate::constants::SLOW_COMMIT_MS;
use crate::drag::DragOrigin;
use crate::profile_scope;
use crate::types::ColumnId;

/// Why a move was dropped without touching the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbandonReason {
    /// Source column is not on the board
    UnknownSourceColumn,
    /// Target column is not on the board
    UnknownTargetColumn,
    /// Source index no longer addresses a card
    SourceMissing { len: usize },
    /// A different card now sits at the source index
    SourceChanged,
}

/// Result of [`commit_move`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Card now lives at `to_column[to_index]`
    Moved {
        from_column: ColumnId,
        from_index: usize,
        to_column: ColumnId,
        to_index: usize,
    },
    /// Nothing changed
    Abandoned(AbandonReason),
}

impl MoveOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }

    /// Whether the card ended where it started.
    pub fn is_in_place(&self) -> bool {
        match self {
            Self::Moved {
                from_column,
                from_index,
                to_column,
                to_index,
            } => from_column == to_column && from_index == to_index,
            Self::Abandoned(_) => false,
        }
    }
}

/// Same-column destination after removing the card at `source`.
#[inline]
pub fn compensated_index(source: usize, target: usize) -> usize {
    if source < target { target - 1 } else { target }
}

/// Move the dragged card to `target_index` of `target`.
pub fn commit_move(
    board: &mut BoardState,
    origin: &DragOrigin,
    target: &ColumnId,
    target_index: usize,
) -> MoveOutcome {
    profile_scope!("commit_move", SLOW_COMMIT_MS);

    let source = &origin.column;
    if !board.has_column(source) {
        return abandon(origin, AbandonReason::UnknownSourceColumn);
    }
    if !board.has_column(target) {
        return abandon(origin, AbandonReason::UnknownTargetColumn);
    }
    match board.card(source, origin.index) {
        None => {
            let len = board.len(source);
            return abandon(origin, AbandonReason::SourceMissing { len });
        }
        Some(card) if *card != origin.payload => {
            return abandon(origin, AbandonReason::SourceChanged);
        }
        Some(_) => {}
    }

    let to_index = if source == target {
        let Some(cards) = board.column_mut(source) else {
            return abandon(origin, AbandonReason::UnknownSourceColumn);
        };
        let clamped = target_index.min(cards.len());
        let card = cards.remove(origin.index);
        let index = compensated_index(origin.index, clamped);
        cards.insert(index, card);
        index
    } else {
        let card = match board.column_mut(source) {
            Some(cards) => cards.remove(origin.index),
            None => return abandon(origin, AbandonReason::UnknownSourceColumn),
        };
        let Some(cards) = board.column_mut(target) else {
            // Checked above; put the card back so the board is unchanged.
            if let Some(cards) = board.column_mut(source) {
                cards.insert(origin.index, card);
            }
            return abandon(origin, AbandonReason::UnknownTargetColumn);
        };
        let index = target_index.min(cards.len());
        cards.insert(index, card);
        index
    };

    tracing::info!(
        from = %source,
        from_index = origin.index,
        to = %target,
        to_index,
        "Card moved"
    );

    MoveOutcome::Moved {
        from_column: source.clone(),
        from_index: origin.index,
        to_column: target.clone(),
        to_index,
    }
}

fn abandon(origin: &DragOrigin, reason: AbandonReason) -> MoveOutcome {
    tracing::warn!(
        column = %origin.column,
        index = origin.index,
        ?reason,
        "Move abandoned, board unchanged"
    );
    MoveOutcome::Abandoned(reason)
}
