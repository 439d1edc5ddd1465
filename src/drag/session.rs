//! Drag session - the single-slot record of the card being dragged.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Dragging     (begin: card exists at the recorded position)
//! Dragging -> Idle     (end, or a drop that consumed the session)
//! Dragging -> Dragging (begin: rejected, end the current drag first)
//! ```
//!
//! The origin triple is also encoded for the platform's native drag channel so
//! a drop handler without the in-memory session can still recover it.

use crate::board::BoardState;
use crate::constants::{DRAG_EFFECT, TRANSFER_MIME_TYPE};
use crate::error::{DragError, TransferError};
use crate::types::{Card, ColumnId};
use serde::{Deserialize, Serialize};

/// Where a dragged card came from, captured at drag start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragOrigin {
    #[serde(rename = "columnId")]
    pub column: ColumnId,
    pub index: usize,
    #[serde(rename = "text")]
    pub payload: Card,
}

impl DragOrigin {
    pub fn new(column: impl Into<ColumnId>, index: usize, payload: Card) -> Self {
        Self {
            column: column.into(),
            index,
            payload,
        }
    }

    /// Encode for the native drag channel.
    pub fn to_transfer_data(&self) -> String {
        serde_json::json!({
            "columnId": self.column,
            "index": self.index,
            "text": self.payload,
        })
        .to_string()
    }

    /// Decode data read back from the native drag channel.
    pub fn from_transfer_data(data: &str) -> Result<Self, TransferError> {
        if data.trim().is_empty() {
            return Err(TransferError::Empty);
        }
        Ok(serde_json::from_str(data)?)
    }
}

/// What the view adapter writes into the native drag channel at drag start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferData {
    pub mime_type: &'static str,
    pub effect_allowed: &'static str,
    pub data: String,
}

impl TransferData {
    pub fn for_origin(origin: &DragOrigin) -> Self {
        Self {
            mime_type: TRANSFER_MIME_TYPE,
            effect_allowed: DRAG_EFFECT,
            data: origin.to_transfer_data(),
        }
    }
}

/// Drag gesture state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    /// No card is being dragged
    #[default]
    Idle,

    /// A card is being dragged; its slot stays in the layout but is hidden
    Dragging { origin: DragOrigin },
}

/// Tracks the single in-flight drag.
#[derive(Debug, Default)]
pub struct DragSession {
    state: DragState,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start dragging the card at `origin`.
    ///
    /// Fails if a drag is already active or if `origin` does not name the
    /// card currently at that position.
    pub fn begin(&mut self, board: &BoardState, origin: DragOrigin) -> Result<(), DragError> {
        if let DragState::Dragging { origin: active } = &self.state {
            return Err(DragError::AlreadyActive {
                column: active.column.clone(),
                index: active.index,
            });
        }
        if !board.has_column(&origin.column) {
            return Err(DragError::UnknownColumn(origin.column));
        }
        match board.card(&origin.column, origin.index) {
            None => {
                return Err(DragError::CardOutOfRange {
                    column: origin.column,
                    index: origin.index,
                });
            }
            Some(card) if *card != origin.payload => {
                return Err(DragError::PayloadMismatch {
                    column: origin.column,
                    index: origin.index,
                });
            }
            Some(_) => {}
        }

        tracing::debug!(column = %origin.column, index = origin.index, "Drag started");
        self.state = DragState::Dragging { origin };
        Ok(())
    }

    /// Clear the session. Safe to call when idle.
    pub fn end(&mut self) -> Option<DragOrigin> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging { origin } => {
                tracing::debug!(column = %origin.column, index = origin.index, "Drag ended");
                Some(origin)
            }
            DragState::Idle => None,
        }
    }

    /// The recorded origin, if a drag is active.
    pub fn snapshot(&self) -> Option<&DragOrigin> {
        match &self.state {
            DragState::Dragging { origin } => Some(origin),
            DragState::Idle => None,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// The card the view should hide (not remove) while dragging.
    pub fn suppressed_card(&self) -> Option<(&ColumnId, usize)> {
        self.snapshot().map(|origin| (&origin.column, origin.index))
    }

    pub fn is_suppressed(&self, column: &ColumnId, index: usize) -> bool {
        self.suppressed_card()
            .is_some_and(|(c, i)| c == column && i == index)
    }
}
