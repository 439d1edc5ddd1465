//! Error types for board operations
//!
//! Board mutations, persistence and drag gestures each get their own enum.
//! Only the text-editing entry points hand these to callers; the drag/drop
//! path logs them and degrades to a no-op.

use crate::types::ColumnId;
use thiserror::Error;

/// Errors raised by the key-value persistence backends
#[derive(Error, Debug)]
pub enum StoreError {
    /// IO error from a file-backed store
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error reported by the host storage (quota, access denied, ...)
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Errors that can occur while reading or mutating the board
#[derive(Error, Debug)]
pub enum BoardError {
    /// Column id is not part of the configured set
    #[error("Unknown column: {0}")]
    UnknownColumn(ColumnId),

    /// Index does not address a card in the column
    #[error("No card at index {index} in column {column} (length {len})")]
    CardOutOfRange {
        column: ColumnId,
        index: usize,
        len: usize,
    },

    /// Card text is empty after trimming
    #[error("Card text is empty")]
    EmptyCard,

    /// Board could not be serialized
    #[error("Serialize error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Board could not be written to storage
    #[error("Save failed: {0}")]
    Store(#[from] StoreError),
}

/// Reasons a drag gesture cannot start
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DragError {
    /// Another card is still being dragged
    #[error("A drag is already in progress from {column}[{index}]")]
    AlreadyActive { column: ColumnId, index: usize },

    /// Column id is not part of the configured set
    #[error("Unknown column: {0}")]
    UnknownColumn(ColumnId),

    /// Index does not address a card in the column
    #[error("No card at index {index} in column {column}")]
    CardOutOfRange { column: ColumnId, index: usize },

    /// Payload does not match the card currently at the index
    #[error("Card at {column}[{index}] does not match the dragged payload")]
    PayloadMismatch { column: ColumnId, index: usize },

    /// Card is open in the text editor
    #[error("Card at {column}[{index}] is being edited")]
    CardBeingEdited { column: ColumnId, index: usize },
}

/// Errors decoding origin data carried by the native drag channel
#[derive(Error, Debug)]
pub enum TransferError {
    /// Channel carried no data
    #[error("Drag transfer data is empty")]
    Empty,

    /// Data is not a valid origin triple
    #[error("Malformed drag transfer data: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Result type alias for board operations
pub type BoardResult<T> = Result<T, BoardError>;
