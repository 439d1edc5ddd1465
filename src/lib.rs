//! Laneboard - drag-and-drop core for a three-lane kanban board.
//!
//! The crate owns the board, the in-flight drag, the placeholder and the
//! move commit. Rendering stays with the host, which talks to
//! [`BoardController`] through raw gesture events and a [`view::CardLayout`].

pub mod board;
pub mod commit;
pub mod config;
pub mod constants;
pub mod controller;
pub mod drag;
pub mod edit;
pub mod error;
pub mod logging;
pub mod perf;
pub mod types;
pub mod view;

pub use board::BoardState;
pub use board::store::{FileStore, KeyValueStore, MemoryStore};
pub use commit::{AbandonReason, MoveOutcome, commit_move};
pub use config::BoardConfig;
pub use controller::{BoardController, DropOutcome, IgnoreReason};
pub use drag::{DragOrigin, InsertionDescriptor, PlaceholderMark};
pub use error::{BoardError, DragError, StoreError, TransferError};
pub use types::{Card, ColumnId};
