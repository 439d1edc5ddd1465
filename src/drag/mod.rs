//! Drag-and-drop engine.
//!
//! ## Modules
//!
//! - `session` - the single in-flight drag and its native transfer encoding
//! - `placeholder` - insertion slot computation, throttled to one per frame
//!
//! Committing a drop lives in [`crate::commit`]; wiring the gesture events
//! together lives in [`crate::controller`].

pub mod placeholder;
pub mod session;

pub use placeholder::{
    CardRect, InsertionDescriptor, PlaceholderMark, PlaceholderPositioner, PositionerStats,
    compute_insertion,
};
pub use session::{DragOrigin, DragSession, DragState, TransferData};
