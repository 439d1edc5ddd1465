//! Application-wide constants.
//!
//! Centralizes the storage key, default column set and timing budgets so the
//! config defaults and the drag engine agree on them.

// ============================================================================
// Persistence
// ============================================================================

/// Key the serialized board is stored under
pub const DEFAULT_STORAGE_KEY: &str = "trelloBoardState";

/// Column ids of a board created without configuration
pub const DEFAULT_COLUMNS: [&str; 3] = ["column1", "column2", "column3"];

// ============================================================================
// Drag & Drop
// ============================================================================

/// MIME type of the origin triple carried by the native drag channel
pub const TRANSFER_MIME_TYPE: &str = "text/plain";

/// Effect the view adapter should advertise for card drags
pub const DRAG_EFFECT: &str = "move";

// ============================================================================
// Timing
// ============================================================================

/// One rendering frame at 60 FPS, in milliseconds
pub const FRAME_BUDGET_MS: f64 = 16.67;

/// Threshold for logging a slow move commit, in milliseconds
pub const SLOW_COMMIT_MS: f64 = 4.0;

// ============================================================================
// Logging
// ============================================================================

/// Filter used when neither config nor `RUST_LOG` provides one
pub const DEFAULT_LOG_FILTER: &str = "laneboard=info";
