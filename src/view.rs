//! Interfaces between the board core and the view that renders it.
//!
//! The core never touches rendering primitives. The view supplies geometry
//! through [`CardLayout`] and receives [`StateChange`] notifications so it can
//! re-render the affected columns.

use crate::board::BoardState;
use crate::drag::CardRect;
use crate::types::ColumnId;
use std::collections::HashMap;

/// Current on-screen geometry of the rendered cards.
pub trait CardLayout {
    /// Rects of the rendered (non-placeholder) cards of `column`, top to
    /// bottom. Includes the hidden card being dragged.
    fn card_rects(&self, column: &ColumnId) -> Vec<CardRect>;
}

/// Fixed layout table, for hosts that measure up front and for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticLayout {
    columns: HashMap<ColumnId, Vec<CardRect>>,
}

impl StaticLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_column(&mut self, column: impl Into<ColumnId>, rects: Vec<CardRect>) {
        self.columns.insert(column.into(), rects);
    }

    /// Lay out `count` cards of equal height stacked with a gap.
    pub fn with_uniform_column(
        mut self,
        column: impl Into<ColumnId>,
        count: usize,
        card_height: f64,
        gap: f64,
    ) -> Self {
        let rects = (0..count)
            .map(|i| CardRect::new(i as f64 * (card_height + gap), card_height))
            .collect();
        self.set_column(column, rects);
        self
    }
}

impl CardLayout for StaticLayout {
    fn card_rects(&self, column: &ColumnId) -> Vec<CardRect> {
        self.columns.get(column).cloned().unwrap_or_default()
    }
}

/// Why the board changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Edited,
    Deleted,
    Moved,
}

/// Notification sent to observers after every committed mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateChange {
    pub kind: ChangeKind,
    /// Columns whose cards changed, in board order
    pub affected: Vec<ColumnId>,
    /// Whether the new state reached storage
    pub persisted: bool,
}

/// Handle returned by `subscribe`, used to detach the observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub(crate) u64);

/// Callback invoked with the new state after each mutation.
pub type StateObserver = Box<dyn FnMut(&BoardState, &StateChange)>;
