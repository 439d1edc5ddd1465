//! Placeholder positioning - where a dragged card would land if dropped now.
//!
//! ## Performance Notes
//!
//! Pointer-move events arrive far more often than frames are drawn. Each
//! `request` only records the latest pointer position; the layout is measured
//! and the insertion slot computed once per frame in `flush`. The scan is
//! O(n) in cards-per-column and always starts from scratch, so cards added or
//! removed mid-drag can never leave a stale slot behind.

use crate::profile_scope;
use crate::types::ColumnId;
use crate::view::CardLayout;

/// Vertical extent of a rendered card, in the same coordinate space as the
/// pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardRect {
    pub top: f64,
    pub height: f64,
}

impl CardRect {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    #[inline]
    pub fn midpoint(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Insertion slot relative to the rendered cards of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertionDescriptor {
    /// Column has no cards
    Start,
    /// Before the k-th rendered card
    Before(usize),
    /// After the last rendered card (carries its index)
    After(usize),
}

impl InsertionDescriptor {
    /// 0-based insertion index in the column's pre-move card list.
    pub fn target_index(self) -> usize {
        match self {
            Self::Start => 0,
            Self::Before(k) => k,
            Self::After(last) => last + 1,
        }
    }
}

/// Compute the insertion slot for a pointer at `pointer_y`.
///
/// The first card whose midpoint lies below the pointer wins; past the last
/// midpoint the slot is after the last card.
pub fn compute_insertion(pointer_y: f64, cards: &[CardRect]) -> InsertionDescriptor {
    if cards.is_empty() {
        return InsertionDescriptor::Start;
    }
    cards
        .iter()
        .position(|card| pointer_y < card.midpoint())
        .map(InsertionDescriptor::Before)
        .unwrap_or(InsertionDescriptor::After(cards.len() - 1))
}

/// The single placeholder shown during a drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderMark {
    pub column: ColumnId,
    pub descriptor: InsertionDescriptor,
}

#[derive(Debug, Clone, PartialEq)]
struct PendingRequest {
    column: ColumnId,
    pointer_y: f64,
}

/// Counters for positioning work, to confirm coalescing under load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionerStats {
    /// Pointer-move requests received
    pub requested: u64,
    /// Requests that replaced one still waiting for a frame
    pub coalesced: u64,
    /// Layout measurements actually performed
    pub computed: u64,
}

/// Owns the placeholder and throttles its recomputation to one per frame.
#[derive(Debug, Default)]
pub struct PlaceholderPositioner {
    mark: Option<PlaceholderMark>,
    pending: Option<PendingRequest>,
    stats: PositionerStats,
}

impl PlaceholderPositioner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latest pointer position over `column`.
    ///
    /// Returns `true` when no recomputation was pending, i.e. the caller must
    /// schedule a frame task. Later requests before that frame just replace
    /// the pending position.
    pub fn request(&mut self, column: ColumnId, pointer_y: f64) -> bool {
        self.stats.requested += 1;
        let needs_frame = self.pending.is_none();
        if !needs_frame {
            self.stats.coalesced += 1;
        }
        self.pending = Some(PendingRequest { column, pointer_y });
        needs_frame
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Run the pending recomputation against the current layout.
    ///
    /// Moves the placeholder into the requested column, leaving no
    /// placeholder anywhere else.
    pub fn flush(&mut self, layout: &dyn CardLayout) -> Option<&PlaceholderMark> {
        profile_scope!("placeholder_flush");

        if let Some(PendingRequest { column, pointer_y }) = self.pending.take() {
            let rects = layout.card_rects(&column);
            let descriptor = compute_insertion(pointer_y, &rects);
            self.stats.computed += 1;

            if self.mark.as_ref().map(|m| (&m.column, m.descriptor)) != Some((&column, descriptor)) {
                tracing::trace!(column = %column, ?descriptor, "Placeholder moved");
            }
            self.mark = Some(PlaceholderMark { column, descriptor });
        }
        self.mark.as_ref()
    }

    /// Pointer left `column`'s drop zone. Returns `true` if a placeholder was
    /// removed.
    pub fn leave(&mut self, column: &ColumnId) -> bool {
        if self.pending.as_ref().is_some_and(|p| &p.column == column) {
            self.pending = None;
        }
        if self.mark.as_ref().is_some_and(|m| &m.column == column) {
            self.mark = None;
            return true;
        }
        false
    }

    /// Remove the placeholder and drop any pending request.
    pub fn clear(&mut self) {
        self.mark = None;
        self.pending = None;
    }

    pub fn current(&self) -> Option<&PlaceholderMark> {
        self.mark.as_ref()
    }

    /// Descriptor of the placeholder if it is shown in `column`.
    pub fn descriptor_in(&self, column: &ColumnId) -> Option<InsertionDescriptor> {
        self.mark
            .as_ref()
            .filter(|m| &m.column == column)
            .map(|m| m.descriptor)
    }

    pub fn stats(&self) -> PositionerStats {
        self.stats
    }
}
