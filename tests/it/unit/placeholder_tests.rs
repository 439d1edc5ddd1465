//! Unit tests for PlaceholderPositioner throttling and single-placeholder
//! bookkeeping.

use crate::helpers::{CARD_GAP, CARD_HEIGHT, col, y_after_last, y_before};
use laneboard::drag::{InsertionDescriptor, PlaceholderMark, PlaceholderPositioner};
use laneboard::view::StaticLayout;

fn layout() -> StaticLayout {
    StaticLayout::new()
        .with_uniform_column("column1", 3, CARD_HEIGHT, CARD_GAP)
        .with_uniform_column("column2", 2, CARD_HEIGHT, CARD_GAP)
}

#[test]
fn test_first_request_schedules_frame() {
    let mut positioner = PlaceholderPositioner::new();
    assert!(positioner.request(col("column1"), 0.0));
    assert!(positioner.has_pending());
    assert!(positioner.current().is_none());
}

#[test]
fn test_requests_coalesce_latest_wins() {
    let mut positioner = PlaceholderPositioner::new();
    assert!(positioner.request(col("column1"), y_before(0)));
    assert!(!positioner.request(col("column1"), y_before(1)));
    assert!(!positioner.request(col("column1"), y_before(2)));

    let mark = positioner.flush(&layout()).cloned();
    assert_eq!(
        mark,
        Some(PlaceholderMark {
            column: col("column1"),
            descriptor: InsertionDescriptor::Before(2),
        })
    );

    let stats = positioner.stats();
    assert_eq!(stats.requested, 3);
    assert_eq!(stats.coalesced, 2);
    assert_eq!(stats.computed, 1);
    assert!(!positioner.has_pending());

    // Next pointer move needs a new frame.
    assert!(positioner.request(col("column1"), y_after_last()));
}

#[test]
fn test_flush_without_request_keeps_mark() {
    let mut positioner = PlaceholderPositioner::new();
    positioner.request(col("column2"), y_after_last());
    positioner.flush(&layout());

    let again = positioner.flush(&layout()).map(|m| m.descriptor);
    assert_eq!(again, Some(InsertionDescriptor::After(1)));
    assert_eq!(positioner.stats().computed, 1);
}

#[test]
fn test_moving_to_other_column_leaves_single_placeholder() {
    let mut positioner = PlaceholderPositioner::new();
    positioner.request(col("column1"), y_before(1));
    positioner.flush(&layout());
    positioner.request(col("column2"), y_before(0));
    positioner.flush(&layout());

    assert_eq!(positioner.descriptor_in(&col("column1")), None);
    assert_eq!(
        positioner.descriptor_in(&col("column2")),
        Some(InsertionDescriptor::Before(0))
    );
}

#[test]
fn test_empty_column_uses_start() {
    let mut positioner = PlaceholderPositioner::new();
    positioner.request(col("column3"), 42.0);
    let mark = positioner.flush(&layout()).map(|m| m.descriptor);
    assert_eq!(mark, Some(InsertionDescriptor::Start));
}

#[test]
fn test_leave_only_clears_own_column() {
    let mut positioner = PlaceholderPositioner::new();
    positioner.request(col("column1"), y_before(0));
    positioner.flush(&layout());

    assert!(!positioner.leave(&col("column2")));
    assert!(positioner.current().is_some());
    assert!(positioner.leave(&col("column1")));
    assert!(positioner.current().is_none());
}

#[test]
fn test_leave_discards_pending_for_that_column() {
    let mut positioner = PlaceholderPositioner::new();
    positioner.request(col("column1"), y_before(0));
    positioner.leave(&col("column1"));

    assert!(!positioner.has_pending());
    assert!(positioner.flush(&layout()).is_none());
}

#[test]
fn test_clear_drops_mark_and_pending() {
    let mut positioner = PlaceholderPositioner::new();
    positioner.request(col("column1"), y_before(0));
    positioner.flush(&layout());
    positioner.request(col("column2"), y_before(1));

    positioner.clear();
    assert!(positioner.current().is_none());
    assert!(!positioner.has_pending());
}
