//! Drag Workflow Integration Tests

use crate::helpers::{TestBoardBuilder, col, layout_for, texts, y_after_last, y_before};
use laneboard::commit::AbandonReason;
use laneboard::constants::DEFAULT_STORAGE_KEY;
use laneboard::controller::{DropOutcome, IgnoreReason};
use laneboard::drag::{DragOrigin, InsertionDescriptor};
use laneboard::error::DragError;
use laneboard::types::Card;
use laneboard::BoardState;

fn stored_board(raw: &str) -> BoardState {
    BoardState::from_json(raw, ["column1", "column2", "column3"]).unwrap()
}

#[test]
fn test_full_drag_across_columns() {
    let (mut controller, store) = TestBoardBuilder::new()
        .with_column("column1", &["A", "B", "C"])
        .with_column("column2", &["X", "Y"])
        .controller();
    let layout = layout_for(controller.board());

    let transfer = controller.drag_begin("column1", 1, "B").unwrap();
    assert_eq!(transfer.mime_type, "text/plain");
    assert_eq!(transfer.effect_allowed, "move");
    assert_eq!(controller.suppressed_card(), Some((&col("column1"), 1)));

    assert!(controller.drag_over_column("column2", y_before(1)));
    let mark = controller.run_frame(&layout).cloned().unwrap();
    assert_eq!(mark.column, col("column2"));
    assert_eq!(mark.descriptor, InsertionDescriptor::Before(1));
    assert_eq!(controller.highlighted_column(), Some(&col("column2")));

    let outcome = controller.drop("column2", Some(&transfer.data));
    assert_eq!(
        outcome,
        DropOutcome::Moved {
            from_column: col("column1"),
            from_index: 1,
            to_column: col("column2"),
            to_index: 1,
            persisted: true,
        }
    );
    controller.drag_end();

    assert_eq!(texts(controller.board(), "column1"), vec!["A", "C"]);
    assert_eq!(texts(controller.board(), "column2"), vec!["X", "B", "Y"]);
    assert!(!controller.is_dragging());
    assert!(controller.current_insertion_descriptor().is_none());
    assert_eq!(controller.suppressed_card(), None);

    let saved = store.raw(DEFAULT_STORAGE_KEY).unwrap();
    assert_eq!(&stored_board(&saved), controller.board());
}

#[test]
fn test_reorder_to_end_of_same_column() {
    let (mut controller, _store) = TestBoardBuilder::new()
        .with_column("column1", &["A", "B", "C", "D"])
        .controller();
    let layout = layout_for(controller.board());

    controller.drag_begin("column1", 0, "A").unwrap();
    controller.drag_over_column("column1", y_after_last());
    assert_eq!(
        controller.run_frame(&layout).map(|m| m.descriptor),
        Some(InsertionDescriptor::After(3))
    );
    assert!(controller.drop("column1", None).is_moved());

    assert_eq!(texts(controller.board(), "column1"), vec!["B", "C", "D", "A"]);
}

#[test]
fn test_drop_without_placeholder_appends() {
    let (mut controller, _store) = TestBoardBuilder::new()
        .with_column("column1", &["A"])
        .with_column("column3", &["P", "Q"])
        .controller();

    controller.drag_begin("column1", 0, "A").unwrap();
    let outcome = controller.drop("column3", None);

    assert!(matches!(outcome, DropOutcome::Moved { to_index: 2, .. }));
    assert_eq!(texts(controller.board(), "column3"), vec!["P", "Q", "A"]);
}

#[test]
fn test_pending_request_is_discarded_at_drop() {
    let (mut controller, _store) = TestBoardBuilder::new()
        .with_column("column1", &["A", "B"])
        .with_column("column2", &["X", "Y"])
        .controller();

    controller.drag_begin("column1", 0, "A").unwrap();
    // Requested but never flushed: the drop falls back to the column end.
    controller.drag_over_column("column2", y_before(0));
    controller.drop("column2", None);

    assert_eq!(texts(controller.board(), "column2"), vec!["X", "Y", "A"]);
}

#[test]
fn test_placeholder_in_other_column_is_not_used() {
    let (mut controller, _store) = TestBoardBuilder::new()
        .with_column("column1", &["A", "B"])
        .with_column("column2", &["X", "Y"])
        .controller();
    let layout = layout_for(controller.board());

    controller.drag_begin("column1", 1, "B").unwrap();
    controller.drag_over_column("column1", y_before(0));
    controller.run_frame(&layout);
    controller.drop("column2", None);

    assert_eq!(texts(controller.board(), "column2"), vec!["X", "Y", "B"]);
}

#[test]
fn test_recovers_origin_from_transfer_data() {
    let (mut controller, store) = TestBoardBuilder::new()
        .with_column("column1", &["A", "B"])
        .controller();

    // No session: the drop handler only sees the native channel.
    let data = DragOrigin::new("column1", 0, Card::new("A").unwrap()).to_transfer_data();
    let outcome = controller.drop("column2", Some(&data));

    assert!(outcome.is_moved());
    assert_eq!(texts(controller.board(), "column1"), vec!["B"]);
    assert_eq!(texts(controller.board(), "column2"), vec!["A"]);
    assert_eq!(store.write_count(), 1);
}

#[test]
fn test_unrecoverable_drop_is_ignored() {
    let (mut controller, store) = TestBoardBuilder::new()
        .with_column("column1", &["A"])
        .controller();
    let before = controller.board().clone();

    assert_eq!(
        controller.drop("column2", None),
        DropOutcome::Ignored(IgnoreReason::NoOrigin)
    );
    assert_eq!(
        controller.drop("column2", Some("")),
        DropOutcome::Ignored(IgnoreReason::BadTransferData)
    );
    assert_eq!(
        controller.drop("column2", Some("{\"columnId\":")),
        DropOutcome::Ignored(IgnoreReason::BadTransferData)
    );

    assert_eq!(controller.board(), &before);
    assert_eq!(store.write_count(), 0);
}

#[test]
fn test_drop_on_unknown_column_ends_drag() {
    let (mut controller, store) = TestBoardBuilder::new()
        .with_column("column1", &["A"])
        .controller();

    controller.drag_begin("column1", 0, "A").unwrap();
    assert!(!controller.drag_over_column("archive", 10.0));
    assert_eq!(
        controller.drop("archive", None),
        DropOutcome::Ignored(IgnoreReason::UnknownColumn)
    );

    assert!(!controller.is_dragging());
    assert_eq!(texts(controller.board(), "column1"), vec!["A"]);
    assert_eq!(store.write_count(), 0);
}

#[test]
fn test_stale_origin_is_abandoned() {
    let (mut controller, store) = TestBoardBuilder::new()
        .with_column("column1", &["A", "B"])
        .controller();

    controller.drag_begin("column1", 1, "B").unwrap();
    // Concurrent delete while dragging invalidates the origin.
    controller.delete_card("column1", 0).unwrap();
    let writes = store.write_count();

    let outcome = controller.drop("column2", None);
    assert_eq!(
        outcome,
        DropOutcome::Abandoned(AbandonReason::SourceMissing { len: 1 })
    );
    assert_eq!(texts(controller.board(), "column1"), vec!["B"]);
    assert!(texts(controller.board(), "column2").is_empty());
    assert_eq!(store.write_count(), writes);
    assert!(!controller.is_dragging());
}

#[test]
fn test_drag_begin_rejections() {
    let (mut controller, _store) = TestBoardBuilder::new()
        .with_column("column1", &["A", "B"])
        .controller();

    assert!(matches!(
        controller.drag_begin("column1", 5, "A"),
        Err(DragError::CardOutOfRange { index: 5, .. })
    ));
    assert!(matches!(
        controller.drag_begin("column1", 0, "B"),
        Err(DragError::PayloadMismatch { index: 0, .. })
    ));
    assert!(matches!(
        controller.drag_begin("column1", 0, "   "),
        Err(DragError::PayloadMismatch { .. })
    ));

    controller.drag_begin("column1", 0, "A").unwrap();
    assert!(matches!(
        controller.drag_begin("column1", 1, "B"),
        Err(DragError::AlreadyActive { index: 0, .. })
    ));
}

#[test]
fn test_drag_over_without_session_is_ignored() {
    let (mut controller, _store) = TestBoardBuilder::new()
        .with_column("column1", &["A"])
        .controller();
    let layout = layout_for(controller.board());

    assert!(!controller.drag_over_column("column1", 0.0));
    assert!(controller.run_frame(&layout).is_none());
    assert_eq!(controller.positioner_stats().requested, 0);
}

#[test]
fn test_pointer_moves_coalesce_per_frame() {
    let (mut controller, _store) = TestBoardBuilder::new()
        .with_column("column1", &["A", "B", "C"])
        .controller();
    let layout = layout_for(controller.board());
    controller.drag_begin("column1", 0, "A").unwrap();

    let mut frames = 0;
    for frame in 0..4 {
        for step in 0..25 {
            let y = (frame * 25 + step) as f64;
            if controller.drag_over_column("column1", y) {
                frames += 1;
            }
        }
        controller.run_frame(&layout);
    }

    let stats = controller.positioner_stats();
    assert_eq!(frames, 4);
    assert_eq!(stats.requested, 100);
    assert_eq!(stats.computed, 4);
    assert_eq!(stats.coalesced, 96);
    // Last position was y = 99, between the midpoints of cards 1 and 2.
    assert_eq!(
        controller.current_insertion_descriptor().map(|m| m.descriptor),
        Some(InsertionDescriptor::Before(2))
    );
}

#[test]
fn test_single_placeholder_across_columns() {
    let (mut controller, _store) = TestBoardBuilder::new()
        .with_column("column1", &["A", "B"])
        .with_column("column2", &["X"])
        .controller();
    let layout = layout_for(controller.board());
    controller.drag_begin("column1", 0, "A").unwrap();

    for column in ["column1", "column2", "column3", "column2"] {
        controller.drag_over_column(column, y_before(0));
        controller.run_frame(&layout);
        assert_eq!(controller.highlighted_column(), Some(&col(column)));
    }
    assert_eq!(
        controller.current_insertion_descriptor().map(|m| m.descriptor),
        Some(InsertionDescriptor::Before(0))
    );
}

#[test]
fn test_leave_clears_highlight() {
    let (mut controller, _store) = TestBoardBuilder::new()
        .with_column("column1", &["A"])
        .controller();
    let layout = layout_for(controller.board());
    controller.drag_begin("column1", 0, "A").unwrap();
    controller.drag_over_column("column2", 5.0);
    controller.run_frame(&layout);

    assert!(!controller.drag_leave_column("column1"));
    assert!(controller.drag_leave_column("column2"));
    assert_eq!(controller.highlighted_column(), None);

    // Drop after leaving appends.
    controller.drag_over_column("column2", 5.0);
    assert!(controller.drop("column2", None).is_moved());
    assert_eq!(texts(controller.board(), "column2"), vec!["A"]);
}

#[test]
fn test_drag_end_without_drop_restores_idle() {
    let (mut controller, store) = TestBoardBuilder::new()
        .with_column("column1", &["A", "B"])
        .controller();
    let layout = layout_for(controller.board());

    controller.drag_begin("column1", 1, "B").unwrap();
    controller.drag_over_column("column1", y_before(0));
    controller.run_frame(&layout);
    controller.drag_end();
    controller.drag_end();

    assert!(!controller.is_dragging());
    assert!(controller.current_insertion_descriptor().is_none());
    assert_eq!(texts(controller.board(), "column1"), vec!["A", "B"]);
    assert_eq!(store.write_count(), 0);

    // A new drag can start afterwards.
    assert!(controller.drag_begin("column1", 0, "A").is_ok());
}

#[test]
fn test_failed_save_keeps_move_in_memory() {
    let (mut controller, store) = TestBoardBuilder::new()
        .with_column("column1", &["A"])
        .controller();
    store.set_fail_writes(true);

    controller.drag_begin("column1", 0, "A").unwrap();
    let outcome = controller.drop("column2", None);

    assert!(matches!(outcome, DropOutcome::Moved { persisted: false, .. }));
    assert_eq!(texts(controller.board(), "column2"), vec!["A"]);
}
