//! Snapshot tests using the insta crate.
//!
//! These pin the two formats other code depends on: the persisted board and
//! the origin triple carried by the native drag channel.
//!
//! To update snapshots after intentional changes:
//! ```sh
//! cargo insta test --accept
//! ```

use crate::helpers::TestBoardBuilder;
use laneboard::config::BoardConfig;
use laneboard::drag::DragOrigin;
use laneboard::types::Card;

#[test]
fn snapshot_board_state() {
    let board = TestBoardBuilder::new()
        .with_column("column1", &["Write docs", "Review PR"])
        .with_column("column3", &["Ship it"])
        .build();
    insta::assert_json_snapshot!("board_state", board);
}

#[test]
fn snapshot_drag_origin() {
    let origin = DragOrigin::new("column2", 1, Card::new("Fix login bug").unwrap());
    insta::assert_json_snapshot!("drag_origin", origin);
}

#[test]
fn snapshot_default_config() {
    insta::assert_json_snapshot!("default_config", BoardConfig::default());
}
