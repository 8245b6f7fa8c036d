mod common;

use common::*;
use pdf_image_sheet::*;
use std::time::{Duration, Instant};

#[test]
fn test_non_images_are_dropped() {
    let mut selection = SelectionMachine::new();
    let state = selection.submit(vec![text("notes.txt"), png("a.png"), text("b.txt")]);

    assert_eq!(state, SelectionState::Direct(1));
    assert_eq!(selected_names(&selection), vec!["a.png"]);
}

#[test]
fn test_non_images_never_reach_the_pool() {
    let mut selection = SelectionMachine::new();
    let mut batch = pngs(&["1.png", "2.png", "3.png", "4.png"]);
    batch.insert(2, text("readme.md"));
    selection.submit(batch);

    assert_eq!(selection.state(), SelectionState::Overflow);
    assert_eq!(selection.pool().len(), 4);
    assert!(selection.pool().iter().all(|a| a.media_type.starts_with("image/")));
}

#[test]
fn test_batch_without_images_is_noop() {
    let mut selection = SelectionMachine::new();
    selection.submit(vec![png("a.png")]);
    let state = selection.submit(vec![text("a.txt"), text("b.txt")]);

    assert_eq!(state, SelectionState::Direct(1));
    assert_eq!(selection.live_previews(), 1);
}

#[test]
fn test_direct_submissions_accumulate_to_ready() {
    let mut selection = SelectionMachine::new();
    assert_eq!(selection.state(), SelectionState::Empty);

    assert_eq!(selection.submit(pngs(&["a.png"])), SelectionState::Direct(1));
    assert_eq!(
        selection.submit(pngs(&["b.png", "c.png"])),
        SelectionState::Ready
    );
    assert_eq!(selected_names(&selection), vec!["a.png", "b.png", "c.png"]);
    assert_eq!(selection.remaining(), 0);
}

#[test]
fn test_direct_submission_is_truncated_to_capacity() {
    let mut selection = SelectionMachine::new();
    selection.submit(pngs(&["a.png", "b.png"]));
    let state = selection.submit(pngs(&["c.png", "d.png", "e.png"]));

    assert_eq!(state, SelectionState::Ready);
    assert_eq!(selected_names(&selection), vec!["a.png", "b.png", "c.png"]);
    // Truncated images never got a preview.
    assert_eq!(selection.live_previews(), 3);
}

#[test]
fn test_oversized_batch_enters_overflow_regardless_of_selection() {
    let mut selection = SelectionMachine::new();
    selection.submit(pngs(&["kept.png"]));

    let state = selection.submit(pngs(&["1.png", "2.png", "3.png", "4.png", "5.png"]));

    assert_eq!(state, SelectionState::Overflow);
    let pool: Vec<&str> = selection.pool().iter().map(|a| a.name.as_str()).collect();
    assert_eq!(pool, vec!["1.png", "2.png", "3.png", "4.png", "5.png"]);
    // The partial selection is left alone.
    assert_eq!(selected_names(&selection), vec!["kept.png"]);
}

#[test]
fn test_pick_three_of_five_in_toggle_order() {
    let mut selection = SelectionMachine::new();
    selection.submit(pngs(&["1.png", "2.png", "3.png", "4.png", "5.png"]));
    assert_eq!(selection.pool().len(), 5);

    assert_eq!(selection.toggle(4).unwrap(), ToggleOutcome::Added);
    assert_eq!(selection.toggle(0).unwrap(), ToggleOutcome::Added);
    assert_eq!(selection.toggle(2).unwrap(), ToggleOutcome::Added);
    assert_eq!(selection.state(), SelectionState::Overflow);

    assert_eq!(selection.confirm().unwrap(), SelectionState::Ready);
    assert_eq!(selected_names(&selection), vec!["5.png", "1.png", "3.png"]);
    assert!(selection.pool().is_empty());
}

#[test]
fn test_toggle_at_capacity_is_noop() {
    let mut selection = SelectionMachine::new();
    selection.submit(pngs(&["1.png", "2.png", "3.png", "4.png"]));
    selection.toggle(0).unwrap();
    selection.toggle(1).unwrap();
    selection.toggle(2).unwrap();

    assert_eq!(selection.toggle(3).unwrap(), ToggleOutcome::Ignored);
    assert_eq!(selection.toggle(3).unwrap(), ToggleOutcome::Ignored);
    assert_eq!(selected_names(&selection), vec!["1.png", "2.png", "3.png"]);
}

#[test]
fn test_toggle_twice_restores_membership() {
    let mut selection = SelectionMachine::new();
    selection.submit(pngs(&["1.png", "2.png", "3.png", "4.png"]));
    selection.toggle(1).unwrap();

    assert_eq!(selection.toggle(3).unwrap(), ToggleOutcome::Added);
    assert_eq!(selection.toggle(3).unwrap(), ToggleOutcome::Removed);
    assert_eq!(selected_names(&selection), vec!["2.png"]);
    assert!(!selection.is_selected("4.png"));
}

#[test]
fn test_toggle_matches_by_name() {
    let mut selection = SelectionMachine::new();
    // Selected before the pick started, under the same name as a pool entry.
    selection.submit(pngs(&["shared.png"]));
    selection.submit(pngs(&["shared.png", "b.png", "c.png", "d.png"]));

    assert!(selection.is_selected("shared.png"));
    assert_eq!(selection.toggle(0).unwrap(), ToggleOutcome::Removed);
    assert!(selection.selected().is_empty());
}

#[test]
fn test_size_never_exceeds_capacity() {
    let mut selection = SelectionMachine::new();
    selection.submit(pngs(&["a.png", "b.png"]));
    selection.submit(pngs(&["1.png", "2.png", "3.png", "4.png", "5.png", "6.png"]));
    for i in [0, 1, 2, 3, 4, 5, 0, 5, 3] {
        selection.toggle(i).unwrap();
        assert!(selection.selected().len() <= REQUIRED_COUNT);
    }
    selection.submit(pngs(&["x.png", "y.png"]));
    assert!(selection.selected().len() <= REQUIRED_COUNT);
}

#[test]
fn test_confirm_below_count_is_rejected() {
    let mut selection = SelectionMachine::new();
    selection.submit(pngs(&["1.png", "2.png", "3.png", "4.png"]));
    selection.toggle(0).unwrap();
    selection.toggle(1).unwrap();

    match selection.confirm() {
        Err(SheetError::InvalidSelectionCount { expected, actual }) => {
            assert_eq!(expected, 3);
            assert_eq!(actual, 2);
        }
        other => panic!("Expected InvalidSelectionCount, got {:?}", other),
    }
    assert_eq!(selection.state(), SelectionState::Overflow);
    assert_eq!(selection.pool().len(), 4);
}

#[test]
fn test_cancel_returns_to_matching_state() {
    let mut selection = SelectionMachine::new();
    selection.submit(pngs(&["1.png", "2.png", "3.png", "4.png"]));
    selection.toggle(2).unwrap();

    assert_eq!(selection.cancel().unwrap(), SelectionState::Direct(1));
    assert!(selection.pool().is_empty());
    assert_eq!(selected_names(&selection), vec!["3.png"]);

    let mut selection = SelectionMachine::new();
    selection.submit(pngs(&["1.png", "2.png", "3.png", "4.png"]));
    assert_eq!(selection.cancel().unwrap(), SelectionState::Empty);
}

#[test]
fn test_pick_operations_outside_overflow_are_rejected() {
    let mut selection = SelectionMachine::new();
    selection.submit(pngs(&["a.png"]));

    assert!(matches!(selection.toggle(0), Err(SheetError::NotPicking)));
    assert!(matches!(selection.cancel(), Err(SheetError::NotPicking)));
}

#[test]
fn test_toggle_unknown_candidate() {
    let mut selection = SelectionMachine::new();
    selection.submit(pngs(&["1.png", "2.png", "3.png", "4.png"]));
    assert!(matches!(
        selection.toggle(9),
        Err(SheetError::UnknownCandidate(9))
    ));
}

#[test]
fn test_remove_by_index() {
    let mut selection = SelectionMachine::new();
    selection.submit(pngs(&["a.png", "b.png", "c.png"]));

    let removed = selection.remove(1).unwrap();
    assert_eq!(removed.name, "b.png");
    assert_eq!(selection.state(), SelectionState::Direct(2));
    assert_eq!(selected_names(&selection), vec!["a.png", "c.png"]);

    assert!(matches!(
        selection.remove(5),
        Err(SheetError::IndexOutOfRange(5))
    ));
}

#[test]
fn test_remove_revokes_preview_once() {
    let mut selection = SelectionMachine::new();
    selection.submit(pngs(&["a.png", "b.png"]));
    let id = selection.selected()[0].id;
    let handle = selection.preview(id).unwrap();

    selection.remove(0).unwrap();

    assert_eq!(selection.take_revoked(), vec![(id, handle)]);
    assert!(selection.preview(id).is_none());
    assert_eq!(selection.live_previews(), 1);
}

#[test]
fn test_deselecting_in_pick_keeps_pool_preview() {
    let mut selection = SelectionMachine::new();
    selection.submit(pngs(&["1.png", "2.png", "3.png", "4.png"]));
    selection.toggle(0).unwrap();
    selection.toggle(0).unwrap();

    // Still displayed in the pool.
    assert!(selection.take_revoked().is_empty());
    assert_eq!(selection.live_previews(), 4);
}

#[test]
fn test_confirm_revokes_unpicked_previews() {
    let mut selection = SelectionMachine::new();
    selection.submit(pngs(&["1.png", "2.png", "3.png", "4.png", "5.png"]));
    for i in [0, 1, 2] {
        selection.toggle(i).unwrap();
    }
    let unpicked: Vec<AssetId> = selection.pool()[3..].iter().map(|a| a.id).collect();

    selection.confirm().unwrap();

    let mut revoked: Vec<AssetId> = selection.take_revoked().into_iter().map(|(a, _)| a).collect();
    revoked.sort();
    assert_eq!(revoked, unpicked);
    assert_eq!(selection.live_previews(), 3);
}

#[test]
fn test_replacing_pool_revokes_old_candidates() {
    let mut selection = SelectionMachine::new();
    selection.submit(pngs(&["1.png", "2.png", "3.png", "4.png"]));
    selection.toggle(0).unwrap();
    selection.submit(pngs(&["5.png", "6.png", "7.png", "8.png"]));

    // 2, 3 and 4 were only in the old pool; 1 stays selected.
    assert_eq!(selection.take_revoked().len(), 3);
    assert_eq!(selection.live_previews(), 5);
}

#[test]
fn test_clear_all_revokes_everything_exactly_once() {
    let mut selection = SelectionMachine::new();
    selection.submit(pngs(&["a.png", "b.png"]));
    selection.remove(0).unwrap();
    selection.submit(pngs(&["c.png", "d.png"]));

    let cleared = selection.clear_all();

    assert_eq!(cleared, 3);
    assert_eq!(selection.state(), SelectionState::Empty);
    assert_eq!(selection.live_previews(), 0);
    let mut revoked: Vec<AssetId> = selection.take_revoked().into_iter().map(|(a, _)| a).collect();
    let total = revoked.len();
    revoked.sort();
    revoked.dedup();
    assert_eq!(total, 4);
    assert_eq!(revoked.len(), 4);
}

#[test]
fn test_clear_all_during_pick_discards_pool() {
    let mut selection = SelectionMachine::new();
    selection.submit(pngs(&["1.png", "2.png", "3.png", "4.png"]));
    selection.toggle(1).unwrap();

    selection.clear_all();

    assert_eq!(selection.state(), SelectionState::Empty);
    assert!(selection.pool().is_empty());
    assert_eq!(selection.take_revoked().len(), 4);
}

#[test]
fn test_cleared_notice_expires() {
    let mut selection = SelectionMachine::new();
    assert!(!selection.cleared_notice_active(Instant::now()));

    selection.submit(pngs(&["a.png"]));
    selection.clear_all();
    let now = Instant::now();

    assert!(selection.cleared_notice_active(now));
    assert!(!selection.cleared_notice_active(now + Duration::from_secs(4)));
}
