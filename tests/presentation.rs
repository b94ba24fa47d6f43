//! Modal presentation: staging around first appearance, exclusivity, and
//! host-driven dismissal tearing down the presented subtree.

use std::time::Duration;
use tokio::task::LocalSet;

use navflow::{
    Component, PresentationMode, ScreenCoordinator, SequenceCoordinator, StackCoordinator,
    ViewValue,
};

/// Outlast the presentation settling delay (virtual time).
async fn settle_presentation() {
    tokio::time::sleep(Duration::from_millis(600)).await;
}

fn screen(tag: &str) -> ScreenCoordinator {
    let screen = ScreenCoordinator::with_view(ViewValue::new(tag.to_string()));
    screen.set_tag(tag);
    screen
}

#[tokio::test(start_paused = true)]
async fn staged_present_is_applied_after_first_appearance() {
    let local = LocalSet::new();
    local
        .run_until(async {
            let presenter = screen("presenter");
            let slot = presenter.presenting_slot();

            slot.present_screen(screen("modal"), PresentationMode::Sheet);
            assert!(!slot.is_presenting());

            slot.notify_appeared();
            // Intent must not land before the settling delay elapses.
            tokio::time::sleep(Duration::from_millis(100)).await;
            assert!(!slot.is_presenting());

            settle_presentation().await;
            assert!(slot.is_presenting());
            assert!(slot.presented().is_some());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn staged_intent_is_applied_exactly_once() {
    let local = LocalSet::new();
    local
        .run_until(async {
            let slot = screen("presenter").presenting_slot();
            slot.present_screen(screen("modal"), PresentationMode::Sheet);
            slot.notify_appeared();
            settle_presentation().await;
            assert!(slot.is_presenting());

            slot.dismiss();
            assert!(!slot.is_presenting());

            // A later re-appearance must not resurrect the stale staged
            // intent.
            slot.notify_appeared();
            settle_presentation().await;
            assert!(!slot.is_presenting());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn dismiss_before_appearance_cancels_the_staged_present() {
    let local = LocalSet::new();
    local
        .run_until(async {
            let slot = screen("presenter").presenting_slot();
            slot.present_screen(screen("modal"), PresentationMode::Fullscreen);
            slot.dismiss();

            slot.notify_appeared();
            settle_presentation().await;

            assert!(!slot.is_presenting());
            assert!(slot.presented().is_none());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn present_after_appearance_is_immediate() {
    let local = LocalSet::new();
    local
        .run_until(async {
            let slot = screen("presenter").presenting_slot();
            slot.notify_appeared();
            settle_presentation().await;

            slot.present_screen(screen("modal"), PresentationMode::Sheet);
            assert!(slot.is_presenting());
        })
        .await;
}

#[test]
fn second_present_wins_and_destroys_the_loser() {
    let slot = screen("presenter").presenting_slot();
    let first = screen("first-modal");
    let second = screen("second-modal");

    slot.present_screen(first.clone(), PresentationMode::Sheet);
    slot.present_screen(second.clone(), PresentationMode::Sheet);

    let presented = slot.presented().expect("entity presented");
    assert_eq!(presented.navigation_id(), second.navigation_id());
    // The replaced entity never reached the host's visible tree state and
    // its subtree is torn down.
    assert!(first.view().is_none());
    assert!(second.view().is_some());
}

#[test]
fn host_dismissal_destroys_an_orphaned_presented_stack() {
    // A screen presents a whole stack modally; the user swipes it away.
    let presenter = screen("presenter");
    let slot = presenter.presenting_slot();

    let modal_root = screen("modal-root");
    let modal_detail = screen("modal-detail");
    let modal_sequence =
        SequenceCoordinator::from_screens(vec![modal_root.clone(), modal_detail.clone()]);
    let modal_stack = StackCoordinator::with_sequence(modal_sequence.clone());

    slot.present_stack(modal_stack.clone(), PresentationMode::Sheet);
    assert!(slot.presented().is_some());

    slot.notify_dismissed();

    assert!(slot.presented().is_none());
    assert!(modal_stack.sequence().is_none());
    assert_eq!(modal_sequence.count(), 0);
    assert!(modal_root.view().is_none());
    assert!(modal_detail.view().is_none());
}

#[test]
fn stack_slot_presents_over_the_stack() {
    let stack = StackCoordinator::with_sequence(SequenceCoordinator::from_screen(screen("root")));
    let slot = stack.presenting_slot();

    let modal = screen("modal");
    slot.present_screen(modal.clone(), PresentationMode::Fullscreen);

    let presented = slot.presented().expect("entity presented");
    assert_eq!(presented.navigation_id(), modal.navigation_id());
    assert_eq!(slot.mode(), PresentationMode::Fullscreen);
}
