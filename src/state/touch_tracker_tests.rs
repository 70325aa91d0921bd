//! Tests for touch sequence tracking and swipe classification.

use super::*;

// ===== Test Helpers =====

fn ms(value: u64) -> Timestamp {
    Timestamp::from_millis(value)
}

fn gesture(dx: f64, dy: f64) -> TouchSequence {
    TouchSequence {
        start_x: 200.0,
        start_y: 300.0,
        last_x: 200.0 + dx,
        last_y: 300.0 + dy,
        started_at: ms(1_000),
    }
}

fn classify(dx: f64, dy: f64, elapsed_ms: u64) -> Option<SwipeDirection> {
    classify_swipe(&gesture(dx, dy), ms(1_000 + elapsed_ms), &EngineTuning::default())
}

// ===== TouchTracker Tests =====

#[test]
fn start_then_end_returns_start_as_last() {
    let mut tracker = TouchTracker::new();
    tracker.on_start(10.0, 20.0, ms(5));

    let sequence = tracker.on_end().expect("active sequence ends");
    assert_eq!(sequence.start_x, 10.0);
    assert_eq!(sequence.last_x, 10.0);
    assert_eq!(sequence.last_y, 20.0);
    assert_eq!(sequence.started_at, ms(5));
}

#[test]
fn move_updates_last_position_only() {
    let mut tracker = TouchTracker::new();
    tracker.on_start(10.0, 20.0, ms(0));
    tracker.on_move(50.0, 25.0);
    tracker.on_move(90.0, 30.0);

    let sequence = tracker.on_end().unwrap();
    assert_eq!((sequence.start_x, sequence.start_y), (10.0, 20.0));
    assert_eq!((sequence.last_x, sequence.last_y), (90.0, 30.0));
}

#[test]
fn move_without_start_is_ignored() {
    let mut tracker = TouchTracker::new();
    tracker.on_move(50.0, 50.0);

    assert!(!tracker.is_active());
    assert_eq!(tracker.on_end(), None);
}

#[test]
fn second_end_is_a_no_op() {
    let mut tracker = TouchTracker::new();
    tracker.on_start(0.0, 0.0, ms(0));

    assert!(tracker.on_end().is_some());
    assert_eq!(tracker.on_end(), None, "Second end must not yield a sequence");
    assert!(!tracker.is_active());
}

#[test]
fn new_start_replaces_unfinished_sequence() {
    let mut tracker = TouchTracker::new();
    tracker.on_start(0.0, 0.0, ms(0));
    tracker.on_move(300.0, 0.0);

    // Second start before the first ended: no accumulation
    tracker.on_start(100.0, 100.0, ms(50));
    let sequence = tracker.on_end().unwrap();

    assert_eq!(sequence.dx(), 0.0);
    assert_eq!(sequence.started_at, ms(50));
}

#[test]
fn move_after_end_does_not_revive_sequence() {
    let mut tracker = TouchTracker::new();
    tracker.on_start(0.0, 0.0, ms(0));
    tracker.on_end();
    tracker.on_move(500.0, 0.0);

    assert_eq!(tracker.on_end(), None);
}

// ===== classify_swipe Tests =====

#[test]
fn quick_leftward_travel_is_swipe_left() {
    assert_eq!(classify(-100.0, 0.0, 200), Some(SwipeDirection::Left));
}

#[test]
fn quick_rightward_travel_is_swipe_right() {
    assert_eq!(classify(100.0, 10.0, 200), Some(SwipeDirection::Right));
}

#[test]
fn exactly_minimum_distance_counts() {
    assert_eq!(classify(60.0, 0.0, 100), Some(SwipeDirection::Right));
    assert_eq!(classify(-60.0, 0.0, 100), Some(SwipeDirection::Left));
}

#[test]
fn short_travel_is_not_a_swipe() {
    assert_eq!(classify(59.9, 0.0, 100), None);
}

#[test]
fn diagonal_travel_is_not_a_swipe() {
    // |dx| must be strictly greater than 1.5 |dy|
    assert_eq!(classify(150.0, 100.0, 100), None);
    assert_eq!(classify(151.0, 100.0, 100), Some(SwipeDirection::Right));
}

#[test]
fn slow_travel_is_not_a_swipe() {
    assert_eq!(classify(-200.0, 0.0, 700), Some(SwipeDirection::Left));
    assert_eq!(classify(-200.0, 0.0, 701), None);
}

#[test]
fn custom_tuning_is_honoured() {
    let tuning = EngineTuning {
        swipe_min_distance_px: 120.0,
        ..EngineTuning::default()
    };
    assert_eq!(classify_swipe(&gesture(100.0, 0.0), ms(1_100), &tuning), None);
}
