//! Touch sequence tracking and swipe classification.
//!
//! One [`TouchTracker`] follows one physical touch sequence: start, any
//! number of moves, end. Interleaving two sequences through the same tracker
//! corrupts the measured distance, so each touch source owns its own.

use crate::config::EngineTuning;
use crate::model::SwipeDirection;
use crate::scheduler::Timestamp;

/// Geometry of a finished touch sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchSequence {
    pub start_x: f64,
    pub start_y: f64,
    pub last_x: f64,
    pub last_y: f64,
    pub started_at: Timestamp,
}

impl TouchSequence {
    pub fn dx(&self) -> f64 {
        self.last_x - self.start_x
    }

    pub fn dy(&self) -> f64 {
        self.last_y - self.start_y
    }
}

/// Per-sequence touch state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TouchTracker {
    active: bool,
    start_x: f64,
    start_y: f64,
    last_x: f64,
    last_y: f64,
    started_at: Timestamp,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a sequence at `(x, y)`. Always replaces whatever came before.
    pub fn on_start(&mut self, x: f64, y: f64, now: Timestamp) {
        *self = Self {
            active: true,
            start_x: x,
            start_y: y,
            last_x: x,
            last_y: y,
            started_at: now,
        };
    }

    /// Record the latest position. Ignored unless a sequence is active.
    pub fn on_move(&mut self, x: f64, y: f64) {
        if !self.active {
            return;
        }
        self.last_x = x;
        self.last_y = y;
    }

    /// Finish the sequence and hand back its geometry.
    ///
    /// Returns `None` without side effects when no sequence is active, so a
    /// duplicated end signal cannot navigate twice.
    pub fn on_end(&mut self) -> Option<TouchSequence> {
        if !self.active {
            return None;
        }
        self.active = false;
        Some(TouchSequence {
            start_x: self.start_x,
            start_y: self.start_y,
            last_x: self.last_x,
            last_y: self.last_y,
            started_at: self.started_at,
        })
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Classify a finished sequence as a horizontal swipe.
///
/// A swipe travels at least `swipe_min_distance_px` horizontally, clearly
/// more horizontally than vertically, within `swipe_max_duration_ms`.
/// Anything else is a tap or a scroll and yields `None`.
pub fn classify_swipe(
    sequence: &TouchSequence,
    now: Timestamp,
    tuning: &EngineTuning,
) -> Option<SwipeDirection> {
    let dx = sequence.dx();
    let dy = sequence.dy();
    let elapsed = now.saturating_duration_since(sequence.started_at);

    let horizontal =
        dx.abs() >= tuning.swipe_min_distance_px && dx.abs() > dy.abs() * tuning.swipe_axis_ratio;
    if !horizontal || elapsed > tuning.swipe_max_duration() {
        return None;
    }

    Some(if dx < 0.0 {
        SwipeDirection::Left
    } else {
        SwipeDirection::Right
    })
}

// ===== Tests =====

#[cfg(test)]
#[path = "touch_tracker_tests.rs"]
mod tests;
