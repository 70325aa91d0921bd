//! Tap versus long-press disambiguation.
//!
//! A press held still for the long-press delay opens the contextual menu
//! instead of acting as a tap. The click the platform synthesizes when that
//! press is released must then be swallowed, exactly once.

use std::time::Duration;

use tracing::{debug, trace};

use crate::config::EngineTuning;
use crate::scheduler::{Scheduler, TimerId};

/// Payload scheduled for the long-press timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongPressTimeout;

/// Platform vibration support.
pub trait Haptics {
    fn is_supported(&self) -> bool;

    fn pulse(&mut self, duration: Duration);
}

/// Haptics for platforms without a vibration motor.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn is_supported(&self) -> bool {
        false
    }

    fn pulse(&mut self, _duration: Duration) {}
}

/// Action run when a long press fires, e.g. opening the item's action drawer.
pub trait LongPressHandler {
    fn on_long_press(&mut self, x: f64, y: f64);
}

/// What the host must do with the click that follows a pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickDisposition {
    /// Ordinary tap: let the click through.
    Deliver,
    /// A long press fired: cancel the click's default action and propagation.
    Suppress,
}

/// Long-press state for one pressable item.
#[derive(Debug, Clone)]
pub struct LongPressDetector {
    delay: Duration,
    move_tolerance: f64,
    haptic_pulse: Duration,
    pending: Option<TimerId>,
    origin: Option<(f64, f64)>,
    triggered: bool,
}

impl LongPressDetector {
    pub fn new(tuning: &EngineTuning) -> Self {
        Self {
            delay: tuning.long_press_delay(),
            move_tolerance: tuning.long_press_move_tolerance_px,
            haptic_pulse: tuning.haptic_pulse(),
            pending: None,
            origin: None,
            triggered: false,
        }
    }

    /// Start timing a press at `(x, y)`, abandoning any earlier one.
    pub fn on_pointer_down<S>(&mut self, x: f64, y: f64, scheduler: &mut S)
    where
        S: Scheduler<LongPressTimeout>,
    {
        self.cancel_timer(scheduler);
        self.triggered = false;
        self.origin = Some((x, y));
        self.pending = Some(scheduler.schedule(self.delay, LongPressTimeout));
    }

    /// Cancel the pending long press once the pointer drifts too far.
    pub fn on_pointer_move<S>(&mut self, x: f64, y: f64, scheduler: &mut S)
    where
        S: Scheduler<LongPressTimeout>,
    {
        let Some((start_x, start_y)) = self.origin else {
            return;
        };
        if self.pending.is_none() {
            return;
        }
        if (x - start_x).abs() > self.move_tolerance || (y - start_y).abs() > self.move_tolerance {
            trace!(x, y, "long press cancelled by movement");
            self.cancel_timer(scheduler);
        }
    }

    /// Deliver a due timeout. Returns true if the long press fired.
    ///
    /// Timeouts from cancelled or superseded presses are ignored.
    pub fn on_timeout<H, L>(&mut self, id: TimerId, haptics: &mut H, handler: &mut L) -> bool
    where
        H: Haptics + ?Sized,
        L: LongPressHandler + ?Sized,
    {
        if self.pending != Some(id) {
            return false;
        }
        self.pending = None;
        let Some((x, y)) = self.origin else {
            return false;
        };

        self.triggered = true;
        if haptics.is_supported() {
            haptics.pulse(self.haptic_pulse);
        }
        debug!(x, y, "long press fired");
        handler.on_long_press(x, y);
        true
    }

    /// Release the pointer and decide the fate of the click that follows.
    ///
    /// A fired long press is consumed here: it suppresses this one click and
    /// no other.
    pub fn on_pointer_up<S>(&mut self, scheduler: &mut S) -> ClickDisposition
    where
        S: Scheduler<LongPressTimeout>,
    {
        self.cancel_timer(scheduler);
        self.origin = None;
        if self.triggered {
            self.triggered = false;
            ClickDisposition::Suppress
        } else {
            ClickDisposition::Deliver
        }
    }

    /// The platform aborted the interaction.
    pub fn on_pointer_cancel<S>(&mut self, scheduler: &mut S)
    where
        S: Scheduler<LongPressTimeout>,
    {
        self.cancel_timer(scheduler);
        self.origin = None;
        self.triggered = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    fn cancel_timer<S>(&mut self, scheduler: &mut S)
    where
        S: Scheduler<LongPressTimeout>,
    {
        if let Some(id) = self.pending.take() {
            scheduler.cancel(id);
        }
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "long_press_tests.rs"]
mod tests;
