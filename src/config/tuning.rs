//! Empirical gesture and motion constants.
//!
//! None of these values is derived from anything; they were tuned by hand on
//! real devices. They live here, named and overridable from the `[tuning]`
//! table of the config file, rather than inline at their use sites.

use serde::Deserialize;
use std::time::Duration;

/// Thresholds and delays used by the gesture and pagination machinery.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineTuning {
    /// Minimum horizontal travel for a swipe.
    pub swipe_min_distance_px: f64,
    /// Horizontal travel must exceed vertical travel by this factor.
    pub swipe_axis_ratio: f64,
    /// Slowest gesture still counted as a swipe.
    pub swipe_max_duration_ms: u64,
    /// Hold time before a press becomes a long press.
    pub long_press_delay_ms: u64,
    /// Movement on either axis that cancels a pending long press.
    pub long_press_move_tolerance_px: f64,
    /// Length of the haptic pulse emitted when a long press fires.
    pub haptic_pulse_ms: u64,
    /// Left edge of the inert centre band, as a fraction of view width.
    pub center_band_start: f64,
    /// Right edge of the inert centre band, as a fraction of view width.
    pub center_band_end: f64,
    /// Height of the header or footer bar when shown on scroll.
    pub bar_height_px: f64,
    /// Settle delay before a continuous-scroll boundary motion.
    pub boundary_delay_ms: u64,
    /// Extra pixels added to boundary motions so fractional extents still cross.
    pub boundary_overshoot_px: f64,
}

impl Default for EngineTuning {
    fn default() -> Self {
        Self {
            swipe_min_distance_px: 60.0,
            swipe_axis_ratio: 1.5,
            swipe_max_duration_ms: 700,
            long_press_delay_ms: 500,
            long_press_move_tolerance_px: 10.0,
            haptic_pulse_ms: 50,
            center_band_start: 0.375,
            center_band_end: 0.625,
            bar_height_px: 44.0,
            boundary_delay_ms: 100,
            boundary_overshoot_px: 1.0,
        }
    }
}

impl EngineTuning {
    pub fn swipe_max_duration(&self) -> Duration {
        Duration::from_millis(self.swipe_max_duration_ms)
    }

    pub fn long_press_delay(&self) -> Duration {
        Duration::from_millis(self.long_press_delay_ms)
    }

    pub fn haptic_pulse(&self) -> Duration {
        Duration::from_millis(self.haptic_pulse_ms)
    }

    pub fn boundary_delay(&self) -> Duration {
        Duration::from_millis(self.boundary_delay_ms)
    }
}
