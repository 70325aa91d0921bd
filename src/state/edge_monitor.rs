//! Section auto-advance at the edges of continuously scrolled content.
//!
//! In scrolled + continuous mode, scrolling past the top or bottom of a
//! section moves the renderer into the neighbouring section. The motion is
//! deferred by a short settle delay so the renderer finishes updating its own
//! extents first; issuing it synchronously lets the renderer act on extents
//! it has not updated yet.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, trace, warn};

use crate::config::EngineTuning;
use crate::model::ViewConfiguration;
use crate::renderer::{Renderer, ScrollExtents};
use crate::scheduler::{Scheduler, TimerId};

/// Where a continuous-scroll evaluation request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollSource {
    /// Wheel input, delivered at a platform-limited rate.
    Mouse,
    /// Touch scrolling.
    Touch,
}

/// Section boundary crossed by a scroll. Also the deferred task payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryCrossing {
    /// Scrolled up past the start of the section.
    Top,
    /// Scrolled down past the end of the section.
    Bottom,
}

/// Decide whether a scroll of `scroll_delta` crosses a section boundary.
///
/// Positive deltas scroll towards the top. The top may be overscrolled, so
/// `start` is allowed to exceed zero. `view_size` can be fractional and never
/// quite reached, hence the `ceil` on `end`.
pub fn evaluate_edges(
    extents: &ScrollExtents,
    scroll_delta: f64,
    threshold: f64,
) -> Option<BoundaryCrossing> {
    if extents.start <= scroll_delta && scroll_delta > threshold {
        Some(BoundaryCrossing::Top)
    } else if extents.end.ceil() - scroll_delta >= extents.view_size && scroll_delta < -threshold {
        Some(BoundaryCrossing::Bottom)
    } else {
        None
    }
}

/// Distance that carries the renderer just past the boundary.
///
/// `overshoot` covers fractional pixel positions that would otherwise land
/// exactly on the edge without crossing it.
pub fn crossing_distance(crossing: BoundaryCrossing, extents: &ScrollExtents, overshoot: f64) -> f64 {
    match crossing {
        BoundaryCrossing::Top => extents.start + overshoot,
        BoundaryCrossing::Bottom => extents.view_size - extents.end.floor() + overshoot,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingEvaluation {
    scroll_delta: f64,
    threshold: f64,
}

/// Continuous-scroll boundary watcher for one reading surface.
#[derive(Debug, Clone)]
pub struct EdgeMonitor {
    delay: Duration,
    overshoot: f64,
    awaiting_relocate: Option<PendingEvaluation>,
}

impl EdgeMonitor {
    pub fn new(tuning: &EngineTuning) -> Self {
        Self {
            delay: tuning.boundary_delay(),
            overshoot: tuning.boundary_overshoot_px,
            awaiting_relocate: None,
        }
    }

    /// React to a scroll reported by the host.
    ///
    /// Mouse scrolls are evaluated immediately. Touch scrolls are evaluated
    /// immediately only when `size >= view_size`; otherwise the next relocate
    /// notification is the reliable signal, and evaluation waits for it.
    /// Returns the timer of a scheduled crossing, if any.
    pub fn on_scroll<R, S>(
        &mut self,
        source: ScrollSource,
        scroll_delta: f64,
        threshold: f64,
        renderer: &R,
        config: &ViewConfiguration,
        scheduler: &mut S,
    ) -> Option<TimerId>
    where
        R: Renderer + ?Sized,
        S: Scheduler<BoundaryCrossing>,
    {
        if !config.is_continuous() {
            return None;
        }
        let pending = PendingEvaluation {
            scroll_delta,
            threshold,
        };
        let extents = renderer.extents();
        match source {
            ScrollSource::Mouse => self.evaluate(pending, &extents, scheduler),
            ScrollSource::Touch if extents.size >= extents.view_size => {
                self.evaluate(pending, &extents, scheduler)
            }
            ScrollSource::Touch => {
                trace!(scroll_delta, "deferring edge check until relocate");
                // One-shot: the latest scroll replaces any earlier listener.
                self.awaiting_relocate = Some(pending);
                None
            }
        }
    }

    /// React to the renderer's relocate notification.
    pub fn on_relocate<R, S>(&mut self, renderer: &R, scheduler: &mut S) -> Option<TimerId>
    where
        R: Renderer + ?Sized,
        S: Scheduler<BoundaryCrossing>,
    {
        let pending = self.awaiting_relocate.take()?;
        self.evaluate(pending, &renderer.extents(), scheduler)
    }

    /// Run a crossing that came due. Extents are read now, not at scheduling.
    pub fn run_crossing<R>(&self, crossing: BoundaryCrossing, renderer: &mut R)
    where
        R: Renderer + ?Sized,
    {
        if !renderer.capabilities().distance_navigation {
            trace!("renderer cannot move by distance");
            return;
        }
        let distance = crossing_distance(crossing, &renderer.extents(), self.overshoot);
        debug!(?crossing, distance, "crossing section boundary");
        let result = match crossing {
            BoundaryCrossing::Top => renderer.prev(distance),
            BoundaryCrossing::Bottom => renderer.next(distance),
        };
        if let Err(error) = result {
            warn!(%error, "boundary crossing dropped");
        }
    }

    pub fn is_awaiting_relocate(&self) -> bool {
        self.awaiting_relocate.is_some()
    }

    fn evaluate<S>(
        &self,
        pending: PendingEvaluation,
        extents: &ScrollExtents,
        scheduler: &mut S,
    ) -> Option<TimerId>
    where
        S: Scheduler<BoundaryCrossing>,
    {
        let crossing = evaluate_edges(extents, pending.scroll_delta, pending.threshold)?;
        Some(scheduler.schedule(self.delay, crossing))
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "edge_monitor_tests.rs"]
mod tests;
