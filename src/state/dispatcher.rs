//! Pagination dispatcher: one intent in, at most one renderer call out.
//!
//! Calls are fire-and-forget. A renderer that lacks a capability or fails a
//! call costs one missed page turn; the failure is logged here and goes no
//! further.

use tracing::{debug, trace, warn};

use crate::config::EngineTuning;
use crate::model::{NavigationIntent, RendererError, Side, ViewConfiguration};
use crate::renderer::Renderer;

/// Pixels to move for one scrolled page.
///
/// The viewport extent minus the configured overlap, minus each bar that
/// stays on screen while scrolling.
pub fn scroll_page_distance(
    viewport_size: f64,
    config: &ViewConfiguration,
    tuning: &EngineTuning,
) -> f64 {
    let header = if config.header_on_scroll() {
        tuning.bar_height_px
    } else {
        0.0
    };
    let footer = if config.footer_on_scroll() {
        tuning.bar_height_px
    } else {
        0.0
    };
    viewport_size - config.scrolling_overlap - header - footer
}

/// Apply `intent` to `renderer` under `config`.
pub fn dispatch<R>(
    intent: NavigationIntent,
    renderer: &mut R,
    config: &ViewConfiguration,
    tuning: &EngineTuning,
) where
    R: Renderer + ?Sized,
{
    match intent {
        NavigationIntent::ClickLeft
        | NavigationIntent::ClickRight
        | NavigationIntent::VolumeUpFlip
        | NavigationIntent::VolumeDownFlip => {
            if let Some(side) = intent.page_side() {
                page_turn(renderer, config, tuning, side);
            }
        }
        NavigationIntent::ClickCenter => {}
        NavigationIntent::SwipeLeft | NavigationIntent::SwipeRight => {
            swipe(renderer, config, tuning, intent == NavigationIntent::SwipeLeft);
        }
        NavigationIntent::WheelDown => unit_step(renderer, true),
        NavigationIntent::WheelUp => unit_step(renderer, false),
        NavigationIntent::HistoryBack | NavigationIntent::HistoryForward => {
            if !renderer.capabilities().history_navigation {
                trace!("renderer has no history");
                return;
            }
            let result = if intent == NavigationIntent::HistoryBack {
                renderer.history_back()
            } else {
                renderer.history_forward()
            };
            report(result);
        }
    }
}

/// Turn one page towards `side` of the screen.
///
/// Paginated renderers take the physical side as is and resolve reading
/// direction themselves. Scrolled renderers only move logically, so the side
/// is flipped for right-to-left text before choosing `prev` or `next`.
pub fn page_turn<R>(renderer: &mut R, config: &ViewConfiguration, tuning: &EngineTuning, side: Side)
where
    R: Renderer + ?Sized,
{
    let extents = renderer.extents();
    if !extents.scrolled {
        let result = match side {
            Side::Left => renderer.go_left(),
            Side::Right => renderer.go_right(),
        };
        report(result);
        return;
    }

    if !renderer.capabilities().distance_navigation {
        trace!("renderer cannot move by distance");
        return;
    }
    let side = side.flipped_if(renderer.direction().is_rtl());
    let distance = scroll_page_distance(extents.size, config, tuning);
    debug!(?side, distance, "scrolled page turn");
    let result = match side {
        Side::Left => renderer.prev(distance),
        Side::Right => renderer.next(distance),
    };
    report(result);
}

fn swipe<R>(renderer: &mut R, config: &ViewConfiguration, tuning: &EngineTuning, leftward: bool)
where
    R: Renderer + ?Sized,
{
    // A leftward swipe pulls the following content in.
    let forward = leftward != config.swap_click_area;

    if config.scrolled {
        if !renderer.capabilities().section_navigation {
            trace!("renderer has no sections");
            return;
        }
        let result = if forward {
            renderer.next_section()
        } else {
            renderer.prev_section()
        };
        report(result);
        return;
    }

    let side = if forward { Side::Right } else { Side::Left };
    page_turn(renderer, config, tuning, side);
}

fn unit_step<R>(renderer: &mut R, forward: bool)
where
    R: Renderer + ?Sized,
{
    if !renderer.capabilities().distance_navigation {
        trace!("renderer cannot move by distance");
        return;
    }
    let result = if forward {
        renderer.next(1.0)
    } else {
        renderer.prev(1.0)
    };
    report(result);
}

fn report(result: Result<(), RendererError>) {
    if let Err(error) = result {
        warn!(%error, "navigation dropped");
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
