//! Classification of raw input signals into navigation intents.
//!
//! Every carrier is matched exhaustively here and nowhere else. Signals that
//! belong to another session, lack the fields their type implies, or match
//! no classification row produce `None`: they are not errors.

use tracing::{debug, trace};

use crate::config::EngineTuning;
use crate::model::{
    DomClick, IframeMessage, IframePayload, InputSignal, NativeKey, NativeKeyEvent,
    NavigationIntent, SessionId, Side, ViewConfiguration,
};
use crate::scheduler::Timestamp;
use crate::state::touch_tracker::{classify_swipe, TouchTracker};

/// Mouse button codes carried by relayed mouse-up messages.
const BUTTON_BACK: i64 = 3;
const BUTTON_FORWARD: i64 = 4;

/// External collaborator offered every relayed single click first.
///
/// Returning true consumes the click (e.g. it dismissed an open overlay) and
/// suppresses navigation.
pub trait ClickInterceptor {
    fn consume_single_click(&mut self) -> bool;
}

/// Interceptor that never consumes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl ClickInterceptor for PassThrough {
    fn consume_single_click(&mut self) -> bool {
        false
    }
}

impl<F: FnMut() -> bool> ClickInterceptor for F {
    fn consume_single_click(&mut self) -> bool {
        self()
    }
}

/// Placement of the reading view on screen, for hit-testing relayed clicks.
///
/// Relayed clicks carry screen coordinates; the view starts at
/// `window_screen_x + view_left`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceGeometry {
    pub window_screen_x: f64,
    pub view_left: f64,
    pub view_width: f64,
}

impl SurfaceGeometry {
    pub fn view_start(&self) -> f64 {
        self.window_screen_x + self.view_left
    }

    pub fn center(&self) -> f64 {
        self.view_start() + self.view_width / 2.0
    }

    /// True inside the inert centre band, edges included.
    pub fn in_center_band(&self, screen_x: f64, tuning: &EngineTuning) -> bool {
        let start = self.view_start() + self.view_width * tuning.center_band_start;
        let end = self.view_start() + self.view_width * tuning.center_band_end;
        screen_x >= start && screen_x <= end
    }
}

/// Turns signals from one reading surface into intents.
///
/// Owns the touch tracker for that surface's relayed touch stream.
#[derive(Debug, Clone)]
pub struct InputNormalizer {
    session: SessionId,
    tuning: EngineTuning,
    touch: TouchTracker,
    geometry: Option<SurfaceGeometry>,
}

impl InputNormalizer {
    pub fn new(session: SessionId, tuning: EngineTuning) -> Self {
        Self {
            session,
            tuning,
            touch: TouchTracker::new(),
            geometry: None,
        }
    }

    pub fn session(&self) -> &SessionId {
        &self.session
    }

    /// Update where the view sits on screen. `None` until the view is mounted.
    pub fn set_geometry(&mut self, geometry: Option<SurfaceGeometry>) {
        self.geometry = geometry;
    }

    pub fn geometry(&self) -> Option<SurfaceGeometry> {
        self.geometry
    }

    #[cfg(test)]
    pub(crate) fn touch(&self) -> &TouchTracker {
        &self.touch
    }

    /// Classify one signal. Runs synchronously; at most one intent per signal.
    pub fn normalize<I>(
        &mut self,
        signal: &InputSignal,
        config: &ViewConfiguration,
        now: Timestamp,
        interceptor: &mut I,
    ) -> Option<NavigationIntent>
    where
        I: ClickInterceptor + ?Sized,
    {
        let intent = match signal {
            InputSignal::IframeRelay(message) => {
                self.normalize_iframe(message, config, now, interceptor)
            }
            InputSignal::NativeKeyRelay(event) => normalize_native_key(event, config),
            InputSignal::DomEvent(click) => normalize_dom_click(click),
        };
        if let Some(intent) = intent {
            debug!(?intent, session = %self.session, "intent");
        }
        intent
    }

    fn normalize_iframe<I>(
        &mut self,
        message: &IframeMessage,
        config: &ViewConfiguration,
        now: Timestamp,
        interceptor: &mut I,
    ) -> Option<NavigationIntent>
    where
        I: ClickInterceptor + ?Sized,
    {
        let for_us = message
            .session_id
            .as_deref()
            .is_some_and(|raw| self.session.matches(raw));
        if !for_us {
            trace!(session = ?message.session_id, "ignoring message for another session");
            return None;
        }

        match &message.payload {
            IframePayload::TouchStart { .. } => {
                let touch = message.payload.first_touch()?;
                self.touch.on_start(touch.client_x, touch.client_y, now);
                None
            }
            IframePayload::TouchMove { .. } => {
                let touch = message.payload.first_touch()?;
                self.touch.on_move(touch.client_x, touch.client_y);
                None
            }
            IframePayload::TouchEnd => {
                let sequence = self.touch.on_end()?;
                classify_swipe(&sequence, now, &self.tuning).map(NavigationIntent::swipe)
            }
            IframePayload::SingleClick { screen_x } => {
                self.classify_single_click((*screen_x)?, config, interceptor)
            }
            IframePayload::Wheel { delta_y } => {
                // Scrolled layouts handle the wheel inside the iframe.
                if config.scrolled {
                    return None;
                }
                let delta_y = (*delta_y)?;
                if delta_y > 0.0 {
                    Some(NavigationIntent::WheelDown)
                } else if delta_y < 0.0 {
                    Some(NavigationIntent::WheelUp)
                } else {
                    None
                }
            }
            IframePayload::MouseUp { button } => match (*button)? {
                BUTTON_BACK => Some(NavigationIntent::HistoryBack),
                BUTTON_FORWARD => Some(NavigationIntent::HistoryForward),
                _ => None,
            },
            IframePayload::Unknown => None,
        }
    }

    fn classify_single_click<I>(
        &self,
        screen_x: f64,
        config: &ViewConfiguration,
        interceptor: &mut I,
    ) -> Option<NavigationIntent>
    where
        I: ClickInterceptor + ?Sized,
    {
        let geometry = self.geometry?;
        if interceptor.consume_single_click() {
            trace!("single click consumed");
            return None;
        }

        if config.disable_click || geometry.in_center_band(screen_x, &self.tuning) {
            return Some(NavigationIntent::ClickCenter);
        }

        let side = if screen_x >= geometry.center() {
            Side::Right
        } else {
            Side::Left
        };
        Some(NavigationIntent::click(
            side.flipped_if(config.swap_click_area),
        ))
    }
}

fn normalize_native_key(
    event: &NativeKeyEvent,
    config: &ViewConfiguration,
) -> Option<NavigationIntent> {
    if !config.volume_keys_to_flip {
        return None;
    }
    match event.key_name {
        NativeKey::VolumeUp => Some(NavigationIntent::VolumeUpFlip),
        NativeKey::VolumeDown => Some(NavigationIntent::VolumeDownFlip),
        NativeKey::Back | NativeKey::Other => None,
    }
}

fn normalize_dom_click(click: &DomClick) -> Option<NavigationIntent> {
    if click.window_width <= 0.0 {
        return None;
    }
    if click.client_x < click.window_width * 0.5 {
        Some(NavigationIntent::ClickLeft)
    } else {
        Some(NavigationIntent::ClickRight)
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "normalizer_tests.rs"]
mod tests;
