//! JSONL parser for recorded input traces.
//!
//! Each line is one host-side event stamped with the millisecond at which it
//! happened. Parsing is a pure function of the line; the replay loop decides
//! what a malformed line costs (nothing: it is logged and skipped).

use serde::Deserialize;

use crate::model::{
    DomClick, IframeMessage, IframePayload, InputSignal, NativeKey, NativeKeyEvent, ParseError,
    ViewConfiguration,
};
use crate::renderer::ScrollExtents;
use crate::scheduler::Timestamp;
use crate::state::{ScrollSource, SurfaceGeometry};

/// One recorded host event, internally tagged by `event`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum TraceEvent {
    /// Message relayed out of the content iframe.
    Iframe { at: u64, message: IframeMessage },

    /// Key relayed by the native shell.
    #[serde(rename_all = "camelCase")]
    NativeKey { at: u64, key_name: NativeKey },

    /// Click on the host surface outside the iframe.
    #[serde(rename_all = "camelCase")]
    DomClick {
        at: u64,
        client_x: f64,
        #[serde(default)]
        client_y: f64,
        window_width: f64,
    },

    /// Scroll reported by the content surface.
    Scroll {
        at: u64,
        mode: ScrollSource,
        delta: f64,
        threshold: f64,
    },

    /// Renderer finished relocating.
    Relocate { at: u64 },

    /// Renderer layout changed. `scrolled` defaults to the current mode.
    #[serde(rename_all = "camelCase")]
    Extents {
        at: u64,
        start: f64,
        end: f64,
        size: f64,
        view_size: f64,
        #[serde(default)]
        scrolled: Option<bool>,
    },

    /// Reading view moved or resized on screen.
    #[serde(rename_all = "camelCase")]
    Geometry {
        at: u64,
        window_screen_x: f64,
        view_left: f64,
        view_width: f64,
    },

    /// Host replaced the view settings.
    Config { at: u64, view: ViewConfiguration },

    /// Press on a pressable item (long-press candidate).
    PointerDown { at: u64, x: f64, y: f64 },

    PointerMove { at: u64, x: f64, y: f64 },

    PointerUp { at: u64 },

    PointerCancel { at: u64 },
}

impl TraceEvent {
    /// When the event happened.
    pub fn at(&self) -> Timestamp {
        let ms = match self {
            TraceEvent::Iframe { at, .. }
            | TraceEvent::NativeKey { at, .. }
            | TraceEvent::DomClick { at, .. }
            | TraceEvent::Scroll { at, .. }
            | TraceEvent::Relocate { at }
            | TraceEvent::Extents { at, .. }
            | TraceEvent::Geometry { at, .. }
            | TraceEvent::Config { at, .. }
            | TraceEvent::PointerDown { at, .. }
            | TraceEvent::PointerMove { at, .. }
            | TraceEvent::PointerUp { at }
            | TraceEvent::PointerCancel { at } => *at,
        };
        Timestamp::from_millis(ms)
    }

    /// A click the platform may synthesize after a pointer release.
    pub fn is_click(&self) -> bool {
        match self {
            TraceEvent::DomClick { .. } => true,
            TraceEvent::Iframe { message, .. } => {
                matches!(message.payload, IframePayload::SingleClick { .. })
            }
            _ => false,
        }
    }

    /// The input signal this event carries, for the three signal sources.
    pub fn to_signal(&self) -> Option<InputSignal> {
        match self {
            TraceEvent::Iframe { message, .. } => Some(InputSignal::IframeRelay(message.clone())),
            TraceEvent::NativeKey { key_name, .. } => {
                Some(InputSignal::NativeKeyRelay(NativeKeyEvent {
                    key_name: *key_name,
                }))
            }
            TraceEvent::DomClick {
                client_x,
                client_y,
                window_width,
                ..
            } => Some(InputSignal::DomEvent(DomClick {
                client_x: *client_x,
                client_y: *client_y,
                window_width: *window_width,
            })),
            _ => None,
        }
    }

    /// Geometry carried by a `geometry` event.
    pub fn geometry(&self) -> Option<SurfaceGeometry> {
        match self {
            TraceEvent::Geometry {
                window_screen_x,
                view_left,
                view_width,
                ..
            } => Some(SurfaceGeometry {
                window_screen_x: *window_screen_x,
                view_left: *view_left,
                view_width: *view_width,
            }),
            _ => None,
        }
    }

    /// Apply an `extents` event on top of the renderer's current extents.
    pub fn apply_extents(&self, current: ScrollExtents) -> Option<ScrollExtents> {
        match self {
            TraceEvent::Extents {
                start,
                end,
                size,
                view_size,
                scrolled,
                ..
            } => Some(ScrollExtents {
                scrolled: scrolled.unwrap_or(current.scrolled),
                start: *start,
                end: *end,
                size: *size,
                view_size: *view_size,
            }),
            _ => None,
        }
    }
}

/// Parse one trace line.
///
/// # Errors
///
/// [`ParseError::InvalidJson`] if the line is not JSON at all,
/// [`ParseError::UnknownEvent`] if it is JSON of no known event shape.
pub fn parse_trace_line(raw: &str, line_number: usize) -> Result<TraceEvent, ParseError> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| ParseError::InvalidJson {
            line: line_number,
            message: e.to_string(),
        })?;

    serde_json::from_value(value).map_err(|e| ParseError::UnknownEvent {
        line: line_number,
        message: e.to_string(),
    })
}
