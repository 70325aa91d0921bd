//! Raw input carriers accepted at the engine boundary.
//!
//! Three unrelated sources feed the normalizer: messages relayed out of the
//! sandboxed content iframe, key events relayed by the native shell, and
//! pointer events on the host surface itself. They are modelled as one sum
//! type so classification can match on the carrier exhaustively.

use serde::Deserialize;

/// Any signal the input normalizer accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum InputSignal {
    /// Message posted from the content iframe.
    IframeRelay(IframeMessage),
    /// Key event relayed by the native shell.
    NativeKeyRelay(NativeKeyEvent),
    /// Click on the host surface (non-iframe fallback).
    DomEvent(DomClick),
}

/// Message relayed out of the content iframe.
///
/// The session identifier travels as `bookId` from the reader page; `sessionId`
/// is accepted too, and `bookId` wins when both are present. A message without
/// either can never match a session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RelayedMessage")]
pub struct IframeMessage {
    pub session_id: Option<String>,
    pub payload: IframePayload,
}

/// Wire shape of [`IframeMessage`].
#[derive(Deserialize)]
struct RelayedMessage {
    #[serde(default, rename = "bookId")]
    book_id: Option<String>,
    #[serde(default, rename = "sessionId")]
    session_id: Option<String>,
    #[serde(flatten)]
    payload: IframePayload,
}

impl From<RelayedMessage> for IframeMessage {
    fn from(raw: RelayedMessage) -> Self {
        Self {
            session_id: raw.book_id.or(raw.session_id),
            payload: raw.payload,
        }
    }
}

impl IframeMessage {
    pub fn new(session_id: impl Into<String>, payload: IframePayload) -> Self {
        Self {
            session_id: Some(session_id.into()),
            payload,
        }
    }
}

/// Payload of a relayed iframe message, tagged by its `type` field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum IframePayload {
    #[serde(rename = "iframe-touchstart")]
    TouchStart {
        #[serde(default, rename = "targetTouches")]
        target_touches: Vec<TouchPoint>,
    },
    #[serde(rename = "iframe-touchmove")]
    TouchMove {
        #[serde(default, rename = "targetTouches")]
        target_touches: Vec<TouchPoint>,
    },
    #[serde(rename = "iframe-touchend")]
    TouchEnd,
    #[serde(rename = "iframe-single-click")]
    SingleClick {
        #[serde(default, rename = "screenX")]
        screen_x: Option<f64>,
    },
    #[serde(rename = "iframe-wheel")]
    Wheel {
        #[serde(default, rename = "deltaY")]
        delta_y: Option<f64>,
    },
    #[serde(rename = "iframe-mouseup")]
    MouseUp {
        #[serde(default)]
        button: Option<i64>,
    },
    /// Any other message type posted by the content layer.
    #[serde(other)]
    Unknown,
}

impl IframePayload {
    /// First touch point of a touch payload.
    pub fn first_touch(&self) -> Option<TouchPoint> {
        match self {
            IframePayload::TouchStart { target_touches }
            | IframePayload::TouchMove { target_touches } => target_touches.first().copied(),
            _ => None,
        }
    }
}

/// A touch point in iframe client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TouchPoint {
    #[serde(rename = "clientX")]
    pub client_x: f64,
    #[serde(rename = "clientY")]
    pub client_y: f64,
}

impl TouchPoint {
    pub fn new(client_x: f64, client_y: f64) -> Self {
        Self { client_x, client_y }
    }
}

/// Key event relayed by the native shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct NativeKeyEvent {
    #[serde(rename = "keyName")]
    pub key_name: NativeKey,
}

/// Keys the native shell intercepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum NativeKey {
    VolumeUp,
    VolumeDown,
    Back,
    #[serde(other)]
    Other,
}

/// Click on the host surface, in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomClick {
    pub client_x: f64,
    #[serde(default)]
    pub client_y: f64,
    /// Width of the window the click landed in.
    pub window_width: f64,
}
