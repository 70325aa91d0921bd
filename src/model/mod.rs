//! Domain model types (pure).
//!
//! All types in this module are plain data: signals in, intents out.

pub mod error;
pub mod identifiers;
pub mod intent;
pub mod signal;
pub mod view_config;

// Re-export for convenience
pub use error::{AppError, InputError, ParseError, RendererError};
pub use identifiers::{InvalidSessionId, SessionId};
pub use intent::{NavigationIntent, Side, SwipeDirection};
pub use signal::{
    DomClick, IframeMessage, IframePayload, InputSignal, NativeKey, NativeKeyEvent, TouchPoint,
};
pub use view_config::ViewConfiguration;
