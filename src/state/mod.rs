//! Gesture and pagination state machines.
//!
//! Each component is plain data plus methods; timers go through
//! [`Scheduler`](crate::scheduler::Scheduler), renderer calls through
//! [`Renderer`](crate::renderer::Renderer).

pub mod dispatcher;
pub mod edge_monitor;
pub mod long_press;
pub mod normalizer;
pub mod reading_surface;
pub mod touch_tracker;

// Re-export for convenience
pub use dispatcher::{dispatch, page_turn, scroll_page_distance};
pub use edge_monitor::{evaluate_edges, BoundaryCrossing, EdgeMonitor, ScrollSource};
pub use long_press::{
    ClickDisposition, Haptics, LongPressDetector, LongPressHandler, LongPressTimeout, NoHaptics,
};
pub use normalizer::{ClickInterceptor, InputNormalizer, PassThrough, SurfaceGeometry};
pub use reading_surface::ReadingSurface;
pub use touch_tracker::{classify_swipe, TouchSequence, TouchTracker};
