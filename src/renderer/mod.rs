//! Boundary to the document renderer.
//!
//! The renderer lays out the book and owns all scroll state; this crate only
//! reads its extents and asks it to move. Optional motion families are
//! declared up front through [`RendererCapabilities`] so callers check once
//! instead of guarding every call.

use crate::model::RendererError;

pub mod recording;

pub use recording::{RecordingRenderer, RendererCall};

/// Text direction of the open book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn is_rtl(self) -> bool {
        matches!(self, TextDirection::Rtl)
    }
}

/// Pixel-space scroll extents along the renderer's scroll axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollExtents {
    /// Renderer is laid out for scrolling rather than discrete pages.
    pub scrolled: bool,
    /// Offset of the viewport's leading edge within the section.
    pub start: f64,
    /// Offset of the viewport's trailing edge within the section.
    pub end: f64,
    /// Extent of the viewport.
    pub size: f64,
    /// Extent of the laid-out section.
    pub view_size: f64,
}

/// Motion families a renderer implements beyond the mandatory page turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RendererCapabilities {
    /// `prev_section` / `next_section`.
    pub section_navigation: bool,
    /// `prev(distance)` / `next(distance)`.
    pub distance_navigation: bool,
    /// `history_back` / `history_forward`.
    pub history_navigation: bool,
}

impl RendererCapabilities {
    pub const ALL: RendererCapabilities = RendererCapabilities {
        section_navigation: true,
        distance_navigation: true,
        history_navigation: true,
    };
}

impl Default for RendererCapabilities {
    fn default() -> Self {
        Self::ALL
    }
}

/// Document renderer driven by the dispatcher.
///
/// Shared by the whole reading session and mutated only through these
/// methods. Optional operations default to [`RendererError::Unsupported`];
/// implementors that provide them must also advertise them in
/// [`capabilities`](Renderer::capabilities).
pub trait Renderer {
    fn capabilities(&self) -> RendererCapabilities;

    fn direction(&self) -> TextDirection;

    fn extents(&self) -> ScrollExtents;

    /// Turn one page towards the left edge.
    fn go_left(&mut self) -> Result<(), RendererError>;

    /// Turn one page towards the right edge.
    fn go_right(&mut self) -> Result<(), RendererError>;

    /// Retreat by `distance` pixels (scrolled) or units (paginated).
    fn prev(&mut self, _distance: f64) -> Result<(), RendererError> {
        Err(RendererError::Unsupported { operation: "prev" })
    }

    /// Advance by `distance` pixels (scrolled) or units (paginated).
    fn next(&mut self, _distance: f64) -> Result<(), RendererError> {
        Err(RendererError::Unsupported { operation: "next" })
    }

    fn prev_section(&mut self) -> Result<(), RendererError> {
        Err(RendererError::Unsupported {
            operation: "prevSection",
        })
    }

    fn next_section(&mut self) -> Result<(), RendererError> {
        Err(RendererError::Unsupported {
            operation: "nextSection",
        })
    }

    fn history_back(&mut self) -> Result<(), RendererError> {
        Err(RendererError::Unsupported {
            operation: "history.back",
        })
    }

    fn history_forward(&mut self) -> Result<(), RendererError> {
        Err(RendererError::Unsupported {
            operation: "history.forward",
        })
    }
}
