//! Renderer that records calls instead of laying out a book.
//!
//! Backs the replay binary and the test suites. Extents, direction and
//! capabilities are set by the caller; individual operations can be made to
//! fail to exercise the non-fatal error path.

use std::collections::HashSet;

use serde::Serialize;

use super::{Renderer, RendererCapabilities, ScrollExtents, TextDirection};
use crate::model::RendererError;

/// One renderer call that took effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "camelCase")]
pub enum RendererCall {
    Prev { distance: f64 },
    Next { distance: f64 },
    GoLeft,
    GoRight,
    PrevSection,
    NextSection,
    HistoryBack,
    HistoryForward,
}

impl RendererCall {
    fn operation(self) -> &'static str {
        match self {
            RendererCall::Prev { .. } => "prev",
            RendererCall::Next { .. } => "next",
            RendererCall::GoLeft => "goLeft",
            RendererCall::GoRight => "goRight",
            RendererCall::PrevSection => "prevSection",
            RendererCall::NextSection => "nextSection",
            RendererCall::HistoryBack => "history.back",
            RendererCall::HistoryForward => "history.forward",
        }
    }
}

/// In-memory renderer that records every successful call.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    pub capabilities: RendererCapabilities,
    pub direction: TextDirection,
    pub extents: ScrollExtents,
    calls: Vec<RendererCall>,
    failing: HashSet<&'static str>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer laid out for scrolling with the given viewport extent.
    pub fn scrolled(size: f64) -> Self {
        Self {
            extents: ScrollExtents {
                scrolled: true,
                size,
                ..ScrollExtents::default()
            },
            ..Self::default()
        }
    }

    /// Renderer laid out in discrete pages.
    pub fn paginated() -> Self {
        Self::default()
    }

    pub fn with_direction(mut self, direction: TextDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_capabilities(mut self, capabilities: RendererCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_extents(mut self, extents: ScrollExtents) -> Self {
        self.extents = extents;
        self
    }

    /// Make the named operation (e.g. `"goRight"`) fail from now on.
    pub fn fail_on(&mut self, operation: &'static str) {
        self.failing.insert(operation);
    }

    pub fn calls(&self) -> &[RendererCall] {
        &self.calls
    }

    /// Take the recorded calls, leaving the log empty.
    pub fn take_calls(&mut self) -> Vec<RendererCall> {
        std::mem::take(&mut self.calls)
    }

    fn record(&mut self, call: RendererCall, supported: bool) -> Result<(), RendererError> {
        let operation = call.operation();
        if !supported {
            return Err(RendererError::Unsupported { operation });
        }
        if self.failing.contains(operation) {
            return Err(RendererError::Failed {
                operation,
                reason: "injected failure".to_string(),
            });
        }
        self.calls.push(call);
        Ok(())
    }
}

impl Renderer for RecordingRenderer {
    fn capabilities(&self) -> RendererCapabilities {
        self.capabilities
    }

    fn direction(&self) -> TextDirection {
        self.direction
    }

    fn extents(&self) -> ScrollExtents {
        self.extents
    }

    fn go_left(&mut self) -> Result<(), RendererError> {
        self.record(RendererCall::GoLeft, true)
    }

    fn go_right(&mut self) -> Result<(), RendererError> {
        self.record(RendererCall::GoRight, true)
    }

    fn prev(&mut self, distance: f64) -> Result<(), RendererError> {
        let supported = self.capabilities.distance_navigation;
        self.record(RendererCall::Prev { distance }, supported)
    }

    fn next(&mut self, distance: f64) -> Result<(), RendererError> {
        let supported = self.capabilities.distance_navigation;
        self.record(RendererCall::Next { distance }, supported)
    }

    fn prev_section(&mut self) -> Result<(), RendererError> {
        let supported = self.capabilities.section_navigation;
        self.record(RendererCall::PrevSection, supported)
    }

    fn next_section(&mut self) -> Result<(), RendererError> {
        let supported = self.capabilities.section_navigation;
        self.record(RendererCall::NextSection, supported)
    }

    fn history_back(&mut self) -> Result<(), RendererError> {
        let supported = self.capabilities.history_navigation;
        self.record(RendererCall::HistoryBack, supported)
    }

    fn history_forward(&mut self) -> Result<(), RendererError> {
        let supported = self.capabilities.history_navigation;
        self.record(RendererCall::HistoryForward, supported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_successful_calls_in_order() {
        let mut renderer = RecordingRenderer::paginated();
        renderer.go_right().unwrap();
        renderer.next(1.0).unwrap();

        assert_eq!(
            renderer.calls(),
            &[RendererCall::GoRight, RendererCall::Next { distance: 1.0 }]
        );
    }

    #[test]
    fn unsupported_capability_is_reported_and_not_recorded() {
        let mut renderer = RecordingRenderer::paginated().with_capabilities(RendererCapabilities {
            section_navigation: false,
            ..RendererCapabilities::ALL
        });

        assert_eq!(
            renderer.next_section(),
            Err(RendererError::Unsupported {
                operation: "nextSection"
            })
        );
        assert!(renderer.calls().is_empty());
    }

    #[test]
    fn injected_failure_is_reported_and_not_recorded() {
        let mut renderer = RecordingRenderer::paginated();
        renderer.fail_on("goLeft");

        assert!(matches!(
            renderer.go_left(),
            Err(RendererError::Failed {
                operation: "goLeft",
                ..
            })
        ));
        assert!(renderer.calls().is_empty());
        assert!(renderer.go_right().is_ok(), "Other operations still work");
    }

    #[test]
    fn calls_serialize_with_call_tag() {
        let json = serde_json::to_string(&RendererCall::Next { distance: 736.0 }).unwrap();
        assert_eq!(json, r#"{"call":"next","distance":736.0}"#);

        let json = serde_json::to_string(&RendererCall::PrevSection).unwrap();
        assert_eq!(json, r#"{"call":"prevSection"}"#);
    }

    #[test]
    fn take_calls_empties_the_log() {
        let mut renderer = RecordingRenderer::paginated();
        renderer.go_left().unwrap();

        assert_eq!(renderer.take_calls(), vec![RendererCall::GoLeft]);
        assert!(renderer.calls().is_empty());
    }
}
