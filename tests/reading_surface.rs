//! End-to-end tests driving a reading surface through its public API.
//!
//! Each test feeds raw signals the way the host would and checks the calls
//! that reach the renderer.

use std::time::Duration;

use pageturn::config::EngineTuning;
use pageturn::model::{
    DomClick, IframeMessage, IframePayload, InputSignal, NativeKey, NativeKeyEvent, SessionId,
    TouchPoint, ViewConfiguration,
};
use pageturn::renderer::{
    RecordingRenderer, RendererCall, RendererCapabilities, ScrollExtents, TextDirection,
};
use pageturn::scheduler::{ManualScheduler, Scheduler, Timestamp};
use pageturn::state::{
    ClickDisposition, Haptics, LongPressDetector, LongPressHandler, PassThrough, ReadingSurface,
    ScrollSource, SurfaceGeometry,
};

// ===== Test Fixtures =====

const BOOK: &str = "book-42";

struct Reader {
    surface: ReadingSurface,
    renderer: RecordingRenderer,
    clock: ManualScheduler<pageturn::state::BoundaryCrossing>,
}

impl Reader {
    fn new(config: ViewConfiguration, renderer: RecordingRenderer) -> Self {
        let mut surface = ReadingSurface::new(
            SessionId::new(BOOK).expect("valid session id"),
            config,
            EngineTuning::default(),
        );
        surface.set_geometry(Some(SurfaceGeometry {
            window_screen_x: 0.0,
            view_left: 0.0,
            view_width: 1000.0,
        }));
        Self {
            surface,
            renderer,
            clock: ManualScheduler::new(),
        }
    }

    fn send(&mut self, signal: InputSignal) {
        let now = self.clock.now();
        self.surface
            .handle_signal(&signal, &mut self.renderer, now, &mut PassThrough);
    }

    fn relay(&mut self, payload: IframePayload) {
        self.send(InputSignal::IframeRelay(IframeMessage::new(BOOK, payload)));
    }

    fn wait(&mut self, ms: u64) {
        for (_, crossing) in self.clock.advance(Duration::from_millis(ms)) {
            self.surface.run_crossing(crossing, &mut self.renderer);
        }
    }

    fn swipe(&mut self, from: (f64, f64), to: (f64, f64), duration_ms: u64) {
        self.relay(IframePayload::TouchStart {
            target_touches: vec![TouchPoint::new(from.0, from.1)],
        });
        self.wait(duration_ms / 2);
        self.relay(IframePayload::TouchMove {
            target_touches: vec![TouchPoint::new(to.0, to.1)],
        });
        self.wait(duration_ms - duration_ms / 2);
        self.relay(IframePayload::TouchEnd);
    }

    fn click_at(&mut self, screen_x: f64) {
        self.relay(IframePayload::SingleClick {
            screen_x: Some(screen_x),
        });
    }
}

fn scrolled() -> ViewConfiguration {
    ViewConfiguration {
        scrolled: true,
        ..ViewConfiguration::default()
    }
}

// ===== Swipes =====

#[test]
fn quick_left_swipe_in_scrolled_mode_advances_one_section() {
    // GIVEN: a scrolled, non-swapped reader
    let mut reader = Reader::new(scrolled(), RecordingRenderer::scrolled(800.0));

    // WHEN: the finger travels 100px left in 200ms
    reader.swipe((500.0, 300.0), (400.0, 300.0), 200);

    // THEN: exactly one nextSection call
    assert_eq!(reader.renderer.calls(), &[RendererCall::NextSection]);
}

#[test]
fn quick_left_swipe_in_paginated_mode_turns_forward() {
    let mut reader = Reader::new(ViewConfiguration::default(), RecordingRenderer::paginated());

    reader.swipe((500.0, 300.0), (400.0, 300.0), 200);

    assert_eq!(reader.renderer.calls(), &[RendererCall::GoRight]);
}

#[test]
fn slow_drag_is_not_a_swipe() {
    let mut reader = Reader::new(scrolled(), RecordingRenderer::scrolled(800.0));

    reader.swipe((500.0, 300.0), (300.0, 300.0), 701);

    assert!(reader.renderer.calls().is_empty());
}

#[test]
fn second_touch_end_does_not_navigate_again() {
    let mut reader = Reader::new(scrolled(), RecordingRenderer::scrolled(800.0));

    reader.swipe((500.0, 300.0), (400.0, 300.0), 200);
    reader.relay(IframePayload::TouchEnd);

    assert_eq!(reader.renderer.calls().len(), 1);
}

// ===== Clicks =====

#[test]
fn paginated_rtl_and_swap_on_left_half_equals_plain_right_half() {
    // GIVEN: one reader with RTL text and swapped click areas, one with neither
    let swapped = ViewConfiguration {
        swap_click_area: true,
        ..ViewConfiguration::default()
    };
    let mut rtl_swapped = Reader::new(
        swapped,
        RecordingRenderer::paginated().with_direction(TextDirection::Rtl),
    );
    let mut plain = Reader::new(ViewConfiguration::default(), RecordingRenderer::paginated());

    // WHEN: the first is clicked on the left half, the second on the right
    rtl_swapped.click_at(100.0);
    plain.click_at(900.0);

    // THEN: both issue the same renderer call; paginated turns are physical,
    // so only the swap flip takes effect
    assert_eq!(rtl_swapped.renderer.calls(), plain.renderer.calls());
    assert_eq!(plain.renderer.calls(), &[RendererCall::GoRight]);
}

#[test]
fn scrolled_rtl_and_swap_cancel_out_on_left_half() {
    // GIVEN: scrolled renderers, one with RTL text and swapped click areas
    let swapped = ViewConfiguration {
        swap_click_area: true,
        ..ViewConfiguration::default()
    };
    let mut rtl_swapped = Reader::new(
        swapped,
        RecordingRenderer::scrolled(800.0).with_direction(TextDirection::Rtl),
    );
    let mut plain_left = Reader::new(ViewConfiguration::default(), RecordingRenderer::scrolled(800.0));
    let mut plain_right =
        Reader::new(ViewConfiguration::default(), RecordingRenderer::scrolled(800.0));

    // WHEN: both flips apply to a left-half click
    rtl_swapped.click_at(100.0);
    plain_left.click_at(100.0);
    plain_right.click_at(900.0);

    // THEN: it retreats like a plain left-half click; the paginated
    // "equals plain right half" form does not hold when RTL takes effect
    assert_eq!(rtl_swapped.renderer.calls(), &[RendererCall::Prev { distance: 800.0 }]);
    assert_eq!(rtl_swapped.renderer.calls(), plain_left.renderer.calls());
    assert_eq!(plain_right.renderer.calls(), &[RendererCall::Next { distance: 800.0 }]);
}

#[test]
fn scrolled_click_moves_by_page_distance_minus_overlap_and_header() {
    let config = ViewConfiguration {
        scrolled: true,
        scrolling_overlap: 20.0,
        show_header: true,
        show_footer: false,
        show_bars_on_scroll: true,
        ..ViewConfiguration::default()
    };
    let mut reader = Reader::new(config, RecordingRenderer::scrolled(800.0));

    reader.click_at(900.0);

    assert_eq!(
        reader.renderer.calls(),
        &[RendererCall::Next { distance: 736.0 }]
    );
}

#[test]
fn centre_band_and_disabled_clicks_do_nothing() {
    let mut reader = Reader::new(ViewConfiguration::default(), RecordingRenderer::paginated());
    reader.click_at(375.0);
    reader.click_at(625.0);
    assert!(reader.renderer.calls().is_empty(), "Band edges are inclusive");

    reader.surface.set_config(ViewConfiguration {
        disable_click: true,
        ..ViewConfiguration::default()
    });
    reader.click_at(950.0);
    assert!(reader.renderer.calls().is_empty());
}

#[test]
fn consumed_click_never_reaches_renderer() {
    let mut reader = Reader::new(ViewConfiguration::default(), RecordingRenderer::paginated());
    let mut overlay_open = true;
    let mut dismiss_overlay = || std::mem::replace(&mut overlay_open, false);
    let click = InputSignal::IframeRelay(IframeMessage::new(
        BOOK,
        IframePayload::SingleClick {
            screen_x: Some(900.0),
        },
    ));

    reader.surface.handle_signal(
        &click,
        &mut reader.renderer,
        Timestamp::ZERO,
        &mut dismiss_overlay,
    );
    assert!(reader.renderer.calls().is_empty(), "First click dismissed the overlay");

    reader.surface.handle_signal(
        &click,
        &mut reader.renderer,
        Timestamp::ZERO,
        &mut dismiss_overlay,
    );
    assert_eq!(reader.renderer.calls(), &[RendererCall::GoRight]);
}

#[test]
fn messages_for_other_books_are_ignored() {
    let mut reader = Reader::new(ViewConfiguration::default(), RecordingRenderer::paginated());

    reader.send(InputSignal::IframeRelay(IframeMessage::new(
        "another-book",
        IframePayload::SingleClick {
            screen_x: Some(900.0),
        },
    )));
    reader.send(InputSignal::IframeRelay(IframeMessage {
        session_id: None,
        payload: IframePayload::MouseUp { button: Some(3) },
    }));

    assert!(reader.renderer.calls().is_empty());
}

// ===== Other sources =====

#[test]
fn volume_keys_turn_pages_only_when_enabled() {
    let mut reader = Reader::new(ViewConfiguration::default(), RecordingRenderer::paginated());
    let volume_down = InputSignal::NativeKeyRelay(NativeKeyEvent {
        key_name: NativeKey::VolumeDown,
    });

    reader.send(volume_down.clone());
    assert!(reader.renderer.calls().is_empty());

    reader.surface.set_config(ViewConfiguration {
        volume_keys_to_flip: true,
        ..ViewConfiguration::default()
    });
    reader.send(volume_down);
    reader.send(InputSignal::NativeKeyRelay(NativeKeyEvent {
        key_name: NativeKey::VolumeUp,
    }));

    assert_eq!(
        reader.renderer.calls(),
        &[RendererCall::GoRight, RendererCall::GoLeft]
    );
}

#[test]
fn dom_click_fallback_splits_window_in_half() {
    let mut reader = Reader::new(ViewConfiguration::default(), RecordingRenderer::paginated());

    for client_x in [10.0, 399.0, 400.0, 790.0] {
        reader.send(InputSignal::DomEvent(DomClick {
            client_x,
            client_y: 0.0,
            window_width: 800.0,
        }));
    }

    assert_eq!(
        reader.renderer.calls(),
        &[
            RendererCall::GoLeft,
            RendererCall::GoLeft,
            RendererCall::GoRight,
            RendererCall::GoRight
        ]
    );
}

#[test]
fn wheel_and_mouse_buttons() {
    let mut reader = Reader::new(ViewConfiguration::default(), RecordingRenderer::paginated());

    reader.relay(IframePayload::Wheel {
        delta_y: Some(120.0),
    });
    reader.relay(IframePayload::MouseUp { button: Some(3) });
    reader.relay(IframePayload::MouseUp { button: Some(4) });

    assert_eq!(
        reader.renderer.calls(),
        &[
            RendererCall::Next { distance: 1.0 },
            RendererCall::HistoryBack,
            RendererCall::HistoryForward
        ]
    );
}

#[test]
fn renderer_without_history_swallows_mouse_buttons() {
    let renderer = RecordingRenderer::paginated().with_capabilities(RendererCapabilities {
        history_navigation: false,
        ..RendererCapabilities::ALL
    });
    let mut reader = Reader::new(ViewConfiguration::default(), renderer);

    reader.relay(IframePayload::MouseUp { button: Some(3) });

    assert!(reader.renderer.calls().is_empty());
}

// ===== Continuous scroll =====

#[test]
fn touch_scroll_on_short_section_waits_for_relocate() {
    // GIVEN: continuous scrolling over content smaller than the viewport
    let config = ViewConfiguration {
        scrolled: true,
        continuous_scroll: true,
        ..ViewConfiguration::default()
    };
    let renderer = RecordingRenderer::scrolled(500.0).with_extents(ScrollExtents {
        scrolled: true,
        start: 0.0,
        end: 500.0,
        size: 500.0,
        view_size: 800.0,
    });
    let mut reader = Reader::new(config, renderer);

    // WHEN: the user pulls down past the threshold
    let scheduled = reader.surface.handle_scroll(
        ScrollSource::Touch,
        40.0,
        20.0,
        &reader.renderer,
        &mut reader.clock,
    );

    // THEN: nothing is evaluated until the renderer relocates
    assert_eq!(scheduled, None);
    reader.wait(500);
    assert!(reader.renderer.calls().is_empty());

    reader
        .surface
        .handle_relocate(&reader.renderer, &mut reader.clock);
    reader.wait(99);
    assert!(reader.renderer.calls().is_empty(), "Still settling");
    reader.wait(1);
    assert_eq!(
        reader.renderer.calls(),
        &[RendererCall::Prev { distance: 1.0 }]
    );
}

// ===== Long press =====

#[derive(Default)]
struct Device {
    pulses: Vec<Duration>,
    menus: Vec<(f64, f64)>,
}

struct Motor<'a>(&'a mut Vec<Duration>);

impl Haptics for Motor<'_> {
    fn is_supported(&self) -> bool {
        true
    }

    fn pulse(&mut self, duration: Duration) {
        self.0.push(duration);
    }
}

struct Menu<'a>(&'a mut Vec<(f64, f64)>);

impl LongPressHandler for Menu<'_> {
    fn on_long_press(&mut self, x: f64, y: f64) {
        self.0.push((x, y));
    }
}

fn hold(
    detector: &mut LongPressDetector,
    clock: &mut ManualScheduler<pageturn::state::LongPressTimeout>,
    device: &mut Device,
    ms: u64,
) {
    for (id, _) in clock.advance(Duration::from_millis(ms)) {
        detector.on_timeout(id, &mut Motor(&mut device.pulses), &mut Menu(&mut device.menus));
    }
}

#[test]
fn held_press_fires_once_and_swallows_its_click() {
    let mut detector = LongPressDetector::new(&EngineTuning::default());
    let mut clock = ManualScheduler::new();
    let mut device = Device::default();

    detector.on_pointer_down(100.0, 100.0, &mut clock);
    hold(&mut detector, &mut clock, &mut device, 500);
    hold(&mut detector, &mut clock, &mut device, 500);

    assert_eq!(device.menus, vec![(100.0, 100.0)]);
    assert_eq!(device.pulses, vec![Duration::from_millis(50)]);
    assert_eq!(
        detector.on_pointer_up(&mut clock),
        ClickDisposition::Suppress
    );

    // The next ordinary tap is delivered
    detector.on_pointer_down(100.0, 100.0, &mut clock);
    hold(&mut detector, &mut clock, &mut device, 100);
    assert_eq!(detector.on_pointer_up(&mut clock), ClickDisposition::Deliver);
}

#[test]
fn drifting_press_is_cancelled_and_click_delivered() {
    let mut detector = LongPressDetector::new(&EngineTuning::default());
    let mut clock = ManualScheduler::new();
    let mut device = Device::default();

    detector.on_pointer_down(100.0, 100.0, &mut clock);
    hold(&mut detector, &mut clock, &mut device, 200);
    detector.on_pointer_move(115.0, 100.0, &mut clock);
    hold(&mut detector, &mut clock, &mut device, 600);

    assert!(device.menus.is_empty());
    assert!(device.pulses.is_empty());
    assert_eq!(detector.on_pointer_up(&mut clock), ClickDisposition::Deliver);
}
