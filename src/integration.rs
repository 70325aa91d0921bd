//! Replay loop: recorded host events in, renderer and host calls out.
//!
//! Drives one [`ReadingSurface`] and one long-press detector against a
//! [`RecordingRenderer`] on a virtual clock. Every call that takes effect is
//! written as one JSON object per line, tagged by `call`.

use std::io::Write;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, trace};

use crate::config::EngineTuning;
use crate::model::error::{AppError, InputError};
use crate::model::{SessionId, ViewConfiguration};
use crate::parser::{parse_trace_line, TraceEvent};
use crate::renderer::{RecordingRenderer, RendererCall, TextDirection};
use crate::scheduler::{ManualScheduler, Scheduler, TimerId, Timestamp};
use crate::state::{
    BoundaryCrossing, ClickDisposition, Haptics, LongPressDetector, LongPressHandler,
    LongPressTimeout, PassThrough, ReadingSurface,
};

/// Deferred work on the replay clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayTask {
    Crossing(BoundaryCrossing),
    LongPress(LongPressTimeout),
}

/// View of the shared replay scheduler for one kind of task.
struct Lane<'a>(&'a mut ManualScheduler<ReplayTask>);

impl Scheduler<BoundaryCrossing> for Lane<'_> {
    fn now(&self) -> Timestamp {
        self.0.now()
    }

    fn schedule(&mut self, delay: Duration, task: BoundaryCrossing) -> TimerId {
        self.0.schedule(delay, ReplayTask::Crossing(task))
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.0.cancel(id)
    }
}

impl Scheduler<LongPressTimeout> for Lane<'_> {
    fn now(&self) -> Timestamp {
        self.0.now()
    }

    fn schedule(&mut self, delay: Duration, task: LongPressTimeout) -> TimerId {
        self.0.schedule(delay, ReplayTask::LongPress(task))
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.0.cancel(id)
    }
}

/// Host-side effect that is not a renderer call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "camelCase")]
pub enum HostCall {
    Haptic {
        #[serde(rename = "durationMs")]
        duration_ms: u64,
    },
    LongPress {
        x: f64,
        y: f64,
    },
    /// The click following a fired long press was swallowed and never
    /// reached the normalizer.
    ClickSuppressed,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum OutputLine {
    Renderer(RendererCall),
    Host(HostCall),
}

#[derive(Debug, Default)]
struct SimulatedHaptics {
    supported: bool,
    pulses: Vec<HostCall>,
}

impl Haptics for SimulatedHaptics {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn pulse(&mut self, duration: Duration) {
        let duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self.pulses.push(HostCall::Haptic { duration_ms });
    }
}

#[derive(Debug, Default)]
struct ActionDrawer {
    opened: Vec<HostCall>,
}

impl LongPressHandler for ActionDrawer {
    fn on_long_press(&mut self, x: f64, y: f64) {
        self.opened.push(HostCall::LongPress { x, y });
    }
}

/// Simulated device the trace is replayed on.
#[derive(Debug, Clone, Copy)]
pub struct ReplayOptions {
    /// Text direction the renderer reports.
    pub direction: TextDirection,
    /// Renderer starts laid out in pages rather than scrolled.
    pub paginated_renderer: bool,
    /// Device can vibrate.
    pub haptics: bool,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        Self {
            direction: TextDirection::Ltr,
            paginated_renderer: false,
            haptics: true,
        }
    }
}

/// Counters reported when a replay finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    /// Trace events handled.
    pub events: usize,
    /// Lines skipped as malformed.
    pub skipped: usize,
    /// Navigation intents produced.
    pub intents: usize,
    /// Output lines written.
    pub calls: usize,
}

/// One replay session writing to `W`.
pub struct Replay<W: Write> {
    surface: ReadingSurface,
    renderer: RecordingRenderer,
    scheduler: ManualScheduler<ReplayTask>,
    long_press: LongPressDetector,
    haptics: SimulatedHaptics,
    drawer: ActionDrawer,
    swallow_next_click: bool,
    out: W,
    stats: ReplayStats,
}

impl<W: Write> Replay<W> {
    pub fn new(
        session: SessionId,
        view: ViewConfiguration,
        tuning: EngineTuning,
        options: ReplayOptions,
        out: W,
    ) -> Self {
        let mut renderer = RecordingRenderer::new().with_direction(options.direction);
        renderer.extents.scrolled = !options.paginated_renderer;

        Self {
            long_press: LongPressDetector::new(&tuning),
            surface: ReadingSurface::new(session, view, tuning),
            renderer,
            scheduler: ManualScheduler::new(),
            haptics: SimulatedHaptics {
                supported: options.haptics,
                pulses: Vec::new(),
            },
            drawer: ActionDrawer::default(),
            swallow_next_click: false,
            out,
            stats: ReplayStats::default(),
        }
    }

    pub fn renderer(&self) -> &RecordingRenderer {
        &self.renderer
    }

    pub fn surface(&self) -> &ReadingSurface {
        &self.surface
    }

    pub fn stats(&self) -> ReplayStats {
        self.stats
    }

    /// Parse and handle one raw trace line. Blank and malformed lines are skipped.
    ///
    /// # Errors
    ///
    /// Only failures writing output are returned.
    pub fn handle_line(&mut self, raw: &str, line_number: usize) -> std::io::Result<()> {
        if raw.trim().is_empty() {
            return Ok(());
        }
        match parse_trace_line(raw, line_number) {
            Ok(event) => self.handle_event(event),
            Err(error) => {
                debug!(%error, "skipping trace line");
                self.stats.skipped += 1;
                Ok(())
            }
        }
    }

    /// Run everything due by the event's timestamp, then handle the event.
    ///
    /// # Errors
    ///
    /// Only failures writing output are returned.
    pub fn handle_event(&mut self, event: TraceEvent) -> std::io::Result<()> {
        let due = self.scheduler.advance_to(event.at());
        self.run_tasks(due)?;
        self.stats.events += 1;

        let now = self.scheduler.now();
        trace!(?event, "replaying");

        if self.swallow_next_click && event.is_click() {
            self.swallow_next_click = false;
            debug!("click after long press swallowed");
            return self.write_line(&OutputLine::Host(HostCall::ClickSuppressed));
        }

        if let Some(signal) = event.to_signal() {
            let intent =
                self.surface
                    .handle_signal(&signal, &mut self.renderer, now, &mut PassThrough);
            if intent.is_some() {
                self.stats.intents += 1;
            }
            return self.flush();
        }

        match event {
            TraceEvent::Scroll {
                mode,
                delta,
                threshold,
                ..
            } => {
                self.surface.handle_scroll(
                    mode,
                    delta,
                    threshold,
                    &self.renderer,
                    &mut Lane(&mut self.scheduler),
                );
            }
            TraceEvent::Relocate { .. } => {
                self.surface
                    .handle_relocate(&self.renderer, &mut Lane(&mut self.scheduler));
            }
            TraceEvent::Extents { .. } => {
                if let Some(extents) = event.apply_extents(self.renderer.extents) {
                    self.renderer.extents = extents;
                }
            }
            TraceEvent::Geometry { .. } => {
                self.surface.set_geometry(event.geometry());
            }
            TraceEvent::Config { view, .. } => {
                info!(?view, "view settings replaced");
                self.surface.set_config(view);
            }
            TraceEvent::PointerDown { x, y, .. } => {
                // A new press means the platform never sent the synthetic click
                self.swallow_next_click = false;
                self.long_press
                    .on_pointer_down(x, y, &mut Lane(&mut self.scheduler));
            }
            TraceEvent::PointerMove { x, y, .. } => {
                self.long_press
                    .on_pointer_move(x, y, &mut Lane(&mut self.scheduler));
            }
            TraceEvent::PointerUp { .. } => {
                let disposition = self.long_press.on_pointer_up(&mut Lane(&mut self.scheduler));
                self.swallow_next_click = disposition == ClickDisposition::Suppress;
            }
            TraceEvent::PointerCancel { .. } => {
                self.long_press
                    .on_pointer_cancel(&mut Lane(&mut self.scheduler));
            }
            TraceEvent::Iframe { .. }
            | TraceEvent::NativeKey { .. }
            | TraceEvent::DomClick { .. } => {}
        }
        self.flush()
    }

    /// Run every remaining deferred task and flush the output.
    ///
    /// # Errors
    ///
    /// Returns failures writing output.
    pub fn finish(mut self) -> std::io::Result<ReplayStats> {
        let due = self.scheduler.drain();
        self.run_tasks(due)?;
        self.out.flush()?;
        Ok(self.stats)
    }

    fn run_tasks(&mut self, due: Vec<(TimerId, ReplayTask)>) -> std::io::Result<()> {
        for (id, task) in due {
            match task {
                ReplayTask::Crossing(crossing) => {
                    self.surface.run_crossing(crossing, &mut self.renderer);
                }
                ReplayTask::LongPress(_) => {
                    self.long_press
                        .on_timeout(id, &mut self.haptics, &mut self.drawer);
                }
            }
            self.flush()?;
        }
        Ok(())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        let host: Vec<HostCall> = self
            .haptics
            .pulses
            .drain(..)
            .chain(self.drawer.opened.drain(..))
            .collect();
        for call in self.renderer.take_calls() {
            self.write_line(&OutputLine::Renderer(call))?;
        }
        for call in host {
            self.write_line(&OutputLine::Host(call))?;
        }
        Ok(())
    }

    fn write_line(&mut self, line: &OutputLine) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.out, line)?;
        self.out.write_all(b"\n")?;
        self.stats.calls += 1;
        Ok(())
    }
}

/// Feed every line from `lines` through `replay`, then drain it.
///
/// # Errors
///
/// Returns the first input or output failure. Malformed lines are not errors.
pub fn run_replay<W, I>(lines: I, mut replay: Replay<W>) -> Result<ReplayStats, AppError>
where
    W: Write,
    I: IntoIterator<Item = Result<String, InputError>>,
{
    for (index, line) in lines.into_iter().enumerate() {
        replay.handle_line(&line?, index + 1)?;
    }
    let stats = replay.finish()?;
    info!(
        events = stats.events,
        skipped = stats.skipped,
        intents = stats.intents,
        calls = stats.calls,
        "replay finished"
    );
    Ok(stats)
}
