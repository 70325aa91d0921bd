//! One mounted reading view: signals in, renderer calls out.
//!
//! Owns the per-surface gesture state (touch tracker, relocate listener) so
//! two open books never share it. The renderer, scheduler and click
//! interceptor belong to the host and are lent per call.

use tracing::trace;

use crate::config::EngineTuning;
use crate::model::{InputSignal, NavigationIntent, SessionId, ViewConfiguration};
use crate::renderer::Renderer;
use crate::scheduler::{Scheduler, TimerId, Timestamp};
use crate::state::dispatcher::dispatch;
use crate::state::edge_monitor::{BoundaryCrossing, EdgeMonitor, ScrollSource};
use crate::state::normalizer::{ClickInterceptor, InputNormalizer, SurfaceGeometry};

#[derive(Debug, Clone)]
pub struct ReadingSurface {
    normalizer: InputNormalizer,
    monitor: EdgeMonitor,
    config: ViewConfiguration,
    tuning: EngineTuning,
}

impl ReadingSurface {
    pub fn new(session: SessionId, config: ViewConfiguration, tuning: EngineTuning) -> Self {
        Self {
            normalizer: InputNormalizer::new(session, tuning.clone()),
            monitor: EdgeMonitor::new(&tuning),
            config,
            tuning,
        }
    }

    pub fn session(&self) -> &SessionId {
        self.normalizer.session()
    }

    pub fn config(&self) -> &ViewConfiguration {
        &self.config
    }

    /// Replace the view settings. Takes effect from the next signal.
    pub fn set_config(&mut self, config: ViewConfiguration) {
        self.config = config;
    }

    pub fn set_geometry(&mut self, geometry: Option<SurfaceGeometry>) {
        self.normalizer.set_geometry(geometry);
    }

    pub fn monitor(&self) -> &EdgeMonitor {
        &self.monitor
    }

    /// Classify `signal` and apply the resulting intent, if any.
    pub fn handle_signal<R, I>(
        &mut self,
        signal: &InputSignal,
        renderer: &mut R,
        now: Timestamp,
        interceptor: &mut I,
    ) -> Option<NavigationIntent>
    where
        R: Renderer + ?Sized,
        I: ClickInterceptor + ?Sized,
    {
        let intent = self
            .normalizer
            .normalize(signal, &self.config, now, interceptor)?;
        dispatch(intent, renderer, &self.config, &self.tuning);
        Some(intent)
    }

    /// Host reported a scroll on the content surface.
    pub fn handle_scroll<R, S>(
        &mut self,
        source: ScrollSource,
        scroll_delta: f64,
        threshold: f64,
        renderer: &R,
        scheduler: &mut S,
    ) -> Option<TimerId>
    where
        R: Renderer + ?Sized,
        S: Scheduler<BoundaryCrossing>,
    {
        self.monitor.on_scroll(
            source,
            scroll_delta,
            threshold,
            renderer,
            &self.config,
            scheduler,
        )
    }

    /// Renderer emitted its relocate notification.
    pub fn handle_relocate<R, S>(&mut self, renderer: &R, scheduler: &mut S) -> Option<TimerId>
    where
        R: Renderer + ?Sized,
        S: Scheduler<BoundaryCrossing>,
    {
        self.monitor.on_relocate(renderer, scheduler)
    }

    /// Run a boundary crossing the scheduler reported as due.
    pub fn run_crossing<R>(&self, crossing: BoundaryCrossing, renderer: &mut R)
    where
        R: Renderer + ?Sized,
    {
        trace!(?crossing, session = %self.session(), "deferred crossing due");
        self.monitor.run_crossing(crossing, renderer);
    }
}
