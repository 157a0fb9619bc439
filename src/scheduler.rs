// Poll loop: one periodic tick (refresh -> render), window events, cancellation.
// Runs on a single task; a tick completes before the next one can start.

use crate::aggregator::TelemetryAggregator;
use crate::click_through::{ClickThroughController, WindowHandle};
use crate::hover::HoverOpacity;
use crate::models::LineStyle;
use crate::renderer::OverlayRenderer;
use tokio::sync::mpsc;
use tokio::time::{Duration, MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;

/// Lifecycle and pointer events from the windowing side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    Displayable(WindowHandle),
    PointerEntered,
    PointerLeft,
}

/// Collaborators owned by the scheduler for its lifetime.
pub struct SchedulerDeps {
    pub aggregator: TelemetryAggregator,
    pub renderer: Box<dyn OverlayRenderer>,
    /// `None` when click-through is disabled.
    pub click_through: Option<ClickThroughController>,
    pub events: Option<mpsc::Receiver<WindowEvent>>,
    pub token: CancellationToken,
}

pub struct SchedulerConfig {
    pub interval_ms: u64,
    pub style: LineStyle,
    pub idle_opacity: f32,
    pub hovered_opacity: f32,
}

pub struct PollScheduler {
    aggregator: TelemetryAggregator,
    renderer: Box<dyn OverlayRenderer>,
    click_through: Option<ClickThroughController>,
    events: Option<mpsc::Receiver<WindowEvent>>,
    token: CancellationToken,
    hover: HoverOpacity,
    style: LineStyle,
    period: Duration,
    ticks: u64,
}

impl PollScheduler {
    pub fn new(deps: SchedulerDeps, config: SchedulerConfig) -> Self {
        let SchedulerDeps {
            aggregator,
            renderer,
            click_through,
            events,
            token,
        } = deps;
        Self {
            aggregator,
            renderer,
            click_through,
            events,
            token,
            hover: HoverOpacity::new(config.idle_opacity, config.hovered_opacity),
            style: config.style,
            period: Duration::from_millis(config.interval_ms),
            ticks: 0,
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn click_through(&self) -> Option<&ClickThroughController> {
        self.click_through.as_ref()
    }

    /// One poll-aggregate-render cycle.
    pub fn tick(&mut self) {
        let lines = self.aggregator.refresh();
        self.renderer.render(lines, &self.style);
        self.ticks += 1;
    }

    pub fn handle_event(&mut self, event: WindowEvent) {
        match event {
            WindowEvent::Displayable(window) => {
                if let Some(controller) = self.click_through.as_mut() {
                    controller.on_displayable(window);
                }
            }
            WindowEvent::PointerEntered => {
                if let Some(opacity) = self.hover.on_enter() {
                    self.renderer.set_opacity(opacity);
                }
            }
            WindowEvent::PointerLeft => {
                if let Some(opacity) = self.hover.on_leave() {
                    self.renderer.set_opacity(opacity);
                }
            }
        }
    }

    /// Ticks until the token is cancelled, then restores the renderer. Returns the scheduler
    /// so callers can inspect it.
    pub async fn run(mut self) -> Self {
        let token = self.token.clone();
        let mut tick = interval(self.period);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let span = tracing::span!(
            tracing::Level::DEBUG,
            "poll_scheduler",
            interval_ms = self.period.as_millis() as u64
        );
        let _guard = span.enter();

        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    tracing::debug!(ticks = self.ticks, "poll scheduler shutting down");
                    break;
                }
                event = next_event(&mut self.events) => {
                    match event {
                        Some(event) => self.handle_event(event),
                        None => {
                            tracing::debug!("window event channel closed");
                            self.events = None;
                        }
                    }
                }
                _ = tick.tick() => self.tick(),
            }
        }
        self.renderer.finish();
        self
    }
}

async fn next_event(events: &mut Option<mpsc::Receiver<WindowEvent>>) -> Option<WindowEvent> {
    match events {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
