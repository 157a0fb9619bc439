// Terminal input: mouse motion over the panel becomes hover events; quit keys cancel

use crate::models::PanelRect;
use crate::renderer::SharedBounds;
use crate::scheduler::WindowEvent;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// How long one `event::poll` waits before the cancellation token is checked again.
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Turns pointer positions into enter/leave transitions for the panel area.
#[derive(Debug, Default)]
pub struct PointerTracker {
    inside: bool,
}

impl PointerTracker {
    /// `PointerEntered`/`PointerLeft` when the position crosses the panel edge, else `None`.
    /// With no panel drawn every position counts as outside.
    pub fn on_move(&mut self, column: u16, row: u16, panel: Option<PanelRect>) -> Option<WindowEvent> {
        let inside = panel.is_some_and(|p| p.contains(column, row));
        if inside == self.inside {
            return None;
        }
        self.inside = inside;
        Some(if inside {
            WindowEvent::PointerEntered
        } else {
            WindowEvent::PointerLeft
        })
    }
}

/// Ctrl-C, `q` and Esc. Raw mode swallows SIGINT, so the keys stand in for it.
pub fn is_quit_key(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') | KeyCode::Esc => true,
        _ => false,
    }
}

/// Reads terminal events on a blocking thread until the token is cancelled or the scheduler
/// stops listening.
pub fn spawn_terminal_input(
    bounds: SharedBounds,
    events: mpsc::Sender<WindowEvent>,
    token: CancellationToken,
) -> JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        let mut tracker = PointerTracker::default();
        while !token.is_cancelled() {
            let ready = match event::poll(POLL_TIMEOUT) {
                Ok(ready) => ready,
                Err(e) => {
                    warn!(error = %e, operation = "terminal_input", "terminal input unavailable");
                    return;
                }
            };
            if !ready {
                continue;
            }
            match event::read() {
                Ok(Event::Mouse(mouse)) => {
                    if !matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
                        continue;
                    }
                    let panel = bounds.lock().ok().and_then(|guard| *guard);
                    if let Some(event) = tracker.on_move(mouse.column, mouse.row, panel) {
                        if events.blocking_send(event).is_err() {
                            debug!("window event channel closed; stopping terminal input");
                            return;
                        }
                    }
                }
                Ok(Event::Key(key)) if is_quit_key(&key) => {
                    debug!("quit key pressed");
                    token.cancel();
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, operation = "terminal_input", "reading terminal event failed");
                    return;
                }
            }
        }
    })
}
