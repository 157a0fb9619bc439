// Terminal panel anchored to the top-right corner (crossterm)

use super::OverlayRenderer;
use crate::models::{DisplayLine, LineStyle, PanelRect};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use crossterm::{execute, queue};
use std::io::{self, Stdout, Write};
use std::sync::{Arc, Mutex};
use tracing::warn;

/// Width used when the terminal size cannot be queried (e.g. output is not a tty).
const FALLBACK_WIDTH: u16 = 80;

/// Opacity below which lines are drawn dimmed.
const DIM_BELOW: f32 = 0.5;

/// First row of the panel. Row 0 is left empty.
const TOP_ROW: u16 = 1;

/// Last presented panel area, shared with the pointer reader. `None` before the first frame.
pub type SharedBounds = Arc<Mutex<Option<PanelRect>>>;

/// Text is drawn in the terminal's own font; `LineStyle::font_size` has no effect here.
pub struct TerminalRenderer<W: Write> {
    out: W,
    margin: u16,
    rows_drawn: u16,
    /// Leftmost and rightmost columns touched by the frame being drawn.
    span: Option<(u16, u16)>,
    dim: bool,
    width: Option<u16>,
    bounds: SharedBounds,
}

impl TerminalRenderer<Stdout> {
    pub fn stdout(margin: u16) -> Self {
        Self::new(io::stdout(), margin)
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, margin: u16) -> Self {
        Self {
            out,
            margin,
            rows_drawn: 0,
            span: None,
            dim: false,
            width: None,
            bounds: Arc::new(Mutex::new(None)),
        }
    }

    /// Fixes the panel width instead of querying the terminal.
    pub fn with_width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn bounds(&self) -> SharedBounds {
        self.bounds.clone()
    }

    /// Raw mode, alternate screen, hidden cursor and mouse reporting. Undone by `finish()`.
    pub fn enter(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        execute!(self.out, EnterAlternateScreen, Hide, EnableMouseCapture)
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn width(&self) -> u16 {
        self.width
            .or_else(|| terminal::size().ok().map(|(w, _)| w))
            .unwrap_or(FALLBACK_WIDTH)
    }

    fn draw_line(&mut self, line: &DisplayLine, style: &LineStyle) -> io::Result<()> {
        let row = TOP_ROW + self.rows_drawn;
        let text_width = line.as_str().chars().count() as u16;
        let right = self.width().saturating_sub(self.margin);
        let col = right.saturating_sub(text_width);
        let color = Color::Rgb {
            r: style.color.r,
            g: style.color.g,
            b: style.color.b,
        };
        queue!(self.out, MoveTo(col, row), SetForegroundColor(color))?;
        if self.dim {
            queue!(self.out, SetAttribute(Attribute::Dim))?;
        }
        queue!(
            self.out,
            Print(line.as_str()),
            SetAttribute(Attribute::Reset),
            ResetColor
        )?;
        let end = col.saturating_add(text_width);
        self.span = Some(match self.span {
            Some((l, r)) => (l.min(col), r.max(end)),
            None => (col, end),
        });
        self.rows_drawn += 1;
        Ok(())
    }

    fn erase(&mut self) -> io::Result<()> {
        for row in TOP_ROW..TOP_ROW + self.rows_drawn {
            queue!(self.out, MoveTo(0, row), Clear(ClearType::CurrentLine))?;
        }
        self.rows_drawn = 0;
        self.span = None;
        Ok(())
    }

    fn publish_bounds(&self) {
        let rect = self.span.map(|(left, right)| PanelRect {
            left,
            top: TOP_ROW,
            width: right - left,
            height: self.rows_drawn,
        });
        if let Ok(mut guard) = self.bounds.lock() {
            *guard = rect;
        }
    }
}

impl<W: Write> OverlayRenderer for TerminalRenderer<W> {
    fn clear(&mut self) {
        if let Err(e) = self.erase() {
            warn!(error = %e, operation = "terminal_clear", "terminal write failed");
        }
    }

    fn append(&mut self, line: &DisplayLine, style: &LineStyle) {
        if let Err(e) = self.draw_line(line, style) {
            warn!(error = %e, operation = "terminal_append", "terminal write failed");
        }
    }

    fn present(&mut self) {
        self.publish_bounds();
        if let Err(e) = self.out.flush() {
            warn!(error = %e, operation = "terminal_flush", "terminal write failed");
        }
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.dim = opacity < DIM_BELOW;
    }

    fn finish(&mut self) {
        if let Err(e) = execute!(self.out, DisableMouseCapture, Show, LeaveAlternateScreen) {
            warn!(error = %e, operation = "terminal_finish", "terminal restore failed");
        }
        if let Err(e) = disable_raw_mode() {
            warn!(error = %e, operation = "terminal_finish", "leaving raw mode failed");
        }
    }
}
