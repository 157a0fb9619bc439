// Rendering surface: a passive list of styled text lines

mod terminal;

pub use terminal::{SharedBounds, TerminalRenderer};

use crate::models::{DisplayLine, LineStyle};

pub trait OverlayRenderer {
    fn clear(&mut self);

    fn append(&mut self, line: &DisplayLine, style: &LineStyle);

    /// Called once after each batch of appends.
    fn present(&mut self) {}

    fn set_opacity(&mut self, _opacity: f32) {}

    /// Restores the surface on shutdown.
    fn finish(&mut self) {}

    /// Redraws from scratch, preserving line order. Consumes the tick's lines.
    fn render(&mut self, lines: Vec<DisplayLine>, style: &LineStyle) {
        self.clear();
        for line in &lines {
            self.append(line, style);
        }
        self.present();
    }
}
