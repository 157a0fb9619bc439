// Pointer hover fades the panel

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverOpacity {
    idle: f32,
    hovered: f32,
    is_hovered: bool,
}

impl HoverOpacity {
    pub fn new(idle: f32, hovered: f32) -> Self {
        Self {
            idle,
            hovered,
            is_hovered: false,
        }
    }

    pub fn current(&self) -> f32 {
        if self.is_hovered {
            self.hovered
        } else {
            self.idle
        }
    }

    /// New opacity, or `None` if the pointer was already over the panel.
    pub fn on_enter(&mut self) -> Option<f32> {
        if self.is_hovered {
            return None;
        }
        self.is_hovered = true;
        Some(self.hovered)
    }

    /// New opacity, or `None` if the pointer was not over the panel.
    pub fn on_leave(&mut self) -> Option<f32> {
        if !self.is_hovered {
            return None;
        }
        self.is_hovered = false;
        Some(self.idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_and_leave_toggle_between_configured_opacities() {
        let mut hover = HoverOpacity::new(1.0, 0.3);
        assert_eq!(hover.current(), 1.0);
        assert_eq!(hover.on_enter(), Some(0.3));
        assert_eq!(hover.current(), 0.3);
        assert_eq!(hover.on_enter(), None);
        assert_eq!(hover.on_leave(), Some(1.0));
        assert_eq!(hover.on_leave(), None);
    }
}
