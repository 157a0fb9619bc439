// Click-through: Interactive -> ClickThrough via extended window style bits

#[cfg(windows)]
mod win32;

use thiserror::Error;
use tracing::{debug, info, warn};

/// Index of the extended style field for GetWindowLong/SetWindowLong.
pub const GWL_EXSTYLE: i32 = -20;
pub const WS_EX_TRANSPARENT: u32 = 0x20;
pub const WS_EX_LAYERED: u32 = 0x8_0000;
pub const CLICK_THROUGH_BITS: u32 = WS_EX_LAYERED | WS_EX_TRANSPARENT;

/// Native window handle (HWND on Windows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub isize);

#[derive(Debug, Error)]
pub enum ClickThroughError {
    #[error("null window handle")]
    NullHandle,
    #[error("reading extended window style failed (os error {0})")]
    GetStyle(u32),
    #[error("writing extended window style failed (os error {0})")]
    SetStyle(u32),
    #[error("setting layered window alpha failed (os error {0})")]
    SetAlpha(u32),
    #[error("extended window styles are not supported on this platform")]
    Unsupported,
}

/// OS window-style capability.
pub trait WindowStyleApi {
    fn get_extended_style(&self, window: WindowHandle) -> Result<u32, ClickThroughError>;

    fn set_extended_style(&self, window: WindowHandle, bits: u32)
    -> Result<(), ClickThroughError>;

    /// Whole-window alpha of a layered window. A layered window without it is not drawn.
    fn set_layered_alpha(&self, window: WindowHandle, alpha: u8) -> Result<(), ClickThroughError>;
}

/// Maps an opacity in `0.0..=1.0` to a layered-window alpha byte.
pub fn alpha_from_opacity(opacity: f32) -> u8 {
    (opacity.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// ORs the layered and transparent bits into the window's extended style and gives the layered
/// window its alpha. Returns the new bits. Applying it again leaves the bits unchanged.
///
/// If the alpha cannot be set the previous style is written back.
pub fn set_click_through(
    api: &dyn WindowStyleApi,
    window: WindowHandle,
    alpha: u8,
) -> Result<u32, ClickThroughError> {
    if window.0 == 0 {
        return Err(ClickThroughError::NullHandle);
    }
    let previous = api.get_extended_style(window)?;
    let bits = previous | CLICK_THROUGH_BITS;
    api.set_extended_style(window, bits)?;
    if let Err(e) = api.set_layered_alpha(window, alpha) {
        if let Err(restore) = api.set_extended_style(window, previous) {
            warn!(error = %restore, operation = "restore_window_style", "could not restore window style");
        }
        return Err(e);
    }
    Ok(bits)
}

pub struct UnsupportedWindowStyle;

impl WindowStyleApi for UnsupportedWindowStyle {
    fn get_extended_style(&self, _window: WindowHandle) -> Result<u32, ClickThroughError> {
        Err(ClickThroughError::Unsupported)
    }

    fn set_extended_style(
        &self,
        _window: WindowHandle,
        _bits: u32,
    ) -> Result<(), ClickThroughError> {
        Err(ClickThroughError::Unsupported)
    }

    fn set_layered_alpha(&self, _window: WindowHandle, _alpha: u8) -> Result<(), ClickThroughError> {
        Err(ClickThroughError::Unsupported)
    }
}

/// The window-style capability of the current platform.
pub fn platform_api() -> Box<dyn WindowStyleApi> {
    #[cfg(windows)]
    {
        Box::new(win32::Win32WindowStyle)
    }
    #[cfg(not(windows))]
    {
        Box::new(UnsupportedWindowStyle)
    }
}

/// The console window hosting this process, if the platform has one.
pub fn console_window() -> Option<WindowHandle> {
    #[cfg(windows)]
    {
        win32::console_window()
    }
    #[cfg(not(windows))]
    {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickState {
    Interactive,
    ClickThrough,
}

pub struct ClickThroughController {
    api: Box<dyn WindowStyleApi>,
    alpha: u8,
    state: ClickState,
    fired: bool,
}

impl ClickThroughController {
    /// `opacity` is the whole-window opacity applied together with click-through.
    pub fn new(api: Box<dyn WindowStyleApi>, opacity: f32) -> Self {
        Self {
            api,
            alpha: alpha_from_opacity(opacity),
            state: ClickState::Interactive,
            fired: false,
        }
    }

    pub fn state(&self) -> ClickState {
        self.state
    }

    /// Window became displayable. Only the first call acts; a failed attempt is not retried
    /// and leaves the overlay interactive.
    pub fn on_displayable(&mut self, window: WindowHandle) -> ClickState {
        if self.fired {
            return self.state;
        }
        self.fired = true;
        match set_click_through(self.api.as_ref(), window, self.alpha) {
            Ok(bits) => {
                info!(window = window.0, ex_style = bits, alpha = self.alpha, "click-through enabled");
                self.state = ClickState::ClickThrough;
            }
            Err(e) => {
                debug!(error = %e, operation = "set_click_through", "overlay stays interactive");
            }
        }
        self.state
    }
}
