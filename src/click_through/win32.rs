// Win32 extended window styles via user32

use super::{ClickThroughError, GWL_EXSTYLE, WindowHandle, WindowStyleApi};
use windows_sys::Win32::Foundation::{GetLastError, HWND, SetLastError};
use windows_sys::Win32::System::Console::GetConsoleWindow;
use windows_sys::Win32::UI::WindowsAndMessaging::{
    GetWindowLongW, LWA_ALPHA, SetLayeredWindowAttributes, SetWindowLongW,
};

pub(super) struct Win32WindowStyle;

// GetWindowLongW/SetWindowLongW return 0 both on failure and for a zero style, so the last
// error is cleared first and checked afterwards.
impl WindowStyleApi for Win32WindowStyle {
    fn get_extended_style(&self, window: WindowHandle) -> Result<u32, ClickThroughError> {
        let hwnd = window.0 as HWND;
        unsafe {
            SetLastError(0);
            let bits = GetWindowLongW(hwnd, GWL_EXSTYLE);
            if bits == 0 {
                let code = GetLastError();
                if code != 0 {
                    return Err(ClickThroughError::GetStyle(code));
                }
            }
            Ok(bits as u32)
        }
    }

    fn set_extended_style(
        &self,
        window: WindowHandle,
        bits: u32,
    ) -> Result<(), ClickThroughError> {
        let hwnd = window.0 as HWND;
        unsafe {
            SetLastError(0);
            if SetWindowLongW(hwnd, GWL_EXSTYLE, bits as i32) == 0 {
                let code = GetLastError();
                if code != 0 {
                    return Err(ClickThroughError::SetStyle(code));
                }
            }
        }
        Ok(())
    }

    fn set_layered_alpha(&self, window: WindowHandle, alpha: u8) -> Result<(), ClickThroughError> {
        let hwnd = window.0 as HWND;
        unsafe {
            if SetLayeredWindowAttributes(hwnd, 0, alpha, LWA_ALPHA) == 0 {
                return Err(ClickThroughError::SetAlpha(GetLastError()));
            }
        }
        Ok(())
    }
}

pub(super) fn console_window() -> Option<WindowHandle> {
    let hwnd = unsafe { GetConsoleWindow() };
    if hwnd.is_null() {
        None
    } else {
        Some(WindowHandle(hwnd as isize))
    }
}
