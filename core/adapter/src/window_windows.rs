//! Win32 window control for the launcher.

use std::ptr;

use windows_sys::Win32::Foundation::HWND;
use windows_sys::Win32::UI::WindowsAndMessaging::{
    FindWindowW, IsWindowVisible, ShowWindow, SW_HIDE,
};

use crate::window::LauncherWindow;

/// Finds and hides the launcher window by its title.
#[derive(Debug, Clone)]
pub struct Win32Window {
    title: Vec<u16>,
}

impl Win32Window {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.encode_utf16().chain(std::iter::once(0)).collect(),
        }
    }

    fn find(&self) -> HWND {
        // SAFETY: the title buffer is NUL-terminated and outlives the call.
        unsafe { FindWindowW(ptr::null(), self.title.as_ptr()) }
    }
}

impl LauncherWindow for Win32Window {
    fn is_present(&self) -> bool {
        !self.find().is_null()
    }

    fn hide(&self) -> bool {
        let hwnd = self.find();
        if hwnd.is_null() {
            return false;
        }
        // SAFETY: hwnd was just returned by FindWindowW.
        unsafe {
            if IsWindowVisible(hwnd) != 0 {
                ShowWindow(hwnd, SW_HIDE);
                return true;
            }
        }
        false
    }
}
