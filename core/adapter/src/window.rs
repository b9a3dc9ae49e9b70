//! Launcher window detection and hiding.
//!
//! The launcher is driven programmatically and should not pop over the host
//! UI, so after starting it the adapter hides its main window as soon as it
//! appears. Platforms without window detection report the window as absent
//! and hiding as a no-op.

/// Visibility control over the launcher's main window.
pub trait LauncherWindow: Send + Sync {
    /// True when the launcher's main window exists, visible or not.
    fn is_present(&self) -> bool;

    /// Hides the window. Returns true only when a visible window was
    /// actually hidden this call; this is the progress condition of the
    /// post-start poll loop.
    fn hide(&self) -> bool;
}

/// Fallback for platforms without window detection.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullWindow;

impl LauncherWindow for NullWindow {
    fn is_present(&self) -> bool {
        false
    }

    fn hide(&self) -> bool {
        false
    }
}

/// Returns the window control for the current platform.
pub fn platform_window(title: &str) -> Box<dyn LauncherWindow> {
    #[cfg(windows)]
    {
        Box::new(crate::window_windows::Win32Window::new(title))
    }
    #[cfg(not(windows))]
    {
        let _ = title;
        Box::new(NullWindow)
    }
}
