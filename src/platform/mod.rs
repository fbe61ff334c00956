//=========================================================================
// Platform Subsystem
//
// Bridges native windowing callbacks into each window's event queue.
//
// Architecture:
// ```text
//  Native callbacks                       Application thread
//  ┌──────────────────────────┐          ┌──────────────────────┐
//  │  winit event loop        │          │  Window::poll_event  │
//  │  (pump_app_events)       │          │   ↑                  │
//  │   ↓                      │          │  PlatformWindow      │
//  │  event_mapper            │          │   ::pop_event        │
//  │   └─ WindowEvent →       │          └──────────┬───────────┘
//  │      NativeEvent         │                     │
//  │   ↓                      │                     │
//  │  WindowCore::dispatch    │                     │
//  │   ├─ EventTranslator     │                     │
//  │   └─ EventQueue ─────────┼─────────────────────┘
//  └──────────────────────────┘
// ```
//
// Backends:
// - `winit_backend`: desktop backend (Windows, macOS, X11, Wayland),
//   pumped from the facade on every poll
// - `headless`: virtual display whose native callbacks are injected
//   through a channel; used for tests and display-less hosts
//
// Key Design Decisions:
// - **Poll pumps**: the native loop only runs when the application polls
//   and the queue is empty, so callbacks and polling share one thread
// - **One translator**: backends reduce callbacks to `NativeEvent`, the
//   translation rules exist once
// - **Late callbacks dropped**: after `close()` the core refuses events
//
//=========================================================================

//=== Submodules ==========================================================

pub mod headless;
pub mod native_event;
pub(crate) mod translator;
pub(crate) mod window_core;

#[cfg(any(
    target_os = "windows",
    target_os = "macos",
    target_os = "android",
    target_os = "linux",
    target_os = "dragonfly",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd",
))]
pub mod winit_backend;

//=== Standard Library Imports ============================================

use std::fmt;
use std::time::Duration;

//=== Internal Imports ====================================================

use crate::core::context::RenderContext;
use crate::core::event::Event;
use crate::core::state::WindowState;
use crate::core::video_mode::VideoMode;
use crate::window::WindowConfig;

pub use headless::{HeadlessWindow, NativeInjector};
pub use native_event::{ModifierMask, NativeEvent};

//=== NativeWindow ========================================================

/// Backend used by [`Window`](crate::Window) when none is named.
#[cfg(any(
    target_os = "windows",
    target_os = "macos",
    target_os = "android",
    target_os = "linux",
    target_os = "dragonfly",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd",
))]
pub type NativeWindow = winit_backend::WinitWindow;

/// Backend used by [`Window`](crate::Window) when none is named.
///
/// Targets without a pumpable native event loop get the headless backend.
#[cfg(not(any(
    target_os = "windows",
    target_os = "macos",
    target_os = "android",
    target_os = "linux",
    target_os = "dragonfly",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd",
)))]
pub type NativeWindow = headless::HeadlessWindow;

//=== PlatformError =======================================================

/// Window creation and platform call errors.
///
/// Creation errors are fatal to that window; nothing is half-built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// Failed to create the native event loop.
    EventLoopCreation(String),

    /// The native event loop stopped (it cannot be restarted).
    EventLoopExecution(String),

    /// The OS refused to create the window.
    WindowCreation(String),

    /// Icon pixel buffer does not hold `width * height` RGBA pixels.
    InvalidIcon { expected: usize, actual: usize },

    /// The OS refused a well-formed icon.
    IconRejected(String),

    /// The backend cannot perform the operation.
    Unsupported(&'static str),
}

//--- Trait Implementations -----------------------------------------------

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
            Self::WindowCreation(e) => write!(f, "Window creation failed: {}", e),
            Self::InvalidIcon { expected, actual } => write!(
                f,
                "Icon buffer holds {} bytes, expected {}",
                actual, expected
            ),
            Self::IconRejected(e) => write!(f, "Icon rejected: {}", e),
            Self::Unsupported(what) => write!(f, "Unsupported by this backend: {}", what),
        }
    }
}

impl std::error::Error for PlatformError {}

//=== PlatformWindow ======================================================

/// One native window: creation, event pumping, state mutation, teardown.
///
/// Implementations own the native handle, the event queue and the
/// rendering context. Callers guarantee that mutators are not invoked
/// after [`close`](PlatformWindow::close); the facade enforces this.
pub trait PlatformWindow: Sized {
    /// Creates and shows the native window.
    fn create(config: &WindowConfig) -> Result<Self, PlatformError>;

    //--- Events -----------------------------------------------------------

    /// Runs pending native callbacks without blocking.
    fn process_events(&mut self);

    /// Blocks until at least one callback ran or `timeout` elapsed.
    fn wait_events(&mut self, timeout: Option<Duration>);

    /// Removes the oldest translated event.
    fn pop_event(&mut self) -> Option<Event>;

    /// Events discarded because the queue limit was reached.
    fn dropped_events(&self) -> u64;

    //--- Queries ----------------------------------------------------------

    fn state(&self) -> &WindowState;

    fn context(&self) -> &RenderContext;

    /// Refresh rate of the display showing the window, in Hz.
    fn refresh_rate(&self) -> Option<f64>;

    /// Modes the display supports for fullscreen.
    fn fullscreen_modes(&self) -> Vec<VideoMode>;

    //--- Lifetime ---------------------------------------------------------

    /// Destroys the native window and releases the context. Idempotent.
    fn close(&mut self);

    /// Presents the rendering surface.
    fn display(&mut self);

    //--- Mutators ---------------------------------------------------------

    fn set_vertical_sync(&mut self, enabled: bool);
    fn set_mouse_cursor_visible(&mut self, visible: bool);
    fn set_cursor_position(&mut self, x: u32, y: u32);
    fn set_position(&mut self, x: i32, y: i32);
    fn set_size(&mut self, width: u32, height: u32);
    fn set_title(&mut self, title: &str);
    fn set_visible(&mut self, visible: bool);
    fn set_key_repeat_enabled(&mut self, enabled: bool);

    /// Sets the window icon from tightly packed RGBA8 pixels.
    fn set_icon(&mut self, width: u32, height: u32, pixels: &[u8]) -> Result<(), PlatformError>;

    /// Enters fullscreen with the best supported mode for `mode`, or
    /// leaves it with `None`. Returns the mode actually applied.
    fn set_fullscreen(&mut self, mode: Option<VideoMode>) -> Option<VideoMode>;
}

//=== Helpers =============================================================

/// Checks that `pixels` holds exactly `width * height` RGBA8 pixels.
pub(crate) fn validate_icon(width: u32, height: u32, pixels: &[u8]) -> Result<(), PlatformError> {
    let expected = (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(4);
    if width == 0 || height == 0 || pixels.len() != expected {
        return Err(PlatformError::InvalidIcon {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<PlatformError>();
    }

    #[test]
    fn platform_error_display_format() {
        let err = PlatformError::InvalidIcon { expected: 16, actual: 3 };
        assert_eq!(err.to_string(), "Icon buffer holds 3 bytes, expected 16");

        let err = PlatformError::WindowCreation("no display".into());
        assert!(err.to_string().contains("no display"));
    }

    #[test]
    fn icon_validation() {
        assert!(validate_icon(2, 2, &[0; 16]).is_ok());
        assert_eq!(
            validate_icon(2, 2, &[0; 15]),
            Err(PlatformError::InvalidIcon { expected: 16, actual: 15 })
        );
        assert!(validate_icon(0, 0, &[]).is_err());
    }
}
