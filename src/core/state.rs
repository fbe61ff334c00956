//=========================================================================
// Window State
//
// Mutable runtime state of one window, owned by its platform backend.
// Updated by the event translator on every native callback and by the
// backend on every explicit application call.
//
//=========================================================================

//=== Internal Modules ====================================================
use crate::core::video_mode::VideoMode;

//=== WindowedGeometry ====================================================

/// Position and size to restore when leaving fullscreen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowedGeometry {
    pub position: (i32, i32),
    pub size: (u32, u32),
}

//=== WindowState =========================================================

/// Runtime state of a window.
///
/// Whether the rendering context is active is not stored here; ask the
/// window's [`RenderContext`](crate::core::context::RenderContext).
#[derive(Debug, Clone)]
pub struct WindowState {
    pub(crate) open: bool,
    pub(crate) fullscreen: bool,
    pub(crate) video_mode: VideoMode,
    pub(crate) key_repeat: bool,
    pub(crate) mouse_inside: bool,
    pub(crate) wheel_delta: f32,
    pub(crate) cursor: (i32, i32),
    pub(crate) position: (i32, i32),
    pub(crate) cursor_visible: bool,
    pub(crate) vsync: bool,
    pub(crate) visible: bool,
    pub(crate) windowed: Option<WindowedGeometry>,
}

impl WindowState {
    pub(crate) fn new(video_mode: VideoMode) -> Self {
        Self {
            open: true,
            fullscreen: false,
            video_mode,
            key_repeat: true,
            mouse_inside: false,
            wheel_delta: 0.0,
            cursor: (0, 0),
            position: (0, 0),
            cursor_visible: true,
            vsync: false,
            visible: true,
            windowed: None,
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Current mode; its size tracks the content area.
    pub fn video_mode(&self) -> VideoMode {
        self.video_mode
    }

    pub fn size(&self) -> (u32, u32) {
        (self.video_mode.width, self.video_mode.height)
    }

    pub fn position(&self) -> (i32, i32) {
        self.position
    }

    pub fn key_repeat_enabled(&self) -> bool {
        self.key_repeat
    }

    pub fn mouse_inside(&self) -> bool {
        self.mouse_inside
    }

    /// Wheel motion accumulated but not yet reported (fraction of a notch).
    pub fn pending_wheel_delta(&self) -> f32 {
        self.wheel_delta
    }

    /// Last cursor position reported by the platform, window-local.
    pub fn cursor(&self) -> (i32, i32) {
        self.cursor
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn vertical_sync(&self) -> bool {
        self.vsync
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether a window-local point lies in the content area.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let (width, height) = self.size();
        x >= 0 && y >= 0 && i64::from(x) < i64::from(width) && i64::from(y) < i64::from(height)
    }

    //--- Fullscreen Bookkeeping ------------------------------------------

    /// Records the windowed geometry and switches to `mode`.
    ///
    /// The geometry is only saved on the first transition so that
    /// switching between two fullscreen modes keeps the original one.
    pub(crate) fn enter_fullscreen(&mut self, mode: VideoMode) {
        if !self.fullscreen {
            self.windowed = Some(WindowedGeometry {
                position: self.position,
                size: self.size(),
            });
        }
        self.fullscreen = true;
        self.video_mode = mode;
    }

    /// Leaves fullscreen and returns the geometry to restore.
    pub(crate) fn leave_fullscreen(&mut self) -> Option<WindowedGeometry> {
        if !self.fullscreen {
            return None;
        }
        self.fullscreen = false;
        let geometry = self.windowed.take()?;
        self.position = geometry.position;
        self.video_mode.width = geometry.size.0;
        self.video_mode.height = geometry.size.1;
        Some(geometry)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_open_and_windowed() {
        let state = WindowState::new(VideoMode::with_size(640, 480));
        assert!(state.is_open());
        assert!(!state.is_fullscreen());
        assert!(state.key_repeat_enabled());
        assert!(!state.mouse_inside());
        assert_eq!(state.size(), (640, 480));
    }

    #[test]
    fn contains_checks_content_area_bounds() {
        let state = WindowState::new(VideoMode::with_size(100, 50));
        assert!(state.contains(0, 0));
        assert!(state.contains(99, 49));
        assert!(!state.contains(100, 10));
        assert!(!state.contains(10, 50));
        assert!(!state.contains(-1, 10));
    }

    #[test]
    fn fullscreen_round_trip_restores_geometry() {
        let mut state = WindowState::new(VideoMode::with_size(640, 480));
        state.position = (40, 60);

        state.enter_fullscreen(VideoMode::new(1920, 1080, 32));
        assert!(state.is_fullscreen());
        assert_eq!(state.size(), (1920, 1080));

        let restored = state.leave_fullscreen();
        assert_eq!(
            restored,
            Some(WindowedGeometry { position: (40, 60), size: (640, 480) })
        );
        assert!(!state.is_fullscreen());
        assert_eq!(state.size(), (640, 480));
        assert_eq!(state.position(), (40, 60));
    }

    #[test]
    fn switching_fullscreen_modes_keeps_original_geometry() {
        let mut state = WindowState::new(VideoMode::with_size(640, 480));
        state.enter_fullscreen(VideoMode::new(1280, 720, 32));
        state.enter_fullscreen(VideoMode::new(1920, 1080, 32));

        let restored = state.leave_fullscreen();
        assert_eq!(restored.map(|g| g.size), Some((640, 480)));
    }

    #[test]
    fn leaving_fullscreen_when_windowed_is_noop() {
        let mut state = WindowState::new(VideoMode::default());
        assert_eq!(state.leave_fullscreen(), None);
        assert_eq!(state.size(), (800, 600));
    }
}
