//=========================================================================
// Window
//
// Public facade over one platform window.
//
// Architecture:
// ```text
//     WindowBuilder  ──build()──>  Window<B>  ──poll_event()──>  Event
//         │                          │
//         ├─ with_title()            ├─ pumps B when its queue is empty
//         ├─ with_video_mode()       ├─ folds events into InputState
//         └─ with_style() ...        └─ paces display() with FrameClock
// ```
//
// `B` is the backend (`NativeWindow` unless named). Every mutator is a
// no-op once the window is closed.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::time::Duration;

//=== External Dependencies ===============================================

use log::{debug, error, info};

//=== Internal Dependencies ===============================================

use crate::core::context::RenderContext;
use crate::core::event::Event;
use crate::core::frame_clock::FrameClock;
use crate::core::input_state::InputState;
use crate::core::settings::{WindowSettings, WindowStyle};
use crate::core::state::WindowState;
use crate::core::video_mode::VideoMode;
use crate::platform::{NativeWindow, PlatformError, PlatformWindow};

//=== WindowConfig ========================================================

/// Everything a backend needs to create a window.
///
/// Usually assembled through [`WindowBuilder`].
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,

    /// Initial content size and color depth.
    pub video_mode: VideoMode,

    pub style: WindowStyle,

    /// Rendering context settings, fixed for the window lifetime.
    pub settings: WindowSettings,

    /// Report OS key repeats as extra presses.
    pub key_repeat: bool,

    pub vertical_sync: bool,

    /// Frames per second cap for `display()`.
    pub framerate_limit: Option<u32>,

    /// Pending event bound; `None` is unbounded.
    pub event_limit: Option<usize>,

    pub cursor_visible: bool,
    pub visible: bool,

    /// Pixels of smooth scrolling counted as one wheel line.
    pub wheel_pixels_per_line: f32,
}

impl WindowConfig {
    pub fn is_fullscreen(&self) -> bool {
        self.style.contains(WindowStyle::FULLSCREEN)
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Aetheric Window".to_string(),
            video_mode: VideoMode::default(),
            style: WindowStyle::DEFAULT,
            settings: WindowSettings::default(),
            key_repeat: true,
            vertical_sync: false,
            framerate_limit: None,
            event_limit: None,
            cursor_visible: true,
            visible: true,
            wheel_pixels_per_line: 20.0,
        }
    }
}

//=== WindowBuilder =======================================================

/// Builder for configuring and constructing a [`Window`].
///
/// # Default Values
///
/// - **Video mode**: 800x600, 32 bits per pixel
/// - **Style**: titlebar, resize and close decorations
/// - **Key repeat**: enabled
/// - **Vertical sync**: disabled, no framerate limit
/// - **Event queue**: unbounded
///
/// # Examples
///
/// ```no_run
/// use aetheric_window::{Event, VideoMode, WindowBuilder};
///
/// let mut window = WindowBuilder::new()
///     .with_title("Demo")
///     .with_video_mode(VideoMode::with_size(1024, 768))
///     .with_framerate_limit(60)
///     .build()
///     .expect("window creation failed");
///
/// while window.is_open() {
///     while let Some(event) = window.poll_event() {
///         if event == Event::Closed {
///             window.close();
///         }
///     }
///     window.display();
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct WindowBuilder {
    config: WindowConfig,
}

impl WindowBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    pub fn with_video_mode(mut self, mode: VideoMode) -> Self {
        self.config.video_mode = mode;
        self
    }

    /// Sets the decorations. Include `WindowStyle::FULLSCREEN` to open in
    /// fullscreen with the nearest supported mode.
    pub fn with_style(mut self, style: WindowStyle) -> Self {
        self.config.style = style;
        self
    }

    pub fn with_settings(mut self, settings: WindowSettings) -> Self {
        self.config.settings = settings;
        self
    }

    /// Default: true
    pub fn with_key_repeat(mut self, enabled: bool) -> Self {
        self.config.key_repeat = enabled;
        self
    }

    /// Default: false
    pub fn with_vertical_sync(mut self, enabled: bool) -> Self {
        self.config.vertical_sync = enabled;
        self
    }

    /// Caps `display()` to `fps` frames per second. `0` removes the cap.
    pub fn with_framerate_limit(mut self, fps: u32) -> Self {
        self.config.framerate_limit = (fps > 0).then_some(fps);
        self
    }

    /// Bounds the pending event queue. When full, the oldest event is
    /// discarded.
    ///
    /// # Panics
    ///
    /// Panics if `limit == 0`.
    pub fn with_event_limit(mut self, limit: usize) -> Self {
        assert!(limit > 0, "Event limit must be positive");
        self.config.event_limit = Some(limit);
        self
    }

    pub fn with_cursor_visible(mut self, visible: bool) -> Self {
        self.config.cursor_visible = visible;
        self
    }

    /// Creates the window hidden when `false`. Default: true
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.config.visible = visible;
        self
    }

    /// Sets how many pixels of smooth scrolling make one wheel line.
    ///
    /// Default: 20.0
    ///
    /// # Panics
    ///
    /// Panics if `pixels <= 0.0`.
    pub fn with_wheel_pixels_per_line(mut self, pixels: f32) -> Self {
        assert!(pixels > 0.0, "Pixels per line must be positive, got {}", pixels);
        self.config.wheel_pixels_per_line = pixels;
        self
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Creates the window on the native backend.
    pub fn build(self) -> Result<Window, PlatformError> {
        self.build_on::<NativeWindow>()
    }

    /// Creates the window on backend `B`.
    pub fn build_on<B: PlatformWindow>(self) -> Result<Window<B>, PlatformError> {
        Window::with_config(self.config)
    }
}

//=== Window ==============================================================

/// An open (or closed) window and its event stream.
///
/// Events are pulled with [`poll_event`](Self::poll_event); the native
/// event loop only runs while polling, on the polling thread.
pub struct Window<B: PlatformWindow = NativeWindow> {
    backend: B,
    style: WindowStyle,
    settings: WindowSettings,
    input: InputState,
    clock: FrameClock,
}

impl<B: PlatformWindow> Window<B> {
    //--- Construction -----------------------------------------------------

    /// Creates a window with default settings.
    pub fn new(mode: VideoMode, title: &str) -> Result<Self, PlatformError> {
        Self::with_config(WindowConfig {
            title: title.to_string(),
            video_mode: mode,
            ..WindowConfig::default()
        })
    }

    pub fn with_config(config: WindowConfig) -> Result<Self, PlatformError> {
        let backend = B::create(&config).map_err(|e| {
            error!(target: "window", "Failed to create window \"{}\": {}", config.title, e);
            e
        })?;

        let mut clock = FrameClock::new();
        clock.set_framerate_limit(config.framerate_limit);
        if config.vertical_sync {
            clock.set_vsync_rate(backend.refresh_rate());
        }

        info!(
            target: "window",
            "Window \"{}\" opened ({:?}, {:?})",
            config.title,
            backend.state().video_mode(),
            config.style
        );

        Ok(Self {
            backend,
            style: config.style,
            settings: config.settings,
            input: InputState::new(),
            clock,
        })
    }

    //--- Lifetime ---------------------------------------------------------

    pub fn is_open(&self) -> bool {
        self.backend.state().is_open()
    }

    /// Destroys the native window and releases its context. Pending events
    /// are discarded. Calling it again does nothing.
    pub fn close(&mut self) {
        if !self.is_open() {
            return;
        }
        self.backend.close();
        self.input.reset();
        info!(target: "window", "Window closed");
    }

    //--- Events -----------------------------------------------------------

    /// Returns the oldest pending event, or `None` when there is none.
    ///
    /// Runs pending native callbacks first if the queue is empty. Never
    /// blocks.
    pub fn poll_event(&mut self) -> Option<Event> {
        if !self.is_open() {
            return None;
        }

        let event = match self.backend.pop_event() {
            Some(event) => event,
            None => {
                self.backend.process_events();
                self.backend.pop_event()?
            }
        };

        self.input.apply(&event);
        Some(event)
    }

    /// Events discarded so far because the queue limit was reached.
    pub fn dropped_events(&self) -> u64 {
        self.backend.dropped_events()
    }

    /// Blocks until an event arrives. Returns `None` once the window is
    /// closed.
    pub fn wait_event(&mut self) -> Option<Event> {
        while self.is_open() {
            if let Some(event) = self.poll_event() {
                return Some(event);
            }
            self.backend.wait_events(None);
        }
        None
    }

    /// Like [`wait_event`](Self::wait_event), giving up after `timeout`.
    pub fn wait_event_timeout(&mut self, timeout: Duration) -> Option<Event> {
        if let Some(event) = self.poll_event() {
            return Some(event);
        }
        if !self.is_open() {
            return None;
        }
        self.backend.wait_events(Some(timeout));
        self.poll_event()
    }

    //--- Rendering --------------------------------------------------------

    /// Presents the frame, then waits out the vsync or framerate interval.
    pub fn display(&mut self) {
        if !self.is_open() {
            return;
        }
        self.backend.display();
        self.clock.tick();
    }

    /// Binds (or unbinds) the window's rendering context to this thread.
    ///
    /// Returns `false` if the window is closed.
    pub fn set_active(&mut self, active: bool) -> bool {
        if !self.is_open() {
            return false;
        }
        self.backend.context().set_active(active)
    }

    pub fn set_vertical_sync(&mut self, enabled: bool) {
        if !self.is_open() {
            return;
        }
        self.backend.set_vertical_sync(enabled);
        let rate = if enabled { self.backend.refresh_rate() } else { None };
        self.clock.set_vsync_rate(rate);
        debug!(target: "window", "Vertical sync {}", if enabled { "on" } else { "off" });
    }

    /// Caps `display()` to `fps` frames per second; `None` or `Some(0)`
    /// removes the cap.
    pub fn set_framerate_limit(&mut self, fps: Option<u32>) {
        if !self.is_open() {
            return;
        }
        self.clock.set_framerate_limit(fps);
    }

    /// Duration of the last frame, measured between `display()` calls.
    pub fn frame_time(&self) -> Duration {
        self.clock.frame_time()
    }

    //--- Geometry ---------------------------------------------------------

    pub fn set_position(&mut self, x: i32, y: i32) {
        if self.is_open() {
            self.backend.set_position(x, y);
        }
    }

    pub fn position(&self) -> (i32, i32) {
        self.backend.state().position()
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        if self.is_open() {
            self.backend.set_size(width, height);
        }
    }

    pub fn size(&self) -> (u32, u32) {
        self.backend.state().size()
    }

    pub fn video_mode(&self) -> VideoMode {
        self.backend.state().video_mode()
    }

    /// Enters fullscreen with the supported mode closest to `mode`, or
    /// returns to the windowed geometry with `None`.
    ///
    /// Returns the mode applied.
    pub fn set_fullscreen(&mut self, mode: Option<VideoMode>) -> Option<VideoMode> {
        if !self.is_open() {
            return None;
        }
        let applied = self.backend.set_fullscreen(mode);
        self.style.set(WindowStyle::FULLSCREEN, applied.is_some());
        info!(target: "window", "Fullscreen: {:?}", applied);
        applied
    }

    /// Modes the current display supports for fullscreen.
    pub fn fullscreen_modes(&self) -> Vec<VideoMode> {
        self.backend.fullscreen_modes()
    }

    //--- Appearance -------------------------------------------------------

    pub fn set_title(&mut self, title: &str) {
        if self.is_open() {
            self.backend.set_title(title);
        }
    }

    /// Sets the icon from tightly packed RGBA8 pixels.
    pub fn set_icon(&mut self, width: u32, height: u32, pixels: &[u8]) -> Result<(), PlatformError> {
        if !self.is_open() {
            return Ok(());
        }
        self.backend.set_icon(width, height, pixels)
    }

    pub fn show(&mut self, visible: bool) {
        if self.is_open() {
            self.backend.set_visible(visible);
        }
    }

    pub fn set_mouse_cursor_visible(&mut self, visible: bool) {
        if self.is_open() {
            self.backend.set_mouse_cursor_visible(visible);
        }
    }

    /// Moves the cursor to window-local coordinates.
    pub fn set_cursor_position(&mut self, x: u32, y: u32) {
        if self.is_open() {
            self.backend.set_cursor_position(x, y);
        }
    }

    //--- Input ------------------------------------------------------------

    /// With repeat disabled, holding a key produces a single press.
    pub fn set_key_repeat_enabled(&mut self, enabled: bool) {
        if self.is_open() {
            self.backend.set_key_repeat_enabled(enabled);
        }
    }

    /// Snapshot of held keys and buttons, as of the last polled event.
    pub fn input(&self) -> &InputState {
        &self.input
    }

    //--- Accessors --------------------------------------------------------

    pub fn settings(&self) -> WindowSettings {
        self.settings
    }

    pub fn style(&self) -> WindowStyle {
        self.style
    }

    pub fn context(&self) -> &RenderContext {
        self.backend.context()
    }

    pub fn state(&self) -> &WindowState {
        self.backend.state()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

//--- Trait Implementations -----------------------------------------------

impl<B: PlatformWindow + std::fmt::Debug> std::fmt::Debug for Window<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Window")
            .field("backend", &self.backend)
            .field("style", &self.style)
            .field("settings", &self.settings)
            .finish()
    }
}

impl<B: PlatformWindow> Drop for Window<B> {
    fn drop(&mut self) {
        self.close();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
