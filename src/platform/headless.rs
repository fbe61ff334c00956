//=========================================================================
// Headless Backend
//
// A window on a virtual display. Native callbacks are injected as
// `NativeEvent` records through a channel and translated on the next
// pump, exactly like winit callbacks are.
//
// Uses:
// - Deterministic tests of the whole poll path
// - Hosts without a display server
//
// Mutators apply synchronously to the state; no synthetic echo events
// (e.g. `Resized` after `set_size`) are generated. Positions are stored
// as given, without clamping to the virtual screen.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::time::Duration;

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, never, unbounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use super::native_event::NativeEvent;
use super::window_core::WindowCore;
use super::{validate_icon, PlatformError, PlatformWindow};
use crate::core::context::RenderContext;
use crate::core::event::Event;
use crate::core::state::WindowState;
use crate::core::video_mode::VideoMode;
use crate::window::WindowConfig;

//=== NativeInjector ======================================================

/// Sending half for native callbacks of a [`HeadlessWindow`].
///
/// Cloneable and `Send`, so callbacks may be produced on any thread;
/// they are translated on the thread that polls the window.
#[derive(Debug, Clone)]
pub struct NativeInjector {
    sender: Sender<NativeEvent>,
}

impl NativeInjector {
    /// Queues a native callback. Returns `false` once the window is gone.
    pub fn inject(&self, event: NativeEvent) -> bool {
        self.sender.send(event).is_ok()
    }
}

//=== HeadlessWindow ======================================================

/// Display-less [`PlatformWindow`].
#[derive(Debug)]
pub struct HeadlessWindow {
    core: WindowCore,
    title: String,
    receiver: Receiver<NativeEvent>,
    // `None` once closed, so injectors see a disconnected channel
    sender: Option<Sender<NativeEvent>>,
    desktop_modes: Vec<VideoMode>,
    icon: Option<(u32, u32)>,
    frames_presented: u64,
}

impl HeadlessWindow {
    /// Modes the virtual display reports.
    pub const DESKTOP_MODES: [VideoMode; 5] = [
        VideoMode::new(1920, 1080, 32),
        VideoMode::new(1600, 900, 32),
        VideoMode::new(1280, 720, 32),
        VideoMode::new(1024, 768, 32),
        VideoMode::new(800, 600, 32),
    ];

    /// Virtual refresh rate, in Hz.
    pub const REFRESH_RATE: f64 = 60.0;

    /// Returns a handle feeding native callbacks into this window.
    pub fn injector(&self) -> NativeInjector {
        let sender = match &self.sender {
            Some(sender) => sender.clone(),
            None => bounded(0).0,
        };
        NativeInjector { sender }
    }

    /// Replaces the modes the virtual display reports.
    pub fn set_desktop_modes(&mut self, modes: Vec<VideoMode>) {
        self.desktop_modes = modes;
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Size of the icon last accepted.
    pub fn icon_size(&self) -> Option<(u32, u32)> {
        self.icon
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    //--- Internal Helpers -------------------------------------------------

    fn drain_injected(&mut self) {
        loop {
            match self.receiver.try_recv() {
                Ok(native) => self.core.dispatch(native),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
    }
}

//=== PlatformWindow Integration ==========================================

impl PlatformWindow for HeadlessWindow {
    fn create(config: &WindowConfig) -> Result<Self, PlatformError> {
        if !config.video_mode.is_valid() {
            return Err(PlatformError::WindowCreation(format!(
                "invalid video mode {:?}",
                config.video_mode
            )));
        }

        let (sender, receiver) = unbounded();
        let mut window = Self {
            core: WindowCore::new(config),
            title: config.title.clone(),
            receiver,
            sender: Some(sender),
            desktop_modes: Self::DESKTOP_MODES.to_vec(),
            icon: None,
            frames_presented: 0,
        };

        if config.is_fullscreen() {
            let modes = window.desktop_modes.clone();
            window.core.enter_fullscreen(config.video_mode, &modes);
        }

        info!(
            target: "platform",
            "Headless window \"{}\" created: {}x{}",
            window.title,
            window.core.state.size().0,
            window.core.state.size().1
        );
        Ok(window)
    }

    fn process_events(&mut self) {
        self.drain_injected();
    }

    fn wait_events(&mut self, timeout: Option<Duration>) {
        if !self.core.state.is_open() {
            return;
        }
        let received = match timeout {
            Some(timeout) => match self.receiver.recv_timeout(timeout) {
                Ok(native) => Some(native),
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
            },
            // The window holds a sender, so this only returns on an event.
            None => self.receiver.recv().ok(),
        };
        if let Some(native) = received {
            self.core.dispatch(native);
        }
        self.drain_injected();
    }

    fn pop_event(&mut self) -> Option<Event> {
        self.core.pop_event()
    }

    fn dropped_events(&self) -> u64 {
        self.core.queue.dropped()
    }

    fn state(&self) -> &WindowState {
        &self.core.state
    }

    fn context(&self) -> &RenderContext {
        self.core.context()
    }

    fn refresh_rate(&self) -> Option<f64> {
        Some(Self::REFRESH_RATE)
    }

    fn fullscreen_modes(&self) -> Vec<VideoMode> {
        self.desktop_modes.clone()
    }

    fn close(&mut self) {
        if self.core.close() {
            // Disconnects every injector; pending records are dropped
            self.sender = None;
            self.receiver = never();
            info!(target: "platform", "Headless window \"{}\" closed", self.title);
        }
    }

    fn display(&mut self) {
        self.frames_presented += 1;
        trace!(target: "platform", "Frame {} presented", self.frames_presented);
    }

    fn set_vertical_sync(&mut self, enabled: bool) {
        self.core.state.vsync = enabled;
    }

    fn set_mouse_cursor_visible(&mut self, visible: bool) {
        self.core.state.cursor_visible = visible;
    }

    fn set_cursor_position(&mut self, x: u32, y: u32) {
        let x = i32::try_from(x).unwrap_or(i32::MAX);
        let y = i32::try_from(y).unwrap_or(i32::MAX);
        self.core.state.cursor = (x, y);
    }

    fn set_position(&mut self, x: i32, y: i32) {
        self.core.state.position = (x, y);
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.core.state.video_mode.width = width;
        self.core.state.video_mode.height = height;
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_owned();
    }

    fn set_visible(&mut self, visible: bool) {
        self.core.state.visible = visible;
    }

    fn set_key_repeat_enabled(&mut self, enabled: bool) {
        self.core.state.key_repeat = enabled;
    }

    fn set_icon(&mut self, width: u32, height: u32, pixels: &[u8]) -> Result<(), PlatformError> {
        validate_icon(width, height, pixels)?;
        self.icon = Some((width, height));
        Ok(())
    }

    fn set_fullscreen(&mut self, mode: Option<VideoMode>) -> Option<VideoMode> {
        match mode {
            Some(requested) => {
                let modes = self.desktop_modes.clone();
                let applied = self.core.enter_fullscreen(requested, &modes);
                debug!(target: "platform", "Headless fullscreen {:?}", applied);
                Some(applied)
            }
            None => {
                self.core.leave_fullscreen();
                None
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
