//=========================================================================
// Winit Backend
//
// Desktop windows driven by a winit event loop that is pumped, not run.
//
// Architecture:
// - One `EventLoop` per thread, created lazily by the first window and
//   shared by every window created on that thread afterwards
// - A `Router` receives callbacks and appends mapped `NativeEvent`s to
//   the inbox of the target window
// - A window drains its inbox into its `WindowCore` after each pump
//
// Notes:
// - Winit allows one event loop per process; creating windows on a
//   second thread fails with `PlatformError::EventLoopCreation`
// - On macOS the loop must live on the main thread
// - Windows are created inside loop callbacks, so `create()` pumps
//   until the router hands the new window back
//
//=========================================================================

pub mod event_mapper;

//=== Standard Library Imports ============================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

//=== External Dependencies ===============================================

use log::{debug, error, info, trace, warn};
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::monitor::MonitorHandle;
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Fullscreen, Icon, Window as NativeHandle, WindowAttributes, WindowButtons, WindowId};

//=== Internal Dependencies ===============================================

use super::native_event::NativeEvent;
use super::window_core::WindowCore;
use super::{validate_icon, PlatformError, PlatformWindow};
use crate::core::context::RenderContext;
use crate::core::event::Event;
use crate::core::settings::WindowStyle;
use crate::core::state::WindowState;
use crate::core::video_mode::VideoMode;
use crate::window::WindowConfig;

//=== Constants ===========================================================

/// Pumps attempted before window creation is given up.
const CREATE_ATTEMPTS: u32 = 200;

/// Wait per creation pump.
const CREATE_PUMP_TIMEOUT: Duration = Duration::from_millis(5);

//=== Shared Event Loop ===================================================

type Inbox = Rc<RefCell<Vec<NativeEvent>>>;

thread_local! {
    static SHARED_LOOP: RefCell<Option<SharedLoop>> = const { RefCell::new(None) };
}

struct SharedLoop {
    event_loop: EventLoop<()>,
    router: Router,
}

impl SharedLoop {
    /// Runs pending callbacks, waiting at most `timeout` (`None` blocks).
    fn pump(&mut self, timeout: Option<Duration>) {
        if let PumpStatus::Exit(code) = self.event_loop.pump_app_events(timeout, &mut self.router) {
            warn!(target: "platform", "Native event loop exited with code {}", code);
        }
    }

    /// Pumps until the window requested under `token` is built.
    fn create_window(&mut self, token: u64) -> Result<NativeHandle, PlatformError> {
        for _ in 0..CREATE_ATTEMPTS {
            let status = self
                .event_loop
                .pump_app_events(Some(CREATE_PUMP_TIMEOUT), &mut self.router);

            if let Some(result) = self.router.created.remove(&token) {
                return result.map_err(PlatformError::WindowCreation);
            }
            if let PumpStatus::Exit(code) = status {
                self.router.cancel(token);
                return Err(PlatformError::EventLoopExecution(format!(
                    "event loop exited with code {}",
                    code
                )));
            }
        }

        self.router.cancel(token);
        Err(PlatformError::WindowCreation(
            "event loop never became ready to create windows".to_string(),
        ))
    }
}

/// Runs `f` on this thread's shared loop, creating it on first use.
fn with_shared_loop<R>(f: impl FnOnce(&mut SharedLoop) -> R) -> Result<R, PlatformError> {
    SHARED_LOOP
        .try_with(|cell| {
            let mut slot = cell
                .try_borrow_mut()
                .map_err(|_| PlatformError::Unsupported("re-entrant event loop access"))?;

            if slot.is_none() {
                let event_loop = EventLoop::new()
                    .map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;
                info!(target: "platform", "Native event loop created");
                *slot = Some(SharedLoop {
                    event_loop,
                    router: Router::default(),
                });
            }

            match slot.as_mut() {
                Some(shared) => Ok(f(shared)),
                None => Err(PlatformError::EventLoopCreation("event loop unavailable".to_string())),
            }
        })
        .unwrap_or_else(|_| Err(PlatformError::Unsupported("event loop already destroyed")))
}

//=== Router ==============================================================

struct Target {
    inbox: Weak<RefCell<Vec<NativeEvent>>>,
    pixels_per_line: f32,
}

struct PendingWindow {
    token: u64,
    attributes: WindowAttributes,
    target: Target,
}

/// Receives loop callbacks for every window of the thread.
#[derive(Default)]
struct Router {
    targets: HashMap<WindowId, Target>,
    pending: Vec<PendingWindow>,
    created: HashMap<u64, Result<NativeHandle, String>>,
    next_token: u64,
}

impl Router {
    /// Queues a window for creation. Its callbacks go to `inbox` from the
    /// moment the native window exists.
    fn request(&mut self, attributes: WindowAttributes, inbox: &Inbox, pixels_per_line: f32) -> u64 {
        self.next_token += 1;
        self.pending.push(PendingWindow {
            token: self.next_token,
            attributes,
            target: Target {
                inbox: Rc::downgrade(inbox),
                pixels_per_line,
            },
        });
        self.next_token
    }

    fn adopt(&mut self, id: WindowId, target: Target) {
        self.targets.insert(id, target);
    }

    fn unregister(&mut self, id: WindowId) {
        self.targets.remove(&id);
    }

    fn cancel(&mut self, token: u64) {
        self.pending.retain(|pending| pending.token != token);
        self.created.remove(&token);
    }

    fn create_pending(&mut self, event_loop: &ActiveEventLoop) {
        for pending in std::mem::take(&mut self.pending) {
            match event_loop.create_window(pending.attributes) {
                Ok(window) => {
                    // Winit delivers the first callbacks right after this
                    // handler returns, still inside the creating pump.
                    self.adopt(window.id(), pending.target);
                    self.created.insert(pending.token, Ok(window));
                }
                Err(e) => {
                    self.created.insert(pending.token, Err(e.to_string()));
                }
            }
        }
    }

    fn route(&mut self, window_id: WindowId, event: WindowEvent) {
        let Some(target) = self.targets.get(&window_id) else {
            trace!(target: "platform::input", "Event for unknown window {:?} dropped", window_id);
            return;
        };

        let pixels_per_line = target.pixels_per_line;
        let Some(inbox) = target.inbox.upgrade() else {
            trace!(target: "platform::input", "Window {:?} gone, dropping event", window_id);
            self.targets.remove(&window_id);
            return;
        };

        let native = event_mapper::map_window_event(event, pixels_per_line);
        if native != NativeEvent::Unsupported {
            inbox.borrow_mut().push(native);
        }
    }
}

impl ApplicationHandler for Router {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        self.create_pending(event_loop);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.create_pending(event_loop);
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        self.route(window_id, event);
    }
}

//=== WinitWindow =========================================================

/// [`PlatformWindow`] backed by a winit window.
pub struct WinitWindow {
    handle: Option<NativeHandle>,
    id: WindowId,
    inbox: Inbox,
    core: WindowCore,
}

impl WinitWindow {
    /// The underlying winit window, until `close()`.
    ///
    /// Useful for creating a rendering surface on top of it.
    pub fn native(&self) -> Option<&NativeHandle> {
        self.handle.as_ref()
    }

    //--- Internal Helpers -------------------------------------------------

    fn attributes(config: &WindowConfig) -> WindowAttributes {
        let mut buttons = WindowButtons::MINIMIZE;
        if config.style.contains(WindowStyle::CLOSE) {
            buttons |= WindowButtons::CLOSE;
        }
        if config.style.contains(WindowStyle::RESIZE) {
            buttons |= WindowButtons::MAXIMIZE;
        }

        NativeHandle::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(PhysicalSize::new(config.video_mode.width, config.video_mode.height))
            .with_resizable(config.style.contains(WindowStyle::RESIZE))
            .with_decorations(config.style.has_decorations())
            .with_enabled_buttons(buttons)
            .with_visible(config.visible)
    }

    fn drain_inbox(&mut self) {
        let natives: Vec<NativeEvent> = self.inbox.borrow_mut().drain(..).collect();
        for native in natives {
            self.core.dispatch(native);
        }
    }

    fn pump(&mut self, timeout: Option<Duration>) {
        if let Err(e) = with_shared_loop(|shared| shared.pump(timeout)) {
            error!(target: "platform", "Failed to pump native events: {}", e);
        }
        self.drain_inbox();
    }

    fn monitor(&self) -> Option<MonitorHandle> {
        let handle = self.handle.as_ref()?;
        handle.current_monitor().or_else(|| handle.primary_monitor())
    }

    fn sync_position(&mut self) {
        if let Some(handle) = &self.handle {
            if let Ok(position) = handle.outer_position() {
                self.core.state.position = (position.x, position.y);
            }
        }
    }
}

//=== PlatformWindow Integration ==========================================

impl PlatformWindow for WinitWindow {
    fn create(config: &WindowConfig) -> Result<Self, PlatformError> {
        if !config.video_mode.is_valid() {
            return Err(PlatformError::WindowCreation(format!(
                "invalid video mode {:?}",
                config.video_mode
            )));
        }

        let attributes = Self::attributes(config);
        let inbox: Inbox = Rc::new(RefCell::new(Vec::new()));
        let handle = with_shared_loop(|shared| {
            let token = shared
                .router
                .request(attributes, &inbox, config.wheel_pixels_per_line);
            shared.create_window(token)
        })??;
        let id = handle.id();

        handle.set_cursor_visible(config.cursor_visible);

        let mut window = Self {
            handle: Some(handle),
            id,
            inbox,
            core: WindowCore::new(config),
        };
        window.sync_position();

        if config.is_fullscreen() {
            window.set_fullscreen(Some(config.video_mode));
        }

        info!(
            target: "platform",
            "Window \"{}\" created: {}x{}",
            config.title,
            window.core.state.size().0,
            window.core.state.size().1
        );
        Ok(window)
    }

    fn process_events(&mut self) {
        if self.core.state.is_open() {
            self.pump(Some(Duration::ZERO));
        }
    }

    fn wait_events(&mut self, timeout: Option<Duration>) {
        if self.core.state.is_open() {
            self.pump(timeout);
        }
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
        let millihertz = self.monitor()?.refresh_rate_millihertz()?;
        Some(f64::from(millihertz) / 1000.0)
    }

    fn fullscreen_modes(&self) -> Vec<VideoMode> {
        let Some(monitor) = self.monitor() else {
            return Vec::new();
        };

        let mut modes: Vec<VideoMode> = Vec::new();
        for handle in monitor.video_modes() {
            let size = handle.size();
            let mode = VideoMode::new(size.width, size.height, u32::from(handle.bit_depth()));
            // Modes are listed once per refresh rate
            if !modes.contains(&mode) {
                modes.push(mode);
            }
        }
        modes
    }

    fn close(&mut self) {
        if !self.core.close() {
            return;
        }
        let id = self.id;
        if let Err(e) = with_shared_loop(|shared| shared.router.unregister(id)) {
            warn!(target: "platform", "Failed to unregister window: {}", e);
        }
        self.inbox.borrow_mut().clear();
        // Dropping the handle destroys the native window
        self.handle = None;
        info!(target: "platform", "Window {:?} closed", id);
    }

    fn display(&mut self) {
        if let Some(handle) = &self.handle {
            handle.pre_present_notify();
        }
    }

    fn set_vertical_sync(&mut self, enabled: bool) {
        self.core.state.vsync = enabled;
    }

    fn set_mouse_cursor_visible(&mut self, visible: bool) {
        if let Some(handle) = &self.handle {
            handle.set_cursor_visible(visible);
        }
        self.core.state.cursor_visible = visible;
    }

    fn set_cursor_position(&mut self, x: u32, y: u32) {
        let Some(handle) = &self.handle else {
            return;
        };
        match handle.set_cursor_position(PhysicalPosition::new(x, y)) {
            Ok(()) => {
                let x = i32::try_from(x).unwrap_or(i32::MAX);
                let y = i32::try_from(y).unwrap_or(i32::MAX);
                self.core.state.cursor = (x, y);
            }
            Err(e) => warn!(target: "platform", "Cursor could not be moved: {}", e),
        }
    }

    fn set_position(&mut self, x: i32, y: i32) {
        if let Some(handle) = &self.handle {
            handle.set_outer_position(PhysicalPosition::new(x, y));
        }
        self.core.state.position = (x, y);
    }

    fn set_size(&mut self, width: u32, height: u32) {
        let applied = match &self.handle {
            Some(handle) => handle.request_inner_size(PhysicalSize::new(width, height)),
            None => return,
        };
        // `None` means the resize is asynchronous; `Resized` follows.
        let (width, height) = applied.map_or((width, height), |size| (size.width, size.height));
        self.core.state.video_mode.width = width;
        self.core.state.video_mode.height = height;
    }

    fn set_title(&mut self, title: &str) {
        if let Some(handle) = &self.handle {
            handle.set_title(title);
        }
    }

    fn set_visible(&mut self, visible: bool) {
        if let Some(handle) = &self.handle {
            handle.set_visible(visible);
        }
        self.core.state.visible = visible;
    }

    fn set_key_repeat_enabled(&mut self, enabled: bool) {
        self.core.state.key_repeat = enabled;
    }

    fn set_icon(&mut self, width: u32, height: u32, pixels: &[u8]) -> Result<(), PlatformError> {
        validate_icon(width, height, pixels)?;
        let icon = Icon::from_rgba(pixels.to_vec(), width, height)
            .map_err(|e| PlatformError::IconRejected(e.to_string()))?;
        if let Some(handle) = &self.handle {
            handle.set_window_icon(Some(icon));
        }
        Ok(())
    }

    fn set_fullscreen(&mut self, mode: Option<VideoMode>) -> Option<VideoMode> {
        let Some(requested) = mode else {
            if let Some(windowed) = self.core.leave_fullscreen() {
                if let Some(handle) = &self.handle {
                    handle.set_fullscreen(None);
                    let (width, height) = windowed.size;
                    // The native size request may not apply immediately
                    let _ = handle.request_inner_size(PhysicalSize::new(width, height));
                    handle.set_outer_position(PhysicalPosition::new(windowed.position.0, windowed.position.1));
                }
                debug!(target: "platform", "Left fullscreen");
            }
            return None;
        };

        if !self.core.state.is_fullscreen() {
            self.sync_position();
        }

        let monitor = self.monitor();
        let modes = self.fullscreen_modes();
        let applied = self.core.enter_fullscreen(requested, &modes);

        let exclusive = monitor.as_ref().and_then(|monitor| {
            monitor
                .video_modes()
                .filter(|handle| {
                    let size = handle.size();
                    size.width == applied.width
                        && size.height == applied.height
                        && u32::from(handle.bit_depth()) == applied.bits_per_pixel
                })
                .max_by_key(|handle| handle.refresh_rate_millihertz())
        });

        let fullscreen = match exclusive {
            Some(handle) => Fullscreen::Exclusive(handle),
            None => {
                debug!(target: "platform", "No exclusive mode for {:?}, using borderless", applied);
                Fullscreen::Borderless(monitor)
            }
        };

        if let Some(handle) = &self.handle {
            handle.set_fullscreen(Some(fullscreen));
        }
        Some(applied)
    }
}

//--- Trait Implementations -----------------------------------------------

impl std::fmt::Debug for WinitWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WinitWindow")
            .field("id", &self.id)
            .field("open", &self.core.state.is_open())
            .field("pending", &self.core.queue.len())
            .finish()
    }
}

impl Drop for WinitWindow {
    fn drop(&mut self) {
        self.close();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
