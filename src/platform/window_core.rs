//=========================================================================
// Window Core
//
// Backend-independent part of a platform window: state, pending events,
// translator and rendering context. Every backend embeds one and feeds
// native records through `dispatch()`.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::native_event::NativeEvent;
use super::translator::EventTranslator;
use crate::core::context::RenderContext;
use crate::core::event::Event;
use crate::core::event_queue::EventQueue;
use crate::core::state::{WindowState, WindowedGeometry};
use crate::core::video_mode::VideoMode;
use crate::window::WindowConfig;

//=== WindowCore ==========================================================

#[derive(Debug)]
pub(crate) struct WindowCore {
    pub(crate) state: WindowState,
    pub(crate) queue: EventQueue,
    translator: EventTranslator,
    context: RenderContext,
}

impl WindowCore {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(config: &WindowConfig) -> Self {
        let mut state = WindowState::new(config.video_mode);
        state.key_repeat = config.key_repeat;
        state.cursor_visible = config.cursor_visible;
        state.vsync = config.vertical_sync;
        state.visible = config.visible;

        Self {
            state,
            queue: EventQueue::with_limit(config.event_limit),
            translator: EventTranslator::new(),
            context: RenderContext::new(config.settings),
        }
    }

    //--- Event Flow -------------------------------------------------------

    /// Translates a native record into the queue.
    ///
    /// Records arriving after `close()` are dropped: native teardown may
    /// still deliver callbacks that nothing will ever poll.
    pub(crate) fn dispatch(&mut self, native: NativeEvent) {
        if !self.state.open {
            trace!(target: "platform::input", "Window closed, dropping {:?}", native);
            return;
        }
        self.translator
            .translate(native, &mut self.state, &mut self.queue);
    }

    pub(crate) fn pop_event(&mut self) -> Option<Event> {
        if !self.state.open {
            return None;
        }
        self.queue.pop()
    }

    //--- Lifetime ---------------------------------------------------------

    /// Marks the window closed, discards pending events and releases the
    /// context. Returns `false` if it was already closed.
    pub(crate) fn close(&mut self) -> bool {
        if !self.state.open {
            return false;
        }
        self.state.open = false;
        self.queue.clear();
        self.context.release();
        debug!(target: "platform", "Window core closed");
        true
    }

    //--- Fullscreen -------------------------------------------------------

    /// Chooses the mode to use for a fullscreen request and records the
    /// transition. Falls back to `requested` when the display lists none.
    pub(crate) fn enter_fullscreen(&mut self, requested: VideoMode, available: &[VideoMode]) -> VideoMode {
        let mode = requested.best_match(available).unwrap_or(requested);
        if mode != requested {
            debug!(
                target: "platform",
                "Fullscreen mode {:?} unavailable, using {:?}",
                requested,
                mode
            );
        }
        self.state.enter_fullscreen(mode);
        mode
    }

    pub(crate) fn leave_fullscreen(&mut self) -> Option<WindowedGeometry> {
        self.state.leave_fullscreen()
    }

    //--- Accessors --------------------------------------------------------

    pub(crate) fn context(&self) -> &RenderContext {
        &self.context
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn core() -> WindowCore {
        WindowCore::new(&WindowConfig::default())
    }

    #[test]
    fn dispatch_then_pop() {
        let mut core = core();
        core.dispatch(NativeEvent::CloseRequested);
        assert_eq!(core.pop_event(), Some(Event::Closed));
        assert_eq!(core.pop_event(), None);
    }

    #[test]
    fn closed_core_drops_late_callbacks() {
        let mut core = core();
        core.dispatch(NativeEvent::Focus(true));
        assert!(core.close());

        core.dispatch(NativeEvent::CloseRequested);

        assert!(core.queue.is_empty());
        assert_eq!(core.pop_event(), None);
        assert!(core.context().is_released());
    }

    #[test]
    fn double_close_reports_noop() {
        let mut core = core();
        assert!(core.close());
        assert!(!core.close());
    }

    #[test]
    fn config_seeds_state() {
        let config = WindowConfig {
            key_repeat: false,
            video_mode: VideoMode::with_size(320, 240),
            event_limit: Some(8),
            ..WindowConfig::default()
        };
        let core = WindowCore::new(&config);

        assert!(!core.state.key_repeat_enabled());
        assert_eq!(core.state.size(), (320, 240));
        assert_eq!(core.queue.limit(), Some(8));
    }

    #[test]
    fn fullscreen_uses_requested_mode_without_list() {
        let mut core = core();
        let mode = core.enter_fullscreen(VideoMode::new(1234, 567, 32), &[]);
        assert_eq!(mode, VideoMode::new(1234, 567, 32));
        assert!(core.state.is_fullscreen());
    }
}
