//=========================================================================
// Core Types
//
// Platform-independent building blocks of the window subsystem.
//
// Components:
// - `event`: the uniform `Event` value and its key/button/modifier types
// - `event_queue`: FIFO of pending events for one window
// - `video_mode`: display modes and fullscreen mode selection
// - `settings`: creation-time context attributes and window style
// - `state`: mutable runtime state of one window
// - `context`: thread-affine rendering context activation
// - `frame_clock`: frame timing, framerate limit and vsync pacing
// - `input_state`: real-time snapshot built from polled events
//
// Nothing in here talks to the OS; backends live in `crate::platform`.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod context;
pub mod event;
pub mod event_queue;
pub mod frame_clock;
pub mod input_state;
pub mod settings;
pub mod state;
pub mod video_mode;

//=== Public API ==========================================================

pub use context::RenderContext;
pub use event::{Event, KeyCode, Modifiers, MouseButton};
pub use event_queue::EventQueue;
pub use frame_clock::FrameClock;
pub use input_state::InputState;
pub use settings::{WindowSettings, WindowStyle};
pub use state::{WindowState, WindowedGeometry};
pub use video_mode::VideoMode;
