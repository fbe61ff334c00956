//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_window::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Window facade
pub use crate::window::{Window, WindowBuilder, WindowConfig};

// Event model
pub use crate::core::event::{Event, KeyCode, Modifiers, MouseButton};

// Configuration
pub use crate::core::settings::{WindowSettings, WindowStyle};
pub use crate::core::video_mode::VideoMode;

// Rendering context and input snapshot
pub use crate::core::context::RenderContext;
pub use crate::core::input_state::InputState;

// Backends
pub use crate::platform::{HeadlessWindow, NativeWindow, PlatformError, PlatformWindow};
