//=========================================================================
// Aetheric Window - Library Root
//
// Polled window and input events over native windowing callbacks.
//
// Responsibilities:
// - Expose the window facade (`Window`, `WindowBuilder`)
// - Define the uniform event model shared by every backend
// - Keep native callback translation behind the `platform` layer
//
// Typical usage:
// ```no_run
// use aetheric_window::{Event, WindowBuilder};
//
// fn main() {
//     let Ok(mut window) = WindowBuilder::new().with_title("Demo").build() else {
//         return;
//     };
//     while window.is_open() {
//         while let Some(event) = window.poll_event() {
//             if event == Event::Closed {
//                 window.close();
//             }
//         }
//         window.display();
//     }
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the backend-independent model: events, queue, video
// modes, settings, window state and the rendering context.
//
pub mod core;

// `platform` holds the backends and the `PlatformWindow` trait. It is
// public so applications can pick the headless backend or reach the
// native winit handle.
pub mod platform;

// `window` defines the facade applications poll and draw through.
pub mod window;

pub mod prelude;

//--- Public Exports ------------------------------------------------------

pub use crate::core::{
    Event, InputState, KeyCode, Modifiers, MouseButton, RenderContext, VideoMode, WindowSettings,
    WindowStyle,
};
pub use crate::platform::PlatformError;
pub use crate::window::{Window, WindowBuilder, WindowConfig};
