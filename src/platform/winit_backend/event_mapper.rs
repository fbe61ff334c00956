//=========================================================================
// Winit Event Mapper
//
// Converts winit `WindowEvent`s into `NativeEvent` records.
//
// Responsibilities:
// - Translate keyboard, mouse, wheel and window notifications
// - Convert pixel-based scrolling into lines
// - Map anything else to `NativeEvent::Unsupported`
//
// Notes:
// Winit normalizes platform keys: the macOS Command key is reported as
// Super, which becomes the `system` modifier.
//
//=========================================================================

use winit::event::{ElementState, Ime, KeyEvent, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey};

use crate::core::event::{KeyCode, MouseButton};
use crate::platform::native_event::{ModifierMask, NativeEvent};

//=== Key Conversion ======================================================
//
// Maps `WinitKeyCode` values to the crate's `KeyCode`. Keys without a
// counterpart map to `Unidentified` and are dropped by the translator.
//

impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Numeric keys -----------------------------------------------------
            Digit0 => KeyCode::Digit0, Digit1 => KeyCode::Digit1,
            Digit2 => KeyCode::Digit2, Digit3 => KeyCode::Digit3,
            Digit4 => KeyCode::Digit4, Digit5 => KeyCode::Digit5,
            Digit6 => KeyCode::Digit6, Digit7 => KeyCode::Digit7,
            Digit8 => KeyCode::Digit8, Digit9 => KeyCode::Digit9,

            //--- Alphabetic keys --------------------------------------------------
            KeyA => KeyCode::KeyA, KeyB => KeyCode::KeyB, KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD, KeyE => KeyCode::KeyE, KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG, KeyH => KeyCode::KeyH, KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ, KeyK => KeyCode::KeyK, KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM, KeyN => KeyCode::KeyN, KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP, KeyQ => KeyCode::KeyQ, KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS, KeyT => KeyCode::KeyT, KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV, KeyW => KeyCode::KeyW, KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY, KeyZ => KeyCode::KeyZ,

            //--- Modifier keys ----------------------------------------------------
            ShiftLeft => KeyCode::ShiftLeft, ShiftRight => KeyCode::ShiftRight,
            ControlLeft => KeyCode::ControlLeft, ControlRight => KeyCode::ControlRight,
            AltLeft => KeyCode::AltLeft, AltRight => KeyCode::AltRight,
            SuperLeft => KeyCode::SuperLeft, SuperRight => KeyCode::SuperRight,

            //--- Arrow keys -------------------------------------------------------
            ArrowDown => KeyCode::ArrowDown, ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight, ArrowUp => KeyCode::ArrowUp,

            //--- Function keys ----------------------------------------------------
            F1 => KeyCode::F1, F2 => KeyCode::F2, F3 => KeyCode::F3,
            F4 => KeyCode::F4, F5 => KeyCode::F5, F6 => KeyCode::F6,
            F7 => KeyCode::F7, F8 => KeyCode::F8, F9 => KeyCode::F9,
            F10 => KeyCode::F10, F11 => KeyCode::F11, F12 => KeyCode::F12,
            F13 => KeyCode::F13, F14 => KeyCode::F14, F15 => KeyCode::F15,

            //--- Numpad -----------------------------------------------------------
            Numpad0 => KeyCode::Numpad0, Numpad1 => KeyCode::Numpad1,
            Numpad2 => KeyCode::Numpad2, Numpad3 => KeyCode::Numpad3,
            Numpad4 => KeyCode::Numpad4, Numpad5 => KeyCode::Numpad5,
            Numpad6 => KeyCode::Numpad6, Numpad7 => KeyCode::Numpad7,
            Numpad8 => KeyCode::Numpad8, Numpad9 => KeyCode::Numpad9,
            NumpadAdd => KeyCode::NumpadAdd,
            NumpadSubtract => KeyCode::NumpadSubtract,
            NumpadMultiply => KeyCode::NumpadMultiply,
            NumpadDivide => KeyCode::NumpadDivide,

            //--- Navigation -------------------------------------------------------
            Home => KeyCode::Home, End => KeyCode::End,
            PageUp => KeyCode::PageUp, PageDown => KeyCode::PageDown,
            Insert => KeyCode::Insert,

            //--- Punctuation ------------------------------------------------------
            BracketLeft => KeyCode::BracketLeft, BracketRight => KeyCode::BracketRight,
            Semicolon => KeyCode::Semicolon, Comma => KeyCode::Comma,
            Period => KeyCode::Period, Quote => KeyCode::Quote,
            Slash => KeyCode::Slash, Backslash => KeyCode::Backslash,
            Backquote => KeyCode::Backquote, Equal => KeyCode::Equal,
            Minus => KeyCode::Minus,

            //--- Special ----------------------------------------------------------
            Space => KeyCode::Space,
            Enter => KeyCode::Enter,
            Escape => KeyCode::Escape,
            Tab => KeyCode::Tab,
            Backspace => KeyCode::Backspace,
            Delete => KeyCode::Delete,
            ContextMenu => KeyCode::ContextMenu,
            Pause => KeyCode::Pause,

            //--- Fallback ---------------------------------------------------------
            _ => KeyCode::Unidentified,
        }
    }
}

//=== Mouse Conversion ====================================================

/// Maps winit buttons; numbered extra buttons have no counterpart.
pub(crate) fn map_mouse_button(button: WinitMouseButton) -> Option<MouseButton> {
    match button {
        WinitMouseButton::Left => Some(MouseButton::Left),
        WinitMouseButton::Right => Some(MouseButton::Right),
        WinitMouseButton::Middle => Some(MouseButton::Middle),
        WinitMouseButton::Back => Some(MouseButton::Back),
        WinitMouseButton::Forward => Some(MouseButton::Forward),
        WinitMouseButton::Other(_) => None,
    }
}

//=== Modifier Conversion =================================================

impl From<ModifiersState> for ModifierMask {
    fn from(state: ModifiersState) -> Self {
        let mut mask = ModifierMask::empty();
        mask.set(ModifierMask::SHIFT, state.shift_key());
        mask.set(ModifierMask::CONTROL, state.control_key());
        mask.set(ModifierMask::ALT, state.alt_key());
        mask.set(ModifierMask::SYSTEM, state.super_key());
        mask
    }
}

//=== Scroll Conversion ===================================================

/// Vertical scroll in lines. Pixel deltas are divided by
/// `pixels_per_line`.
pub(crate) fn scroll_lines(delta: MouseScrollDelta, pixels_per_line: f32) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(position) => position.y as f32 / pixels_per_line,
    }
}

//=== Full Event Conversion ===============================================

fn map_key_event(event: KeyEvent) -> NativeEvent {
    let code = match event.physical_key {
        PhysicalKey::Code(code) => KeyCode::from(code),
        PhysicalKey::Unidentified(_) => KeyCode::Unidentified,
    };

    match event.state {
        ElementState::Pressed => NativeEvent::KeyDown {
            code,
            repeat: event.repeat,
            text: event.text.map(|text| text.to_string()),
        },
        ElementState::Released => NativeEvent::KeyUp { code },
    }
}

/// Converts one winit window event into a native record.
pub(crate) fn map_window_event(event: WindowEvent, pixels_per_line: f32) -> NativeEvent {
    match event {
        //--- Keyboard ----------------------------------------------------
        WindowEvent::KeyboardInput { event, .. } => map_key_event(event),
        WindowEvent::ModifiersChanged(modifiers) => {
            NativeEvent::ModifiersChanged(ModifierMask::from(modifiers.state()))
        }
        WindowEvent::Ime(Ime::Commit(text)) => NativeEvent::Text(text),

        //--- Mouse -------------------------------------------------------
        WindowEvent::MouseInput { state, button, .. } => match map_mouse_button(button) {
            Some(button) => match state {
                ElementState::Pressed => NativeEvent::MouseDown { button },
                ElementState::Released => NativeEvent::MouseUp { button },
            },
            None => NativeEvent::Unsupported,
        },
        WindowEvent::CursorMoved { position, .. } => NativeEvent::CursorMoved {
            x: position.x.floor() as i32,
            y: position.y.floor() as i32,
        },
        WindowEvent::CursorLeft { .. } => NativeEvent::CursorLeft,
        WindowEvent::MouseWheel { delta, .. } => NativeEvent::Scroll {
            delta: scroll_lines(delta, pixels_per_line),
        },

        //--- Window ------------------------------------------------------
        WindowEvent::Resized(size) => NativeEvent::Resized {
            width: size.width,
            height: size.height,
        },
        WindowEvent::Moved(position) => NativeEvent::Moved {
            x: position.x,
            y: position.y,
        },
        WindowEvent::CloseRequested => NativeEvent::CloseRequested,
        WindowEvent::Focused(focused) => NativeEvent::Focus(focused),

        //--- Unhandled ---------------------------------------------------
        _ => NativeEvent::Unsupported,
    }
}

//=========================================================================
// Tests
//=========================================================================
