//=========================================================================
// Window Event Types
//
// Defines the uniform event values delivered to application code.
//
// Every native occurrence the platform layer understands (key, mouse,
// resize, close, focus, text) is normalized into one `Event` before it
// reaches the queue. Application code only ever sees these types.
//
// Responsibilities:
// - Represent keyboard and mouse inputs in a stable, portable way
// - Carry the modifier state sampled when the native event happened
// - Stay cheap to copy, compare and hash
//
// Event Flow:
// ```text
// Native callback (winit / headless injector)
//         ↓
//    NativeEvent → EventTranslator
//         ↓
//    Event (this module) → EventQueue
//         ↓
//    Window::poll_event()
// ```
//
//=========================================================================

//=== MouseButton =========================================================

/// Physical mouse button identifier.
///
/// Buttons the platform reports beyond these five are dropped by the
/// translator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// First extra button (usually "back").
    Back,

    /// Second extra button (usually "forward").
    Forward,
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// For example, `KeyA` is always the same physical key regardless of
/// keyboard layout (QWERTY vs AZERTY). Characters arrive separately as
/// [`Event::TextEntered`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Modifier Keys ----------------------------------------------------

    /// Modifier keys. Only the `*Left` variants are produced by the
    /// modifier edge detector, since the native mask does not say which
    /// side changed.
    ShiftLeft, ShiftRight,
    ControlLeft, ControlRight,
    AltLeft, AltRight,
    SuperLeft, SuperRight,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Function Keys ----------------------------------------------------

    F1, F2, F3, F4, F5, F6, F7, F8,
    F9, F10, F11, F12, F13, F14, F15,

    //--- Numpad -----------------------------------------------------------

    Numpad0, Numpad1, Numpad2, Numpad3, Numpad4,
    Numpad5, Numpad6, Numpad7, Numpad8, Numpad9,
    NumpadAdd,
    NumpadSubtract,
    NumpadMultiply,
    NumpadDivide,

    //--- Navigation -------------------------------------------------------

    Home,
    End,
    PageUp,
    PageDown,
    Insert,

    //--- Punctuation ------------------------------------------------------

    BracketLeft,
    BracketRight,
    Semicolon,
    Comma,
    Period,
    Quote,
    Slash,
    Backslash,
    Backquote,
    Equal,
    Minus,

    //--- Special Keys -----------------------------------------------------

    /// Spacebar
    Space,

    /// Return/Enter key
    Enter,

    /// Escape key
    Escape,

    /// Tab key
    Tab,

    /// Backspace key
    Backspace,

    /// Delete key
    Delete,

    /// Context menu key
    ContextMenu,

    /// Pause/Break key
    Pause,

    /// Fallback for keys not explicitly mapped by the platform layer.
    ///
    /// Never delivered to applications: the translator drops key events
    /// carrying this code.
    Unidentified,
}

impl KeyCode {
    /// Returns true for Shift, Control, Alt and Super (either side).
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Self::ShiftLeft
                | Self::ShiftRight
                | Self::ControlLeft
                | Self::ControlRight
                | Self::AltLeft
                | Self::AltRight
                | Self::SuperLeft
                | Self::SuperRight
        )
    }
}

//=== Modifiers ===========================================================

/// Modifier key state (Shift, Control, Alt, System).
///
/// `system` is the Command key on macOS and the Windows/Super key
/// elsewhere. The state is sampled when the native event is translated,
/// not when the application polls it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    /// Shift key held (either side).
    pub shift: bool,

    /// Control key held (either side).
    pub control: bool,

    /// Alt key held (Option on macOS).
    pub alt: bool,

    /// System key held (Command on macOS, Windows/Super elsewhere).
    pub system: bool,
}

//--- Modifier Constants --------------------------------------------------

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        system: false,
    };

    /// Shift only.
    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    /// Control only.
    pub const CONTROL: Self = Self {
        control: true,
        ..Self::NONE
    };

    /// Alt only.
    pub const ALT: Self = Self {
        alt: true,
        ..Self::NONE
    };

    /// System only.
    pub const SYSTEM: Self = Self {
        system: true,
        ..Self::NONE
    };

    /// Returns true when no modifier is held.
    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

//=== Event ===============================================================

/// One window or input occurrence, as delivered by [`Window::poll_event`].
///
/// Exactly one kind is active per value; payload fields only carry meaning
/// for their own kind. Coordinates are window-local pixels with a top-left
/// origin.
///
/// [`Window::poll_event`]: crate::Window::poll_event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    /// The user or the OS asked to close the window.
    ///
    /// The window stays open; call [`Window::close`] to honour the request.
    ///
    /// [`Window::close`]: crate::Window::close
    Closed,

    /// The content area was resized (pixels).
    Resized { width: u32, height: u32 },

    /// The window lost keyboard focus.
    LostFocus,

    /// The window gained keyboard focus.
    GainedFocus,

    /// A composed character was entered.
    TextEntered { character: char },

    /// Key pressed down.
    KeyPressed { code: KeyCode, modifiers: Modifiers },

    /// Key released.
    KeyReleased { code: KeyCode, modifiers: Modifiers },

    /// Wheel scrolled by `delta` whole notches (positive = away from user).
    MouseWheelMoved { delta: i32, x: i32, y: i32 },

    /// Mouse button pressed.
    MouseButtonPressed { button: MouseButton, x: i32, y: i32 },

    /// Mouse button released.
    MouseButtonReleased { button: MouseButton, x: i32, y: i32 },

    /// Cursor moved inside the content area.
    MouseMoved { x: i32, y: i32 },

    /// Cursor entered the content area.
    MouseEntered,

    /// Cursor left the content area.
    MouseLeft,
}

impl Event {
    /// Returns the key code for keyboard events.
    pub fn key_code(&self) -> Option<KeyCode> {
        match self {
            Self::KeyPressed { code, .. } | Self::KeyReleased { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns true for events originating from keyboard or mouse input.
    pub fn is_input(&self) -> bool {
        !matches!(
            self,
            Self::Closed | Self::Resized { .. } | Self::LostFocus | Self::GainedFocus
        )
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    //=====================================================================
    // KeyCode Tests
    //=====================================================================

    #[test]
    fn modifier_keys_are_detected() {
        assert!(KeyCode::ShiftLeft.is_modifier());
        assert!(KeyCode::ControlRight.is_modifier());
        assert!(KeyCode::SuperLeft.is_modifier());
        assert!(!KeyCode::KeyA.is_modifier());
        assert!(!KeyCode::Escape.is_modifier());
    }

    //=====================================================================
    // Event Tests
    //=====================================================================

    #[test]
    fn events_compare_by_payload() {
        let a = Event::MouseMoved { x: 10, y: 10 };
        let b = Event::MouseMoved { x: 10, y: 10 };
        let c = Event::MouseMoved { x: 11, y: 10 };
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn key_events_differ_by_modifiers() {
        let plain = Event::KeyPressed { code: KeyCode::KeyS, modifiers: Modifiers::NONE };
        let ctrl = Event::KeyPressed { code: KeyCode::KeyS, modifiers: Modifiers::CONTROL };
        assert_ne!(plain, ctrl);
    }

    #[test]
    fn key_code_accessor() {
        let press = Event::KeyPressed { code: KeyCode::Space, modifiers: Modifiers::NONE };
        let release = Event::KeyReleased { code: KeyCode::Enter, modifiers: Modifiers::SHIFT };
        assert_eq!(press.key_code(), Some(KeyCode::Space));
        assert_eq!(release.key_code(), Some(KeyCode::Enter));
        assert_eq!(Event::Closed.key_code(), None);
    }

    #[test]
    fn window_events_are_not_input() {
        assert!(!Event::Closed.is_input());
        assert!(!Event::Resized { width: 1, height: 1 }.is_input());
        assert!(!Event::GainedFocus.is_input());
        assert!(Event::MouseEntered.is_input());
        assert!(Event::TextEntered { character: 'a' }.is_input());
    }

    //=====================================================================
    // Modifiers Tests
    //=====================================================================

    #[test]
    fn modifiers_default_is_none() {
        assert_eq!(Modifiers::default(), Modifiers::NONE);
        assert!(Modifiers::NONE.is_empty());
    }

    #[test]
    fn modifier_constants_set_single_flag() {
        assert!(Modifiers::SHIFT.shift && !Modifiers::SHIFT.control);
        assert!(Modifiers::CONTROL.control && !Modifiers::CONTROL.alt);
        assert!(Modifiers::ALT.alt && !Modifiers::ALT.system);
        assert!(Modifiers::SYSTEM.system && !Modifiers::SYSTEM.shift);
        assert!(!Modifiers::SYSTEM.is_empty());
    }
}
