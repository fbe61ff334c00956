//=========================================================================
// Native Event Record
//
// Platform-neutral record of one native callback, produced by a backend's
// mapper and consumed by the `EventTranslator`.
//
// Backends differ in how callbacks arrive (winit `WindowEvent`s, injected
// records in the headless backend), but they all reduce to this enum, so
// the translation rules are written and tested once.
//
//=========================================================================

//=== External Crates =====================================================
use bitflags::bitflags;

//=== Internal Modules ====================================================
use crate::core::event::{KeyCode, Modifiers, MouseButton};

//=== ModifierMask ========================================================

bitflags! {
    /// Raw modifier bitmask as sampled from the platform.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModifierMask: u8 {
        const SHIFT   = 1 << 0;
        const CONTROL = 1 << 1;
        const ALT     = 1 << 2;
        /// Command on macOS, Windows/Super elsewhere.
        const SYSTEM  = 1 << 3;
    }
}

impl ModifierMask {
    /// Bits in edge-reporting order, with the key code each one reports.
    pub(crate) const KEYS: [(ModifierMask, KeyCode); 4] = [
        (ModifierMask::SHIFT, KeyCode::ShiftLeft),
        (ModifierMask::CONTROL, KeyCode::ControlLeft),
        (ModifierMask::ALT, KeyCode::AltLeft),
        (ModifierMask::SYSTEM, KeyCode::SuperLeft),
    ];
}

impl From<ModifierMask> for Modifiers {
    fn from(mask: ModifierMask) -> Self {
        Self {
            shift: mask.contains(ModifierMask::SHIFT),
            control: mask.contains(ModifierMask::CONTROL),
            alt: mask.contains(ModifierMask::ALT),
            system: mask.contains(ModifierMask::SYSTEM),
        }
    }
}

//=== NativeEvent =========================================================

/// One native occurrence, before translation.
///
/// Coordinates are window-local pixels. Wheel deltas are in lines
/// (notches); backends convert pixel deltas before building the record.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeEvent {
    /// Key went down. `repeat` is the OS auto-repeat flag; `text` is the
    /// composed text the key produced, if any.
    KeyDown {
        code: KeyCode,
        repeat: bool,
        text: Option<String>,
    },

    /// Key went up.
    KeyUp { code: KeyCode },

    /// New sample of the modifier bitmask.
    ModifiersChanged(ModifierMask),

    MouseDown { button: MouseButton },
    MouseUp { button: MouseButton },

    /// Cursor moved to a window-local position (may be outside the
    /// content area while a button is held).
    CursorMoved { x: i32, y: i32 },

    /// The platform reports that the cursor left the content area.
    CursorLeft,

    /// Vertical scroll in lines; positive scrolls away from the user.
    Scroll { delta: f32 },

    /// Content area resized to the given pixel size.
    Resized { width: u32, height: u32 },

    /// Window moved to the given screen position.
    Moved { x: i32, y: i32 },

    CloseRequested,

    Focus(bool),

    /// Committed text from an input method.
    Text(String),

    /// Anything the backend saw but has no mapping for.
    Unsupported,
}

//=========================================================================
// Unit Tests
//=========================================================================
