//=========================================================================
// Input State
//
// Real-time input snapshot maintained by the window as events are polled.
//
// Architecture:
//   Event → apply() → HashSet (keys/buttons held) + cursor → query
//
// The snapshot reflects every event the application has polled so far,
// so queries made inside the poll loop agree with the events seen.
//
//=========================================================================

//=== Standard Library Imports ============================================
use std::collections::HashSet;
use std::fmt;

//=== Internal Modules ====================================================
use crate::core::event::{Event, KeyCode, Modifiers, MouseButton};

//=== InputState ==========================================================

/// Keys and buttons held, cursor position and modifier state.
pub struct InputState {
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    mouse_position: (i32, i32),
    modifiers: Modifiers,
    mouse_inside: bool,
    focused: bool,
}

impl InputState {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        const KEYS_BASE: usize = 32;
        Self {
            keys_down: HashSet::with_capacity(KEYS_BASE),
            buttons_down: HashSet::new(),
            mouse_position: (0, 0),
            modifiers: Modifiers::NONE,
            mouse_inside: false,
            focused: false,
        }
    }

    //--- Event Processing -------------------------------------------------

    /// Folds one polled event into the snapshot.
    pub(crate) fn apply(&mut self, event: &Event) {
        match *event {
            Event::KeyPressed { code, modifiers } => {
                self.modifiers = modifiers;
                self.keys_down.insert(code);
            }
            Event::KeyReleased { code, modifiers } => {
                self.modifiers = modifiers;
                self.keys_down.remove(&code);
            }
            Event::MouseButtonPressed { button, x, y } => {
                self.buttons_down.insert(button);
                self.mouse_position = (x, y);
            }
            Event::MouseButtonReleased { button, x, y } => {
                self.buttons_down.remove(&button);
                self.mouse_position = (x, y);
            }
            Event::MouseMoved { x, y } | Event::MouseWheelMoved { x, y, .. } => {
                self.mouse_position = (x, y);
            }
            Event::MouseEntered => self.mouse_inside = true,
            Event::MouseLeft => self.mouse_inside = false,
            Event::GainedFocus => self.focused = true,
            Event::LostFocus => {
                // Releases happening in other windows are never reported.
                self.focused = false;
                self.keys_down.clear();
                self.buttons_down.clear();
                self.modifiers = Modifiers::NONE;
            }
            Event::Closed | Event::Resized { .. } | Event::TextEntered { .. } => {}
        }
    }

    /// Forgets everything (window closed).
    pub(crate) fn reset(&mut self) {
        *self = Self::new();
    }

    //--- Queries ----------------------------------------------------------

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    /// Last known cursor position, window-local.
    pub fn mouse_position(&self) -> (i32, i32) {
        self.mouse_position
    }

    /// Modifier state carried by the most recent key event.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn is_mouse_inside(&self) -> bool {
        self.mouse_inside
    }

    pub fn has_focus(&self) -> bool {
        self.focused
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

//=== Debug Trait =========================================================

impl fmt::Debug for InputState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<_> = self.keys_down.iter().map(|k| format!("{:?}", k)).collect();
        let buttons: Vec<_> = self.buttons_down.iter().map(|b| format!("{:?}", b)).collect();

        f.debug_struct("InputState")
            .field("mouse", &self.mouse_position)
            .field("modifiers", &self.modifiers)
            .field("keys", &keys)
            .field("buttons", &buttons)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Event {
        Event::KeyPressed { code, modifiers: Modifiers::NONE }
    }

    fn release(code: KeyCode) -> Event {
        Event::KeyReleased { code, modifiers: Modifiers::NONE }
    }

    #[test]
    fn tracks_held_keys() {
        let mut input = InputState::new();
        input.apply(&press(KeyCode::ArrowUp));
        assert!(input.is_key_down(KeyCode::ArrowUp));

        input.apply(&release(KeyCode::ArrowUp));
        assert!(!input.is_key_down(KeyCode::ArrowUp));
    }

    #[test]
    fn tracks_buttons_and_cursor() {
        let mut input = InputState::new();
        input.apply(&Event::MouseButtonPressed { button: MouseButton::Left, x: 5, y: 6 });
        assert!(input.is_mouse_button_down(MouseButton::Left));
        assert_eq!(input.mouse_position(), (5, 6));

        input.apply(&Event::MouseMoved { x: 50, y: 60 });
        assert_eq!(input.mouse_position(), (50, 60));

        input.apply(&Event::MouseButtonReleased { button: MouseButton::Left, x: 51, y: 61 });
        assert!(!input.is_mouse_button_down(MouseButton::Left));
    }

    #[test]
    fn records_modifiers_from_key_events() {
        let mut input = InputState::new();
        input.apply(&Event::KeyPressed { code: KeyCode::KeyC, modifiers: Modifiers::CONTROL });
        assert_eq!(input.modifiers(), Modifiers::CONTROL);
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut input = InputState::new();
        input.apply(&Event::GainedFocus);
        input.apply(&press(KeyCode::Space));
        input.apply(&Event::MouseButtonPressed { button: MouseButton::Right, x: 0, y: 0 });
        assert!(input.has_focus());

        input.apply(&Event::LostFocus);

        assert!(!input.has_focus());
        assert!(!input.is_key_down(KeyCode::Space));
        assert!(!input.is_mouse_button_down(MouseButton::Right));
    }

    #[test]
    fn enter_and_leave_toggle_inside_flag() {
        let mut input = InputState::new();
        input.apply(&Event::MouseEntered);
        assert!(input.is_mouse_inside());
        input.apply(&Event::MouseLeft);
        assert!(!input.is_mouse_inside());
    }

    #[test]
    fn reset_clears_state() {
        let mut input = InputState::new();
        input.apply(&press(KeyCode::KeyW));
        input.reset();
        assert!(!input.is_key_down(KeyCode::KeyW));
        assert_eq!(input.mouse_position(), (0, 0));
    }
}
