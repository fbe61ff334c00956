//=========================================================================
// Event Translator
//=========================================================================
//
// Turns native callback records into uniform window events.
//
// Architecture:
//   NativeEvent → EventTranslator (+ WindowState) → Event → EventQueue
//
// Stateful tracking:
// - Modifier bitmask: previous sample kept to emit one key event per bit
//   edge; also stamped onto every key event
// - Held keys: detect auto-repeat when the OS flag is unreliable
// - Focus: one event per transition
// - Mouse-inside flag and wheel accumulator live in `WindowState`
//
// Unmapped input (unknown keys, `Unsupported`) is dropped with a trace.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashSet;

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::native_event::{ModifierMask, NativeEvent};
use crate::core::event::{Event, KeyCode, Modifiers};
use crate::core::event_queue::EventQueue;
use crate::core::state::WindowState;

//=== EventTranslator =====================================================

/// Native-to-uniform translation state machine for one window.
#[derive(Debug, Default)]
pub(crate) struct EventTranslator {
    modifiers: ModifierMask,
    held_keys: HashSet<KeyCode>,
    focused: bool,
}

impl EventTranslator {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self::default()
    }

    //--- Queries ----------------------------------------------------------

    pub(crate) fn current_modifiers(&self) -> Modifiers {
        Modifiers::from(self.modifiers)
    }

    //--- Translation ------------------------------------------------------

    /// Translates one native record, pushing the resulting events.
    pub(crate) fn translate(
        &mut self,
        native: NativeEvent,
        state: &mut WindowState,
        queue: &mut EventQueue,
    ) {
        match native {
            NativeEvent::KeyDown { code, repeat, text } => {
                self.key_down(code, repeat, text, state, queue);
            }

            NativeEvent::KeyUp { code } => self.key_up(code, queue),

            NativeEvent::ModifiersChanged(mask) => self.modifiers_changed(mask, queue),

            NativeEvent::MouseDown { button } => {
                let (x, y) = state.cursor;
                queue.push(Event::MouseButtonPressed { button, x, y });
            }

            NativeEvent::MouseUp { button } => {
                let (x, y) = state.cursor;
                queue.push(Event::MouseButtonReleased { button, x, y });
            }

            NativeEvent::CursorMoved { x, y } => self.cursor_moved(x, y, state, queue),

            NativeEvent::CursorLeft => {
                if state.mouse_inside {
                    state.mouse_inside = false;
                    queue.push(Event::MouseLeft);
                }
            }

            NativeEvent::Scroll { delta } => self.scrolled(delta, state, queue),

            NativeEvent::Resized { width, height } => {
                state.video_mode.width = width;
                state.video_mode.height = height;
                queue.push(Event::Resized { width, height });
            }

            NativeEvent::Moved { x, y } => state.position = (x, y),

            NativeEvent::CloseRequested => queue.push(Event::Closed),

            NativeEvent::Focus(focused) => self.focus_changed(focused, queue),

            NativeEvent::Text(text) => push_text(&text, queue),

            NativeEvent::Unsupported => {
                trace!(target: "platform::input", "Unsupported native event dropped");
            }
        }
    }

    //--- Keyboard ---------------------------------------------------------

    fn key_down(
        &mut self,
        code: KeyCode,
        repeat: bool,
        text: Option<String>,
        state: &WindowState,
        queue: &mut EventQueue,
    ) {
        if code == KeyCode::Unidentified {
            trace!(target: "platform::input", "Unmapped key ignored");
            return;
        }
        if code.is_modifier() {
            // Reported through modifier-mask edges instead.
            return;
        }

        let already_held = !self.held_keys.insert(code);
        if (repeat || already_held) && !state.key_repeat {
            trace!(target: "platform::input", "Repeated {:?} suppressed", code);
            return;
        }

        queue.push(Event::KeyPressed {
            code,
            modifiers: self.current_modifiers(),
        });

        if let Some(text) = text {
            push_text(&text, queue);
        }
    }

    fn key_up(&mut self, code: KeyCode, queue: &mut EventQueue) {
        if code == KeyCode::Unidentified || code.is_modifier() {
            return;
        }
        self.held_keys.remove(&code);
        queue.push(Event::KeyReleased {
            code,
            modifiers: self.current_modifiers(),
        });
    }

    /// Emits one key event per modifier bit that changed since the last
    /// sample, in shift/control/alt/system order.
    fn modifiers_changed(&mut self, mask: ModifierMask, queue: &mut EventQueue) {
        let changed = self.modifiers ^ mask;
        self.modifiers = mask;
        if changed.is_empty() {
            return;
        }

        let modifiers = Modifiers::from(mask);
        for (bit, code) in ModifierMask::KEYS {
            if !changed.contains(bit) {
                continue;
            }
            let event = if mask.contains(bit) {
                Event::KeyPressed { code, modifiers }
            } else {
                Event::KeyReleased { code, modifiers }
            };
            queue.push(event);
        }
    }

    //--- Mouse ------------------------------------------------------------

    fn cursor_moved(&mut self, x: i32, y: i32, state: &mut WindowState, queue: &mut EventQueue) {
        state.cursor = (x, y);

        if state.contains(x, y) {
            if !state.mouse_inside {
                state.mouse_inside = true;
                queue.push(Event::MouseEntered);
            }
            queue.push(Event::MouseMoved { x, y });
        } else if state.mouse_inside {
            state.mouse_inside = false;
            queue.push(Event::MouseLeft);
        }
    }

    /// Accumulates wheel motion and reports whole notches.
    fn scrolled(&mut self, delta: f32, state: &mut WindowState, queue: &mut EventQueue) {
        if !delta.is_finite() {
            return;
        }
        state.wheel_delta += delta;
        if state.wheel_delta.abs() < 1.0 {
            return;
        }

        let notches = state.wheel_delta.trunc();
        state.wheel_delta -= notches;
        let (x, y) = state.cursor;
        queue.push(Event::MouseWheelMoved {
            delta: notches as i32,
            x,
            y,
        });
    }

    //--- Focus ------------------------------------------------------------

    fn focus_changed(&mut self, focused: bool, queue: &mut EventQueue) {
        if focused == self.focused {
            return;
        }
        self.focused = focused;

        if focused {
            queue.push(Event::GainedFocus);
        } else {
            // Key-ups delivered to other windows never reach us.
            self.held_keys.clear();
            queue.push(Event::LostFocus);
        }
    }
}

//=== Helpers =============================================================

fn push_text(text: &str, queue: &mut EventQueue) {
    for character in text.chars() {
        queue.push(Event::TextEntered { character });
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::MouseButton;
    use crate::core::video_mode::VideoMode;

    //--- Test Helpers -----------------------------------------------------

    struct Harness {
        translator: EventTranslator,
        state: WindowState,
        queue: EventQueue,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                translator: EventTranslator::new(),
                state: WindowState::new(VideoMode::with_size(200, 100)),
                queue: EventQueue::new(),
            }
        }

        fn feed(&mut self, native: NativeEvent) -> &mut Self {
            self.translator.translate(native, &mut self.state, &mut self.queue);
            self
        }

        fn drain(&mut self) -> Vec<Event> {
            std::iter::from_fn(|| self.queue.pop()).collect()
        }
    }

    fn key_down(code: KeyCode) -> NativeEvent {
        NativeEvent::KeyDown { code, repeat: false, text: None }
    }

    fn pressed(code: KeyCode, modifiers: Modifiers) -> Event {
        Event::KeyPressed { code, modifiers }
    }

    fn released(code: KeyCode, modifiers: Modifiers) -> Event {
        Event::KeyReleased { code, modifiers }
    }

    //=====================================================================
    // Keyboard
    //=====================================================================

    #[test]
    fn key_down_up_map_one_to_one() {
        let mut h = Harness::new();
        h.feed(key_down(KeyCode::KeyA))
            .feed(NativeEvent::KeyUp { code: KeyCode::KeyA });

        assert_eq!(
            h.drain(),
            vec![
                pressed(KeyCode::KeyA, Modifiers::NONE),
                released(KeyCode::KeyA, Modifiers::NONE),
            ]
        );
    }

    #[test]
    fn key_events_carry_modifiers_sampled_at_event_time() {
        let mut h = Harness::new();
        h.feed(NativeEvent::ModifiersChanged(ModifierMask::CONTROL));
        h.drain();

        h.feed(key_down(KeyCode::KeyS))
            .feed(NativeEvent::ModifiersChanged(ModifierMask::empty()))
            .feed(NativeEvent::KeyUp { code: KeyCode::KeyS });

        assert_eq!(
            h.drain(),
            vec![
                pressed(KeyCode::KeyS, Modifiers::CONTROL),
                released(KeyCode::ControlLeft, Modifiers::NONE),
                released(KeyCode::KeyS, Modifiers::NONE),
            ]
        );
    }

    #[test]
    fn unidentified_keys_are_dropped() {
        let mut h = Harness::new();
        h.feed(key_down(KeyCode::Unidentified))
            .feed(NativeEvent::KeyUp { code: KeyCode::Unidentified });
        assert!(h.drain().is_empty());
    }

    #[test]
    fn key_text_follows_key_press() {
        let mut h = Harness::new();
        h.feed(NativeEvent::KeyDown {
            code: KeyCode::KeyE,
            repeat: false,
            text: Some("é".into()),
        });

        assert_eq!(
            h.drain(),
            vec![
                pressed(KeyCode::KeyE, Modifiers::NONE),
                Event::TextEntered { character: 'é' },
            ]
        );
    }

    #[test]
    fn committed_text_emits_each_character() {
        let mut h = Harness::new();
        h.feed(NativeEvent::Text("日本".into()));
        assert_eq!(
            h.drain(),
            vec![
                Event::TextEntered { character: '日' },
                Event::TextEntered { character: '本' },
            ]
        );
    }

    //=====================================================================
    // Modifier Edges
    //=====================================================================

    #[test]
    fn modifier_edges_emit_one_event_per_transition() {
        let mut h = Harness::new();
        let s = ModifierMask::SHIFT;
        let c = ModifierMask::CONTROL;

        for mask in [ModifierMask::empty(), s, s, s | c, s, ModifierMask::empty()] {
            h.feed(NativeEvent::ModifiersChanged(mask));
        }

        let codes: Vec<(bool, KeyCode)> = h
            .drain()
            .into_iter()
            .map(|event| match event {
                Event::KeyPressed { code, .. } => (true, code),
                Event::KeyReleased { code, .. } => (false, code),
                other => panic!("Unexpected event {:?}", other),
            })
            .collect();

        assert_eq!(
            codes,
            vec![
                (true, KeyCode::ShiftLeft),
                (true, KeyCode::ControlLeft),
                (false, KeyCode::ControlLeft),
                (false, KeyCode::ShiftLeft),
            ]
        );
    }

    #[test]
    fn simultaneous_bits_report_in_fixed_order() {
        let mut h = Harness::new();
        h.feed(NativeEvent::ModifiersChanged(ModifierMask::SYSTEM | ModifierMask::ALT));

        let all = Modifiers { alt: true, system: true, ..Modifiers::NONE };
        assert_eq!(
            h.drain(),
            vec![pressed(KeyCode::AltLeft, all), pressed(KeyCode::SuperLeft, all)]
        );
    }

    #[test]
    fn discrete_modifier_key_callbacks_are_ignored() {
        let mut h = Harness::new();
        h.feed(key_down(KeyCode::ShiftLeft))
            .feed(NativeEvent::ModifiersChanged(ModifierMask::SHIFT))
            .feed(NativeEvent::KeyUp { code: KeyCode::ShiftLeft });

        assert_eq!(h.drain(), vec![pressed(KeyCode::ShiftLeft, Modifiers::SHIFT)]);
    }

    //=====================================================================
    // Key Repeat
    //=====================================================================

    #[test]
    fn repeats_suppressed_when_disabled() {
        let mut h = Harness::new();
        h.state.key_repeat = false;

        for _ in 0..5 {
            h.feed(key_down(KeyCode::Space));
        }

        assert_eq!(h.drain(), vec![pressed(KeyCode::Space, Modifiers::NONE)]);
    }

    #[test]
    fn os_repeat_flag_is_suppressed_with_its_text() {
        let mut h = Harness::new();
        h.state.key_repeat = false;

        h.feed(NativeEvent::KeyDown { code: KeyCode::KeyX, repeat: true, text: Some("x".into()) });
        assert!(h.drain().is_empty());
    }

    #[test]
    fn repeats_delivered_when_enabled() {
        let mut h = Harness::new();
        for _ in 0..3 {
            h.feed(key_down(KeyCode::Space));
        }
        assert_eq!(h.drain().len(), 3);
    }

    #[test]
    fn key_up_rearms_press() {
        let mut h = Harness::new();
        h.state.key_repeat = false;

        h.feed(key_down(KeyCode::KeyW))
            .feed(NativeEvent::KeyUp { code: KeyCode::KeyW })
            .feed(key_down(KeyCode::KeyW));

        assert_eq!(h.drain().len(), 3);
    }

    #[test]
    fn focus_loss_forgets_held_keys() {
        let mut h = Harness::new();
        h.state.key_repeat = false;

        h.feed(NativeEvent::Focus(true))
            .feed(key_down(KeyCode::KeyW))
            .feed(NativeEvent::Focus(false))
            .feed(NativeEvent::Focus(true))
            .feed(key_down(KeyCode::KeyW));

        let presses = h
            .drain()
            .into_iter()
            .filter(|e| matches!(e, Event::KeyPressed { .. }))
            .count();
        assert_eq!(presses, 2);
    }

    //=====================================================================
    // Mouse
    //=====================================================================

    #[test]
    fn first_move_inside_emits_entered_then_moved() {
        let mut h = Harness::new();
        h.feed(NativeEvent::CursorMoved { x: 10, y: 20 });

        assert_eq!(h.drain(), vec![Event::MouseEntered, Event::MouseMoved { x: 10, y: 20 }]);
        assert!(h.state.mouse_inside());
    }

    #[test]
    fn entered_and_left_once_per_crossing() {
        let mut h = Harness::new();
        h.feed(NativeEvent::CursorMoved { x: 10, y: 10 })
            .feed(NativeEvent::CursorMoved { x: 20, y: 10 })
            .feed(NativeEvent::CursorMoved { x: 30, y: 10 })
            .feed(NativeEvent::CursorMoved { x: 300, y: 10 })
            .feed(NativeEvent::CursorMoved { x: 310, y: 10 })
            .feed(NativeEvent::CursorMoved { x: 40, y: 10 });

        assert_eq!(
            h.drain(),
            vec![
                Event::MouseEntered,
                Event::MouseMoved { x: 10, y: 10 },
                Event::MouseMoved { x: 20, y: 10 },
                Event::MouseMoved { x: 30, y: 10 },
                Event::MouseLeft,
                Event::MouseEntered,
                Event::MouseMoved { x: 40, y: 10 },
            ]
        );
    }

    #[test]
    fn native_cursor_left_only_when_inside() {
        let mut h = Harness::new();
        h.feed(NativeEvent::CursorLeft);
        assert!(h.drain().is_empty());

        h.feed(NativeEvent::CursorMoved { x: 1, y: 1 })
            .feed(NativeEvent::CursorLeft)
            .feed(NativeEvent::CursorLeft);

        assert_eq!(
            h.drain(),
            vec![Event::MouseEntered, Event::MouseMoved { x: 1, y: 1 }, Event::MouseLeft]
        );
    }

    #[test]
    fn buttons_use_last_cursor_position() {
        let mut h = Harness::new();
        h.feed(NativeEvent::CursorMoved { x: 7, y: 8 });
        h.drain();

        h.feed(NativeEvent::MouseDown { button: MouseButton::Left })
            .feed(NativeEvent::MouseUp { button: MouseButton::Left });

        assert_eq!(
            h.drain(),
            vec![
                Event::MouseButtonPressed { button: MouseButton::Left, x: 7, y: 8 },
                Event::MouseButtonReleased { button: MouseButton::Left, x: 7, y: 8 },
            ]
        );
    }

    #[test]
    fn wheel_accumulates_until_a_whole_notch() {
        let mut h = Harness::new();
        h.feed(NativeEvent::CursorMoved { x: 5, y: 5 });
        h.drain();

        h.feed(NativeEvent::Scroll { delta: 0.4 })
            .feed(NativeEvent::Scroll { delta: 0.4 });
        assert!(h.drain().is_empty());

        h.feed(NativeEvent::Scroll { delta: 0.4 });
        assert_eq!(h.drain(), vec![Event::MouseWheelMoved { delta: 1, x: 5, y: 5 }]);
        assert!((h.state.pending_wheel_delta() - 0.2).abs() < 1e-4);
    }

    #[test]
    fn wheel_reports_negative_and_multi_notch_deltas() {
        let mut h = Harness::new();
        h.feed(NativeEvent::Scroll { delta: -3.0 });
        assert_eq!(h.drain(), vec![Event::MouseWheelMoved { delta: -3, x: 0, y: 0 }]);
        assert_eq!(h.state.pending_wheel_delta(), 0.0);
    }

    //=====================================================================
    // Window
    //=====================================================================

    #[test]
    fn resize_updates_content_area() {
        let mut h = Harness::new();
        h.feed(NativeEvent::Resized { width: 640, height: 480 });

        assert_eq!(h.drain(), vec![Event::Resized { width: 640, height: 480 }]);
        assert_eq!(h.state.size(), (640, 480));
        assert!(h.state.contains(600, 400));
    }

    #[test]
    fn close_request_does_not_close() {
        let mut h = Harness::new();
        h.feed(NativeEvent::CloseRequested);
        assert_eq!(h.drain(), vec![Event::Closed]);
        assert!(h.state.is_open());
    }

    #[test]
    fn focus_emits_once_per_transition() {
        let mut h = Harness::new();
        h.feed(NativeEvent::Focus(false))
            .feed(NativeEvent::Focus(true))
            .feed(NativeEvent::Focus(true))
            .feed(NativeEvent::Focus(false))
            .feed(NativeEvent::Focus(false));

        assert_eq!(h.drain(), vec![Event::GainedFocus, Event::LostFocus]);
    }

    #[test]
    fn move_updates_position_silently() {
        let mut h = Harness::new();
        h.feed(NativeEvent::Moved { x: 12, y: 34 });
        assert!(h.drain().is_empty());
        assert_eq!(h.state.position(), (12, 34));
    }

    #[test]
    fn unsupported_events_are_dropped() {
        let mut h = Harness::new();
        h.feed(NativeEvent::Unsupported);
        assert!(h.drain().is_empty());
    }

    #[test]
    fn delivery_order_is_preserved() {
        let mut h = Harness::new();
        let natives = vec![
            NativeEvent::Focus(true),
            NativeEvent::CursorMoved { x: 3, y: 4 },
            NativeEvent::MouseDown { button: MouseButton::Right },
            key_down(KeyCode::Escape),
            NativeEvent::CloseRequested,
        ];
        for native in natives {
            h.feed(native);
        }

        assert_eq!(
            h.drain(),
            vec![
                Event::GainedFocus,
                Event::MouseEntered,
                Event::MouseMoved { x: 3, y: 4 },
                Event::MouseButtonPressed { button: MouseButton::Right, x: 3, y: 4 },
                pressed(KeyCode::Escape, Modifiers::NONE),
                Event::Closed,
            ]
        );
    }
}
