//! Per-frame keyboard and mouse state.
//!
//! [`InputState`] is fed translated [`Event`]s and answers "is held",
//! "went down this frame" and "went up this frame" queries. Call
//! [`InputState::begin_frame`] once per frame before feeding the frame's
//! events.

use std::collections::HashSet;

use crate::events::{Event, Key, MouseButton};

const MOUSE_BUTTONS: usize = 5;

#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<Key>,
    pressed: HashSet<Key>,
    released: HashSet<Key>,
    buttons: [bool; MOUSE_BUTTONS],
    buttons_last_frame: [bool; MOUSE_BUTTONS],
    mouse_position: (i32, i32),
    mouse_delta: (i32, i32),
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears per-frame edges and the accumulated mouse motion.
    pub fn begin_frame(&mut self) {
        self.pressed.clear();
        self.released.clear();
        self.buttons_last_frame = self.buttons;
        self.mouse_delta = (0, 0);
    }

    pub fn handle_event(&mut self, event: &Event) {
        match *event {
            Event::Keyboard { key, pressed: true } => {
                if self.held.insert(key) {
                    self.pressed.insert(key);
                }
            }
            Event::Keyboard {
                key,
                pressed: false,
            } => {
                if self.held.remove(&key) {
                    self.released.insert(key);
                }
            }
            Event::MouseButton {
                button,
                pressed,
                x,
                y,
            } => {
                self.buttons[button.index()] = pressed;
                self.mouse_position = (x, y);
            }
            Event::MouseMotion { x, y, rel_x, rel_y } => {
                self.mouse_position = (x, y);
                self.mouse_delta.0 += rel_x;
                self.mouse_delta.1 += rel_y;
            }
            Event::Resize { .. } | Event::Quit => {}
        }
    }

    pub fn is_key_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// `true` only on the frame the key went down; auto-repeat is ignored.
    pub fn key_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    pub fn key_released(&self, key: Key) -> bool {
        self.released.contains(&key)
    }

    pub fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.buttons[button.index()]
    }

    pub fn mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons[button.index()] && !self.buttons_last_frame[button.index()]
    }

    pub fn mouse_button_released(&self, button: MouseButton) -> bool {
        !self.buttons[button.index()] && self.buttons_last_frame[button.index()]
    }

    pub fn mouse_position(&self) -> (i32, i32) {
        self.mouse_position
    }

    /// Relative motion accumulated since the last `begin_frame`.
    pub fn mouse_delta(&self) -> (i32, i32) {
        self.mouse_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, pressed: bool) -> Event {
        Event::Keyboard { key, pressed }
    }

    #[test]
    fn key_edges_last_one_frame() {
        let mut input = InputState::new();
        input.begin_frame();
        input.handle_event(&key(Key::W, true));
        assert!(input.is_key_down(Key::W));
        assert!(input.key_pressed(Key::W));

        input.begin_frame();
        // Auto-repeat while held.
        input.handle_event(&key(Key::W, true));
        assert!(input.is_key_down(Key::W));
        assert!(!input.key_pressed(Key::W));

        input.begin_frame();
        input.handle_event(&key(Key::W, false));
        assert!(!input.is_key_down(Key::W));
        assert!(input.key_released(Key::W));
    }

    #[test]
    fn mouse_motion_accumulates_per_frame() {
        let mut input = InputState::new();
        for (x, rel) in [(10, 2), (13, 3)] {
            input.handle_event(&Event::MouseMotion {
                x,
                y: 5,
                rel_x: rel,
                rel_y: -1,
            });
        }
        assert_eq!(input.mouse_delta(), (5, -2));
        assert_eq!(input.mouse_position(), (13, 5));

        input.begin_frame();
        assert_eq!(input.mouse_delta(), (0, 0));
    }

    #[test]
    fn mouse_button_edges() {
        let mut input = InputState::new();
        let right = |pressed| Event::MouseButton {
            button: MouseButton::Right,
            pressed,
            x: 1,
            y: 2,
        };

        input.begin_frame();
        input.handle_event(&right(true));
        assert!(input.mouse_button_pressed(MouseButton::Right));
        assert!(input.is_mouse_button_down(MouseButton::Right));
        assert!(!input.is_mouse_button_down(MouseButton::Left));

        input.begin_frame();
        assert!(!input.mouse_button_pressed(MouseButton::Right));
        input.handle_event(&right(false));
        assert!(input.mouse_button_released(MouseButton::Right));
    }
}
