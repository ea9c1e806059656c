use std::collections::HashSet;

use winit::event::{ElementState, TouchPhase, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::math::Vec2;

/// Tracks keyboard and pointer state between frames.
///
/// Events arrive between ticks and mutate this struct; the frame tick reads it
/// once at the top. Touch-move is folded into the pointer position so the
/// kaleidoscope behaves the same on touch screens.
pub struct Input {
    keys_down: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,
    pointer_position: Vec2,
}

impl Default for Input {
    fn default() -> Self {
        Self {
            keys_down: HashSet::new(),
            keys_pressed: HashSet::new(),
            pointer_position: [0.0, 0.0],
        }
    }
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call at the end of each frame to reset per-frame state.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
    }

    /// Process a window event and update input state.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => {
                            if !self.keys_down.contains(&key) {
                                self.keys_pressed.insert(key);
                            }
                            self.keys_down.insert(key);
                        }
                        ElementState::Released => {
                            self.keys_down.remove(&key);
                        }
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer_position = [position.x as f32, position.y as f32];
            }
            WindowEvent::Touch(touch) => {
                if matches!(touch.phase, TouchPhase::Started | TouchPhase::Moved) {
                    self.pointer_position = [touch.location.x as f32, touch.location.y as f32];
                }
            }
            _ => {}
        }
    }

    /// Returns true while the key is held down.
    pub fn key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns true if the key went down this frame.
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Last known pointer (mouse or touch) position in window pixels.
    pub fn pointer_position(&self) -> Vec2 {
        self.pointer_position
    }
}

#[cfg(test)]
impl Input {
    /// Test-only: mark a key as held and freshly pressed.
    pub(crate) fn press(&mut self, key: KeyCode) {
        self.keys_pressed.insert(key);
        self.keys_down.insert(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pressed_is_cleared_between_frames() {
        let mut input = Input::new();
        input.press(KeyCode::KeyW);

        input.begin_frame();

        assert!(input.key_down(KeyCode::KeyW), "held state survives the frame");
        assert!(!input.key_pressed(KeyCode::KeyW), "edge state does not");
    }
}
