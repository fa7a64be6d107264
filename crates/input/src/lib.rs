//! Input handling for keyboard and mouse.
//!
//! [`InputState`] accumulates winit events; once per frame the game takes a
//! [`FrameInput`] snapshot for the motion controller and queries one-shot
//! keys (interact, dialog navigation) directly.

use glam::Vec2;
use std::collections::HashSet;

/// Per-frame movement snapshot consumed by the motion controller.
///
/// All fields default to false, so a frozen or scripted frame is just
/// `FrameInput::default()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    pub move_forward: bool,
    pub move_backward: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub is_running: bool,
    pub is_crouching: bool,
}

impl FrameInput {
    /// Movement direction on the ground plane: x = strafe, y = forward/back.
    /// Normalized so diagonals are not faster.
    pub fn movement_axes(&self) -> Vec2 {
        let mut movement = Vec2::ZERO;
        if self.move_forward {
            movement.y += 1.0;
        }
        if self.move_backward {
            movement.y -= 1.0;
        }
        if self.move_left {
            movement.x -= 1.0;
        }
        if self.move_right {
            movement.x += 1.0;
        }
        if movement.length_squared() > 0.0 {
            movement = movement.normalize();
        }
        movement
    }

    /// True if any directional key is down.
    pub fn any_movement(&self) -> bool {
        self.move_forward || self.move_backward || self.move_left || self.move_right
    }
}

/// Manages input state for the current frame.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Keys pressed this frame.
    keys_pressed: HashSet<KeyCode>,
    /// Keys released this frame.
    keys_released: HashSet<KeyCode>,

    /// Mouse buttons currently held.
    mouse_held: HashSet<MouseButton>,
    /// Mouse buttons pressed this frame.
    mouse_pressed: HashSet<MouseButton>,
    /// Mouse buttons released this frame.
    mouse_released: HashSet<MouseButton>,

    /// Mouse movement delta this frame.
    mouse_delta: Vec2,
    /// Accumulated mouse delta (for when cursor is locked).
    accumulated_delta: Vec2,

    /// Whether the cursor is captured/locked.
    cursor_locked: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame state. Call at the start of each frame.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.mouse_pressed.clear();
        self.mouse_released.clear();
        self.mouse_delta = self.accumulated_delta;
        self.accumulated_delta = Vec2::ZERO;
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.keys_held.contains(&key) {
                    self.keys_pressed.insert(key);
                }
                self.keys_held.insert(key);
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
                self.keys_released.insert(key);
            }
        }
    }

    /// Process a mouse button event.
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.mouse_held.contains(&button) {
                    self.mouse_pressed.insert(button);
                }
                self.mouse_held.insert(button);
            }
            ElementState::Released => {
                self.mouse_held.remove(&button);
                self.mouse_released.insert(button);
            }
        }
    }

    /// Process mouse movement.
    pub fn process_mouse_motion(&mut self, delta: (f64, f64)) {
        self.accumulated_delta.x += delta.0 as f32;
        self.accumulated_delta.y += delta.1 as f32;
    }

    // Query methods

    /// Check if a key is currently held.
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if a key was pressed this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a mouse button was pressed this frame.
    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse_pressed.contains(&button)
    }

    /// Get the mouse movement delta for this frame.
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    /// Check if the cursor is locked.
    pub fn is_cursor_locked(&self) -> bool {
        self.cursor_locked
    }

    /// Set cursor lock state.
    pub fn set_cursor_locked(&mut self, locked: bool) {
        self.cursor_locked = locked;
    }

    /// Snapshot the movement-related keys for the motion controller. When the
    /// cursor is not locked (menus, alt-tab) the snapshot is all-false so the
    /// player never drifts behind a dialog.
    pub fn frame_input(&self) -> FrameInput {
        if !self.cursor_locked {
            return FrameInput::default();
        }
        FrameInput {
            move_forward: self.is_key_held(KeyCode::KeyW),
            move_backward: self.is_key_held(KeyCode::KeyS),
            move_left: self.is_key_held(KeyCode::KeyA),
            move_right: self.is_key_held(KeyCode::KeyD),
            jump: self.is_key_held(KeyCode::Space),
            is_running: self.is_key_held(KeyCode::ShiftLeft)
                || self.is_key_held(KeyCode::ShiftRight),
            is_crouching: self.is_key_held(KeyCode::ControlLeft)
                || self.is_key_held(KeyCode::ControlRight),
        }
    }

    /// Check if interact was pressed (E or left click).
    pub fn is_interact_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::KeyE) || self.is_mouse_pressed(MouseButton::Left)
    }

    /// Check if confirm was pressed (Enter).
    pub fn is_confirm_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::Enter)
    }

    /// Check if cancel was pressed (Escape).
    pub fn is_cancel_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::Escape)
    }

    /// Check if backspace was pressed (keypad entry).
    pub fn is_backspace_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::Backspace)
    }

    /// Digit pressed this frame (0-9, top row or numpad), if any.
    /// Drives dialog choices and keypad entry.
    pub fn digit_pressed(&self) -> Option<u8> {
        const DIGITS: [(KeyCode, KeyCode, u8); 10] = [
            (KeyCode::Digit0, KeyCode::Numpad0, 0),
            (KeyCode::Digit1, KeyCode::Numpad1, 1),
            (KeyCode::Digit2, KeyCode::Numpad2, 2),
            (KeyCode::Digit3, KeyCode::Numpad3, 3),
            (KeyCode::Digit4, KeyCode::Numpad4, 4),
            (KeyCode::Digit5, KeyCode::Numpad5, 5),
            (KeyCode::Digit6, KeyCode::Numpad6, 6),
            (KeyCode::Digit7, KeyCode::Numpad7, 7),
            (KeyCode::Digit8, KeyCode::Numpad8, 8),
            (KeyCode::Digit9, KeyCode::Numpad9, 9),
        ];
        for (row, pad, value) in DIGITS {
            if self.is_key_pressed(row) || self.is_key_pressed(pad) {
                return Some(value);
            }
        }
        None
    }
}

// Re-export for convenience
pub use winit::event::{ElementState, MouseButton};
pub use winit::keyboard::KeyCode;
