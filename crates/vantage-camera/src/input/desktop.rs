//! Keyboard and mouse input through winit events

use std::collections::{HashMap, HashSet};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::{AxisSmoother, InputFrame, InputProvider, DEFAULT_SENSITIVITY, ZOOM_SENSITIVITY};
use crate::config::CameraConfig;

/// Camera actions that can be bound to keys or mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RigAction {
    /// Move / pan forward (W by default)
    MoveForward,
    /// Move / pan backward (S by default)
    MoveBackward,
    /// Strafe left (A by default)
    MoveLeft,
    /// Strafe right (D by default)
    MoveRight,
    /// Keyboard yaw (Q by default)
    RotateLeft,
    /// Keyboard yaw (E by default)
    RotateRight,
    /// Mouse motion rotates while held (middle mouse by default)
    Rotate,
    /// Switch to the next behaviour (Tab by default)
    SwitchBehaviour,
}

/// Binding of a physical input to an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputBinding {
    /// Keyboard key
    Key(KeyCode),
    /// Mouse button
    Mouse(u32), // 0 = left, 1 = right, 2 = middle
}

/// Maps physical inputs to camera actions
#[derive(Debug, Clone)]
pub struct RigBindings {
    bindings: HashMap<InputBinding, RigAction>,
}

impl Default for RigBindings {
    fn default() -> Self {
        let mut bindings = Self {
            bindings: HashMap::new(),
        };

        bindings.bind(KeyCode::KeyW, RigAction::MoveForward);
        bindings.bind(KeyCode::KeyS, RigAction::MoveBackward);
        bindings.bind(KeyCode::KeyA, RigAction::MoveLeft);
        bindings.bind(KeyCode::KeyD, RigAction::MoveRight);

        bindings.bind(KeyCode::ArrowUp, RigAction::MoveForward);
        bindings.bind(KeyCode::ArrowDown, RigAction::MoveBackward);
        bindings.bind(KeyCode::ArrowLeft, RigAction::MoveLeft);
        bindings.bind(KeyCode::ArrowRight, RigAction::MoveRight);

        bindings.bind(KeyCode::KeyQ, RigAction::RotateLeft);
        bindings.bind(KeyCode::KeyE, RigAction::RotateRight);
        bindings.bind_mouse(2, RigAction::Rotate);
        bindings.bind(KeyCode::Tab, RigAction::SwitchBehaviour);

        bindings
    }
}

impl RigBindings {
    /// Bind a key to an action
    pub fn bind(&mut self, key: KeyCode, action: RigAction) {
        self.bindings.insert(InputBinding::Key(key), action);
    }

    /// Bind a mouse button to an action
    pub fn bind_mouse(&mut self, button: u32, action: RigAction) {
        self.bindings.insert(InputBinding::Mouse(button), action);
    }

    /// Remove a key binding
    pub fn unbind(&mut self, key: KeyCode) {
        self.bindings.remove(&InputBinding::Key(key));
    }

    /// Action bound to an input, if any
    pub fn get_action(&self, binding: &InputBinding) -> Option<RigAction> {
        self.bindings.get(binding).copied()
    }
}

/// Desktop input provider.
///
/// Feed it winit events as they arrive; the rig polls it once per tick.
#[derive(Debug)]
pub struct DesktopInput {
    pub bindings: RigBindings,
    /// Scale applied to raw mouse motion
    pub mouse_scale: f32,
    /// Scale applied to scroll lines
    pub scroll_scale: f32,
    /// Yaw input produced by the rotate keys
    pub keyboard_rotation_speed: f32,
    /// Invert vertical mouse motion
    pub invert_y: bool,
    held: HashSet<RigAction>,
    switch_pressed: bool,
    mouse_delta: Vec2,
    scroll_delta: f32,
    move_x: AxisSmoother,
    move_y: AxisSmoother,
    rotate_x: AxisSmoother,
    rotate_y: AxisSmoother,
    zoom: AxisSmoother,
}

impl Default for DesktopInput {
    fn default() -> Self {
        Self::with_config(&CameraConfig::default())
    }
}

impl DesktopInput {
    /// Create a provider using the keyboard rotation speed from `config`
    pub fn with_config(config: &CameraConfig) -> Self {
        Self {
            bindings: RigBindings::default(),
            mouse_scale: 0.1,
            scroll_scale: 0.1,
            keyboard_rotation_speed: config.keyboard_rotation_speed,
            invert_y: false,
            held: HashSet::new(),
            switch_pressed: false,
            mouse_delta: Vec2::ZERO,
            scroll_delta: 0.0,
            move_x: AxisSmoother::new(DEFAULT_SENSITIVITY),
            move_y: AxisSmoother::new(DEFAULT_SENSITIVITY),
            rotate_x: AxisSmoother::new(DEFAULT_SENSITIVITY),
            rotate_y: AxisSmoother::new(DEFAULT_SENSITIVITY),
            zoom: AxisSmoother::new(ZOOM_SENSITIVITY),
        }
    }

    /// Handle a keyboard event
    pub fn handle_keyboard(&mut self, physical_key: PhysicalKey, element_state: ElementState) {
        if let PhysicalKey::Code(key_code) = physical_key {
            self.apply(InputBinding::Key(key_code), element_state);
        }
    }

    /// Handle a mouse button event
    pub fn handle_mouse_button(&mut self, button: MouseButton, element_state: ElementState) {
        let button_id = match button {
            MouseButton::Left => 0,
            MouseButton::Right => 1,
            MouseButton::Middle => 2,
            MouseButton::Back => 3,
            MouseButton::Forward => 4,
            MouseButton::Other(id) => id as u32,
        };
        self.apply(InputBinding::Mouse(button_id), element_state);
    }

    /// Handle raw mouse motion
    pub fn handle_mouse_motion(&mut self, delta: (f64, f64)) {
        self.mouse_delta += Vec2::new(delta.0 as f32, delta.1 as f32);
    }

    /// Handle scroll wheel
    pub fn handle_scroll(&mut self, delta: MouseScrollDelta) {
        self.scroll_delta += match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 120.0,
        };
    }

    /// Whether an action is currently held
    pub fn is_held(&self, action: RigAction) -> bool {
        self.held.contains(&action)
    }

    fn apply(&mut self, binding: InputBinding, element_state: ElementState) {
        let Some(action) = self.bindings.get_action(&binding) else {
            return;
        };
        match element_state {
            ElementState::Pressed => {
                if action == RigAction::SwitchBehaviour && !self.held.contains(&action) {
                    self.switch_pressed = true;
                }
                self.held.insert(action);
            }
            ElementState::Released => {
                self.held.remove(&action);
            }
        }
    }

    fn axis(&self, positive: RigAction, negative: RigAction) -> f32 {
        let mut value = 0.0;
        if self.is_held(positive) {
            value += 1.0;
        }
        if self.is_held(negative) {
            value -= 1.0;
        }
        value
    }
}

impl InputProvider for DesktopInput {
    fn poll(&mut self, dt: f32) -> InputFrame {
        let raw_move_x = self.axis(RigAction::MoveRight, RigAction::MoveLeft);
        let raw_move_y = self.axis(RigAction::MoveForward, RigAction::MoveBackward);

        // Mouse moving up (negative winit y) is positive pitch input
        let (mut raw_rotate_x, mut raw_rotate_y) = (0.0, 0.0);
        if self.is_held(RigAction::Rotate) {
            let y_mult = if self.invert_y { 1.0 } else { -1.0 };
            raw_rotate_x = self.mouse_delta.y * self.mouse_scale * y_mult;
            raw_rotate_y = self.mouse_delta.x * self.mouse_scale;
        }
        raw_rotate_y +=
            self.axis(RigAction::RotateLeft, RigAction::RotateRight) * self.keyboard_rotation_speed;

        let raw_zoom = self.scroll_delta * self.scroll_scale;

        let frame = InputFrame {
            move_x: self.move_x.update(raw_move_x, dt),
            move_y: self.move_y.update(raw_move_y, dt),
            zoom: self.zoom.update(raw_zoom, dt),
            rotate_x: self.rotate_x.update(raw_rotate_x, dt),
            rotate_y: self.rotate_y.update(raw_rotate_y, dt),
            switch_behaviour: self.switch_pressed,
        };

        self.mouse_delta = Vec2::ZERO;
        self.scroll_delta = 0.0;
        self.switch_pressed = false;
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn press(input: &mut DesktopInput, key: KeyCode) {
        input.handle_keyboard(PhysicalKey::Code(key), ElementState::Pressed);
    }

    fn release(input: &mut DesktopInput, key: KeyCode) {
        input.handle_keyboard(PhysicalKey::Code(key), ElementState::Released);
    }

    #[test]
    fn test_default_bindings() {
        let bindings = RigBindings::default();
        assert_eq!(
            bindings.get_action(&InputBinding::Key(KeyCode::KeyW)),
            Some(RigAction::MoveForward)
        );
        assert_eq!(
            bindings.get_action(&InputBinding::Mouse(2)),
            Some(RigAction::Rotate)
        );
    }

    #[test]
    fn test_movement_keys() {
        let mut input = DesktopInput::default();
        press(&mut input, KeyCode::KeyW);
        press(&mut input, KeyCode::KeyA);

        let frame = input.poll(DT);
        assert_eq!(frame.move_y, 1.0);
        assert_eq!(frame.move_x, -1.0);

        release(&mut input, KeyCode::KeyW);
        let frame = input.poll(DT);
        assert!(frame.move_y > 0.0 && frame.move_y < 1.0);
    }

    #[test]
    fn test_mouse_rotates_only_while_button_held() {
        let mut input = DesktopInput::default();
        input.handle_mouse_motion((20.0, -10.0));
        let frame = input.poll(DT);
        assert_eq!(frame.rotate_x, 0.0);
        assert_eq!(frame.rotate_y, 0.0);

        input.handle_mouse_button(MouseButton::Middle, ElementState::Pressed);
        input.handle_mouse_motion((20.0, -10.0));
        let frame = input.poll(DT);
        assert!((frame.rotate_y - 2.0).abs() < 1e-5);
        assert!((frame.rotate_x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_rotate_keys_use_keyboard_speed() {
        let mut input = DesktopInput::default();
        press(&mut input, KeyCode::KeyQ);
        assert_eq!(input.poll(DT).rotate_y, 0.5);
        release(&mut input, KeyCode::KeyQ);
        press(&mut input, KeyCode::KeyE);
        assert_eq!(input.poll(DT).rotate_y, -0.5);
    }

    #[test]
    fn test_scroll_uses_zoom_sensitivity() {
        let mut input = DesktopInput::default();
        input.handle_scroll(MouseScrollDelta::LineDelta(0.0, 1.0));
        let frame = input.poll(DT);
        assert!((frame.zoom - 0.8).abs() < 1e-5);
    }

    #[test]
    fn test_switch_fires_once_per_press() {
        let mut input = DesktopInput::default();
        press(&mut input, KeyCode::Tab);
        press(&mut input, KeyCode::Tab);
        assert!(input.poll(DT).switch_behaviour);
        assert!(!input.poll(DT).switch_behaviour);
    }
}
