// Device polling: physical readings to logical action vectors

use super::action::ActionId;
use super::binding::BindingTable;
use super::config::KeyboardBindings;
use super::device::{JoypadSource, KeyboardSource};
use super::player::{ActionVector, InputState, LOCAL_PLAYER, MAX_PLAYERS};

/// Axis magnitude for the axis-to-d-pad shortcut
const DPAD_AXIS_THRESHOLD: f32 = 0.5;

/// Samples every device once per tick
pub struct DevicePoller<'a> {
    joypad_bindings: &'a BindingTable,
    keyboard_bindings: &'a KeyboardBindings,
    map_axis_to_dpad: bool,
}

impl<'a> DevicePoller<'a> {
    pub fn new(
        joypad_bindings: &'a BindingTable,
        keyboard_bindings: &'a KeyboardBindings,
        map_axis_to_dpad: bool,
    ) -> Self {
        Self {
            joypad_bindings,
            keyboard_bindings,
            map_axis_to_dpad,
        }
    }

    /// Build a fresh action vector for every player
    pub fn poll(&self, keyboard: &dyn KeyboardSource, joypads: &dyn JoypadSource) -> InputState {
        let mut polled = [ActionVector::new(); MAX_PLAYERS];
        self.poll_keyboard(keyboard, &mut polled[LOCAL_PLAYER]);
        for (joy, vector) in polled.iter_mut().enumerate() {
            self.poll_joypad(joypads, joy, vector);
        }
        polled
    }

    fn poll_keyboard(&self, keyboard: &dyn KeyboardSource, vector: &mut ActionVector) {
        for (key, action) in self.keyboard_bindings.iter() {
            if keyboard.is_key_pressed(key) {
                vector.press(action);
            }
        }
    }

    fn poll_joypad(&self, joypads: &dyn JoypadSource, joy: usize, vector: &mut ActionVector) {
        let Some(bindings) = joypads
            .name(joy)
            .and_then(|name| self.joypad_bindings.resolve(name))
        else {
            return;
        };

        let buttons = joypads.buttons(joy);
        let axes = joypads.axes(joy);

        for binding in bindings {
            if binding.is_active(buttons, axes) {
                vector.press(binding.action);
            }
        }

        if self.map_axis_to_dpad {
            apply_axis_dpad(axes, vector);
        }
    }
}

/// Derive d-pad bits from axes 0 (horizontal) and 1 (vertical)
fn apply_axis_dpad(axes: &[f32], vector: &mut ActionVector) {
    if let Some(&x) = axes.first() {
        if x < -DPAD_AXIS_THRESHOLD {
            vector.press(ActionId::Left);
        } else if x > DPAD_AXIS_THRESHOLD {
            vector.press(ActionId::Right);
        }
    }
    if let Some(&y) = axes.get(1) {
        if y > DPAD_AXIS_THRESHOLD {
            vector.press(ActionId::Down);
        } else if y < -DPAD_AXIS_THRESHOLD {
            vector.press(ActionId::Up);
        }
    }
}
