// gilrs joypad backend for the host
//
// Mirrors connected gamepads into `VirtualJoypads` slots using the raw
// XInput button/axis order, so the built-in Xbox profiles resolve them.

use super::device::{DeviceEvent, JoypadSource, VirtualJoypads};
use super::player::MAX_PLAYERS;
use super::InputError;
use gilrs::{Axis, Button, EventType, Gamepad, Gilrs};

/// Buttons reported per pad
pub const BUTTON_COUNT: usize = 15;

/// gilrs buttons in XInput index order
pub const BUTTON_LAYOUT: [Button; BUTTON_COUNT] = [
    Button::South,
    Button::East,
    Button::West,
    Button::North,
    Button::LeftTrigger,
    Button::RightTrigger,
    Button::Select,
    Button::Start,
    Button::Mode,
    Button::LeftThumb,
    Button::RightThumb,
    Button::DPadUp,
    Button::DPadRight,
    Button::DPadDown,
    Button::DPadLeft,
];

/// Left stick, left trigger, right stick, right trigger
pub const AXIS_COUNT: usize = 6;

/// Button states in `BUTTON_LAYOUT` order
pub fn read_buttons(is_pressed: impl Fn(Button) -> bool) -> [bool; BUTTON_COUNT] {
    BUTTON_LAYOUT.map(is_pressed)
}

/// Axis values in XInput order
///
/// gilrs reports stick Y as positive up; the profiles expect positive down.
pub fn read_axes(
    value: impl Fn(Axis) -> f32,
    trigger: impl Fn(Button) -> f32,
) -> [f32; AXIS_COUNT] {
    [
        value(Axis::LeftStickX),
        -value(Axis::LeftStickY),
        trigger(Button::LeftTrigger2),
        value(Axis::RightStickX),
        -value(Axis::RightStickY),
        trigger(Button::RightTrigger2),
    ]
}

fn trigger_value(gamepad: &Gamepad<'_>, button: Button) -> f32 {
    gamepad.button_data(button).map_or(0.0, |data| data.value())
}

/// Joypad source backed by gilrs
pub struct GilrsJoypads {
    gilrs: Gilrs,
    pads: VirtualJoypads,
}

impl GilrsJoypads {
    pub fn new() -> Result<Self, InputError> {
        let gilrs = match Gilrs::new() {
            Ok(gilrs) => gilrs,
            Err(gilrs::Error::NotImplemented(dummy)) => {
                log::warn!("Gamepads are not supported on this platform");
                dummy
            }
            Err(e) => return Err(InputError::Gamepad(e.to_string())),
        };

        Ok(Self {
            gilrs,
            pads: VirtualJoypads::new(),
        })
    }

    /// Drain gilrs events and refresh every slot
    ///
    /// Returns the hot-plug changes since the last call, for
    /// `InputEngine::device_event`.
    pub fn sync(&mut self) -> Vec<(usize, DeviceEvent)> {
        let mut changes = Vec::new();

        while let Some(event) = self.gilrs.next_event() {
            let joy = usize::from(event.id);
            if matches!(event.event, EventType::Disconnected) && self.pads.is_connected(joy) {
                self.pads.disconnect(joy);
                changes.push((joy, DeviceEvent::Disconnected));
            }
        }

        for (id, gamepad) in self.gilrs.gamepads() {
            let joy = usize::from(id);
            if joy >= MAX_PLAYERS {
                continue;
            }
            if !self.pads.is_connected(joy) {
                self.pads
                    .connect(joy, gamepad.name(), BUTTON_COUNT, AXIS_COUNT);
                changes.push((joy, DeviceEvent::Connected));
            }

            let buttons = read_buttons(|button| gamepad.is_pressed(button));
            for (index, pressed) in buttons.into_iter().enumerate() {
                self.pads.set_button(joy, index, pressed);
            }
            let axes = read_axes(
                |axis| gamepad.value(axis),
                |button| trigger_value(&gamepad, button),
            );
            for (index, value) in axes.into_iter().enumerate() {
                self.pads.set_axis(joy, index, value);
            }
        }

        changes
    }
}

impl JoypadSource for GilrsJoypads {
    fn name(&self, joy: usize) -> Option<&str> {
        self.pads.name(joy)
    }

    fn buttons(&self, joy: usize) -> &[bool] {
        self.pads.buttons(joy)
    }

    fn axes(&self, joy: usize) -> &[f32] {
        self.pads.axes(joy)
    }
}
