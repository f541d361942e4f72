// Device capability interfaces polled by the engine

use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Keyboard readings for the local player
pub trait KeyboardSource {
    fn is_key_pressed(&self, key: KeyCode) -> bool;
}

/// Joypad readings, addressed by joypad slot
///
/// A slot whose `name` is `None` is not connected.
pub trait JoypadSource {
    fn name(&self, joy: usize) -> Option<&str>;
    fn buttons(&self, joy: usize) -> &[bool];
    fn axes(&self, joy: usize) -> &[f32];
}

/// Hot-plug notification for a joypad slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceEvent {
    Connected,
    Disconnected,
}

/// Keyboard state accumulated from winit key events
#[derive(Debug, Default)]
pub struct KeyboardState {
    held: HashSet<KeyCode>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key_code) = event.physical_key {
            match event.state {
                ElementState::Pressed => {
                    if !event.repeat {
                        self.press(key_code);
                    }
                }
                ElementState::Released => self.release(key_code),
            }
        }
    }

    pub fn press(&mut self, key: KeyCode) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.held.remove(&key);
    }

    /// Release everything, e.g. when the window loses focus
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

impl KeyboardSource for KeyboardState {
    fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }
}

#[derive(Debug, Clone, Default)]
struct VirtualPad {
    name: String,
    buttons: Vec<bool>,
    axes: Vec<f32>,
}

/// In-memory joypads, one per slot
#[derive(Debug, Clone, Default)]
pub struct VirtualJoypads {
    slots: Vec<Option<VirtualPad>>,
}

impl VirtualJoypads {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plug a pad into a slot with the given button and axis counts
    pub fn connect(&mut self, joy: usize, name: &str, button_count: usize, axis_count: usize) {
        if self.slots.len() <= joy {
            self.slots.resize(joy + 1, None);
        }
        self.slots[joy] = Some(VirtualPad {
            name: name.to_string(),
            buttons: vec![false; button_count],
            axes: vec![0.0; axis_count],
        });
    }

    /// Unplug a slot
    pub fn disconnect(&mut self, joy: usize) {
        if let Some(slot) = self.slots.get_mut(joy) {
            *slot = None;
        }
    }

    /// Set a button; ignored when the slot or index does not exist
    pub fn set_button(&mut self, joy: usize, index: usize, pressed: bool) {
        if let Some(button) = self.pad_mut(joy).and_then(|pad| pad.buttons.get_mut(index)) {
            *button = pressed;
        }
    }

    /// Set an axis; ignored when the slot or index does not exist
    pub fn set_axis(&mut self, joy: usize, index: usize, value: f32) {
        if let Some(axis) = self.pad_mut(joy).and_then(|pad| pad.axes.get_mut(index)) {
            *axis = value;
        }
    }

    /// Check if a slot is connected
    pub fn is_connected(&self, joy: usize) -> bool {
        self.pad(joy).is_some()
    }

    fn pad(&self, joy: usize) -> Option<&VirtualPad> {
        self.slots.get(joy).and_then(Option::as_ref)
    }

    fn pad_mut(&mut self, joy: usize) -> Option<&mut VirtualPad> {
        self.slots.get_mut(joy).and_then(Option::as_mut)
    }
}

impl JoypadSource for VirtualJoypads {
    fn name(&self, joy: usize) -> Option<&str> {
        self.pad(joy).map(|pad| pad.name.as_str())
    }

    fn buttons(&self, joy: usize) -> &[bool] {
        self.pad(joy).map(|pad| pad.buttons.as_slice()).unwrap_or(&[])
    }

    fn axes(&self, joy: usize) -> &[f32] {
        self.pad(joy).map(|pad| pad.axes.as_slice()).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_press_release() {
        let mut keyboard = KeyboardState::new();
        keyboard.press(KeyCode::ArrowDown);
        assert!(keyboard.is_key_pressed(KeyCode::ArrowDown));

        keyboard.release(KeyCode::ArrowDown);
        assert!(!keyboard.is_key_pressed(KeyCode::ArrowDown));
    }

    #[test]
    fn test_keyboard_clear() {
        let mut keyboard = KeyboardState::new();
        keyboard.press(KeyCode::KeyX);
        keyboard.press(KeyCode::KeyZ);
        keyboard.clear();
        assert!(!keyboard.is_key_pressed(KeyCode::KeyX));
        assert!(!keyboard.is_key_pressed(KeyCode::KeyZ));
    }

    #[test]
    fn test_disconnected_slot_reads_empty() {
        let pads = VirtualJoypads::new();
        assert_eq!(pads.name(3), None);
        assert!(pads.buttons(3).is_empty());
        assert!(pads.axes(3).is_empty());
    }

    #[test]
    fn test_connect_and_set() {
        let mut pads = VirtualJoypads::new();
        pads.connect(2, "Xbox 360 Controller", 15, 6);
        pads.set_button(2, 3, true);
        pads.set_axis(2, 1, -0.25);

        assert!(pads.is_connected(2));
        assert!(!pads.is_connected(0));
        assert_eq!(pads.name(2), Some("Xbox 360 Controller"));
        assert_eq!(pads.buttons(2).len(), 15);
        assert!(pads.buttons(2)[3]);
        approx::assert_relative_eq!(pads.axes(2)[1], -0.25);
    }

    #[test]
    fn test_set_out_of_range_is_ignored() {
        let mut pads = VirtualJoypads::new();
        pads.connect(0, "Pad", 2, 1);
        pads.set_button(0, 9, true);
        pads.set_axis(0, 4, 1.0);
        pads.set_button(4, 0, true);

        assert_eq!(pads.buttons(0), &[false, false]);
        assert_eq!(pads.axes(0).len(), 1);
    }

    #[test]
    fn test_disconnect() {
        let mut pads = VirtualJoypads::new();
        pads.connect(1, "Pad", 4, 2);
        pads.disconnect(1);
        assert!(!pads.is_connected(1));
        pads.disconnect(7);
    }
}
