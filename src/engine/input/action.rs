// Logical action identifiers and the default keyboard table

use serde::{Deserialize, Serialize};
use winit::keyboard::KeyCode;

/// Exclusive upper bound of every action id
pub const ACTION_LAST: usize = 20;

/// A logical, device-independent input signal
///
/// The emulated-controller ids follow the libretro joypad layout so the
/// core can address them directly. Host hotkeys occupy the range right
/// above `R3`, which keeps `0..ACTION_LAST` contiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ActionId {
    // Face buttons and system buttons
    B = 0,
    Y = 1,
    Select = 2,
    Start = 3,

    // Directional pad
    Up = 4,
    Down = 5,
    Left = 6,
    Right = 7,

    A = 8,
    X = 9,

    // Shoulders and triggers
    L = 10,
    R = 11,
    L2 = 12,
    R2 = 13,

    // Analog stick clusters (stick clicks)
    L3 = 14,
    R3 = 15,

    // Host hotkeys
    MenuToggle = 16,
    FullscreenToggle = 17,
    ShouldClose = 18,
    FastForwardToggle = 19,
}

impl ActionId {
    /// Every action, in id order
    pub const ALL: [ActionId; ACTION_LAST] = [
        ActionId::B,
        ActionId::Y,
        ActionId::Select,
        ActionId::Start,
        ActionId::Up,
        ActionId::Down,
        ActionId::Left,
        ActionId::Right,
        ActionId::A,
        ActionId::X,
        ActionId::L,
        ActionId::R,
        ActionId::L2,
        ActionId::R2,
        ActionId::L3,
        ActionId::R3,
        ActionId::MenuToggle,
        ActionId::FullscreenToggle,
        ActionId::ShouldClose,
        ActionId::FastForwardToggle,
    ];

    /// Convert a raw id coming from the core; `None` when out of range
    pub fn from_index(id: usize) -> Option<Self> {
        Self::ALL.get(id).copied()
    }

    /// Index into an action vector
    pub fn index(self) -> usize {
        self as usize
    }

    /// Whether this is a host-level hotkey rather than an emulated button
    pub fn is_hotkey(self) -> bool {
        self >= ActionId::MenuToggle
    }
}

/// Default keyboard bindings for player 0
pub fn default_keyboard_bindings() -> Vec<(KeyCode, ActionId)> {
    vec![
        // Directional pad
        (KeyCode::ArrowUp, ActionId::Up),
        (KeyCode::ArrowDown, ActionId::Down),
        (KeyCode::ArrowLeft, ActionId::Left),
        (KeyCode::ArrowRight, ActionId::Right),
        // Face buttons (SNES-style diamond on the left hand)
        (KeyCode::KeyX, ActionId::A),
        (KeyCode::KeyZ, ActionId::B),
        (KeyCode::KeyS, ActionId::X),
        (KeyCode::KeyA, ActionId::Y),
        // Shoulders, triggers and stick clicks
        (KeyCode::KeyQ, ActionId::L),
        (KeyCode::KeyW, ActionId::R),
        (KeyCode::KeyE, ActionId::L2),
        (KeyCode::KeyR, ActionId::R2),
        (KeyCode::KeyT, ActionId::L3),
        (KeyCode::KeyY, ActionId::R3),
        (KeyCode::Enter, ActionId::Start),
        (KeyCode::Backspace, ActionId::Select),
        // Hotkeys
        (KeyCode::KeyP, ActionId::MenuToggle),
        (KeyCode::KeyF, ActionId::FullscreenToggle),
        (KeyCode::Space, ActionId::FastForwardToggle),
        (KeyCode::Escape, ActionId::ShouldClose),
    ]
}
