// Input state engine
//
// Turns raw keyboard and joypad readings into one logical action vector per
// player each emulated frame, detects press/release edges, and keeps a
// tick-indexed history for rewind and save states.
//
// ## Architecture
//
// - `action`: Logical action ids and the default keyboard table
// - `player`: Per-player action vectors
// - `binding`: Joypad bindings and auto-configuration profiles
// - `config`: Keyboard table and TOML settings
// - `device`: Keyboard/joypad capability traits and in-memory backends
// - `gamepad`: gilrs-backed joypads for the host (`gamepad` feature)
// - `poller`: Samples devices into action vectors
// - `edge`: Press/release detection
// - `history`: Tick-indexed ring buffers and save-state blobs
// - `manager`: The engine coordinating everything
//
// ## Usage Example
//
// ```rust
// use rusted_input::engine::input::{ActionId, InputEngine, KeyboardState, VirtualJoypads};
// use rusted_input::engine::input::manager::DEVICE_JOYPAD;
//
// let mut engine = InputEngine::new(KeyboardState::new(), VirtualJoypads::new());
//
// // Once per emulated frame
// engine.poll_tick(tick);
//
// // From the core's input callback, any number of times
// let held = engine.query(0, DEVICE_JOYPAD, 0, ActionId::Down as u32);
//
// // Host hotkeys
// if engine.just_pressed(0, ActionId::MenuToggle) {
//     // open the menu
// }
// ```

pub mod action;
pub mod binding;
pub mod config;
pub mod device;
pub mod edge;
#[cfg(feature = "gamepad")]
pub mod gamepad;
pub mod history;
pub mod manager;
pub mod player;
pub mod poller;

// Re-export commonly used types
pub use action::{ActionId, ACTION_LAST};
pub use binding::{Binding, BindingProfile, BindingTable, SourceKind};
pub use config::{InputSettings, KeyboardBindings};
pub use device::{DeviceEvent, JoypadSource, KeyboardSource, KeyboardState, VirtualJoypads};
#[cfg(feature = "gamepad")]
pub use gamepad::GilrsJoypads;
pub use history::{HistorySnapshot, Tick, HISTORY_DEPTH};
pub use manager::{EngineState, InputEngine};
pub use player::{ActionVector, InputState, MAX_PLAYERS};

/// Input engine errors
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error(
        "History shape mismatch: expected {expected_players} players x {expected_depth} ticks, \
         got {found_players} players x {found_depth} ticks"
    )]
    ShapeMismatch {
        expected_players: usize,
        expected_depth: usize,
        found_players: usize,
        found_depth: usize,
    },

    #[error("Unsupported history snapshot version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("History offset {offset} out of range for depth {depth}")]
    OffsetOutOfRange { offset: i64, depth: usize },

    #[error("Invalid player slot: {0}")]
    InvalidPlayer(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Gamepad backend unavailable: {0}")]
    Gamepad(String),
}
