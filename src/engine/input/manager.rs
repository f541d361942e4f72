// Input engine - the per-tick poll/diff/commit cycle and the core-facing query surface

use super::action::{ActionId, ACTION_LAST};
use super::binding::BindingTable;
use super::config::{InputSettings, KeyboardBindings};
use super::device::{DeviceEvent, JoypadSource, KeyboardSource};
use super::edge::{self, Edges};
use super::history::{History, HistorySnapshot, Tick, HISTORY_DEPTH};
use super::player::{ActionVector, InputState, MAX_PLAYERS};
use super::poller::DevicePoller;
use super::InputError;

/// Generalized joypad device class
pub const DEVICE_JOYPAD: u32 = 1;

/// Bits of a device id that carry the base class; the rest is the subclass
pub const DEVICE_TYPE_MASK: u32 = 0xff;

/// Operational state of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No tick processed since creation or reset
    Idle,
    /// At least one poll/diff/commit cycle has completed
    Polled,
}

/// Owns bindings, the live snapshot and every player's history
pub struct InputEngine<K, J> {
    keyboard: K,
    joypads: J,

    joypad_bindings: BindingTable,
    keyboard_bindings: KeyboardBindings,
    map_axis_to_dpad: bool,

    /// Vectors polled during the current tick; also the last committed
    /// vectors once the next cycle starts
    live: InputState,

    /// Edges computed by the last cycle
    edges: Edges,

    history: History,
    tick: Tick,
    state: EngineState,
}

impl<K: KeyboardSource, J: JoypadSource> InputEngine<K, J> {
    /// Create an engine with the built-in bindings
    pub fn new(keyboard: K, joypads: J) -> Self {
        Self::with_settings(keyboard, joypads, &InputSettings::default())
    }

    /// Create an engine from user settings
    pub fn with_settings(keyboard: K, joypads: J, settings: &InputSettings) -> Self {
        Self {
            keyboard,
            joypads,
            joypad_bindings: settings.binding_table(),
            keyboard_bindings: settings.keyboard_bindings(),
            map_axis_to_dpad: settings.map_axis_to_dpad,
            live: [ActionVector::new(); MAX_PLAYERS],
            edges: Edges::default(),
            history: History::new(HISTORY_DEPTH),
            tick: 0,
            state: EngineState::Idle,
        }
    }

    /// Run one poll, diff and commit cycle for `tick`
    /// Call this once per emulated frame, before the core queries input
    pub fn poll_tick(&mut self, tick: Tick) {
        let polled = self.sample();

        self.edges = edge::diff(&polled, &self.live);
        self.history.commit(tick, &polled);
        self.live = polled;
        self.tick = tick;
        self.state = EngineState::Polled;
    }

    /// Poll and diff without committing or moving the tick
    ///
    /// For hosts that keep reading hotkeys while emulation is paused; the
    /// ring slot of the paused tick keeps the vector the core consumed.
    pub fn poll_paused(&mut self) {
        let polled = self.sample();

        self.edges = edge::diff(&polled, &self.live);
        self.live = polled;
    }

    fn sample(&self) -> InputState {
        DevicePoller::new(
            &self.joypad_bindings,
            &self.keyboard_bindings,
            self.map_axis_to_dpad,
        )
        .poll(&self.keyboard, &self.joypads)
    }

    /// Core input callback: 1 if the button is held, 0 otherwise
    ///
    /// Any out-of-contract argument reads as 0.
    pub fn query(&self, port: u32, device: u32, index: u32, id: u32) -> i16 {
        let (port, id) = (port as usize, id as usize);
        if id >= ACTION_LAST
            || index != 0
            || port >= MAX_PLAYERS
            || device & DEVICE_TYPE_MASK != DEVICE_JOYPAD
        {
            return 0;
        }
        i16::from(self.live[port].get(id))
    }

    /// Check if an action is held in the live snapshot
    pub fn is_pressed(&self, player: usize, action: ActionId) -> bool {
        self.live
            .get(player)
            .is_some_and(|vector| vector.is_pressed(action))
    }

    /// Check if an action was pressed during the last tick
    pub fn just_pressed(&self, player: usize, action: ActionId) -> bool {
        self.edges
            .pressed
            .get(player)
            .is_some_and(|vector| vector.is_pressed(action))
    }

    /// Check if an action was released during the last tick
    pub fn just_released(&self, player: usize, action: ActionId) -> bool {
        self.edges
            .released
            .get(player)
            .is_some_and(|vector| vector.is_pressed(action))
    }

    /// Check if any player pressed an action during the last tick
    pub fn any_player_just_pressed(&self, action: ActionId) -> bool {
        self.edges
            .pressed
            .iter()
            .any(|vector| vector.is_pressed(action))
    }

    /// Live snapshot for a player
    pub fn live(&self, player: usize) -> Option<&ActionVector> {
        self.live.get(player)
    }

    /// Edges computed by the last cycle
    pub fn edges(&self) -> &Edges {
        &self.edges
    }

    /// Read a player's committed vector `offset` ticks from the last polled tick
    pub fn history(&self, player: usize, offset: i64) -> Result<ActionVector, InputError> {
        self.history.get(player, self.tick, offset)
    }

    /// Clear a player's history, e.g. when a new device is assigned to it
    pub fn initialize(&mut self, player: usize) -> Result<(), InputError> {
        self.history.initialize(player)
    }

    /// Capture all history for a save state
    pub fn snapshot(&self) -> HistorySnapshot {
        log::debug!("Captured input history at tick {}", self.tick);
        self.history.snapshot()
    }

    /// Replace all history from a save state
    ///
    /// A blob of the wrong shape is rejected as a whole and nothing changes.
    pub fn restore(&mut self, snapshot: &HistorySnapshot) -> Result<(), InputError> {
        match self.history.restore(snapshot) {
            Ok(()) => {
                log::debug!("Restored input history at tick {}", self.tick);
                Ok(())
            }
            Err(e) => {
                log::warn!("Rejected input history restore: {}", e);
                Err(e)
            }
        }
    }

    /// Drop all live state and history, back to idle
    pub fn reset(&mut self) {
        self.live = [ActionVector::new(); MAX_PLAYERS];
        self.edges = Edges::default();
        self.history.initialize_all();
        self.tick = 0;
        self.state = EngineState::Idle;
        log::info!("Input session reset");
    }

    /// Check if a device name has an auto-configuration
    pub fn has_binding(&self, name: &str) -> bool {
        self.joypad_bindings.has_binding(name)
    }

    /// Handle a hot-plug notification for a joypad slot
    pub fn device_event(&mut self, joy: usize, event: DeviceEvent) {
        match event {
            DeviceEvent::Connected => {
                let name = self.joypads.name(joy).unwrap_or("<unnamed>");
                if self.joypad_bindings.has_binding(name) {
                    log::info!("Joypad #{} plugged: {}", joy, name);
                } else {
                    log::warn!("Joypad #{} plugged: {} but not configured", joy, name);
                }
            }
            DeviceEvent::Disconnected => {
                log::info!("Joypad #{} unplugged", joy);
            }
        }
    }

    /// Get the operational state
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Tick of the last poll cycle
    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn keyboard(&self) -> &K {
        &self.keyboard
    }

    pub fn keyboard_mut(&mut self) -> &mut K {
        &mut self.keyboard
    }

    pub fn joypads(&self) -> &J {
        &self.joypads
    }

    pub fn joypads_mut(&mut self) -> &mut J {
        &mut self.joypads
    }

    /// Get the joypad auto-configuration table
    pub fn joypad_bindings(&self) -> &BindingTable {
        &self.joypad_bindings
    }

    /// Get mutable joypad auto-configuration table
    pub fn joypad_bindings_mut(&mut self) -> &mut BindingTable {
        &mut self.joypad_bindings
    }

    /// Get the keyboard table
    pub fn keyboard_bindings(&self) -> &KeyboardBindings {
        &self.keyboard_bindings
    }

    /// Get mutable keyboard table
    pub fn keyboard_bindings_mut(&mut self) -> &mut KeyboardBindings {
        &mut self.keyboard_bindings
    }

    pub fn set_map_axis_to_dpad(&mut self, enabled: bool) {
        self.map_axis_to_dpad = enabled;
    }
}
